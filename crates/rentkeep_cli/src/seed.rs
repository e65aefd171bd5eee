//! Sample data for trying the tracker out.

use chrono::{Duration, NaiveDate};
use rentkeep_core::{
    CompletionStatus, Contact, ContactRepository, OwnerId, PaymentStatus, Property,
    PropertyRepository, RecordId, RecurrenceInterval, RepoResult, Task, TaskStore,
};

/// Row counts inserted by [`seed_sample_data`].
pub struct SeedCounts {
    pub properties: usize,
    pub contacts: usize,
    pub tasks: usize,
}

struct TaskSeed {
    property: usize,
    contact: usize,
    description: &'static str,
    start: NaiveDate,
    end: NaiveDate,
    cost: f64,
    paid: bool,
    complete: bool,
    interval: Option<RecurrenceInterval>,
    notes: &'static str,
}

pub fn seed_sample_data(
    properties: &impl PropertyRepository,
    contacts: &impl ContactRepository,
    tasks: &impl TaskStore,
    owner: Option<OwnerId>,
    today: NaiveDate,
) -> RepoResult<SeedCounts> {
    let property_rows = [
        ("Downtown Loft", "123 Main St, New York, NY", "active"),
        ("Beach House", "456 Ocean Dr, Miami, FL", "active"),
        ("Mountain Cabin", "789 Pine Rd, Denver, CO", "inactive"),
    ];
    let mut property_ids: Vec<RecordId> = Vec::with_capacity(property_rows.len());
    for (name, address, status) in property_rows {
        let mut property = Property::new(name, address);
        property.owner = owner;
        property.status = status.to_string();
        property_ids.push(properties.create_property(&property)?);
    }

    #[rustfmt::skip]
    let contact_rows = [
        ("John Smith", "Smith Plumbing", "555-0101", "john@smithplumbing.com", "plumber"),
        ("Sarah Johnson", "Johnson Electric", "555-0102", "sarah@johnsonelectric.com", "electrician"),
        ("Mike Brown", "Brown HVAC", "555-0103", "mike@brownhvac.com", "hvac"),
        ("Lisa Davis", "Davis Landscaping", "555-0104", "lisa@davislscape.com", "landscaping"),
        ("Tom Wilson", "Wilson Repairs", "555-0105", "tom@wilsonrepairs.com", "general"),
    ];
    let mut contact_ids: Vec<RecordId> = Vec::with_capacity(contact_rows.len());
    for (name, company, phone, email, service_type) in contact_rows {
        let contact = Contact {
            id: None,
            owner,
            name: name.to_string(),
            company: company.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            service_type: service_type.to_string(),
        };
        contact_ids.push(contacts.create_contact(&contact)?);
    }

    let last_month = today - Duration::days(30);
    let next_month = today + Duration::days(30);
    #[rustfmt::skip]
    let task_rows = [
        TaskSeed { property: 0, contact: 0, description: "Fix leaky faucet in kitchen", start: last_month, end: today, cost: 150.0, paid: true, complete: true, interval: None, notes: "Kitchen sink" },
        TaskSeed { property: 0, contact: 1, description: "Electrical inspection", start: last_month, end: last_month, cost: 200.0, paid: true, complete: true, interval: None, notes: "" },
        TaskSeed { property: 1, contact: 0, description: "Monthly pool maintenance", start: last_month, end: next_month, cost: 300.0, paid: false, complete: false, interval: Some(RecurrenceInterval::Monthly), notes: "" },
        TaskSeed { property: 1, contact: 3, description: "Lawn mowing", start: last_month, end: last_month, cost: 100.0, paid: true, complete: true, interval: Some(RecurrenceInterval::Weekly), notes: "" },
        TaskSeed { property: 0, contact: 4, description: "General repairs", start: today, end: today, cost: 75.0, paid: false, complete: false, interval: None, notes: "Various small fixes" },
        TaskSeed { property: 2, contact: 2, description: "Heater inspection", start: last_month, end: last_month, cost: 180.0, paid: true, complete: true, interval: Some(RecurrenceInterval::Yearly), notes: "" },
        TaskSeed { property: 1, contact: 1, description: "Install outdoor lights", start: today, end: today, cost: 250.0, paid: false, complete: false, interval: None, notes: "" },
        TaskSeed { property: 0, contact: 0, description: "Emergency pipe repair", start: last_month, end: last_month, cost: 400.0, paid: true, complete: true, interval: None, notes: "" },
    ];

    for row in &task_rows {
        let mut task = Task::new(row.description);
        task.owner = owner;
        task.property_id = Some(property_ids[row.property]);
        task.contact_id = Some(contact_ids[row.contact]);
        task.start_date = row.start.format("%Y-%m-%d").to_string();
        task.end_date = row.end.format("%Y-%m-%d").to_string();
        task.cost = row.cost;
        task.payment_status = if row.paid {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Unpaid
        };
        task.completion_status = if row.complete {
            CompletionStatus::Complete
        } else {
            CompletionStatus::Incomplete
        };
        if let Some(interval) = row.interval {
            task = task.recurring_every(interval);
        }
        task.notes = row.notes.to_string();
        tasks.insert_task(&task)?;
    }

    Ok(SeedCounts {
        properties: property_ids.len(),
        contacts: contact_ids.len(),
        tasks: task_rows.len(),
    })
}
