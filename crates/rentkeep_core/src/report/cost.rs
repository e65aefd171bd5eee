//! Paid/unpaid summary and monthly per-property breakdown.

use crate::model::period::MonthPeriod;
use crate::model::property::Property;
use crate::model::task::{PaymentStatus, Task};
use crate::model::RecordId;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Key of the synthetic grand total in [`MonthlyBreakdown::to_flat_map`].
pub const TOTAL_KEY: &str = "total";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CostSummary {
    pub paid: f64,
    pub unpaid: f64,
    pub total: f64,
}

/// Costs of tasks starting in one month, grouped by property name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBreakdown {
    pub period: MonthPeriod,
    /// Properties sharing a name are merged under that name.
    pub by_property: BTreeMap<String, f64>,
    /// Cost of matching tasks whose property is unset or unknown.
    pub unassigned: f64,
    /// `sum(by_property) + unassigned`.
    pub total: f64,
}

impl MonthlyBreakdown {
    /// `name -> amount` map plus a `total` entry.
    ///
    /// A property literally named `total` is shadowed by the grand total.
    pub fn to_flat_map(&self) -> BTreeMap<String, f64> {
        let mut flat = self.by_property.clone();
        flat.insert(TOTAL_KEY.to_string(), self.total);
        flat
    }
}

/// Sums task costs by payment status. Every task lands in exactly one bucket.
pub fn cost_summary(tasks: &[Task]) -> CostSummary {
    let (paid, unpaid) = tasks
        .iter()
        .fold((0.0, 0.0), |(paid, unpaid), task| match task.payment_status {
            PaymentStatus::Paid => (paid + task.cost, unpaid),
            PaymentStatus::Unpaid => (paid, unpaid + task.cost),
        });

    CostSummary {
        paid,
        unpaid,
        total: paid + unpaid,
    }
}

/// Groups the cost of tasks whose `start_date` falls in `period` by the
/// name of their property.
pub fn monthly_breakdown(
    tasks: &[Task],
    properties: &[Property],
    period: MonthPeriod,
) -> MonthlyBreakdown {
    let names: HashMap<RecordId, &str> = properties
        .iter()
        .filter_map(|property| property.id.map(|id| (id, property.name.as_str())))
        .collect();

    let mut by_property: BTreeMap<String, f64> = BTreeMap::new();
    let mut unassigned = 0.0;

    for task in tasks
        .iter()
        .filter(|task| period.contains_date_text(&task.start_date))
    {
        match task.property_id.and_then(|id| names.get(&id)) {
            Some(name) => *by_property.entry((*name).to_string()).or_insert(0.0) += task.cost,
            None => unassigned += task.cost,
        }
    }

    let total = by_property.values().sum::<f64>() + unassigned;
    MonthlyBreakdown {
        period,
        by_property,
        unassigned,
        total,
    }
}
