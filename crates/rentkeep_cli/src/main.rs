//! Command-line front end for the rental maintenance tracker.
//!
//! # Responsibility
//! - Resolve configuration once and open the database it points at.
//! - Map subcommands onto core services and print their results.

mod seed;

use chrono::Local;
use clap::{Parser, Subcommand};
use log::info;
use rentkeep_core::db::open_db;
use rentkeep_core::{
    init_from_config, AppConfig, ConfigOverrides, ContactListQuery, ContactRepository,
    MonthPeriod, PropertyRepository, ReportService, SqliteContactRepository,
    SqlitePropertyRepository, SqliteTaskRepository, TaskListQuery, TaskService, TaskStore,
};
use rusqlite::Connection;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "rentkeep",
    author,
    version,
    about = "Track maintenance work and costs across rental properties"
)]
struct Cli {
    /// Database file (defaults to Documents/airbnb_maintenance/maintenance.db).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Restrict every read and write to this owner UUID.
    #[arg(long, global = true)]
    owner: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logs go to stderr otherwise.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the database and apply migrations.
    Init,
    /// Insert sample properties, contacts and tasks.
    Seed,
    /// Print cost summary, yearly projection and monthly breakdown.
    Report {
        /// Month to break down as YYYY-MM (defaults to the current month).
        #[arg(long)]
        period: Option<MonthPeriod>,
    },
    /// List properties, contacts and tasks.
    Show {
        #[arg(long)]
        json: bool,
    },
    /// init + seed + show + report.
    All,
    /// Insert the next occurrence of a recurring task.
    Next {
        task_id: i64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = AppConfig::resolve(ConfigOverrides {
        db_path: cli.db,
        owner: cli.owner,
        log_level: cli.log_level,
        log_dir: cli.log_dir,
    })?;
    init_from_config(&config)?;

    let conn = open_db(&config.db_path)?;
    info!(
        "event=cli_command module=cli status=start command={:?} scoped={}",
        cli.command,
        config.owner.is_some()
    );

    match cli.command {
        Command::Init => println!("Database initialized at: {}", config.db_path.display()),
        Command::Seed => run_seed(&conn, &config)?,
        Command::Report { period } => report(&conn, &config, period)?,
        Command::Show { json } => show(&conn, &config, json)?,
        Command::All => {
            println!("Database initialized at: {}", config.db_path.display());
            run_seed(&conn, &config)?;
            show(&conn, &config, false)?;
            report(&conn, &config, None)?;
        }
        Command::Next { task_id } => {
            let service =
                TaskService::new(SqliteTaskRepository::new(&conn)).scoped_to(config.owner);
            let next_id = service.spawn_next_occurrence(task_id)?;
            println!("Created task {next_id} as the next occurrence of task {task_id}");
        }
    }

    Ok(())
}

fn run_seed(conn: &Connection, config: &AppConfig) -> Result<(), Box<dyn Error>> {
    println!("Seeding sample data...");
    let counts = seed::seed_sample_data(
        &SqlitePropertyRepository::new(conn),
        &SqliteContactRepository::new(conn),
        &SqliteTaskRepository::new(conn),
        config.owner,
        Local::now().date_naive(),
    )?;
    println!(
        "Created {} properties, {} contacts, {} tasks",
        counts.properties, counts.contacts, counts.tasks
    );
    Ok(())
}

fn report(
    conn: &Connection,
    config: &AppConfig,
    period: Option<MonthPeriod>,
) -> Result<(), Box<dyn Error>> {
    let reports = ReportService::new(
        SqliteTaskRepository::new(conn),
        SqlitePropertyRepository::new(conn),
    )
    .scoped_to(config.owner);

    let summary = reports.cost_summary()?;
    println!("\n=== COST SUMMARY ===");
    println!("Paid:   ${:.2}", summary.paid);
    println!("Unpaid: ${:.2}", summary.unpaid);
    println!("Total:  ${:.2}", summary.total);

    println!("\n=== YEARLY PROJECTION ===");
    println!("Projected yearly cost: ${:.2}", reports.yearly_projection()?);

    let period = period.unwrap_or_else(|| MonthPeriod::containing(Local::now().date_naive()));
    let breakdown = reports.monthly_breakdown(period)?;
    println!("\n=== MONTHLY BREAKDOWN ({period}) ===");
    for (name, cost) in &breakdown.by_property {
        println!("  {name}: ${cost:.2}");
    }
    if breakdown.unassigned > 0.0 {
        println!("  (no property): ${:.2}", breakdown.unassigned);
    }
    println!("  Total: ${:.2}", breakdown.total);
    Ok(())
}

fn show(conn: &Connection, config: &AppConfig, json: bool) -> Result<(), Box<dyn Error>> {
    let properties = SqlitePropertyRepository::new(conn).list_properties(config.owner)?;
    let contacts = SqliteContactRepository::new(conn).list_contacts(&ContactListQuery {
        owner: config.owner,
        ..ContactListQuery::default()
    })?;
    let tasks =
        SqliteTaskRepository::new(conn).list_tasks(&TaskListQuery::for_owner(config.owner))?;

    if json {
        let payload = serde_json::json!({
            "properties": properties,
            "contacts": contacts,
            "tasks": tasks,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("\n=== PROPERTIES ===");
    for property in &properties {
        println!(
            "  {}: {} - {} ({})",
            property.id.unwrap_or_default(),
            property.name,
            property.address,
            property.status
        );
    }

    println!("\n=== CONTACTS ===");
    for contact in &contacts {
        println!(
            "  {}: {} ({}) - {}",
            contact.id.unwrap_or_default(),
            contact.name,
            contact.service_type,
            contact.phone
        );
    }

    println!("\n=== TASKS ===");
    for task in &tasks {
        println!(
            "  {}: {} - ${:.2} ({}, {})",
            task.id.unwrap_or_default(),
            task.description,
            task.cost,
            task.payment_status.as_str(),
            task.completion_status.as_str()
        );
    }
    Ok(())
}
