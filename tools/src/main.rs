//! score-runner: headless report runner for the agency reality core.
//!
//! Usage:
//!   score-runner --db ledger.db --agency <id>
//!   score-runner --demo            (seed a demo agency, then report)

use anyhow::{bail, Result};
use chrono::{Duration, Local};
use reality_core::{
    clock::SystemClock,
    service::{CostCategory, CostType, RealityService},
    store::LedgerStore,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = flag_value(&args, "--db").unwrap_or(":memory:");
    let agency_flag = flag_value(&args, "--agency");
    let demo = args.iter().any(|a| a == "--demo");

    let store = LedgerStore::open(db)?;
    store.migrate()?;
    let service = RealityService::new(store, SystemClock);

    let agency_id = match (agency_flag, demo) {
        (Some(id), _) => id.to_string(),
        (None, true) => seed_demo_agency(&service)?,
        (None, false) => bail!("pass --agency <id> or --demo"),
    };

    println!("agency: {agency_id}");
    print_report("reality_score", &service.reality_score(&agency_id)?)?;
    print_report("survival_metrics", &service.survival_metrics(&agency_id)?)?;
    print_report("retainer_summary", &service.retainer_summary(&agency_id)?)?;
    print_report("utilization", &service.utilization(&agency_id)?)?;
    print_report("daily_snapshot", &service.daily_snapshot(&agency_id)?)?;
    print_report("daily_summary", &service.daily_summary(&agency_id)?)?;
    print_report("cost_breakdown", &service.cost_breakdown(&agency_id)?)?;

    Ok(())
}

fn print_report<T: serde::Serialize>(name: &str, report: &T) -> Result<()> {
    println!("{name}: {}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Seed a plausible one-person agency: two retained clients, a month of
/// fixed overhead, some project revenue, logged hours, and a cash position.
fn seed_demo_agency<C: reality_core::clock::Clock>(
    service: &RealityService<C>,
) -> Result<String> {
    let agency = service.store().create_agency("Demo Studio", "USD")?;
    let agency_id = agency.agency_id;

    let anchor = service.store().create_client(&agency_id, "Anchor Co")?;
    let side = service.store().create_client(&agency_id, "Side Project Ltd")?;
    service.create_retainer(&agency_id, &anchor.client_id, 4500.0)?;
    service.create_retainer(&agency_id, &side.client_id, 2500.0)?;

    service.add_cost(&agency_id, 3200.0, CostType::Fixed, CostCategory::People, "salaries")?;
    service.add_cost(&agency_id, 600.0, CostType::Fixed, CostCategory::Tools, "saas stack")?;
    service.add_cost(&agency_id, 450.0, CostType::Variable, CostCategory::Other, "conference")?;
    service.add_revenue(&agency_id, 6200.0, "project work")?;
    service.add_time_entry(&agency_id, Some(&anchor.client_id), 80.0)?;
    service.add_time_entry(&agency_id, Some(&side.client_id), 34.0)?;

    // Backdate a prior balance so the daily delta is populated.
    let yesterday = Local::now().date_naive() - Duration::days(1);
    service
        .store()
        .insert_cash_snapshot(&agency_id, yesterday, 21500.0)?;
    service.record_cash_snapshot(&agency_id, 22800.0)?;

    log::info!("demo agency seeded: {agency_id}");
    Ok(agency_id)
}
