//! Retainer tests — the one-active-retainer-per-client invariant and the
//! retainer aggregates.

use chrono::NaiveDate;
use reality_core::clock::FixedClock;
use reality_core::error::LedgerError;
use reality_core::service::RealityService;
use reality_core::store::LedgerStore;

fn setup() -> (RealityService<FixedClock>, String) {
    let store = LedgerStore::in_memory().unwrap();
    store.migrate().unwrap();
    let agency = store.create_agency("Test Agency", "USD").unwrap();
    let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 8, 23).unwrap());
    (RealityService::new(store, clock), agency.agency_id)
}

#[test]
fn second_active_retainer_for_a_client_is_a_conflict() {
    let (service, agency_id) = setup();
    let client = service.create_client(&agency_id, "Acme").unwrap();

    service
        .create_retainer(&agency_id, &client.client_id, 3000.0)
        .unwrap();
    let err = service
        .create_retainer(&agency_id, &client.client_id, 4000.0)
        .expect_err("second active retainer must fail");

    assert!(err.is_conflict(), "expected a conflict, got: {err}");
    assert!(matches!(err, LedgerError::DuplicateRetainer { .. }));
}

#[test]
fn durable_index_rejects_duplicates_past_the_precheck() {
    // Insert directly, skipping the service's check-then-act sequence, the
    // way a losing racer would.
    let (service, agency_id) = setup();
    let client = service.create_client(&agency_id, "Acme").unwrap();

    service
        .store()
        .insert_retainer(&agency_id, &client.client_id, 3000.0)
        .unwrap();
    let err = service
        .store()
        .insert_retainer(&agency_id, &client.client_id, 4000.0)
        .expect_err("partial unique index must reject the duplicate");

    assert!(err.is_conflict(), "expected a conflict, got: {err}");
}

#[test]
fn different_clients_each_hold_one_retainer() {
    let (service, agency_id) = setup();
    let a = service.create_client(&agency_id, "Acme").unwrap();
    let b = service.create_client(&agency_id, "Beta").unwrap();

    service.create_retainer(&agency_id, &a.client_id, 3000.0).unwrap();
    service.create_retainer(&agency_id, &b.client_id, 1200.0).unwrap();

    let store = service.store();
    assert_eq!(store.sum_active_retainers(&agency_id).unwrap(), 4200.0);
    assert_eq!(store.max_active_retainer(&agency_id).unwrap(), 3000.0);
    assert!(store.has_active_retainer(&a.client_id).unwrap());
}

#[test]
fn retainer_aggregates_default_to_zero() {
    let (service, agency_id) = setup();
    let store = service.store();
    assert_eq!(store.sum_active_retainers(&agency_id).unwrap(), 0.0);
    assert_eq!(store.max_active_retainer(&agency_id).unwrap(), 0.0);
}

#[test]
fn non_positive_retainer_amount_is_rejected() {
    let (service, agency_id) = setup();
    let client = service.create_client(&agency_id, "Acme").unwrap();

    let err = service
        .create_retainer(&agency_id, &client.client_id, 0.0)
        .expect_err("zero amount must be rejected");
    assert!(matches!(err, LedgerError::InvalidInput(_)));
}
