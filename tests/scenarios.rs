use anyhow::Context;
use sled::open;
use std::sync::Arc;
use tempfile::tempdir;

use coe_operations::operation::AdditionalFields;
use coe_operations::registry::OperationRegistry;
use coe_operations::status::{Action, Status};
use coe_operations::{fixtures, view};

// Sled uses file-based locking to prevent concurrent access, so only one
// test can hold the lock at a time. As is good practice in testing create
// separate databases for each test. The db is created on temp for
// simplified cleanup.
fn test_registry(name: &str) -> anyhow::Result<(tempfile::TempDir, OperationRegistry)> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join(name);
    let db = Arc::new(open(db_path)?);

    db.clear()?;

    Ok((temp_dir, OperationRegistry::new(db)))
}

#[test]
fn register_send_and_inspect_history() -> anyhow::Result<()> {
    let (_guard, registry) = test_registry("register_send_and_inspect_history.db")?;

    let operation = fixtures::operation_in_editing();
    registry.register(&operation)?;

    // empty commercial conditions must bounce without touching the store
    let err = registry
        .send(&operation.id, &AdditionalFields::default())
        .unwrap_err();
    assert!(err.to_string().contains("commercialConditions"));
    assert_eq!(registry.load(&operation.id)?.status, Status::Editing);
    assert!(registry.history(&operation.id)?.is_empty());

    let fields = AdditionalFields::with_commercial_conditions("liquidação D+2, taxa 1,5% a.a.");
    let sent = registry
        .send(&operation.id, &fields)
        .context("Operation failed on send: ")?;

    assert_eq!(sent.status, Status::Sent);
    assert!(sent.clients.iter().all(|c| c.status == Status::Sent));

    // the persisted copy matches what the transition returned
    let stored = registry.load(&operation.id)?;
    assert_eq!(stored, sent);
    assert_eq!(
        stored.additional_fields.commercial_conditions,
        "liquidação D+2, taxa 1,5% a.a."
    );

    let history = registry.history(&operation.id)?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action, Action::Send);
    assert_eq!(history[0].from, Status::Editing);
    assert_eq!(history[0].to, Status::Sent);

    Ok(())
}

#[test]
fn cancel_after_send_then_terminal_statuses_lock() -> anyhow::Result<()> {
    let (_guard, registry) = test_registry("cancel_after_send.db")?;

    let operation = fixtures::operation_in_editing();
    registry.register(&operation)?;

    let fields = AdditionalFields::with_commercial_conditions("condições padrão");
    registry.send(&operation.id, &fields)?;

    let cancelled = registry.cancel(&operation.id)?;
    assert_eq!(cancelled.status, Status::Cancelled);
    assert!(
        cancelled
            .clients
            .iter()
            .all(|c| c.status == Status::Cancelled)
    );

    // cancelled is terminal: neither send nor cancel may run again
    assert!(registry.send(&operation.id, &fields).is_err());
    assert!(registry.cancel(&operation.id).is_err());

    let history = registry.history(&operation.id)?;
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].action, Action::Cancel);

    Ok(())
}

#[test]
fn emit_certificate_processes_and_cascades() -> anyhow::Result<()> {
    let (_guard, registry) = test_registry("emit_certificate.db")?;

    let operation = fixtures::operation_in_editing();
    registry.register(&operation)?;

    let processed = registry.emit_certificate(&operation.id)?;
    assert_eq!(processed.status, Status::Processed);
    assert!(
        processed
            .clients
            .iter()
            .all(|c| c.status == Status::Processed)
    );

    // processed is terminal as well
    assert!(registry.cancel(&operation.id).is_err());

    Ok(())
}

#[test]
fn duplicate_registration_is_rejected() -> anyhow::Result<()> {
    let (_guard, registry) = test_registry("duplicate_registration.db")?;

    let operation = fixtures::operation_in_editing();
    registry.register(&operation)?;
    assert!(registry.register(&operation).is_err());

    let mut blank = operation.clone();
    blank.id = "   ".to_string();
    assert!(registry.register(&blank).is_err());

    Ok(())
}

#[test]
fn listing_feeds_the_view_engine() -> anyhow::Result<()> {
    let (_guard, registry) = test_registry("listing_feeds_view.db")?;

    for operation in fixtures::sample_operations() {
        registry.register(&operation)?;
    }

    let listed = registry.list()?;
    assert_eq!(listed.len(), 6);

    let hits = view::filter(&listed, "ibov");
    assert_eq!(hits.len(), 4);

    let ordered = view::sort(&hits, view::SortField::Value, view::SortDirection::Desc);
    let values: Vec<i64> = ordered
        .iter()
        .filter_map(|op| op.total_value.map(|v| v.centavos()))
        .collect();
    assert_eq!(values, [150_000_000, 125_000_000, 100_000_000, 75_000_000]);

    Ok(())
}
