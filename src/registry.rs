//! Registry layer: persisted operations and their transition history
use std::sync::Arc;

use sled::Batch;

use crate::lifecycle::{self, TransitionEvent};
use crate::operation::{AdditionalFields, Operation};

const OPERATION_PREFIX: &str = "operation/";
const EVENT_PREFIX: &str = "event/";

pub struct OperationRegistry {
    instance: Arc<sled::Db>,
}

impl OperationRegistry {
    pub fn new(instance: Arc<sled::Db>) -> Self {
        Self { instance }
    }

    fn operation_key(id: &str) -> String {
        format!("{OPERATION_PREFIX}{id}")
    }

    /// Event keys embed the timestamp so a prefix scan yields history in
    /// chronological order; the fingerprint breaks same-instant ties.
    fn event_key(event: &TransitionEvent, fingerprint: &str) -> String {
        let nanos = event
            .at
            .to_datetime_utc()
            .timestamp_nanos_opt()
            .unwrap_or(i64::MAX);
        format!(
            "{EVENT_PREFIX}{}/{nanos:020}-{}",
            event.operation_id,
            &fingerprint[..16]
        )
    }

    /// Register a new operation. Ids must be non-empty and unused.
    pub fn register(&self, operation: &Operation) -> anyhow::Result<()> {
        if operation.id.trim().is_empty() {
            return Err(anyhow::anyhow!("operation id must not be empty"));
        }
        let key = Self::operation_key(&operation.id);
        if self.instance.contains_key(key.as_bytes())? {
            return Err(anyhow::anyhow!(
                "operation {} is already registered",
                operation.id
            ));
        }

        self.instance
            .insert(key.as_bytes(), minicbor::to_vec(operation)?)?;
        tracing::info!(operation = %operation.id, "operation registered");

        Ok(())
    }

    /// Load one operation from the store.
    pub fn load(&self, id: &str) -> anyhow::Result<Operation> {
        let bytes = self
            .instance
            .get(Self::operation_key(id).as_bytes())?
            .ok_or_else(|| anyhow::anyhow!("operation {id} not found"))?;

        Ok(minicbor::decode(&bytes)?)
    }

    /// All registered operations, in key order.
    pub fn list(&self) -> anyhow::Result<Vec<Operation>> {
        let mut operations = Vec::new();
        for entry in self.instance.scan_prefix(OPERATION_PREFIX.as_bytes()) {
            let (_, bytes) = entry?;
            operations.push(minicbor::decode(&bytes)?);
        }

        Ok(operations)
    }

    /// Send an operation for processing, persisting the updated operation
    /// and its transition event atomically.
    pub fn send(&self, id: &str, fields: &AdditionalFields) -> anyhow::Result<Operation> {
        let mut operation = self.load(id)?;
        let event = lifecycle::send(&mut operation, fields)?;
        self.commit(&operation, &event)?;

        Ok(operation)
    }

    /// Cancel an operation.
    pub fn cancel(&self, id: &str) -> anyhow::Result<Operation> {
        let mut operation = self.load(id)?;
        let event = lifecycle::cancel(&mut operation)?;
        self.commit(&operation, &event)?;

        Ok(operation)
    }

    /// Emit the certificate for an operation, marking it processed.
    pub fn emit_certificate(&self, id: &str) -> anyhow::Result<Operation> {
        let mut operation = self.load(id)?;
        let event = lifecycle::emit_certificate(&mut operation)?;
        self.commit(&operation, &event)?;

        Ok(operation)
    }

    /// Transition history of one operation, oldest first.
    pub fn history(&self, id: &str) -> anyhow::Result<Vec<TransitionEvent>> {
        let prefix = format!("{EVENT_PREFIX}{id}/");
        let mut events = Vec::new();
        for entry in self.instance.scan_prefix(prefix.as_bytes()) {
            let (_, bytes) = entry?;
            events.push(minicbor::decode(&bytes)?);
        }

        Ok(events)
    }

    // Batch insert: updated operation and transition event
    fn commit(&self, operation: &Operation, event: &TransitionEvent) -> anyhow::Result<()> {
        let (fingerprint, cbor) = event.build()?;

        let mut batch = Batch::default();
        batch.insert(
            Self::operation_key(&operation.id).as_bytes(),
            minicbor::to_vec(operation)?,
        );
        batch.insert(Self::event_key(event, &fingerprint).as_bytes(), cbor);
        self.instance.apply_batch(batch)?;

        tracing::info!(
            operation = %operation.id,
            action = ?event.action,
            to = ?event.to,
            fingerprint = %fingerprint,
            "transition committed"
        );

        Ok(())
    }
}
