//! Lifecycle controller: validated status transitions with client cascade
use chrono::Utc;

use crate::error::ValidationError;
use crate::operation::{AdditionalFields, Operation, Timestamp};
use crate::status::{Action, Status, can_transition};

/// Record of one successful transition, kept as the operation's audit trail.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq, Eq)]
pub struct TransitionEvent {
    #[n(0)]
    pub operation_id: String,
    #[n(1)]
    pub at: Timestamp<Utc>,
    #[n(2)]
    pub from: Status,
    #[n(3)]
    pub to: Status,
    #[n(4)]
    pub action: Action,
}

impl TransitionEvent {
    fn new(operation_id: String, from: Status, to: Status, action: Action) -> Self {
        Self {
            operation_id,
            at: Timestamp::now(),
            from,
            to,
            action,
        }
    }

    /// Returns the event's content fingerprint and its serialised form.
    pub fn build(&self) -> anyhow::Result<(String, Vec<u8>)> {
        let cbor = minicbor::to_vec(self)?;
        let hash = sha256::digest(&cbor);

        Ok((hash, cbor))
    }
}

/// Sets the new status on the operation and on every client line item.
/// Invariant: after any successful transition, each client's status equals
/// the operation's status.
fn apply_status(operation: &mut Operation, status: Status) {
    operation.status = status;
    for client in &mut operation.clients {
        client.status = status;
    }
}

/// Send the operation for processing.
///
/// Commercial conditions must be filled in before sending; the supplied
/// fields are stored on the operation once the transition goes through.
/// Failures leave the operation untouched.
pub fn send(
    operation: &mut Operation,
    fields: &AdditionalFields,
) -> Result<TransitionEvent, ValidationError> {
    if fields.commercial_conditions.trim().is_empty() {
        return Err(ValidationError::MissingRequiredField("commercialConditions"));
    }
    if !can_transition(operation.status, Action::Send) {
        return Err(ValidationError::InvalidTransition {
            from: operation.status,
            action: Action::Send,
        });
    }

    let from = operation.status;
    operation.additional_fields = fields.clone();
    apply_status(operation, Status::Sent);

    Ok(TransitionEvent::new(
        operation.id.clone(),
        from,
        Status::Sent,
        Action::Send,
    ))
}

/// Cancel the operation. Allowed from any non-terminal status.
pub fn cancel(operation: &mut Operation) -> Result<TransitionEvent, ValidationError> {
    if !can_transition(operation.status, Action::Cancel) {
        return Err(ValidationError::InvalidTransition {
            from: operation.status,
            action: Action::Cancel,
        });
    }

    let from = operation.status;
    apply_status(operation, Status::Cancelled);

    Ok(TransitionEvent::new(
        operation.id.clone(),
        from,
        Status::Cancelled,
        Action::Cancel,
    ))
}

/// Mark the operation processed after its certificate was issued from the
/// simulation flow. The status cascades to client line items like every
/// other transition.
pub fn emit_certificate(operation: &mut Operation) -> Result<TransitionEvent, ValidationError> {
    if !can_transition(operation.status, Action::EmitCertificate) {
        return Err(ValidationError::InvalidTransition {
            from: operation.status,
            action: Action::EmitCertificate,
        });
    }

    let from = operation.status;
    apply_status(operation, Status::Processed);

    Ok(TransitionEvent::new(
        operation.id.clone(),
        from,
        Status::Processed,
        Action::EmitCertificate,
    ))
}

/// Dispatches a requested action to the matching transition. Send requires
/// the additional fields to be supplied.
pub fn apply(
    operation: &mut Operation,
    action: Action,
    fields: Option<&AdditionalFields>,
) -> Result<TransitionEvent, ValidationError> {
    match action {
        Action::Send => {
            let fields =
                fields.ok_or(ValidationError::MissingRequiredField("commercialConditions"))?;
            send(operation, fields)
        }
        Action::Cancel => cancel(operation),
        Action::EmitCertificate => emit_certificate(operation),
    }
}
