//! Asynchronous transition dispatch with an observable in-flight state
//!
//! The dashboard needs to know that a send or cancel is in flight so it can
//! block duplicate submissions. A dispatched transition moves through
//! `Idle → Pending → Settled` on a spawned task; once started it runs to
//! completion.
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::ValidationError;
use crate::lifecycle;
use crate::operation::{AdditionalFields, Operation};
use crate::status::Action;

#[derive(Debug, Clone, Default)]
pub enum TransitionState {
    /// No transition has been requested.
    #[default]
    Idle,
    /// The transition was dispatched and has not settled yet.
    Pending,
    /// The transition finished, successfully or not.
    Settled(Result<Operation, ValidationError>),
}

impl TransitionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, TransitionState::Pending)
    }
    pub fn is_settled(&self) -> bool {
        matches!(self, TransitionState::Settled(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Collaborator surface for user-facing notifications (toasts/banners).
pub trait Notify: Send + Sync {
    fn notify(&self, kind: NoticeKind, message: &str);
}

/// Silent notifier for callers that do not surface notifications.
pub struct NoNotice;

impl Notify for NoNotice {
    fn notify(&self, _: NoticeKind, _: &str) {}
}

/// Handle to one dispatched transition.
pub struct TransitionHandle {
    rx: watch::Receiver<TransitionState>,
    task: JoinHandle<()>,
}

impl TransitionHandle {
    /// Snapshot of the current state.
    pub fn state(&self) -> TransitionState {
        self.rx.borrow().clone()
    }

    /// Waits for the transition to finish and returns its outcome.
    pub async fn settled(self) -> TransitionState {
        // the task always publishes a settled state before finishing
        let _ = self.task.await;
        self.rx.borrow().clone()
    }
}

/// Runs `action` against an owned copy of the operation on a spawned task.
///
/// The handle reads `Pending` as soon as this returns. On settle the
/// notifier receives the matching success or error message and the handle
/// carries either the transitioned operation or the validation failure.
pub fn dispatch(
    mut operation: Operation,
    action: Action,
    fields: Option<AdditionalFields>,
    notifier: Arc<dyn Notify>,
) -> TransitionHandle {
    // Idle is only ever the pre-dispatch default; a handle starts Pending.
    let (tx, rx) = watch::channel(TransitionState::Pending);

    let task = tokio::spawn(async move {
        tracing::debug!(operation = %operation.id, ?action, "transition dispatched");

        let state = match lifecycle::apply(&mut operation, action, fields.as_ref()) {
            Ok(_) => {
                notifier.notify(NoticeKind::Success, success_message(action));
                TransitionState::Settled(Ok(operation))
            }
            Err(err) => {
                notifier.notify(NoticeKind::Error, &err.to_string());
                TransitionState::Settled(Err(err))
            }
        };
        let _ = tx.send(state);
    });

    TransitionHandle { rx, task }
}

fn success_message(action: Action) -> &'static str {
    match action {
        Action::Send => "A operação foi enviada para processamento na B3.",
        Action::Cancel => "A operação foi cancelada com sucesso.",
        Action::EmitCertificate => {
            "O certificado foi gerado com sucesso e a operação foi processada."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Status;
    use std::sync::Mutex;

    struct RecordingNotifier(Mutex<Vec<(NoticeKind, String)>>);

    impl RecordingNotifier {
        fn new() -> Arc<Self> {
            Arc::new(Self(Mutex::new(Vec::new())))
        }
        fn notices(&self) -> Vec<(NoticeKind, String)> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Notify for RecordingNotifier {
        fn notify(&self, kind: NoticeKind, message: &str) {
            self.0.lock().unwrap().push((kind, message.to_string()));
        }
    }

    #[test]
    fn default_state_is_idle() {
        assert!(matches!(TransitionState::default(), TransitionState::Idle));
    }

    #[tokio::test]
    async fn dispatch_seeds_the_channel_with_pending() {
        let handle = dispatch(Operation::new("COE-1"), Action::Cancel, None, Arc::new(NoNotice));

        // Pending is the initial channel value, not a replacement for Idle,
        // so a fresh receiver has nothing unseen to consume.
        assert!(handle.state().is_pending());
        assert!(!handle.rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn pending_is_observable_before_settling() {
        let operation = Operation::new("COE-1");
        let handle = dispatch(operation, Action::Cancel, None, Arc::new(NoNotice));

        // the task has not run yet on the current-thread test runtime
        assert!(handle.state().is_pending());

        let state = handle.settled().await;
        match state {
            TransitionState::Settled(Ok(op)) => assert_eq!(op.status, Status::Cancelled),
            other => panic!("expected settled success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_send_notifies_and_settles_with_error() {
        let notifier = RecordingNotifier::new();
        let operation = Operation::new("COE-1");

        let handle = dispatch(
            operation,
            Action::Send,
            Some(AdditionalFields::default()),
            notifier.clone(),
        );

        let state = handle.settled().await;
        match state {
            TransitionState::Settled(Err(err)) => assert_eq!(
                err,
                ValidationError::MissingRequiredField("commercialConditions")
            ),
            other => panic!("expected settled failure, got {other:?}"),
        }

        let notices = notifier.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].0, NoticeKind::Error);
    }

    #[tokio::test]
    async fn successful_send_reports_the_b3_toast() {
        let notifier = RecordingNotifier::new();
        let operation = Operation::new("COE-1");
        let fields = AdditionalFields::with_commercial_conditions("liquidação D+2");

        let handle = dispatch(operation, Action::Send, Some(fields), notifier.clone());
        let state = handle.settled().await;

        assert!(state.is_settled());
        let notices = notifier.notices();
        assert_eq!(notices[0].0, NoticeKind::Success);
        assert!(notices[0].1.contains("B3"));
    }
}
