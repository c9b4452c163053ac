use consilium_models::EncounterCompleted;
use tokio::sync::broadcast;
use tracing::debug;

/// Process-local publish/subscribe channel for encounter completions.
///
/// Injected into the confirmation transaction explicitly so the dependency
/// is visible and testable. Publishing is best-effort: with no live
/// subscriber the event is dropped, never the transaction.
#[derive(Clone)]
pub struct CompletionBus {
    tx: broadcast::Sender<EncounterCompleted>,
}

impl CompletionBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        Self { tx }
    }

    /// Returns a new receiver for completion events.
    pub fn subscribe(&self) -> broadcast::Receiver<EncounterCompleted> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: EncounterCompleted) {
        if let Err(e) = self.tx.send(event) {
            debug!("No completion subscribers: {e}");
        }
    }
}

impl Default for CompletionBus {
    fn default() -> Self {
        Self::new()
    }
}
