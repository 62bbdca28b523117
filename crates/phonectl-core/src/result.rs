// Per-step results and the reporter handle tasks use to emit them.
//
// Progress is never printed or logged from inside the fleet; every step
// becomes a value on the shared channel and the consumer decides what to
// do with it.

use tokio::sync::mpsc;

use phonectl_api::{Address, Error};

use crate::action::Action;

/// The outcome of one discrete step against one device.
#[derive(Debug)]
pub struct PhoneResult {
    pub address: Address,
    pub outcome: Result<(), Error>,
}

impl PhoneResult {
    pub fn new(address: Address, outcome: Result<(), Error>) -> Self {
        Self { address, outcome }
    }

    /// Attach the action label, producing the unit placed on the channel.
    pub fn commented(self, action: Action) -> CommentedResult {
        let (success, comment) = match &self.outcome {
            Ok(()) => (true, format!("{action} successful")),
            Err(e) => (false, format!("{action} failed: {e}")),
        };
        CommentedResult {
            address: self.address,
            success,
            comment,
        }
    }
}

/// A per-step outcome plus a human-readable label of which action
/// produced it. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentedResult {
    pub address: Address,
    pub success: bool,
    pub comment: String,
}

/// An address-bound handle for emitting results onto the shared channel.
///
/// Each fleet task holds one; the per-device action uses it to report its
/// own steps as it progresses. Dropping the last reporter for a run closes
/// the channel, which is what ends the aggregator.
#[derive(Clone)]
pub struct StepReporter {
    address: Address,
    tx: mpsc::Sender<CommentedResult>,
}

impl StepReporter {
    pub fn new(address: Address, tx: mpsc::Sender<CommentedResult>) -> Self {
        Self { address, tx }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Report one step. A send failure means the receiver is gone and the
    /// invocation is shutting down; nothing useful can be done with it.
    pub async fn report(&self, action: Action, outcome: Result<(), Error>) {
        let result = PhoneResult::new(self.address.clone(), outcome).commented(action);
        let _ = self.tx.send(result).await;
    }

    /// Report a step with a pre-built comment (used for failures that have
    /// no `Error` value, e.g. a panicked task).
    pub async fn report_raw(&self, success: bool, comment: String) {
        let _ = self
            .tx
            .send(CommentedResult {
                address: self.address.clone(),
                success,
                comment,
            })
            .await;
    }
}
