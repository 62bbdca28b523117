// Fleet orchestration: one task per address, results on a shared channel.
//
// Tasks share no mutable state and never block on each other; a hang or
// failure on one address has no effect on the others. The only deadline
// anywhere is the per-request timeout on the shared HTTP client.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use secrecy::SecretString;
use tokio::sync::mpsc;
use tracing::{debug, error};

use phonectl_api::{Address, Error, PhoneSession, TransportConfig};

use crate::action::Action;
use crate::result::{CommentedResult, StepReporter};

/// Process-wide login credentials, shared read-only by all sessions of one
/// invocation.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub login: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: SecretString) -> Self {
        Self {
            login: login.into(),
            password,
        }
    }
}

/// The per-device half of a fleet operation.
///
/// Takes ownership of the live session, emits its own step results through
/// the reporter as it progresses, and hands the session back for logout.
type DeviceFn =
    Box<dyn Fn(PhoneSession, StepReporter) -> BoxFuture<'static, PhoneSession> + Send + Sync>;

/// A caller-supplied operation to run against every device in the fleet.
pub struct FleetOperation {
    action: Action,
    suppress_logout: bool,
    device_fn: DeviceFn,
}

impl FleetOperation {
    /// Wrap a per-device closure. The closure is only invoked after a
    /// successful login and is responsible for reporting its own steps.
    pub fn new<F>(action: Action, device_fn: F) -> Self
    where
        F: Fn(PhoneSession, StepReporter) -> BoxFuture<'static, PhoneSession>
            + Send
            + Sync
            + 'static,
    {
        Self {
            action,
            suppress_logout: false,
            device_fn: Box::new(device_fn),
        }
    }

    /// Mark this operation reset-class: the device drops the session on its
    /// own, so the trailing logout's outcome is swallowed instead of
    /// reported. This is an explicit per-operation flag; the orchestrator
    /// never infers it.
    pub fn suppress_logout(mut self) -> Self {
        self.suppress_logout = true;
        self
    }

    pub fn action(&self) -> Action {
        self.action
    }
}

/// Runs the login -> action -> logout protocol concurrently per address.
pub struct Connector {
    credentials: Credentials,
    transport: TransportConfig,
}

impl Connector {
    pub fn new(credentials: Credentials, transport: TransportConfig) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    /// Fan the operation out over the fleet.
    ///
    /// Every address gets one independent task executing exactly: attempt
    /// login and report it; if and only if login succeeded, run the
    /// per-device action; then always attempt logout and report it (unless
    /// the operation suppresses logout reporting). All results go out on
    /// `results`; the channel closes after the last task finishes, because
    /// this method holds the completion barrier: it returns only once every
    /// task has been awaited, and the senders drop with it.
    ///
    /// The only fatal error here is failing to build the shared HTTP
    /// client, which happens before any address is processed.
    pub async fn run(
        &self,
        addresses: Vec<Address>,
        operation: FleetOperation,
        results: mpsc::Sender<CommentedResult>,
    ) -> Result<(), Error> {
        let http = self.transport.build_client()?;
        let operation = Arc::new(operation);
        debug!(action = %operation.action, targets = addresses.len(), "starting fleet run");

        let mut tasks = Vec::with_capacity(addresses.len());
        for address in addresses {
            let reporter = StepReporter::new(address.clone(), results.clone());
            let session = PhoneSession::new(http.clone(), address.clone());
            let login = self.credentials.login.clone();
            let password = self.credentials.password.clone();
            let operation = Arc::clone(&operation);
            let handle = tokio::spawn(run_device(session, reporter, login, password, operation));
            tasks.push((address, handle));
        }

        // Completion barrier: await every task before returning, so the
        // caller can rely on "run returned" == "channel is drained and
        // closing". A panicked task still yields a result for its address.
        for (address, handle) in tasks {
            if let Err(e) = handle.await {
                error!(%address, "fleet task failed: {e}");
                StepReporter::new(address, results.clone())
                    .report_raw(false, format!("Internal task failure: {e}"))
                    .await;
            }
        }

        Ok(())
    }
}

/// The uniform per-address protocol. Total ordering of the three steps
/// holds within this task; nothing is ordered across tasks.
async fn run_device(
    mut session: PhoneSession,
    reporter: StepReporter,
    login: String,
    password: SecretString,
    operation: Arc<FleetOperation>,
) {
    match session.login(&login, &password).await {
        Ok(()) => {
            reporter.report(Action::Login, Ok(())).await;
            session = (operation.device_fn)(session, reporter.clone()).await;
        }
        Err(e) => {
            // The action never runs for this address; the logout below is
            // still attempted (it reports the expected auth failure, since
            // no token was ever issued).
            reporter.report(Action::Login, Err(e)).await;
        }
    }

    let outcome = session.logout().await;
    if operation.suppress_logout {
        debug!(address = %reporter.address(), "logout outcome suppressed for reset-class operation");
    } else {
        reporter.report(Action::Logout, outcome).await;
    }
}
