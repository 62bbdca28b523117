// phonectl-core: Fleet orchestration between phonectl-api and the CLI.
//
// Turns a list of addresses into one concurrently-managed authenticated
// session each, runs the uniform login -> action -> logout protocol with
// per-device failure isolation, and funnels the commented results into a
// deterministic report.

pub mod action;
pub mod address;
pub mod fleet;
pub mod keys;
pub mod report;
pub mod result;

// ── Primary re-exports ──────────────────────────────────────────────
pub use action::Action;
pub use address::expand;
pub use fleet::{Connector, Credentials, FleetOperation};
pub use report::{FleetReport, drain};
pub use result::{CommentedResult, PhoneResult, StepReporter};

// Re-export the api types the consumer needs alongside the fleet.
pub use phonectl_api::{Address, Error, FunctionKey, Parameters, PhoneSession, Setting, TlsMode, TransportConfig};
