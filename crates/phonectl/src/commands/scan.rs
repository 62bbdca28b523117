//! Fleet scan: login/logout probe against every device.

use phonectl_core::{Action, FleetOperation};

use crate::cli::GlobalOpts;
use crate::config::FleetContext;
use crate::error::CliError;

use super::util;

/// Probe every device. The report is exactly the Login/Logout pair per
/// address: reachability plus credential validity, nothing else.
pub async fn handle(ctx: &FleetContext, global: &GlobalOpts) -> Result<(), CliError> {
    let operation =
        FleetOperation::new(Action::Login, |session, _| Box::pin(async move { session }));
    util::run_fleet(ctx, global, operation).await
}
