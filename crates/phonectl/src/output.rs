//! Result streaming and summary printing.
//!
//! The live stream is additive color-coded progress; the final grouped
//! summary is the deterministic contract and goes out uncolored.

use owo_colors::OwoColorize;

use phonectl_core::{CommentedResult, FleetReport};

/// A per-arrival callback for the aggregator: prints `<address>: <comment>`
/// in arrival order when verbose, does nothing otherwise.
pub fn live_printer(verbose: bool) -> impl FnMut(&CommentedResult) {
    move |result: &CommentedResult| {
        if !verbose {
            return;
        }
        if result.success {
            println!("{}: {}", result.address, result.comment.green());
        } else {
            println!("{}: {}", result.address, result.comment.red());
        }
    }
}

/// Print the final grouped summary (always, unless `--quiet`).
pub fn print_summary(report: &FleetReport, quiet: bool) {
    if quiet {
        return;
    }
    print!("{report}");
}
