// Result aggregation: live streaming plus the deterministic final report.

use std::collections::BTreeMap;
use std::fmt;

use tokio::sync::mpsc;

use phonectl_api::Address;

use crate::result::CommentedResult;

/// Consume commented results until the channel closes.
///
/// `on_result` fires once per arrival, in arrival order -- nondeterministic
/// across addresses, but each address's own login -> action -> logout steps
/// arrive in sequence because a single task emits them. The returned report
/// is the always-produced summary; live streaming is additive, not a
/// replacement.
pub async fn drain(
    mut rx: mpsc::Receiver<CommentedResult>,
    mut on_result: impl FnMut(&CommentedResult),
) -> FleetReport {
    let mut report = FleetReport::default();
    while let Some(result) = rx.recv().await {
        on_result(&result);
        report.push(result);
    }
    report
}

/// All comments of one fleet run, grouped per address.
///
/// Groups iterate (and display) in ascending byte-wise address order; the
/// `BTreeMap` key is what makes the summary deterministic regardless of
/// completion order.
#[derive(Debug, Default)]
pub struct FleetReport {
    groups: BTreeMap<Address, Vec<String>>,
    failures: usize,
}

impl FleetReport {
    pub fn push(&mut self, result: CommentedResult) {
        if !result.success {
            self.failures += 1;
        }
        self.groups
            .entry(result.address)
            .or_default()
            .push(result.comment);
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of per-address groups (one per distinct address).
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of failed steps across the whole run.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// The comments recorded for one address, in emission order.
    pub fn comments(&self, address: &Address) -> Option<&[String]> {
        self.groups.get(address).map(Vec::as_slice)
    }

    /// Addresses in report (ascending) order.
    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.groups.keys()
    }
}

impl fmt::Display for FleetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (address, comments) in &self.groups {
            writeln!(f, "{address}:")?;
            for comment in comments {
                writeln!(f, "\t{comment}")?;
            }
        }
        Ok(())
    }
}
