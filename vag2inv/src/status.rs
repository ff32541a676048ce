//! `vagrant status` classification
//!
//! Machine lines look like:
//!
//! ```text
//! default                   not created (virtualbox)
//! node1                     running (virtualbox)
//! ```
//!
//! i.e. a name, a state phrase and a parenthesized provider. Anything else
//! (banner, blank lines, the trailing help text) is ignored.

use crate::error::{InventoryError, Result};
use crate::shape;
use tracing::{debug, trace};

/// A recognized machine line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine<'a> {
    pub name: &'a str,
    pub state: &'a str,
}

impl<'a> StatusLine<'a> {
    /// Matches `<name><space>+<state><space>\(<provider>`.
    ///
    /// The state is everything after the whitespace following the name, up to
    /// the single whitespace character before the first `(`, so
    /// `"node1  running  (virtualbox)"` carries the state `"running "`.
    pub fn parse(line: &'a str) -> Option<Self> {
        let (name, rest) = shape::leading_token(line)?;
        let paren = rest.find('(')?;
        let (segment, provider) = (&rest[..paren], &rest[paren + 1..]);
        if provider.is_empty() || provider.contains('\n') {
            return None;
        }

        let len = segment.len();
        if len < 3 || !segment.ends_with(shape::is_space) {
            return None;
        }
        let lead = shape::space_len(segment);
        if lead == 0 {
            return None;
        }
        let state = &segment[lead.min(len - 2)..len - 1];

        Some(Self { name, state })
    }

    pub fn is_running(&self) -> bool {
        self.state == "running"
    }
}

/// Aggregate machine counts from one status report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTally {
    pub running: usize,
    pub non_running: usize,
}

impl StatusTally {
    /// Classifies every machine line of a status report
    pub fn from_report(report: &str) -> Self {
        let mut tally = Self::default();

        for line in report.split('\n') {
            match StatusLine::parse(line) {
                Some(status) => {
                    debug!("Machine {} is {:?}", status.name, status.state);
                    if status.is_running() {
                        tally.running += 1;
                    } else {
                        tally.non_running += 1;
                    }
                }
                None => trace!("Skipping status line: {:?}", line),
            }
        }

        tally
    }

    /// At least one machine, and every machine, is running
    pub fn is_ready(&self) -> bool {
        self.running >= 1 && self.non_running == 0
    }

    /// Readiness gate for the whole run
    pub fn ensure_ready(&self) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(InventoryError::NotReady {
                running: self.running,
                non_running: self.non_running,
            })
        }
    }
}
