//! Status and allow-list filtering of result records.
//!
//! Build records whose `valid` is `null` have not been evaluated and never
//! appear in a build listing, whatever the status filter. Builds have no
//! per-record inconclusive view: asking for one yields
//! [`BuildSelection::NoInconclusiveView`] without scanning.

mod spec;
mod summary;
mod view;

pub use spec::FilterSpec;
pub use summary::{Summary, SummaryCounts};
pub use view::{BuildView, TestView, TreeView, build_status_label, test_status_label};

use crate::api::{BuildRecord, TestRecord, TestStatus};
use std::fmt;
use std::str::FromStr;

/// Requested status class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Pass,
    Fail,
    Inconclusive,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Inconclusive => "inconclusive",
        }
    }

    /// Whether a boot/test status belongs to this class.
    pub fn matches_test(&self, status: &TestStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pass => *status == TestStatus::Pass,
            Self::Fail => *status == TestStatus::Fail,
            Self::Inconclusive => status.is_inconclusive(),
        }
    }

    /// Whether an evaluated build belongs to this class. Unevaluated builds
    /// never match.
    pub fn matches_build(&self, valid: Option<bool>) -> bool {
        match (self, valid) {
            (_, None) => false,
            (Self::All, Some(_)) => true,
            (Self::Pass, Some(v)) => v,
            (Self::Fail, Some(v)) => !v,
            (Self::Inconclusive, Some(_)) => false,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "pass" => Ok(Self::Pass),
            "fail" => Ok(Self::Fail),
            "inconclusive" => Ok(Self::Inconclusive),
            other => Err(format!(
                "invalid status '{other}' (expected all, pass, fail or inconclusive)"
            )),
        }
    }
}

/// Builds surviving a status filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildSelection<'a> {
    NoInconclusiveView,
    Records(Vec<&'a BuildRecord>),
}

impl BuildSelection<'_> {
    pub fn count(&self) -> usize {
        match self {
            Self::NoInconclusiveView => 0,
            Self::Records(records) => records.len(),
        }
    }
}

pub fn select_builds(builds: &[BuildRecord], status: StatusFilter) -> BuildSelection<'_> {
    if status == StatusFilter::Inconclusive {
        return BuildSelection::NoInconclusiveView;
    }
    BuildSelection::Records(
        builds
            .iter()
            .filter(|b| status.matches_build(b.valid))
            .collect(),
    )
}

/// Boots/tests surviving the status filter and, when given, the allow-list.
pub fn select_tests<'a>(
    tests: &'a [TestRecord],
    status: StatusFilter,
    spec: Option<&FilterSpec>,
) -> Vec<&'a TestRecord> {
    tests
        .iter()
        .filter(|t| status.matches_test(&t.status))
        .filter(|t| spec.is_none_or(|s| s.allows(t)))
        .collect()
}
