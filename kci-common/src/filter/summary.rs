//! Pass/fail/inconclusive summary reshaped from dashboard counters.

use crate::api::{TestStatus, TestStatusBlock, TreeSummary};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryCounts {
    pub pass: u64,
    pub fail: u64,
    pub inconclusive: u64,
}

impl SummaryCounts {
    fn from_tests(block: &TestStatusBlock) -> Self {
        Self {
            pass: block.count(&TestStatus::Pass),
            fail: block.count(&TestStatus::Fail),
            inconclusive: TestStatus::INCONCLUSIVE
                .iter()
                .map(|s| block.count(s))
                .sum(),
        }
    }
}

/// Three independent triples. Build inconclusive is the dashboard's
/// unevaluated (`null`) count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub builds: SummaryCounts,
    pub boots: SummaryCounts,
    pub tests: SummaryCounts,
}

impl From<&TreeSummary> for Summary {
    fn from(summary: &TreeSummary) -> Self {
        let builds = summary.builds.status;
        Self {
            builds: SummaryCounts {
                pass: builds.valid,
                fail: builds.invalid,
                inconclusive: builds.null,
            },
            boots: SummaryCounts::from_tests(&summary.boots),
            tests: SummaryCounts::from_tests(&summary.tests),
        }
    }
}
