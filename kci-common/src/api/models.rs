//! Typed projections of dashboard API payloads.
//!
//! Fields the dashboard may report as `null` are `Option`s. All types are
//! read-only views of one response.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A tree entry from the `tree-fast` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    #[serde(default)]
    pub tree_name: Option<String>,
    #[serde(default)]
    pub git_repository_branch: Option<String>,
    #[serde(default)]
    pub git_repository_url: Option<String>,
    #[serde(default)]
    pub git_commit_hash: Option<String>,
    #[serde(default)]
    pub git_commit_name: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
}

impl Tree {
    /// Tree name, with `-` standing in for unnamed trees.
    pub fn display_name(&self) -> &str {
        self.tree_name.as_deref().unwrap_or("-")
    }
}

/// A build result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub id: String,
    #[serde(default)]
    pub config_name: Option<String>,
    #[serde(default)]
    pub architecture: Option<String>,
    #[serde(default)]
    pub compiler: Option<String>,
    /// `None` means the build has not been evaluated yet.
    #[serde(default)]
    pub valid: Option<bool>,
    #[serde(default)]
    pub config_url: Option<String>,
    #[serde(default)]
    pub log_url: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
}

/// Outcome of a boot or test.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TestStatus {
    Pass,
    Fail,
    Error,
    Skip,
    Miss,
    Done,
    Null,
    /// A status string the dashboard introduced after this list was written.
    Other(String),
}

impl TestStatus {
    pub const INCONCLUSIVE: [TestStatus; 5] = [
        TestStatus::Error,
        TestStatus::Skip,
        TestStatus::Miss,
        TestStatus::Done,
        TestStatus::Null,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Error => "ERROR",
            Self::Skip => "SKIP",
            Self::Miss => "MISS",
            Self::Done => "DONE",
            Self::Null => "NULL",
            Self::Other(value) => value,
        }
    }

    /// Neither a clean pass nor a clean fail.
    pub fn is_inconclusive(&self) -> bool {
        !matches!(self, Self::Pass | Self::Fail)
    }

    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "PASS" => Self::Pass,
            "FAIL" => Self::Fail,
            "ERROR" => Self::Error,
            "SKIP" => Self::Skip,
            "MISS" => Self::Miss,
            "DONE" => Self::Done,
            "NULL" => Self::Null,
            _ => return None,
        })
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TestStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TestStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A JSON null status is reported as NULL.
        Ok(match Option::<String>::deserialize(deserializer)? {
            None => Self::Null,
            Some(value) => Self::parse(&value).unwrap_or(Self::Other(value)),
        })
    }
}

/// Free-form environment details attached to a boot or test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentMisc {
    #[serde(default)]
    pub platform: Option<String>,
}

/// A boot or test result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub id: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "null_status")]
    pub status: TestStatus,
    #[serde(default)]
    pub environment_misc: Option<EnvironmentMisc>,
    #[serde(default)]
    pub misc: Option<EnvironmentMisc>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub environment_compatible: Vec<String>,
    #[serde(default)]
    pub config: Option<String>,
    #[serde(default)]
    pub architecture: Option<String>,
    #[serde(default)]
    pub compiler: Option<String>,
    #[serde(default)]
    pub log_url: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
}

fn null_status() -> TestStatus {
    TestStatus::Null
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl TestRecord {
    /// Hardware platform, from `environment_misc` or else `misc`.
    pub fn platform(&self) -> Option<&str> {
        self.environment_misc
            .as_ref()
            .and_then(|m| m.platform.as_deref())
            .or_else(|| self.misc.as_ref().and_then(|m| m.platform.as_deref()))
    }
}

/// `GET tree/{commit}/builds`
#[derive(Debug, Clone, Deserialize)]
pub struct BuildsResponse {
    #[serde(default)]
    pub builds: Vec<BuildRecord>,
}

/// `GET tree/{commit}/boots`
#[derive(Debug, Clone, Deserialize)]
pub struct BootsResponse {
    #[serde(default)]
    pub boots: Vec<TestRecord>,
}

/// `GET tree/{commit}/tests`
#[derive(Debug, Clone, Deserialize)]
pub struct TestsResponse {
    #[serde(default)]
    pub tests: Vec<TestRecord>,
}

/// Pre-aggregated build counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct BuildStatusCounts {
    #[serde(default)]
    pub valid: u64,
    #[serde(default)]
    pub invalid: u64,
    #[serde(default)]
    pub null: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildStatusBlock {
    #[serde(default)]
    pub status: BuildStatusCounts,
}

/// Pre-aggregated per-status counters for boots or tests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestStatusBlock {
    #[serde(default)]
    pub status: BTreeMap<String, u64>,
}

impl TestStatusBlock {
    pub fn count(&self, status: &TestStatus) -> u64 {
        self.status.get(status.as_str()).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeSummary {
    #[serde(default)]
    pub builds: BuildStatusBlock,
    #[serde(default)]
    pub boots: TestStatusBlock,
    #[serde(default)]
    pub tests: TestStatusBlock,
}

/// `GET tree/{commit}/summary`
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResponse {
    pub summary: TreeSummary,
}
