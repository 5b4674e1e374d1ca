//! Display/JSON projections of result records.

use crate::api::{BuildRecord, TestRecord, TestStatus, Tree};
use crate::config::KciConfig;
use serde::Serialize;

/// `PASS`, `FAIL`, or `INCONCLUSIVE (status: <original>)`.
pub fn test_status_label(status: &TestStatus) -> String {
    match status {
        TestStatus::Pass | TestStatus::Fail => status.as_str().to_string(),
        other => format!("INCONCLUSIVE (status: {other})"),
    }
}

/// Evaluated builds only: `true` is `PASS`, `false` is `FAIL`.
pub fn build_status_label(valid: bool) -> &'static str {
    if valid { "PASS" } else { "FAIL" }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeView {
    pub tree: String,
    pub giturl: Option<String>,
    pub latest_commit_hash: Option<String>,
    pub latest_commit_name: Option<String>,
    pub latest_commit_start_time: Option<String>,
}

impl From<&Tree> for TreeView {
    fn from(tree: &Tree) -> Self {
        Self {
            tree: format!(
                "{}/{}",
                tree.display_name(),
                tree.git_repository_branch.as_deref().unwrap_or("-")
            ),
            giturl: tree.git_repository_url.clone(),
            latest_commit_hash: tree.git_commit_hash.clone(),
            latest_commit_name: tree.git_commit_name.clone(),
            latest_commit_start_time: tree.start_time.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildView {
    pub config: Option<String>,
    pub arch: Option<String>,
    pub compiler: Option<String>,
    pub status: String,
    pub config_url: Option<String>,
    pub log: Option<String>,
    pub id: String,
    pub dashboard: String,
}

impl BuildView {
    /// Project an evaluated build; `log` is the remote URL or local reference.
    pub fn new(build: &BuildRecord, log: Option<String>, config: &KciConfig) -> Self {
        Self {
            config: build.config_name.clone(),
            arch: build.architecture.clone(),
            compiler: build.compiler.clone(),
            status: build_status_label(build.valid.unwrap_or(false)).to_string(),
            config_url: build.config_url.clone(),
            log,
            id: build.id.clone(),
            dashboard: config.build_link(&build.id),
        }
    }

    pub fn passed(&self) -> bool {
        self.status == "PASS"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestView {
    pub test_path: Option<String>,
    pub hardware: Option<String>,
    pub compatibles: Vec<String>,
    pub config: Option<String>,
    pub arch: Option<String>,
    /// Not part of the JSON document but shown in text mode.
    #[serde(skip)]
    pub compiler: Option<String>,
    pub status: String,
    #[serde(skip)]
    pub raw_status: TestStatus,
    pub start_time: Option<String>,
    pub log: Option<String>,
    pub id: String,
    pub dashboard: String,
}

impl TestView {
    pub fn new(test: &TestRecord, log: Option<String>, config: &KciConfig) -> Self {
        Self {
            test_path: test.path.clone(),
            hardware: test.platform().map(str::to_string),
            compatibles: test.environment_compatible.clone(),
            config: test.config.clone(),
            arch: test.architecture.clone(),
            compiler: test.compiler.clone(),
            status: test_status_label(&test.status),
            raw_status: test.status.clone(),
            start_time: test.start_time.clone(),
            log,
            id: test.id.clone(),
            dashboard: config.test_link(&test.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::EnvironmentMisc;
    use serde_json::json;

    #[test]
    fn test_status_labels() {
        assert_eq!(test_status_label(&TestStatus::Pass), "PASS");
        assert_eq!(test_status_label(&TestStatus::Fail), "FAIL");
        assert_eq!(
            test_status_label(&TestStatus::Miss),
            "INCONCLUSIVE (status: MISS)"
        );
        assert_eq!(
            test_status_label(&TestStatus::Other("INFRA".into())),
            "INCONCLUSIVE (status: INFRA)"
        );
        assert_eq!(build_status_label(true), "PASS");
        assert_eq!(build_status_label(false), "FAIL");
    }

    #[test]
    fn test_build_view_json() {
        let build = BuildRecord {
            id: "maestro:b1".into(),
            config_name: Some("defconfig".into()),
            architecture: Some("arm64".into()),
            compiler: Some("gcc-12".into()),
            valid: Some(false),
            config_url: Some("https://storage/config".into()),
            log_url: Some("https://storage/build.log.gz".into()),
            start_time: None,
        };
        let view = BuildView::new(&build, build.log_url.clone(), &KciConfig::default());
        assert!(!view.passed());

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(
            value,
            json!({
                "config": "defconfig",
                "arch": "arm64",
                "compiler": "gcc-12",
                "status": "FAIL",
                "config_url": "https://storage/config",
                "log": "https://storage/build.log.gz",
                "id": "maestro:b1",
                "dashboard": "https://dashboard.kernelci.org/build/maestro:b1"
            })
        );
    }

    #[test]
    fn test_test_view_json() {
        let test = TestRecord {
            id: "maestro:t1".into(),
            path: Some("kselftest.cpufreq".into()),
            status: TestStatus::Done,
            environment_misc: Some(EnvironmentMisc {
                platform: Some("rk3588-rock-5b".into()),
            }),
            misc: None,
            environment_compatible: vec!["radxa,rock-5b".into()],
            config: Some("defconfig+kselftest".into()),
            architecture: Some("arm64".into()),
            compiler: Some("gcc-12".into()),
            log_url: None,
            start_time: Some("2025-03-01T10:00:00Z".into()),
        };
        let view = TestView::new(&test, Some("file:///tmp/x.log".into()), &KciConfig::default());

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["status"], "INCONCLUSIVE (status: DONE)");
        assert_eq!(value["hardware"], "rk3588-rock-5b");
        assert_eq!(value["compatibles"], json!(["radxa,rock-5b"]));
        assert_eq!(value["log"], "file:///tmp/x.log");
        assert_eq!(value["dashboard"], "https://dashboard.kernelci.org/test/maestro:t1");
        assert!(value.get("compiler").is_none());
        assert!(value.get("raw_status").is_none());
    }

    #[test]
    fn test_tree_view() {
        let tree = Tree {
            tree_name: None,
            git_repository_branch: Some("master".into()),
            git_repository_url: Some("https://host/linux.git".into()),
            git_commit_hash: Some("abc".into()),
            git_commit_name: Some("v6.14-rc1".into()),
            start_time: Some("t".into()),
        };
        let view = TreeView::from(&tree);
        assert_eq!(view.tree, "-/master");
        assert_eq!(view.latest_commit_name.as_deref(), Some("v6.14-rc1"));
    }
}
