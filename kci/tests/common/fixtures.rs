use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// `kci` with a scrubbed environment: no inherited KCI_* overrides, plain
/// log output, and an API root nothing listens on.
pub fn kci() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_kci"));
    for var in ["KCI_API_URL", "KCI_DASHBOARD_URL", "KCI_MAX_RETRIES", "KCI_ORIGIN", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd.env("KCI_LOG", "info")
        .env("KCI_LOG_FORMAT", "pretty")
        .env("NO_COLOR", "1")
        .env("KCI_API_URL", "http://127.0.0.1:9/api/");
    cmd
}

/// An empty directory that is not inside any git checkout.
pub struct ScratchDir {
    pub dir: TempDir,
}

impl ScratchDir {
    pub fn new() -> Self {
        crate::test_log!("FIXTURE: Creating scratch directory");
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
