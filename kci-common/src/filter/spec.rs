//! Allow-list filter files.
//!
//! ```yaml
//! hardware:
//!   - qemu-x86
//!   - google,juniper-sku16
//! test:
//!   - baseline.dmesg
//! ```

use crate::api::TestRecord;
use crate::errors::{Result, ResultsError};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Optional hardware and test-path allow-lists. A missing key disables that
/// sub-filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub hardware: Option<HashSet<String>>,
    #[serde(default)]
    pub test: Option<HashSet<String>>,
}

impl FilterSpec {
    pub fn from_yaml_str(contents: &str) -> std::result::Result<Self, serde_yaml_ng::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        // A document consisting of just `~` is an empty filter too.
        let spec: Option<Self> = serde_yaml_ng::from_str(contents)?;
        Ok(spec.unwrap_or_default())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ResultsError::FilterFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&contents).map_err(|e| ResultsError::FilterFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Platform or any compatible string is allow-listed.
    pub fn allows_hardware(&self, record: &TestRecord) -> bool {
        let Some(hardware) = &self.hardware else {
            return true;
        };
        record.platform().is_some_and(|p| hardware.contains(p))
            || record
                .environment_compatible
                .iter()
                .any(|c| hardware.contains(c))
    }

    /// Test path is allow-listed.
    pub fn allows_test(&self, record: &TestRecord) -> bool {
        let Some(tests) = &self.test else {
            return true;
        };
        record.path.as_deref().is_some_and(|p| tests.contains(p))
    }

    pub fn allows(&self, record: &TestRecord) -> bool {
        self.allows_hardware(record) && self.allows_test(record)
    }
}
