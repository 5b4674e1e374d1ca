//! Log retrieval for build, boot and test records.
//!
//! Logs are stored gzip-compressed on the storage server. A fetched log is
//! decompressed into the output directory under a name derived from the
//! record and the commit. Failure to fetch one log never aborts a listing:
//! the record keeps its remote URL and a warning is emitted.

use crate::api::{BuildRecord, HttpTransport, TestRecord};
use crate::errors::{Result, ResultsError};
use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Prefix of a local log reference.
pub const FILE_SCHEME: &str = "file://";

fn field(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Keep generated names inside the output directory.
fn sanitize(name: String) -> String {
    name.replace(['/', '\\'], "_")
}

/// `{config}-{arch}-{compiler}-{commit}.log`
pub fn build_log_name(build: &BuildRecord, commit: &str) -> String {
    sanitize(format!(
        "{}-{}-{}-{}.log",
        field(build.config_name.as_deref()),
        field(build.architecture.as_deref()),
        field(build.compiler.as_deref()),
        commit
    ))
}

/// `{platform}__{path}__{config}-{arch}-{compiler}-{commit}.log`
pub fn test_log_name(test: &TestRecord, commit: &str) -> String {
    sanitize(format!(
        "{}__{}__{}-{}-{}-{}.log",
        field(test.platform()),
        field(test.path.as_deref()),
        field(test.config.as_deref()),
        field(test.architecture.as_deref()),
        field(test.compiler.as_deref()),
        commit
    ))
}

/// Downloads and decompresses logs into a directory.
pub struct LogFetcher<T: HttpTransport> {
    transport: T,
    out_dir: PathBuf,
}

impl<T: HttpTransport> LogFetcher<T> {
    pub fn new(transport: T, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            out_dir: out_dir.into(),
        }
    }

    /// Fetch `url`, gunzip it and write it to `file_name` in the output
    /// directory. Returns the absolute path of the written file.
    pub fn retrieve(&self, url: &str, file_name: &str) -> Result<PathBuf> {
        let failed = |reason: String| ResultsError::LogDownload {
            url: url.to_string(),
            reason,
        };

        let response = self.transport.get(url).map_err(|e| failed(e.to_string()))?;
        if !response.is_success() {
            return Err(failed(format!("HTTP {}", response.status)));
        }

        let mut contents = Vec::new();
        GzDecoder::new(response.body.as_slice())
            .read_to_end(&mut contents)
            .map_err(|e| failed(format!("not a gzip stream: {e}")))?;

        let path = self.out_dir.join(file_name);
        fs::write(&path, &contents).map_err(|e| failed(format!("{}: {e}", path.display())))?;
        let path = if path.is_absolute() {
            path
        } else {
            std::env::current_dir()?.join(path)
        };

        debug!(url, path = %path.display(), bytes = contents.len(), "Saved log");
        Ok(path)
    }

    /// Local `file://` reference for a record's log, or the original URL when
    /// the download fails. `None` stays `None`.
    pub fn log_reference(&self, url: Option<&str>, file_name: &str) -> Option<String> {
        let url = url?;
        match self.retrieve(url, file_name) {
            Ok(path) => Some(format!("{FILE_SCHEME}{}", path.display())),
            Err(e) => {
                warn!("{e}");
                Some(url.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::{HttpResponse, ScriptedTransport, TransportError};
    use crate::api::{EnvironmentMisc, TestStatus};
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn build() -> BuildRecord {
        BuildRecord {
            id: "maestro:b1".into(),
            config_name: Some("defconfig".into()),
            architecture: Some("arm64".into()),
            compiler: Some("gcc-12".into()),
            valid: Some(true),
            config_url: None,
            log_url: Some("https://storage/build.log.gz".into()),
            start_time: None,
        }
    }

    fn test_record() -> TestRecord {
        TestRecord {
            id: "maestro:t1".into(),
            path: Some("baseline.dmesg".into()),
            status: TestStatus::Pass,
            environment_misc: Some(EnvironmentMisc {
                platform: Some("qemu-x86".into()),
            }),
            misc: None,
            environment_compatible: Vec::new(),
            config: Some("defconfig".into()),
            architecture: Some("x86_64".into()),
            compiler: Some("gcc-12".into()),
            log_url: Some("https://storage/test.log.gz".into()),
            start_time: None,
        }
    }

    #[test]
    fn test_log_names() {
        assert_eq!(build_log_name(&build(), "abc123"), "defconfig-arm64-gcc-12-abc123.log");
        assert_eq!(
            test_log_name(&test_record(), "abc123"),
            "qemu-x86__baseline.dmesg__defconfig-x86_64-gcc-12-abc123.log"
        );
    }

    #[test]
    fn test_log_name_missing_fields_and_separators() {
        let mut record = test_record();
        record.environment_misc = None;
        record.config = Some("defconfig+arm64-chromebook/kselftest".into());
        assert_eq!(
            test_log_name(&record, "c"),
            "-__baseline.dmesg__defconfig+arm64-chromebook_kselftest-x86_64-gcc-12-c.log"
        );
    }

    #[test]
    fn test_retrieve_decompresses_to_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = LogFetcher::new(
            ScriptedTransport::with_responses([HttpResponse::new(200, gzip(b"Linux version 6.14\n"))]),
            dir.path(),
        );

        let path = fetcher.retrieve("https://storage/build.log.gz", "build.log").unwrap();
        assert_eq!(path, dir.path().join("build.log"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "Linux version 6.14\n");
    }

    #[test]
    fn test_log_reference_success_is_file_url() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = LogFetcher::new(
            ScriptedTransport::with_responses([HttpResponse::new(200, gzip(b"ok"))]),
            dir.path(),
        );

        let reference = fetcher
            .log_reference(Some("https://storage/x.gz"), "x.log")
            .unwrap();
        assert_eq!(
            reference,
            format!("file://{}", dir.path().join("x.log").display())
        );
    }

    #[test]
    fn test_log_reference_failure_keeps_remote_url() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = LogFetcher::new(
            ScriptedTransport::new([
                Ok(HttpResponse::new(404, "")),
                Ok(HttpResponse::new(200, "plain text, not gzip")),
                Err(TransportError("connection reset".into())),
            ]),
            dir.path(),
        );

        for _ in 0..3 {
            assert_eq!(
                fetcher.log_reference(Some("https://storage/x.gz"), "x.log"),
                Some("https://storage/x.gz".to_string())
            );
        }
        assert!(!dir.path().join("x.log").exists());
    }

    #[test]
    fn test_missing_url_is_not_fetched() {
        let fetcher = LogFetcher::new(ScriptedTransport::default(), ".");
        assert_eq!(fetcher.log_reference(None, "x.log"), None);
        assert!(fetcher.transport.requests().is_empty());
    }

    #[test]
    fn test_retrieve_error_variant() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = LogFetcher::new(
            ScriptedTransport::with_responses([HttpResponse::new(500, "")]),
            dir.path(),
        );
        let err = fetcher.retrieve("https://storage/x.gz", "x.log").unwrap_err();
        assert!(matches!(err, ResultsError::LogDownload { .. }));
        assert!(err.to_string().contains("HTTP 500"));
    }
}
