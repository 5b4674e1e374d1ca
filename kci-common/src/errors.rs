//! Error taxonomy for result resolution and retrieval.
//!
//! Every variant except [`ResultsError::LogDownload`] is fatal for a command
//! invocation. Log download failures are recovered at the call site in
//! [`crate::logs`] and only surface as warnings.

use std::path::PathBuf;
use thiserror::Error;

/// HTTP statuses that the fetch client retries.
pub const RETRY_STATUS_CODES: [u16; 6] = [429, 500, 502, 503, 504, 507];

/// Errors raised while resolving, fetching or filtering results.
#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("Not a folder: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Not a GIT folder: {}", .0.display())]
    NotAGitRepository(PathBuf),

    #[error("git {command} failed: {message}")]
    GitCommand { command: String, message: String },

    #[error("No remote \"origin\" url found in {}", .0.display())]
    MissingRemote(PathBuf),

    #[error("Failed after {retries} retries with HTTP {status} from {url}")]
    RetriesExhausted { status: u16, retries: u32, url: String },

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Failed to fetch from {url}: {message}")]
    Network { url: String, message: String },

    #[error("json error: {0}")]
    Api(String),

    #[error("Invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    #[error("Tree and branch not found: {giturl} {branch}")]
    TreeNotFound { giturl: String, branch: String },

    #[error("Failed to fetch log {url}: {reason}")]
    LogDownload { url: String, reason: String },

    #[error("Invalid filter file {}: {message}", .path.display())]
    FilterFile { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResultsError {
    /// Whether an HTTP status should trigger another attempt.
    pub fn is_retryable_status(status: u16) -> bool {
        RETRY_STATUS_CODES.contains(&status)
    }

    /// Whether this error came from the HTTP layer (status or retry budget).
    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::RetriesExhausted { .. })
    }
}

/// Result type for kci-common operations.
pub type Result<T> = std::result::Result<T, ResultsError>;
