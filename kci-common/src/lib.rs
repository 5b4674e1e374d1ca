//! kci results core
//!
//! Locates a kernel tree checkout, resolves the commit to query, fetches
//! summary, build, boot and test results from the KernelCI dashboard API,
//! filters them by status and allow-lists, and optionally retrieves logs.

#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod errors;
pub mod filter;
pub mod logging;
pub mod logs;
pub mod repo;
pub mod target;

pub use api::{DashboardClient, HttpTransport, TreeQuery, UreqTransport};
pub use config::{EnvError, EnvParser, KciConfig};
pub use errors::{Result, ResultsError};
pub use filter::{FilterSpec, StatusFilter, Summary};
pub use logging::{LogConfig, LogFormat, init_logging};
pub use logs::LogFetcher;
pub use repo::{RepoInfo, locate, normalize_git_url};
pub use target::{Target, TargetRequest, TargetSource, resolve};
