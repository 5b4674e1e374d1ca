//! Dashboard results API access.
//!
//! # Endpoints
//!
//! | Path                         | Payload                     |
//! |------------------------------|-----------------------------|
//! | `tree/{commit}/summary`      | [`SummaryResponse`]         |
//! | `tree/{commit}/builds`       | [`BuildsResponse`]          |
//! | `tree/{commit}/boots`        | [`BootsResponse`]           |
//! | `tree/{commit}/tests`        | [`TestsResponse`]           |
//! | `tree-fast`                  | list of [`Tree`]            |
//!
//! Any response whose JSON body carries a top-level `error` field is treated
//! as a failure regardless of HTTP status.

pub mod client;
pub mod models;
pub mod transport;

pub use client::{DashboardClient, TreeQuery, build_url};
pub use models::{
    BootsResponse, BuildRecord, BuildStatusCounts, BuildsResponse, EnvironmentMisc,
    SummaryResponse, TestRecord, TestStatus, TestStatusBlock, TestsResponse, Tree, TreeSummary,
};
pub use transport::{HttpResponse, HttpTransport, TransportError, UreqTransport};
