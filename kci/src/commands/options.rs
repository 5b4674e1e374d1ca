//! Option groups shared by the `results` subcommands.

use clap::{Args, Subcommand, ValueEnum};
use kci_common::config::DEFAULT_ORIGIN;
use kci_common::filter::StatusFilter;
use kci_common::target::TargetRequest;
use std::path::PathBuf;

#[derive(Subcommand, Debug, Clone)]
pub enum ResultsCommand {
    /// Display a summary of results
    Summary(TargetArgs),

    /// List trees from a given origin
    Trees(TreesArgs),

    /// Display build results
    Builds(ResultArgs),

    /// Display boot results
    Boots(ResultArgs),

    /// Display test results
    Tests(ResultArgs),
}

#[derive(Args, Debug, Clone)]
pub struct OriginArgs {
    /// Select KCIDB origin
    #[arg(long, env = "KCI_ORIGIN", default_value = DEFAULT_ORIGIN)]
    pub origin: String,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DisplayArgs {
    /// Display results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Selects the tree, branch and commit to query.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    #[command(flatten)]
    pub origin: OriginArgs,

    /// Git URL of kernel tree
    #[arg(long)]
    pub giturl: Option<String>,

    /// Branch to get results for
    #[arg(long)]
    pub branch: Option<String>,

    /// Path of git repository folder
    #[arg(long, value_name = "DIR")]
    pub git_folder: Option<PathBuf>,

    /// Commit or tag to get results for
    #[arg(long)]
    pub commit: Option<String>,

    /// Select latest results available
    #[arg(long)]
    pub latest: bool,

    /// Filter by architecture
    #[arg(long)]
    pub arch: Option<String>,

    #[command(flatten)]
    pub display: DisplayArgs,
}

impl TargetArgs {
    pub fn request(&self) -> TargetRequest {
        TargetRequest {
            origin: self.origin.origin.clone(),
            giturl: self.giturl.clone(),
            branch: self.branch.clone(),
            commit: self.commit.clone(),
            latest: self.latest,
            git_folder: self.git_folder.clone(),
        }
    }
}

/// Status class accepted by `--status`.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusArg {
    #[default]
    All,
    Pass,
    Fail,
    Inconclusive,
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => StatusFilter::All,
            StatusArg::Pass => StatusFilter::Pass,
            StatusArg::Fail => StatusFilter::Fail,
            StatusArg::Inconclusive => StatusFilter::Inconclusive,
        }
    }
}

/// Options for the builds, boots and tests listings.
#[derive(Args, Debug, Clone)]
pub struct ResultArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Download and decompress each result's log into the current directory
    #[arg(long)]
    pub download_logs: bool,

    /// Status of results to show
    #[arg(long, value_enum, default_value_t = StatusArg::All)]
    pub status: StatusArg,

    /// YAML file with hardware and test allow-lists
    #[arg(long, value_name = "FILE")]
    pub filter: Option<PathBuf>,

    /// Display the number of matching results
    #[arg(long)]
    pub count: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TreesArgs {
    #[command(flatten)]
    pub origin: OriginArgs,

    #[command(flatten)]
    pub display: DisplayArgs,
}
