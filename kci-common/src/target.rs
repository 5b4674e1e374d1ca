//! Resolution of the (origin, giturl, branch, commit) tuple to query.

use crate::api::{DashboardClient, HttpTransport, TreeQuery};
use crate::errors::{Result, ResultsError};
use crate::repo::{self, RepoInfo, normalize_git_url};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where the target's giturl/branch came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
    /// Supplied on the command line.
    Explicit,
    /// Derived from a local checkout. Holds what the locator reported, before
    /// any `--latest` override.
    Checkout(RepoInfo),
}

impl TargetSource {
    pub fn checkout(&self) -> Option<&RepoInfo> {
        match self {
            Self::Checkout(info) => Some(info),
            Self::Explicit => None,
        }
    }
}

/// User input for target resolution.
#[derive(Debug, Clone, Default)]
pub struct TargetRequest {
    pub origin: String,
    pub giturl: Option<String>,
    pub branch: Option<String>,
    pub commit: Option<String>,
    pub latest: bool,
    pub git_folder: Option<PathBuf>,
}

impl TargetRequest {
    /// giturl and branch are given and exactly one of commit/latest is set.
    pub fn is_explicit(&self) -> bool {
        let has = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        has(&self.giturl) && has(&self.branch) && (self.commit.is_some() ^ self.latest)
    }
}

/// A fully specified tree checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub origin: String,
    pub giturl: String,
    pub branch: String,
    pub commit: String,
    pub source: TargetSource,
}

impl Target {
    pub fn query(&self, arch: Option<&str>) -> TreeQuery {
        TreeQuery {
            origin: self.origin.clone(),
            giturl: self.giturl.clone(),
            branch: self.branch.clone(),
            commit: self.commit.clone(),
            arch: arch.map(str::to_string),
        }
    }
}

/// Resolve `request`, inspecting the local checkout when needed.
pub fn resolve<T: HttpTransport>(
    request: &TargetRequest,
    client: &DashboardClient<T>,
) -> Result<Target> {
    resolve_with(request, client, repo::locate)
}

/// Resolve `request` with an explicit repository locator.
pub fn resolve_with<T, L>(
    request: &TargetRequest,
    client: &DashboardClient<T>,
    locate: L,
) -> Result<Target>
where
    T: HttpTransport,
    L: FnOnce(Option<&Path>, Option<&str>) -> Result<RepoInfo>,
{
    let mut target = if request.is_explicit() {
        Target {
            origin: request.origin.clone(),
            giturl: normalize_git_url(request.giturl.as_deref().unwrap_or_default()),
            branch: request.branch.clone().unwrap_or_default(),
            commit: request.commit.clone().unwrap_or_default(),
            source: TargetSource::Explicit,
        }
    } else {
        if request.giturl.is_some() && request.branch.is_some() {
            if request.latest {
                warn!("Both --commit and --latest given; using the local checkout instead");
            } else {
                warn!("Neither --commit nor --latest given; using the local checkout instead");
            }
        }
        let info = locate(request.git_folder.as_deref(), request.branch.as_deref())?;
        Target {
            origin: request.origin.clone(),
            giturl: info.giturl.clone(),
            branch: info.branch.clone(),
            commit: info.commit.clone(),
            source: TargetSource::Checkout(info),
        }
    };

    if request.latest {
        target.commit = latest_commit(client, &target.origin, &target.giturl, &target.branch)?;
        info!(commit = %target.commit, "Using latest commit reported by the dashboard");
    }

    Ok(target)
}

/// Commit hash of the first tree in the `origin` listing whose URL and branch
/// match exactly.
pub fn latest_commit<T: HttpTransport>(
    client: &DashboardClient<T>,
    origin: &str,
    giturl: &str,
    branch: &str,
) -> Result<String> {
    let wanted = normalize_git_url(giturl);
    client
        .tree_list(origin)?
        .into_iter()
        .find(|tree| {
            tree.git_repository_branch.as_deref() == Some(branch)
                && tree
                    .git_repository_url
                    .as_deref()
                    .is_some_and(|url| normalize_git_url(url) == wanted)
        })
        .and_then(|tree| tree.git_commit_hash)
        .ok_or_else(|| ResultsError::TreeNotFound {
            giturl: giturl.to_string(),
            branch: branch.to_string(),
        })
}
