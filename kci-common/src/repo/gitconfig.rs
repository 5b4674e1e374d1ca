//! Git metadata discovery and repository config parsing.

use std::fs;
use std::path::{Path, PathBuf};

/// Walk from `start` through its ancestors looking for `.git`.
///
/// Returns the directory holding the repository config. A `.git` file
/// (`gitdir: <path>`, as written for worktrees and submodules) is followed,
/// and a `commondir` inside the linked gitdir points at the shared config.
pub fn find_git_dir(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        let dot_git = dir.join(".git");
        if dot_git.is_dir() {
            Some(dot_git)
        } else if dot_git.is_file() {
            follow_gitdir_file(&dot_git)
        } else {
            None
        }
    })
}

fn follow_gitdir_file(dot_git: &Path) -> Option<PathBuf> {
    let contents = fs::read_to_string(dot_git).ok()?;
    let target = contents
        .lines()
        .find_map(|line| line.trim().strip_prefix("gitdir:"))?
        .trim();
    let base = dot_git.parent()?;
    let gitdir = base.join(target);
    if !gitdir.is_dir() {
        return None;
    }

    match fs::read_to_string(gitdir.join("commondir")) {
        Ok(common) => Some(gitdir.join(common.trim())),
        Err(_) => Some(gitdir),
    }
}

/// Extract `url` from the `[remote "origin"]` section of a git config.
pub fn origin_url(config: &str) -> Option<String> {
    let mut in_origin = false;

    for line in config.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header.split(']').next().unwrap_or("").trim();
            in_origin = is_origin_header(header);
            continue;
        }

        if !in_origin {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        if key.trim().eq_ignore_ascii_case("url") {
            let value = strip_inline_comment(value.trim());
            let value = value.trim_matches('"').trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    None
}

/// `remote "origin"` and the legacy `remote.origin` spelling.
fn is_origin_header(header: &str) -> bool {
    if let Some(rest) = header.strip_prefix("remote") {
        let rest = rest.trim();
        return rest == "\"origin\"" || rest == ".origin";
    }
    header.eq_ignore_ascii_case("remote.origin")
}

fn strip_inline_comment(value: &str) -> &str {
    if value.starts_with('"') {
        return value;
    }
    value
        .find([';', '#'])
        .map_or(value, |idx| value[..idx].trim_end())
}
