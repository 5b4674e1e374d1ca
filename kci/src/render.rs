//! Text and JSON output for `kci results`.
//!
//! Results go to the `out` writer (stdout in the binary). JSON mode always
//! writes exactly one document followed by a newline.

use colored::Colorize;
use kci_common::RepoInfo;
use kci_common::api::TestStatus;
use kci_common::filter::{BuildView, Summary, SummaryCounts, TestView, TreeView};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

pub const NO_INCONCLUSIVE_BUILDS: &str = "No information about inconclusive builds.";

fn or_none(value: Option<&str>) -> &str {
    value.unwrap_or("None")
}

/// Serialize `value` as a single JSON line.
pub fn json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)
}

pub fn count(out: &mut dyn Write, n: usize, as_json: bool) -> io::Result<()> {
    if as_json {
        json(out, &serde_json::json!({ "count": n }))
    } else {
        writeln!(out, "{n}")
    }
}

pub fn message(out: &mut dyn Write, text: &str, as_json: bool) -> io::Result<()> {
    if as_json {
        json(out, &serde_json::json!({ "message": text }))
    } else {
        writeln!(out, "{text}")
    }
}

/// Lines describing the local checkout a target was derived from.
pub fn checkout_info(out: &mut dyn Write, git_folder: Option<&Path>, repo: &RepoInfo) -> io::Result<()> {
    match git_folder {
        Some(folder) => writeln!(out, "git folder: {}", folder.display())?,
        None => writeln!(out, "git folder: None")?,
    }
    writeln!(out, "tree: {}", repo.giturl)?;
    writeln!(out, "branch: {}", repo.branch)?;
    writeln!(out, "commit: {}", repo.commit)
}

fn summary_line(out: &mut dyn Write, kind: &str, counts: &SummaryCounts) -> io::Result<()> {
    let pass = counts.pass.to_string();
    let fail = counts.fail.to_string();
    let inconclusive = counts.inconclusive.to_string();
    writeln!(
        out,
        "{kind}:\t{}/{}/{}",
        if counts.pass > 0 { pass.green() } else { pass.normal() },
        if counts.fail > 0 { fail.red() } else { fail.normal() },
        if counts.inconclusive > 0 { inconclusive.yellow() } else { inconclusive.normal() },
    )
}

pub fn summary(out: &mut dyn Write, summary: &Summary, as_json: bool) -> io::Result<()> {
    if as_json {
        return json(out, summary);
    }
    writeln!(out, "pass/fail/inconclusive")?;
    summary_line(out, "builds", &summary.builds)?;
    summary_line(out, "boots", &summary.boots)?;
    summary_line(out, "tests", &summary.tests)
}

pub fn trees(out: &mut dyn Write, trees: &[TreeView], as_json: bool) -> io::Result<()> {
    if as_json {
        return json(out, trees);
    }
    for tree in trees {
        writeln!(out, "{}", format!("- {}:", tree.tree).green())?;
        writeln!(out, "  giturl: {}", or_none(tree.giturl.as_deref()))?;
        writeln!(
            out,
            "  latest: {} ({})",
            or_none(tree.latest_commit_hash.as_deref()),
            or_none(tree.latest_commit_name.as_deref())
        )?;
        writeln!(out, "  latest: {}", or_none(tree.latest_commit_start_time.as_deref()))?;
    }
    Ok(())
}

pub fn build(out: &mut dyn Write, view: &BuildView) -> io::Result<()> {
    writeln!(
        out,
        "- config:{} arch: {} compiler: {}",
        or_none(view.config.as_deref()).cyan(),
        or_none(view.arch.as_deref()).cyan(),
        or_none(view.compiler.as_deref()).cyan()
    )?;
    let status = if view.passed() {
        view.status.green()
    } else {
        view.status.red()
    };
    writeln!(out, "  status:{status}")?;
    writeln!(out, "  config_url: {}", or_none(view.config_url.as_deref()))?;
    writeln!(out, "  log: {}", or_none(view.log.as_deref()))?;
    writeln!(out, "  id: {}", view.id)?;
    writeln!(out, "  dashboard: {}", view.dashboard)?;
    writeln!(out)
}

pub fn builds(out: &mut dyn Write, views: &[BuildView], as_json: bool) -> io::Result<()> {
    if as_json {
        return json(out, views);
    }
    views.iter().try_for_each(|view| build(out, view))
}

pub fn test(out: &mut dyn Write, view: &TestView) -> io::Result<()> {
    writeln!(out, "- test path: {}", or_none(view.test_path.as_deref()).cyan())?;
    writeln!(out, "  hardware: {}", or_none(view.hardware.as_deref()).cyan())?;
    if !view.compatibles.is_empty() {
        writeln!(out, "  compatibles: {}", view.compatibles.join(" | ").cyan())?;
    }
    writeln!(
        out,
        "  config: {} arch: {} compiler: {}",
        or_none(view.config.as_deref()).cyan(),
        or_none(view.arch.as_deref()).cyan(),
        or_none(view.compiler.as_deref()).cyan()
    )?;
    let status = match view.raw_status {
        TestStatus::Pass => view.status.green(),
        TestStatus::Fail => view.status.red(),
        _ => view.status.yellow(),
    };
    writeln!(out, "  status:{status}")?;
    writeln!(out, "  log: {}", or_none(view.log.as_deref()))?;
    writeln!(out, "  start time: {}", or_none(view.start_time.as_deref()))?;
    writeln!(out, "  id: {}", view.id)?;
    writeln!(out, "  dashboard: {}", view.dashboard)?;
    writeln!(out)
}

pub fn tests(out: &mut dyn Write, views: &[TestView], as_json: bool) -> io::Result<()> {
    if as_json {
        return json(out, views);
    }
    views.iter().try_for_each(|view| test(out, view))
}
