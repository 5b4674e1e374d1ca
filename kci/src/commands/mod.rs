//! `kci results` subcommands.
//!
//! Each handler resolves the target, performs one dashboard query, filters the
//! result set and hands the shaped records to [`crate::render`].

mod options;

pub use options::ResultsCommand;
use options::{ResultArgs, TargetArgs, TreesArgs};

use crate::render;
use anyhow::Result;
use kci_common::KciConfig;
use kci_common::api::{DashboardClient, HttpTransport, TestRecord};
use kci_common::filter::{
    BuildSelection, BuildView, FilterSpec, StatusFilter, Summary, TestView, TreeView,
    select_builds, select_tests,
};
use kci_common::logs::{LogFetcher, build_log_name, test_log_name};
use kci_common::target::{self, Target};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Shared state for one invocation.
pub struct Context<'a, T: HttpTransport> {
    pub config: &'a KciConfig,
    pub client: &'a DashboardClient<T>,
    /// Directory downloaded logs are written to.
    pub log_dir: PathBuf,
}

/// Output sinks: results and informational lines.
pub struct Output<'a> {
    pub out: &'a mut dyn Write,
    pub info: &'a mut dyn Write,
}

pub fn run<T: HttpTransport>(
    command: &ResultsCommand,
    ctx: &Context<'_, T>,
    output: &mut Output<'_>,
) -> Result<()> {
    match command {
        ResultsCommand::Summary(args) => summary(args, ctx, output),
        ResultsCommand::Trees(args) => trees(args, ctx, output),
        ResultsCommand::Builds(args) => builds(args, ctx, output),
        ResultsCommand::Boots(args) => boots(args, ctx, output),
        ResultsCommand::Tests(args) => tests(args, ctx, output),
    }
}

fn resolve_target<T: HttpTransport>(
    args: &TargetArgs,
    ctx: &Context<'_, T>,
    output: &mut Output<'_>,
) -> Result<Target> {
    let target = target::resolve(&args.request(), ctx.client)?;
    if let Some(repo) = target.source.checkout() {
        render::checkout_info(output.info, args.git_folder.as_deref(), repo)?;
    }
    debug!(
        origin = %target.origin,
        giturl = %target.giturl,
        branch = %target.branch,
        commit = %target.commit,
        "Resolved target"
    );
    Ok(target)
}

fn summary<T: HttpTransport>(
    args: &TargetArgs,
    ctx: &Context<'_, T>,
    output: &mut Output<'_>,
) -> Result<()> {
    let target = resolve_target(args, ctx, output)?;
    let counters = ctx.client.tree_summary(&target.query(args.arch.as_deref()))?;
    render::summary(output.out, &Summary::from(&counters), args.display.json)?;
    Ok(())
}

fn trees<T: HttpTransport>(
    args: &TreesArgs,
    ctx: &Context<'_, T>,
    output: &mut Output<'_>,
) -> Result<()> {
    let views: Vec<TreeView> = ctx
        .client
        .tree_list(&args.origin.origin)?
        .iter()
        .map(TreeView::from)
        .collect();
    render::trees(output.out, &views, args.display.json)?;
    Ok(())
}

fn builds<T: HttpTransport>(
    args: &ResultArgs,
    ctx: &Context<'_, T>,
    output: &mut Output<'_>,
) -> Result<()> {
    let target = resolve_target(&args.target, ctx, output)?;
    let as_json = args.target.display.json;
    if args.filter.is_some() {
        warn!("--filter applies to boots and tests only; ignoring it for builds");
    }

    let records = ctx
        .client
        .tree_builds(&target.query(args.target.arch.as_deref()))?;
    let selected = match select_builds(&records, args.status.into()) {
        BuildSelection::NoInconclusiveView => {
            render::message(output.out, render::NO_INCONCLUSIVE_BUILDS, as_json)?;
            return Ok(());
        }
        BuildSelection::Records(selected) => selected,
    };

    if args.count {
        render::count(output.out, selected.len(), as_json)?;
        return Ok(());
    }

    let fetcher = args
        .download_logs
        .then(|| LogFetcher::new(ctx.client.transport(), ctx.log_dir.clone()));
    let views: Vec<BuildView> = selected
        .into_iter()
        .map(|build| {
            let log = match &fetcher {
                Some(fetcher) => fetcher.log_reference(
                    build.log_url.as_deref(),
                    &build_log_name(build, &target.commit),
                ),
                None => build.log_url.clone(),
            };
            BuildView::new(build, log, ctx.config)
        })
        .collect();

    render::builds(output.out, &views, as_json)?;
    Ok(())
}

fn boots<T: HttpTransport>(
    args: &ResultArgs,
    ctx: &Context<'_, T>,
    output: &mut Output<'_>,
) -> Result<()> {
    let spec = load_filter(args)?;
    let target = resolve_target(&args.target, ctx, output)?;
    let records = ctx
        .client
        .tree_boots(&target.query(args.target.arch.as_deref()))?;
    list_tests(args, ctx, &target, &records, spec.as_ref(), output)
}

fn tests<T: HttpTransport>(
    args: &ResultArgs,
    ctx: &Context<'_, T>,
    output: &mut Output<'_>,
) -> Result<()> {
    let spec = load_filter(args)?;
    let target = resolve_target(&args.target, ctx, output)?;
    let records = ctx
        .client
        .tree_tests(&target.query(args.target.arch.as_deref()))?;
    list_tests(args, ctx, &target, &records, spec.as_ref(), output)
}

/// Read the allow-list file, if any, before touching the network.
fn load_filter(args: &ResultArgs) -> Result<Option<FilterSpec>> {
    Ok(args.filter.as_deref().map(FilterSpec::from_path).transpose()?)
}

/// Filter and render boot or test records.
fn list_tests<T: HttpTransport>(
    args: &ResultArgs,
    ctx: &Context<'_, T>,
    target: &Target,
    records: &[TestRecord],
    spec: Option<&FilterSpec>,
    output: &mut Output<'_>,
) -> Result<()> {
    let as_json = args.target.display.json;
    let status: StatusFilter = args.status.into();
    let selected = select_tests(records, status, spec);
    debug!(total = records.len(), selected = selected.len(), %status, "Filtered results");

    if args.count {
        render::count(output.out, selected.len(), as_json)?;
        return Ok(());
    }

    let fetcher = args
        .download_logs
        .then(|| LogFetcher::new(ctx.client.transport(), ctx.log_dir.clone()));
    let views: Vec<TestView> = selected
        .into_iter()
        .map(|test| {
            let log = match &fetcher {
                Some(fetcher) => fetcher.log_reference(
                    test.log_url.as_deref(),
                    &test_log_name(test, &target.commit),
                ),
                None => test.log_url.clone(),
            };
            TestView::new(test, log, ctx.config)
        })
        .collect();

    render::tests(output.out, &views, as_json)?;
    Ok(())
}
