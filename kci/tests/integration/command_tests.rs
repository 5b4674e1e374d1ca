use crate::common::{ScratchDir, assert_contains, assert_not_contains, init_test_logging, kci};

#[test]
fn test_kci_help_lists_results() {
    init_test_logging();
    crate::test_log!("TEST START: test_kci_help_lists_results");

    let output = kci().arg("--help").output().expect("Failed to run kci --help");

    assert!(output.status.success(), "kci --help failed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_contains(&stdout, "KernelCI results");
    assert_contains(&stdout, "results");
    crate::test_log!("TEST PASS: test_kci_help_lists_results");
}

#[test]
fn test_results_help_lists_subcommands() {
    init_test_logging();

    let output = kci()
        .args(["results", "--help"])
        .output()
        .expect("Failed to run kci results --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in ["summary", "trees", "builds", "boots", "tests"] {
        assert_contains(&stdout, subcommand);
    }
}

#[test]
fn test_builds_help_lists_options() {
    init_test_logging();

    let output = kci()
        .args(["results", "builds", "--help"])
        .output()
        .expect("Failed to run kci results builds --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for option in [
        "--origin",
        "--giturl",
        "--branch",
        "--git-folder",
        "--commit",
        "--latest",
        "--arch",
        "--json",
        "--download-logs",
        "--status",
        "--filter",
        "--count",
    ] {
        assert_contains(&stdout, option);
    }
    assert_contains(&stdout, "inconclusive");
}

#[test]
fn test_invalid_status_is_usage_error() {
    init_test_logging();

    let output = kci()
        .args(["results", "builds", "--status", "bogus"])
        .output()
        .expect("Failed to run kci");

    assert_eq!(output.status.code(), Some(2));
    assert_contains(&String::from_utf8_lossy(&output.stderr), "bogus");
}

#[test]
fn test_missing_git_folder_fails() {
    init_test_logging();
    crate::test_log!("TEST START: test_missing_git_folder_fails");

    let scratch = ScratchDir::new();
    let missing = scratch.path().join("does-not-exist");
    let output = kci()
        .args(["results", "summary", "--git-folder"])
        .arg(&missing)
        .output()
        .expect("Failed to run kci");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert_contains(&String::from_utf8_lossy(&output.stderr), "Not a folder");
}

#[test]
fn test_non_git_folder_fails() {
    init_test_logging();

    let scratch = ScratchDir::new();
    let output = kci()
        .args(["results", "builds", "--git-folder"])
        .arg(scratch.path())
        .output()
        .expect("Failed to run kci");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert_contains(&String::from_utf8_lossy(&output.stderr), "Not a GIT folder");
}

#[test]
fn test_unreadable_filter_fails_before_fetch() {
    init_test_logging();

    let scratch = ScratchDir::new();
    let output = kci()
        .args([
            "results",
            "tests",
            "--giturl",
            "https://git.kernel.org/pub/scm/linux/kernel/git/torvalds/linux.git",
            "--branch",
            "master",
            "--commit",
            "abc123",
            "--filter",
        ])
        .arg(scratch.path().join("filter.yaml"))
        .output()
        .expect("Failed to run kci");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "Invalid filter file");
    assert_not_contains(&stderr, "Failed to fetch");
}

#[test]
fn test_unreachable_api_is_network_error() {
    init_test_logging();

    let output = kci()
        .args([
            "results",
            "builds",
            "--giturl",
            "https://git.kernel.org/pub/scm/linux/kernel/git/torvalds/linux.git",
            "--branch",
            "master",
            "--commit",
            "abc123",
            "--json",
        ])
        .env("KCI_MAX_RETRIES", "lots")
        .output()
        .expect("Failed to run kci");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "KCI_MAX_RETRIES");
    assert_contains(&stderr, "Failed to fetch from http://127.0.0.1:9/api/tree/abc123/builds");
    assert_not_contains(&stderr, "Retrying");
}
