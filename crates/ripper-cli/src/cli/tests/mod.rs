//! CLI parse and config override tests.

use super::{report_line, Cli};
use ripper_core::batch::RunSummary;
use clap::Parser;
use std::path::Path;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_positional_paths() {
    let cli = parse(&["ripper", "urls.txt", "out.csv"]);
    assert_eq!(cli.input, Path::new("urls.txt"));
    assert_eq!(cli.output, Path::new("out.csv"));
    assert!(cli.max_workers.is_none());
    assert!(cli.config.is_none());
    assert!(cli.summary.is_none());
    assert!(!cli.log_file);
}

#[test]
fn cli_parse_flags() {
    let cli = parse(&[
        "ripper",
        "urls.txt",
        "out.csv",
        "--max-workers",
        "8",
        "--config",
        "/tmp/ripper.toml",
        "--summary",
        "/tmp/summary.json",
        "--log-file",
    ]);
    assert_eq!(cli.max_workers, Some(8));
    assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/ripper.toml")));
    assert_eq!(cli.summary.as_deref(), Some(Path::new("/tmp/summary.json")));
    assert!(cli.log_file);
}

#[test]
fn cli_requires_both_paths() {
    assert!(Cli::try_parse_from(["ripper", "urls.txt"]).is_err());
    assert!(Cli::try_parse_from(["ripper"]).is_err());
}

#[test]
fn cli_rejects_non_numeric_workers() {
    assert!(Cli::try_parse_from(["ripper", "a", "b", "--max-workers", "many"]).is_err());
}

fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, body).unwrap();
    path
}

const CONFIG: &str = r#"
max_workers = 3
user_agent = "test-agent"
connect_timeout_secs = 5
timeout_secs = 10
"#;

#[test]
fn max_workers_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), CONFIG);
    let p = path.to_str().unwrap();

    let cfg = parse(&["ripper", "in", "out", "--config", p]).load_config().unwrap();
    assert_eq!(cfg.max_workers, 3);
    assert_eq!(cfg.user_agent, "test-agent");

    let cfg = parse(&["ripper", "in", "out", "--config", p, "--max-workers", "7"])
        .load_config()
        .unwrap();
    assert_eq!(cfg.max_workers, 7);
}

#[test]
fn zero_workers_flag_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), CONFIG);
    let cli = parse(&["ripper", "in", "out", "--config", path.to_str().unwrap(), "--max-workers", "0"]);
    assert!(cli.load_config().is_err());
}

#[test]
fn report_line_totals_contributing_and_failed() {
    let s = RunSummary {
        unique_urls: 7,
        succeeded: 3,
        recovered: 1,
        failed_http: 1,
        failed_parse: 1,
        failed_other: 0,
        empty: 1,
        rows: 12,
    };
    assert_eq!(
        report_line(&s),
        "7 URL(s): 4 contributed (1 recovered), 2 failed (1 HTTP, 1 parse, 0 other), 1 empty, 12 rows"
    );
}
