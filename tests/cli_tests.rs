use regex::Regex;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    data_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_path = dir.path().join("samples.csv");

        // Two blobs of 20 plus one labelled outlier at the end.
        let mut f = File::create(&data_path).unwrap();
        writeln!(f, "x,y,label").unwrap();
        for i in 0..20 {
            writeln!(f, "{},{},0", (i % 5) as f64 * 0.1, (i / 5) as f64 * 0.1).unwrap();
        }
        for i in 0..20 {
            writeln!(f, "{},{},0", 4.0 + (i % 5) as f64 * 0.1, 4.0 + (i / 5) as f64 * 0.1)
                .unwrap();
        }
        writeln!(f, "20.0,-15.0,1").unwrap();

        Self { dir, data_path }
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_gbmad"))
            .args(args)
            .output()
            .expect("Failed to execute gbmad")
    }
}

#[test]
fn test_score_prints_ranking_and_summary() {
    let ctx = TestContext::new();
    let data = ctx.data_path.to_str().unwrap();
    let output = ctx.run(&["score", "--data", data, "--labels", "--min-ball-size", "4", "--top", "3"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("TOP 3 OUTLIERS"), "stdout: {}", stdout);
    assert!(stdout.contains("Converged"));

    let auc = Regex::new(r"\|\s+[01]\.\d{4}\s+\|").unwrap();
    assert!(auc.is_match(&stdout), "no AUC cell in: {}", stdout);
}

#[test]
fn test_output_file_has_one_row_per_sample() {
    let ctx = TestContext::new();
    let data = ctx.data_path.to_str().unwrap();
    let out_path = ctx.dir.path().join("scores.csv");
    let out = out_path.to_str().unwrap();

    let output = ctx.run(&["score", "--data", data, "--labels", "--min-ball-size", "4", "--output", out]);
    assert!(output.status.success());

    let content = fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "sample,score,ball");
    assert_eq!(lines.len(), 41 + 1);

    let row = Regex::new(r"^\d+,[0-9.eE+-]+,\d+$").unwrap();
    assert!(lines[1..].iter().all(|l| row.is_match(l)));
}

#[test]
fn test_json_config_is_overridden_by_flags() {
    let ctx = TestContext::new();
    let data = ctx.data_path.to_str().unwrap();
    let cfg_path = ctx.dir.path().join("cfg.json");
    fs::write(&cfg_path, r#"{"walk": {"damping": 7.0}, "granulation": {"min_ball_size": 4}}"#)
        .unwrap();
    let cfg = cfg_path.to_str().unwrap();

    // damping 7.0 from the file is invalid ...
    let bad = ctx.run(&["score", "--data", data, "--labels", "--config", cfg]);
    assert!(!bad.status.success());
    assert!(String::from_utf8_lossy(&bad.stderr).contains("damping"));

    // ... unless the command line supplies a valid one.
    let good = ctx.run(&["score", "--data", data, "--labels", "--config", cfg, "--damping", "0.5"]);
    assert!(
        good.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&good.stderr)
    );
}

#[test]
fn test_balls_command_lists_every_ball() {
    let ctx = TestContext::new();
    let data = ctx.data_path.to_str().unwrap();
    let output = ctx.run(&["balls", "--data", data, "--labels", "--min-ball-size", "4"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Radius"));
    assert!(stdout.contains("AD"));
}

#[test]
fn test_missing_data_file_fails() {
    let ctx = TestContext::new();
    let missing = ctx.dir.path().join("nope.csv");
    let output = ctx.run(&["score", "--data", missing.to_str().unwrap()]);
    assert!(!output.status.success());
}
