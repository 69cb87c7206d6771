use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;

fn write_dataset(path: &Path) {
    let mut f = File::create(path).unwrap();
    writeln!(f, "a,b,c").unwrap();
    for i in 0..60 {
        let blob = (i % 3) as f64 * 2.5;
        let t = i as f64 * 0.37;
        writeln!(f, "{},{},{}", blob + t.sin() * 0.2, blob + t.cos() * 0.2, (i % 7) as f64 * 0.01)
            .unwrap();
    }
    writeln!(f, "9.0,-4.0,0.5").unwrap();
}

fn score_to_file(data: &Path, out: &Path) {
    let status = Command::new(env!("CARGO_BIN_EXE_gbmad"))
        .args([
            "score",
            "--data",
            data.to_str().unwrap(),
            "--min-ball-size",
            "5",
            "--seed",
            "1234",
            "--output",
            out.to_str().unwrap(),
        ])
        .status()
        .expect("Failed to execute gbmad");
    assert!(status.success());
}

#[test]
fn test_same_seed_same_scores() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let data = dir.path().join("data.csv");
    write_dataset(&data);

    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    score_to_file(&data, &first);
    score_to_file(&data, &second);

    let a = fs::read_to_string(first).unwrap();
    let b = fs::read_to_string(second).unwrap();
    assert_eq!(a.lines().count(), 62);
    assert_eq!(a, b, "Scores differ between identical runs");
}
