use serde_json::{json, Value};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn plagsweep() -> Command {
    Command::new(env!("CARGO_BIN_EXE_plagsweep"))
}

fn histogram_99() -> Vec<u64> {
    let mut h = vec![0u64; 100];
    h[99] = 1;
    h
}

fn write_report(path: &Path) {
    let overview = json!({
        "distributions": {"MAX": histogram_99(), "AVG": histogram_99()},
        "submission_ids_to_comparison_file_name": {
            "one": {"two": "one-two.json"},
            "two": {"one": "one-two.json"},
        },
        "top_comparisons": [{"first_submission": "one", "second_submission": "two"}],
    });
    let comparison = json!({"id1": "one", "id2": "two", "similarities": {"MAX": 1.0, "AVG": 1.0}, "matches": []});
    let mut zip = zip::ZipWriter::new(std::fs::File::create(path).unwrap());
    let options = zip::write::SimpleFileOptions::default();
    zip.start_file("overview.json", options).unwrap();
    zip.write_all(overview.to_string().as_bytes()).unwrap();
    zip.start_file("one-two.json", options).unwrap();
    zip.write_all(comparison.to_string().as_bytes()).unwrap();
    zip.finish().unwrap();
}

fn write_manifest(path: &Path) {
    let manifest = json!([
        {"id": "one", "author": "t1", "lang": "python3", "files": {"main.py": "print(1)"}},
        {"id": "two", "author": "t1", "lang": "python3", "files": {"main.py": "print(1)"}},
    ]);
    std::fs::write(path, manifest.to_string()).unwrap();
}

#[test]
fn help_lists_subcommands() {
    let out = plagsweep().arg("--help").output().unwrap();
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("run"));
    assert!(text.contains("minimize"));
}

#[test]
fn minimize_prints_summary() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("python3.jplag");
    let manifest = dir.path().join("manifest.json");
    write_report(&report);
    write_manifest(&manifest);

    let out = plagsweep()
        .args(["minimize", "--report"])
        .arg(&report)
        .arg("--manifest")
        .arg(&manifest)
        .output()
        .unwrap();

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let summary: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(summary["stats"]["removed"], json!(["one-two.json"]));
    assert!(dir.path().join("python3.min.jplag").exists());
}

#[test]
fn minimize_missing_report_fails() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("manifest.json");
    write_manifest(&manifest);

    let out = plagsweep()
        .args(["minimize", "--report"])
        .arg(dir.path().join("absent.jplag"))
        .arg("--manifest")
        .arg(&manifest)
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert!(!dir.path().join("absent.min.jplag").exists());
}

#[test]
fn run_rejects_unsupported_language() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("manifest.json");
    write_manifest(&manifest);

    let out = plagsweep()
        .args(["run", "--lang", "cobol", "--manifest"])
        .arg(&manifest)
        .arg("--report-dir")
        .arg(dir.path().join("reports"))
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Unsupported language"));
}
