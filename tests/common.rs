use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::Path;

pub fn solace() -> Command {
    cargo_bin_cmd!("solace")
}

/// Initialize a store under `dir` and return nothing; panics on failure.
#[allow(dead_code)]
pub fn init_store(dir: &Path) {
    solace().current_dir(dir).arg("init").assert().success();
}

/// Seed one record into the store under `dir` by importing a dump document.
///
/// Network-free stand-in for `solace analyze`; returns the record id.
#[allow(dead_code)]
pub fn seed_record(dir: &Path, id: &str, content: &str, summary: &str, severity: f64) -> String {
    seed_record_with(dir, id, content, summary, severity, &[], false)
}

#[allow(dead_code)]
pub fn seed_record_with(
    dir: &Path,
    id: &str,
    content: &str,
    summary: &str,
    severity: f64,
    tags: &[&str],
    favorite: bool,
) -> String {
    let document = serde_json::json!({
        "version": 1,
        "exportedAt": "2026-08-01T12:00:00Z",
        "records": [{
            "id": id,
            "content": content,
            "summary": summary,
            "response": {
                "severity": severity,
                "summary": summary,
                "explanation": "Your reaction is understandable given the situation.",
                "explanations": [],
                "cbtAnalysis": {
                    "thoughtPatterns": [],
                    "copingStrategies": []
                }
            },
            "tags": tags,
            "favorite": favorite,
            "lastViewed": "2026-08-01T12:00:00Z",
            "createdAt": "2026-08-01T12:00:00Z",
            "updatedAt": "2026-08-01T12:00:00Z"
        }],
        "tags": []
    });

    let dump_path = dir.join(format!("{}.dump.json", id));
    fs::write(&dump_path, serde_json::to_string_pretty(&document).unwrap()).unwrap();

    solace()
        .current_dir(dir)
        .arg("import")
        .arg(&dump_path)
        .assert()
        .success();

    id.to_string()
}
