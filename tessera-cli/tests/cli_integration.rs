//! Integration tests for the tessera CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn tessera() -> Command {
    Command::cargo_bin("tessera").unwrap()
}

#[test]
fn test_process_plain_text() {
    let mut cmd = tessera();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("plain-sample.txt"))
        .arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("The river rose slowly through the night."))
        .stdout(predicate::str::contains("Farmers moved their animals"));
}

#[test]
fn test_json_output() {
    let mut cmd = tessera();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("plain-sample.txt"))
        .arg("-f")
        .arg("json")
        .arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("["))
        .stdout(predicate::str::contains("\"chunks\""))
        .stdout(predicate::str::contains("\"chunk_index\": 0"))
        .stdout(predicate::str::contains("\"structured\": false"));
}

#[test]
fn test_jsonl_output_one_object_per_line() {
    let output = tessera()
        .args(["process", "-q", "-f", "jsonl", "--max-size", "60", "--overlap", "10"])
        .arg("-i")
        .arg(fixture_path("plain-sample.txt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines.len() > 1);
    for (i, line) in lines.iter().enumerate() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["metadata"]["chunk_index"], serde_json::json!(i));
        assert!(value["text"].as_str().unwrap().chars().count() <= 60);
    }
}

#[test]
fn test_markdown_output() {
    let mut cmd = tessera();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("plain-sample.txt"))
        .arg("-f")
        .arg("markdown")
        .arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("plain-sample.txt"))
        .stdout(predicate::str::contains("## Chunk 0 (text)"))
        .stdout(predicate::str::contains("---"))
        .stdout(predicate::str::contains("*Total chunks: 1"));
}

#[test]
fn test_markdown_document_uses_sections() {
    let mut cmd = tessera();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("report-sample.md"))
        .arg("-f")
        .arg("json")
        .arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"structured\": true"))
        .stdout(predicate::str::contains("\"chunking_strategy\": \"section\""))
        .stdout(predicate::str::contains(
            "\"section_header\": \"Regional Revenue Table\"",
        ))
        .stdout(predicate::str::contains("\"content_type\": \"table\""));
}

#[test]
fn test_plain_flag_skips_structure() {
    let mut cmd = tessera();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("report-sample.md"))
        .arg("-f")
        .arg("json")
        .arg("--plain")
        .arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"structured\": false"))
        .stdout(predicate::str::contains("section_header").not());
}

#[test]
fn test_paged_document_is_cleaned() {
    let mut cmd = tessera();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("paged-sample.txt"))
        .arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("new warehouse opening"))
        .stdout(predicate::str::contains("Forty new people joined"))
        .stdout(predicate::str::contains("ACME QUARTERLY BULLETIN").not());
}

#[test]
fn test_boilerplate_warning_logged() {
    let mut cmd = tessera();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("paged-sample.txt"));

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("repeated boilerplate"));
}

#[test]
fn test_conflicting_gate_flags() {
    let mut cmd = tessera();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("plain-sample.txt"))
        .arg("--plain")
        .arg("--force-structured");

    cmd.assert().failure();
}

#[test]
fn test_nonexistent_file() {
    let mut cmd = tessera();
    cmd.arg("process").arg("-i").arg("nonexistent-file.txt");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_invalid_size_overrides() {
    let mut cmd = tessera();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("plain-sample.txt"))
        .arg("--max-size")
        .arg("40")
        .arg("--overlap")
        .arg("40");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("overlap (40) must be smaller"));
}

#[test]
fn test_glob_pattern_processes_all_files() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("a.txt"),
        "First file has a sentence that is long enough.",
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("b.txt"),
        "Second file also has a sentence that is long enough.",
    )
    .unwrap();

    let mut cmd = tessera();
    cmd.arg("process")
        .arg("-i")
        .arg(format!("{}/*.txt", temp_dir.path().display()))
        .arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("First file has a sentence"))
        .stdout(predicate::str::contains("Second file also has a sentence"));
}

#[test]
fn test_unreadable_file_skipped_in_batch() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("a.txt"),
        "This readable file still gets processed.",
    )
    .unwrap();
    fs::write(temp_dir.path().join("b.txt"), [0xff, 0xfe, 0x00, 0x9f]).unwrap();

    let mut cmd = tessera();
    cmd.arg("process")
        .arg("-i")
        .arg(format!("{}/*.txt", temp_dir.path().display()));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("This readable file still gets processed."))
        .stderr(predicate::str::contains("Skipping"));
}

#[test]
fn test_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("chunks.json");

    let mut cmd = tessera();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("plain-sample.txt"))
        .arg("-f")
        .arg("json")
        .arg("-o")
        .arg(&output_path)
        .arg("-q");

    cmd.assert().success().stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&output_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}

#[test]
fn test_config_file_applies() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("tessera.toml");
    fs::write(&config_path, "[chunking]\nmax_size = 50\noverlap = 5\nmin_size = 5\n").unwrap();

    let output = tessera()
        .args(["process", "-q", "-f", "jsonl"])
        .arg("-i")
        .arg(fixture_path("plain-sample.txt"))
        .arg("--config")
        .arg(&config_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.lines().count() > 1);
    assert!(stdout.contains("\"chunk_size_used\":50"));
}

#[test]
fn test_generate_then_validate_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("generated.toml");

    tessera()
        .arg("generate-config")
        .arg("-o")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration generated successfully"));

    tessera()
        .arg("validate")
        .arg("-c")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("max_size=500"));
}

#[test]
fn test_validate_rejects_bad_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[chunking]\nmin_size = 900\n").unwrap();

    tessera()
        .arg("validate")
        .arg("-c")
        .arg(&config_path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Configuration is invalid"));
}

#[test]
fn test_list_content_types() {
    tessera()
        .args(["list", "content-types"])
        .assert()
        .success()
        .stdout(predicate::str::contains("table"))
        .stdout(predicate::str::contains("250"))
        .stdout(predicate::str::contains("heading"));
}

#[test]
fn test_list_formats() {
    tessera()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jsonl"))
        .stdout(predicate::str::contains("markdown"));
}
