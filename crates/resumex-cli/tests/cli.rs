use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RESUME: &str = "Jane Doe
jane.doe@mail.com
555-123-4567
EXPERIENCE
2020 | Acme Corp
Software Engineer
• Built APIs
EDUCATION
Bachelor of Science, MIT, 2016
SKILLS
Rust, Python, SQL
";

fn resumex(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("resumex").unwrap();
    // Keep the user's config file out of the way.
    cmd.arg("--config").arg(write_config(dir.path()));
    cmd.env_remove("OPENAI_API_KEY");
    cmd
}

fn write_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.json");
    if !path.exists() {
        fs::write(&path, "{}").unwrap();
    }
    path
}

fn write_resume(dir: &TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_extract_json() {
    let dir = TempDir::new().unwrap();
    let input = write_resume(&dir, "jane.txt", RESUME);

    resumex(&dir)
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""firstName":"Jane""#))
        .stdout(predicate::str::contains(r#""skills":["Rust","Python","SQL"]"#));
}

#[test]
fn test_extract_text_and_form_formats() {
    let dir = TempDir::new().unwrap();
    let input = write_resume(&dir, "jane.txt", RESUME);

    resumex(&dir)
        .args(["extract", "--format", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Jane Doe"))
        .stdout(predicate::str::contains("Software Engineer, Acme Corp (2020)"));

    resumex(&dir)
        .args(["extract", "--format", "form"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""degree": "Bachelors""#))
        .stdout(predicate::str::contains(r#""fromDate": "2020-01-01""#));
}

#[test]
fn test_extract_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_resume(&dir, "jane.txt", RESUME);
    let output = dir.path().join("out.json");

    resumex(&dir)
        .arg("extract")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains(r#""email":"jane.doe@mail.com""#));
}

#[test]
fn test_extract_empty_file_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_resume(&dir, "empty.txt", "");

    resumex(&dir)
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not extract any data"));
}

#[test]
fn test_extract_warnings() {
    let dir = TempDir::new().unwrap();
    let input = write_resume(&dir, "skills.txt", "SKILLS\nRust, Python");

    resumex(&dir)
        .args(["extract", "--warnings"])
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Could not extract candidate name"));
}

#[test]
fn test_image_needs_llm() {
    let dir = TempDir::new().unwrap();
    let input = write_resume(&dir, "scan.png", "png");

    resumex(&dir)
        .args(["extract", "--engine", "heuristic"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs the llm engine"));

    resumex(&dir)
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn test_unsupported_format() {
    let dir = TempDir::new().unwrap();
    let input = write_resume(&dir, "cv.docx", "data");

    resumex(&dir)
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn test_batch_with_summary() {
    let dir = TempDir::new().unwrap();
    write_resume(&dir, "jane.txt", RESUME);
    write_resume(&dir, "empty.txt", "");
    let out = dir.path().join("out");
    let pattern = dir.path().join("*.txt");

    resumex(&dir)
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));

    assert!(out.join("jane.json").exists());
    assert!(!out.join("empty.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,source,engine"));
    assert!(summary.contains("jane.txt,success,text,heuristic,Jane,Doe"));
    assert!(summary.contains("empty.txt,error"));
}

#[test]
fn test_batch_stops_on_error() {
    let dir = TempDir::new().unwrap();
    write_resume(&dir, "empty.txt", "");
    let pattern = dir.path().join("*.txt");

    resumex(&dir)
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure();
}

#[test]
fn test_config_set_and_get() {
    let dir = TempDir::new().unwrap();

    resumex(&dir)
        .args(["config", "set", "extraction.max_skills", "2"])
        .assert()
        .success();

    resumex(&dir)
        .args(["config", "get", "extraction.max_skills"])
        .assert()
        .success()
        .stdout(predicate::str::diff("2\n"));

    let input = write_resume(&dir, "jane.txt", RESUME);
    resumex(&dir)
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""skills":["Rust","Python"]"#));

    resumex(&dir)
        .args(["config", "get", "extraction.nope"])
        .assert()
        .failure();
}

#[test]
fn test_config_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fresh.json");

    resumex(&dir)
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains("min_text_length"));

    resumex(&dir)
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}
