use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn cli() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_brd-viewer"));
    command.env("RUST_LOG", "off");
    command
}

#[test]
fn extract_prints_reference_json() {
    let output = cli()
        .args(["extract", "https://docs.google.com/spreadsheets/d/XYZ789/edit"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"fileId":"XYZ789","fileType":"spreadsheet"}"#
    );
}

#[test]
fn extract_fails_on_bad_url() {
    let output = cli().args(["extract", "not a url"]).output().unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid Google file URL"));
}

#[test]
fn render_prints_outline_for_record_or_body() {
    let dir = tempdir().unwrap();
    let record = dir.path().join("record.json");
    fs::write(
        &record,
        r#"{"id": "1", "brd": {"projectScope": "Pilot", "teamSize": null}, "created_at": ""}"#,
    )
    .unwrap();
    let body = dir.path().join("body.json");
    fs::write(&body, r#"{"projectScope": "Pilot", "teamSize": null}"#).unwrap();

    for path in [&record, &body] {
        let output = cli()
            .arg("render")
            .arg(path)
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "Project Scope: Pilot\n");
    }
}

#[test]
fn page_writes_html_file() {
    let dir = tempdir().unwrap();
    let record = dir.path().join("record.json");
    let out = dir.path().join("brd.html");
    fs::write(
        &record,
        r#"{"id": "7", "brd": {"executiveSummary": "Hello"}, "original_filename": "a.txt"}"#,
    )
    .unwrap();

    let status = cli()
        .arg("page")
        .arg(&record)
        .arg(&out)
        .status()
        .unwrap();

    assert!(status.success());
    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("Hello"));
    assert!(html.contains("Source: a.txt"));
}

#[test]
fn check_reports_upload_format() {
    let output = cli().args(["check", "Budget.XLSX"]).output().unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["kind"], "xlsx");
    assert_eq!(
        json["mimeType"],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );

    let rejected = cli().args(["check", "slides.pptx"]).output().unwrap();
    assert!(!rejected.status.success());
    let stderr = String::from_utf8_lossy(&rejected.stderr);
    assert!(stderr.contains("Unsupported file type: slides.pptx"));
    assert!(stderr.contains("PDF, TXT, DOC, DOCX, XLS, XLSX, CSV"));
}

#[test]
fn usage_on_missing_arguments() {
    let output = cli().arg("render").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));
}
