use brd_viewer::config::{Config, DEFAULT_BIND_ADDR, DEFAULT_STATIC_DIR};
use brd_viewer::render::DEFAULT_MAX_DEPTH;
use brd_viewer::upload::{
    SUPPORTED_KINDS, UploadCheck, UploadError, UploadKind, supported_formats_label,
    validate_upload,
};
use std::collections::HashMap;

#[test]
fn accepted_upload_names() {
    let cases = [
        ("proposal.pdf", UploadKind::Pdf),
        ("notes.txt", UploadKind::Text),
        ("legacy.doc", UploadKind::Doc),
        ("Requirements.DOCX", UploadKind::Docx),
        ("budget.xls", UploadKind::Xls),
        ("plan.v2.xlsx", UploadKind::Xlsx),
        ("export.csv", UploadKind::Csv),
        (".pdf", UploadKind::Pdf),
        ("archive.tar.CSV", UploadKind::Csv),
    ];

    for (name, kind) in cases {
        assert_eq!(validate_upload(name), Ok(kind), "validating {}", name);
    }
}

#[test]
fn rejected_upload_names() {
    assert_eq!(validate_upload(""), Err(UploadError::NoFileSelected));
    assert_eq!(validate_upload("  "), Err(UploadError::NoFileSelected));
    assert_eq!(
        validate_upload("slides.pptx"),
        Err(UploadError::UnsupportedType("slides.pptx".to_string()))
    );
    assert!(validate_upload("README").is_err());
    assert!(validate_upload("notes.").is_err());
    assert!(validate_upload("pdf").is_err());
}

#[test]
fn upload_kind_tables() {
    assert_eq!(SUPPORTED_KINDS.len(), 7);
    assert_eq!(UploadKind::from_extension("PDF"), Some(UploadKind::Pdf));
    assert_eq!(UploadKind::Csv.mime_type(), "text/csv");
    assert_eq!(
        serde_json::to_value(UploadCheck::from(UploadKind::Docx)).unwrap(),
        serde_json::json!({
            "kind": "docx",
            "extension": "docx",
            "mimeType": "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        })
    );
    assert_eq!(
        supported_formats_label(),
        "PDF, TXT, DOC, DOCX, XLS, XLSX, CSV"
    );
    assert_eq!(
        UploadError::NoFileSelected.to_string(),
        "Please select a file to upload"
    );
}

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn config_defaults_when_unset() {
    let config = Config::from_lookup(lookup(&[]));

    assert_eq!(config, Config::default());
    assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    assert_eq!(config.static_dir, DEFAULT_STATIC_DIR);
    assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
}

#[test]
fn config_reads_overrides() {
    let config = Config::from_lookup(lookup(&[
        ("BRD_BIND_ADDR", "0.0.0.0:8080"),
        ("BRD_STATIC_DIR", "/srv/brd"),
        ("BRD_MAX_DEPTH", " 12 "),
    ]));

    assert_eq!(config.bind_addr, "0.0.0.0:8080");
    assert_eq!(config.static_dir, "/srv/brd");
    assert_eq!(config.max_depth, 12);
}

#[test]
fn config_falls_back_on_invalid_values() {
    let config = Config::from_lookup(lookup(&[("BRD_MAX_DEPTH", "deep")]));
    assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);

    let zero = Config::from_lookup(lookup(&[("BRD_MAX_DEPTH", "0")]));
    assert_eq!(zero.max_depth, 1);
}
