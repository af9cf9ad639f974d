use brd_viewer::file_info::{FileInfoError, FileReference, FileType, extract, parse_file_url};

// Helper to check a URL resolves to the expected reference
fn assert_reference(url: &str, file_id: &str, file_type: FileType) {
    let reference = extract(url);
    assert_eq!(
        reference,
        Some(FileReference {
            file_id: file_id.to_string(),
            file_type,
        }),
        "unexpected result for {}",
        url
    );
}

#[test]
fn document_url_resolves() {
    assert_reference(
        "https://docs.google.com/document/d/ABC123/edit",
        "ABC123",
        FileType::Document,
    );
}

#[test]
fn spreadsheet_url_resolves() {
    assert_reference(
        "https://docs.google.com/spreadsheets/d/XYZ789/edit",
        "XYZ789",
        FileType::Spreadsheet,
    );
}

#[test]
fn query_and_fragment_are_ignored() {
    assert_reference(
        "https://docs.google.com/document/d/1abc-DEF_456/edit?usp=sharing#heading=h.1",
        "1abc-DEF_456",
        FileType::Document,
    );
    assert_reference(
        "https://docs.google.com/spreadsheets/d/SHEET42?gid=0",
        "SHEET42",
        FileType::Spreadsheet,
    );
}

#[test]
fn account_scoped_path_still_finds_id() {
    assert_reference(
        "https://docs.google.com/document/u/1/d/ACCT99/view",
        "ACCT99",
        FileType::Document,
    );
}

#[test]
fn other_hosts_are_unsupported() {
    assert_eq!(extract("https://example.com/foo"), None);
    assert_eq!(
        parse_file_url("https://example.com/foo"),
        Err(FileInfoError::UnsupportedHost)
    );
    assert_eq!(
        parse_file_url("https://drive.google.com/file/d/ABC123/view"),
        Err(FileInfoError::UnsupportedHost)
    );
    assert_eq!(
        parse_file_url("https://docs.google.com/presentation/d/ABC123/edit"),
        Err(FileInfoError::UnsupportedHost)
    );
}

#[test]
fn malformed_urls_are_rejected_without_panicking() {
    for url in [
        "not a url",
        "",
        "   ",
        "docs.google.com/document/d/ABC123/edit",
        "://docs.google.com/document/d/ABC123",
        "https://",
        "https:///document/d/ABC123",
        "https://docs.google.com/document/d/ABC 123/edit",
    ] {
        assert_eq!(
            parse_file_url(url),
            Err(FileInfoError::InvalidUrlFormat),
            "expected invalid format for {:?}",
            url
        );
    }
}

#[test]
fn missing_file_id_is_rejected() {
    for url in [
        "https://docs.google.com/document/",
        "https://docs.google.com/document/d",
        "https://docs.google.com/document/d/",
        "https://docs.google.com/spreadsheets/d//edit",
        "https://docs.google.com/spreadsheets/edit?d=ABC",
    ] {
        assert_eq!(
            parse_file_url(url),
            Err(FileInfoError::InvalidUrlFormat),
            "expected missing id for {:?}",
            url
        );
        assert_eq!(extract(url), None);
    }
}

#[test]
fn extraction_is_deterministic() {
    let url = "https://docs.google.com/document/d/ABC123/edit";
    assert_eq!(extract(url), extract(url));
}

#[test]
fn reference_uses_backend_field_names() {
    let reference = extract("https://docs.google.com/spreadsheets/d/XYZ789/edit").unwrap();
    let json = serde_json::to_value(&reference).unwrap();

    assert_eq!(
        json,
        serde_json::json!({ "fileId": "XYZ789", "fileType": "spreadsheet" })
    );
    assert_eq!(reference.source_label(), "google_spreadsheet_XYZ789");
}

#[test]
fn error_messages_are_user_facing() {
    assert_eq!(
        FileInfoError::InvalidUrlFormat.to_string(),
        "Invalid Google file URL"
    );
    assert_eq!(
        FileInfoError::UnsupportedHost.to_string(),
        "Only Google Docs and Google Sheets URLs are supported"
    );
}
