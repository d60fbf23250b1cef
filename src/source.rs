use crate::config::SourceRecord;
use crate::error::SourceLoadError;
use memchr::memchr_iter;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    One(SourceRecord),
    Many(Vec<SourceRecord>),
}

/// Loads provider records from `path`. Line-delimited files are best-effort.
pub fn load(path: &Path) -> Result<Vec<SourceRecord>, SourceLoadError> {
    let bytes = std::fs::read(path).map_err(|source| SourceLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let records = if is_line_delimited(path) {
        parse_lines(&bytes)
    } else {
        parse_document(&bytes).map_err(|source| SourceLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?
    };

    info!(path = %path.display(), records = records.len(), "loaded source records");
    Ok(records)
}

fn is_line_delimited(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("jsonl") | Some("ndjson")
    )
}

pub fn parse_document(bytes: &[u8]) -> Result<Vec<SourceRecord>, serde_json::Error> {
    Ok(match serde_json::from_slice(bytes)? {
        Document::One(record) => vec![record],
        Document::Many(records) => records,
    })
}

/// One object per line. Blank and malformed lines are skipped.
pub fn parse_lines(bytes: &[u8]) -> Vec<SourceRecord> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut line_no = 0usize;

    for nl in memchr_iter(b'\n', bytes) {
        line_no += 1;
        push_line(&bytes[start..nl], line_no, &mut out);
        start = nl + 1;
    }
    if start < bytes.len() {
        push_line(&bytes[start..], line_no + 1, &mut out);
    }
    out
}

fn push_line(line: &[u8], line_no: usize, out: &mut Vec<SourceRecord>) {
    if line.iter().all(u8::is_ascii_whitespace) {
        return;
    }
    match serde_json::from_slice::<SourceRecord>(line) {
        Ok(record) => out.push(record),
        Err(e) => warn!(line = line_no, error = %e, "skipping malformed source line"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldValue;
    use std::io::Write;

    const LINES: &str = r#"{"name":"a","nodeID":["n1"]}

not json
{"name":"b"}"#;

    #[test]
    fn parse_lines_skips_blank_and_malformed() {
        let v = parse_lines(LINES.as_bytes());
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].get_ignore_case("nodeid"), Some(&FieldValue::from(vec!["n1"])));
        assert_eq!(v[1].get_ignore_case("name"), Some(&FieldValue::from("b")));
    }

    #[test]
    fn parse_lines_handles_crlf() {
        let v = parse_lines(b"{\"name\":\"a\"}\r\n{\"name\":\"b\"}\r\n");
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn parse_document_accepts_object_or_array() {
        assert_eq!(parse_document(br#"{"name":"a"}"#).unwrap().len(), 1);
        assert_eq!(parse_document(br#"[{"name":"a"},{"name":"b"}]"#).unwrap().len(), 2);
        assert!(parse_document(b"\"name\"").is_err());
    }

    #[test]
    fn load_dispatches_on_extension() {
        let mut jsonl = tempfile::Builder::new().suffix(".jsonl").tempfile().unwrap();
        write!(jsonl, "{}", LINES).unwrap();
        assert_eq!(load(jsonl.path()).unwrap().len(), 2);

        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, "{}", LINES).unwrap();
        assert!(matches!(load(json.path()), Err(SourceLoadError::Parse { .. })));
    }
}
