//! Validated load and save of catalog documents.

use std::fs;
use std::path::Path;

use catsync_types::{Document, TypeError, Value};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{StoreError, StoreResult};

/// Read and validate a document. Nothing partial is ever returned.
pub fn load_document(path: &Path) -> StoreResult<Document> {
    let bytes = fs::read(path).map_err(|e| StoreError::io(path, e))?;
    decode(&bytes, path)
}

/// Parse document text; `path` is only used for diagnostics.
pub fn parse_document(text: &str, path: &Path) -> StoreResult<Document> {
    decode(text.as_bytes(), path)
}

// Invalid UTF-8 is a parse failure like any other malformed content.
fn decode(bytes: &[u8], path: &Path) -> StoreResult<Document> {
    let value: Value = serde_json::from_slice(bytes).map_err(|source| StoreError::MalformedDocument {
        path: path.to_path_buf(),
        source,
    })?;
    Document::try_from(value).map_err(|e| match e {
        TypeError::NonObjectTopLevel { found } => StoreError::NonObjectTopLevel {
            path: path.to_path_buf(),
            found,
        },
        other => StoreError::Type(other),
    })
}

/// Serialize a document with `indent` spaces per level (`0` for compact).
pub fn render_document(document: &Document, indent: usize, path: &Path) -> StoreResult<Vec<u8>> {
    let serialization = |source| StoreError::Serialization {
        path: path.to_path_buf(),
        source,
    };
    if indent == 0 {
        return serde_json::to_vec(document).map_err(serialization);
    }
    let indent = vec![b' '; indent];
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent));
    document.serialize(&mut serializer).map_err(serialization)?;
    Ok(out)
}

/// Write the full serialized document, replacing any existing content.
pub fn save_document(path: &Path, document: &Document, indent: usize) -> StoreResult<()> {
    let bytes = render_document(document, indent, path)?;
    fs::write(path, bytes).map_err(|e| StoreError::io(path, e))?;
    tracing::debug!(path = %path.display(), groups = document.len(), "saved document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_valid_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ab.json");
        fs::write(&path, r#"{"common": {"hello": "hi"}}"#).unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.item_count(), 1);
    }

    #[test]
    fn malformed_content_is_reported_with_path() {
        let err = parse_document("{not json", Path::new("bad.json")).unwrap_err();
        match &err {
            StoreError::MalformedDocument { path, .. } => assert_eq!(path, Path::new("bad.json")),
            other => panic!("expected MalformedDocument, got {other:?}"),
        }
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ab.json");
        fs::write(&path, b"\xff\xfe").unwrap();

        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, StoreError::MalformedDocument { .. }), "got {err:?}");
    }

    #[test]
    fn huge_integers_survive_a_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ab.json");
        fs::write(&path, r#"{"g": {"n": 123456789012345678901234567890}}"#).unwrap();

        let doc = load_document(&path).unwrap();
        save_document(&path, &doc, 0).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"g":{"n":123456789012345678901234567890}}"#);
    }

    #[test]
    fn list_root_is_non_object() {
        let err = parse_document("[1, 2]", Path::new("list.json")).unwrap_err();
        assert!(matches!(
            err,
            StoreError::NonObjectTopLevel { found: "array", .. }
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn save_overwrites_and_keeps_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "old content that is longer than the new one").unwrap();

        let doc = parse_document(r#"{"g": {"k": "grüße"}}"#, &path).unwrap();
        save_document(&path, &doc, 2).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"g\": {\n    \"k\": \"grüße\"\n  }\n}");
        assert_eq!(load_document(&path).unwrap(), doc);
    }

    #[test]
    fn indent_width_is_configurable() {
        let doc = parse_document(r#"{"g": {"k": 1}}"#, Path::new("x.json")).unwrap();
        let four = render_document(&doc, 4, Path::new("x.json")).unwrap();
        assert_eq!(String::from_utf8(four).unwrap(), "{\n    \"g\": {\n        \"k\": 1\n    }\n}");

        let compact = render_document(&doc, 0, Path::new("x.json")).unwrap();
        assert_eq!(String::from_utf8(compact).unwrap(), r#"{"g":{"k":1}}"#);
    }
}
