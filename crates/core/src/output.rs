//! Writing the generated document to disk.

use crate::error::{Error, Result};
use crate::specializer::OpenApiDocument;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Renders `value` as JSON indented with four spaces.
pub fn to_pretty_json(value: &Value) -> Result<Vec<u8>, serde_json::Error> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Writes `document` to `path`.
///
/// The bytes go to a temporary file in the destination directory which is
/// then renamed over `path`, so readers never observe a partial document.
pub fn write_document(document: &OpenApiDocument, path: &Path) -> Result<()> {
    let write_error = |source: std::io::Error| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let json = to_pretty_json(document.as_value()).map_err(|e| write_error(e.into()))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(&json).map_err(write_error)?;
    file.persist(path).map_err(|e| write_error(e.error))?;

    info!(path = %path.display(), bytes = json.len(), "OpenAPI document written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::FieldDescriptor;
    use crate::specializer::specialize;
    use crate::template::OpenApiTemplate;
    use serde_json::json;

    fn document() -> OpenApiDocument {
        let template = OpenApiTemplate::bundled().unwrap();
        let fields = vec![FieldDescriptor::new("Name", "string", true)];
        specialize(&template, &fields, "Account", "x.my.salesforce.com", "v64.0").unwrap()
    }

    #[test]
    fn test_pretty_json_uses_four_spaces() {
        let rendered = to_pretty_json(&json!({"a": {"b": 1}})).unwrap();
        assert_eq!(
            String::from_utf8(rendered).unwrap(),
            "{\n    \"a\": {\n        \"b\": 1\n    }\n}"
        );
    }

    #[test]
    fn test_write_document_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("account.json");
        let doc = document();

        write_document(&doc, &path).unwrap();

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(&written, doc.as_value());
    }

    #[test]
    fn test_write_document_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("account.json");
        std::fs::write(&path, "stale").unwrap();

        write_document(&document(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with('{'));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_document_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("account.json");

        let err = write_document(&document(), &path).unwrap_err();

        match err {
            Error::OutputWrite { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("Expected OutputWrite, got {:?}", other),
        }
        assert!(!path.exists());
    }
}
