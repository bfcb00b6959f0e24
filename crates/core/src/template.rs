//! The generic OpenAPI template that the specializer copies and extends.

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// The template shipped with the tool.
const BUNDLED_TEMPLATE: &str = include_str!("../config/openapi_template.json");

/// A parsed, read-only OpenAPI template.
///
/// [`crate::specializer::specialize`] never mutates a template; it works on
/// its own copy, so one template can serve any number of objects.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiTemplate {
    document: Value,
}

impl OpenApiTemplate {
    /// Parses the template embedded at build time.
    pub fn bundled() -> Result<Self> {
        Self::from_str_at(BUNDLED_TEMPLATE, Path::new("<bundled>"))
    }

    /// Reads and parses a template from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::Template {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_str_at(&content, path)
    }

    pub fn from_value(document: Value) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    fn from_str_at(content: &str, path: &Path) -> Result<Self> {
        let document = serde_json::from_str(content).map_err(|e| Error::Template {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self { document })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_template_has_placeholders() {
        let template = OpenApiTemplate::bundled().unwrap();
        let doc = template.document();

        assert!(doc["components"]["schemas"]["QueryResult"].is_object());
        assert!(doc["components"]["schemas"]["SObject"]["properties"]["Id"].is_object());
        assert!(doc["paths"]["/query"]["get"].is_object());
        assert!(doc["paths"]["/sobjects/{sObject}"]["post"].is_object());
        assert!(doc["paths"]["/sobjects/{sObject}/{id}"]["patch"].is_object());
        assert_eq!(doc["servers"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"openapi": "3.0.3", "paths": {{}}}}"#).unwrap();

        let template = OpenApiTemplate::from_path(file.path()).unwrap();
        assert_eq!(template.document()["openapi"], "3.0.3");
    }

    #[test]
    fn test_from_path_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "openapi: 3.0.3").unwrap();

        let err = OpenApiTemplate::from_path(file.path()).unwrap_err();
        assert!(matches!(err, Error::Template { .. }));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = OpenApiTemplate::from_path("/definitely/not/here.json").unwrap_err();
        match err {
            Error::Template { path, .. } => assert_eq!(path, Path::new("/definitely/not/here.json")),
            other => panic!("Expected Template error, got {:?}", other),
        }
    }
}
