//! Loading input documents
//!
//! Frameworks, filters, saved options and attributes are read from JSON or
//! YAML files, chosen by extension. A path of `-` reads JSON from stdin.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::bail_unsupported;
use crate::error::{Result, TagReportError};

/// Path that selects stdin
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Json,
    Yaml,
}

fn document_kind(path: &Path) -> Result<DocumentKind> {
    if path.as_os_str() == STDIN_PATH {
        return Ok(DocumentKind::Json);
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "json" => Ok(DocumentKind::Json),
        "yaml" | "yml" => Ok(DocumentKind::Yaml),
        other => bail_unsupported!("document extension", format!("'{}'", other), "json, yaml, yml"),
    }
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN_PATH {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| TagReportError::io_operation("read", "stdin", e))?;
        return Ok(content);
    }
    if !path.exists() {
        return Err(TagReportError::not_found("document", path.display()));
    }
    fs::read_to_string(path).map_err(|e| TagReportError::io_operation("read", path.display(), e))
}

/// Parse a document already held in memory
pub fn parse_document<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    match document_kind(path)? {
        DocumentKind::Json => {
            serde_json::from_str(content).map_err(|e| TagReportError::invalid_document(path, e))
        }
        DocumentKind::Yaml => {
            serde_yaml::from_str(content).map_err(|e| TagReportError::invalid_document(path, e))
        }
    }
}

/// Read and parse a document from `path`
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let kind = document_kind(path)?;
    let content = read_source(path)?;
    debug!(path = %path.display(), ?kind, bytes = content.len(), "loaded document");
    parse_document(path, &content)
}

/// Read and parse a document when a path was given
pub fn load_optional<T: DeserializeOwned>(path: Option<&Path>) -> Result<Option<T>> {
    path.map(load_document).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{EntryFilter, Framework};
    use tempfile::tempdir;

    #[test]
    fn test_load_json_and_yaml() {
        let dir = tempdir().unwrap();
        let json_path = dir.path().join("framework.json");
        fs::write(
            &json_path,
            r#"{ "id": 1, "title": "Flood", "primaryTagging": [], "exportables": [] }"#,
        )
        .unwrap();
        let yaml_path = dir.path().join("framework.yml");
        fs::write(&yaml_path, "id: 1\ntitle: Flood\nexportables: []\n").unwrap();

        let from_json: Framework = load_document(&json_path).unwrap();
        let from_yaml: Framework = load_document(&yaml_path).unwrap();
        assert_eq!(from_json.id.as_deref(), Some("1"));
        assert_eq!(from_json.id, from_yaml.id);
        assert_eq!(from_yaml.exportables.as_ref().map(Vec::len), Some(0));
    }

    #[test]
    fn test_invalid_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filters.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_document::<Vec<EntryFilter>>(&path).unwrap_err();
        assert!(matches!(err, TagReportError::InvalidDocument { .. }));
    }

    #[test]
    fn test_missing_and_unsupported() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            load_document::<Framework>(&missing),
            Err(TagReportError::NotFound { .. })
        ));

        let text = dir.path().join("framework.txt");
        fs::write(&text, "").unwrap();
        assert!(matches!(
            load_document::<Framework>(&text),
            Err(TagReportError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_load_optional_none() {
        let loaded: Option<Framework> = load_optional(None).unwrap();
        assert!(loaded.is_none());
    }
}
