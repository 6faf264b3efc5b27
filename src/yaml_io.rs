//! Reading and writing ontology YAML files

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::model::OntologyDocument;
use crate::{OntologyError, Result};

/// Read a source file, distinguishing "missing" from "unreadable"
pub fn read_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(OntologyError::SourceNotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| OntologyError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse YAML text; `origin` is only used in error messages
pub fn parse_yaml<T: DeserializeOwned>(text: &str, origin: &Path) -> Result<T> {
    serde_yaml::from_str(text).map_err(|source| OntologyError::Parse {
        path: origin.to_path_buf(),
        source,
    })
}

pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = read_text(path)?;
    parse_yaml(&text, path)
}

pub fn load_document(path: &Path) -> Result<OntologyDocument> {
    log::info!("Loading ontology from {}", path.display());
    load_yaml(path)
}

/// Preamble followed by the YAML body
pub fn render_yaml<T: Serialize>(preamble: &str, value: &T) -> Result<String> {
    let body = serde_yaml::to_string(value).map_err(OntologyError::Serialize)?;
    Ok(format!("{}{}", preamble, body))
}

/// Write `text` to `path`, creating parent directories as needed
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    let write_err = |source| OntologyError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, text).map_err(write_err)
}

pub fn save_document(path: &Path, preamble: &str, document: &OntologyDocument) -> Result<()> {
    let text = render_yaml(preamble, document)?;
    write_text(path, &text)?;
    log::info!("Saved ontology to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_source() {
        let err = load_document(Path::new("/nonexistent/ontology.yaml")).unwrap_err();
        assert!(matches!(err, OntologyError::SourceNotFound(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_parse_error_names_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.yaml");
        fs::write(&path, "entities: [unterminated\n").unwrap();

        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, OntologyError::Parse { .. }));
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_save_creates_parent_and_writes_preamble() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("ontology.yaml");
        let document = OntologyDocument {
            module: Some("Absence".to_string()),
            ..Default::default()
        };

        save_document(&path, "# Header\n\n", &document).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# Header\n\nmodule: Absence\n"));

        let reloaded = load_document(&path).unwrap();
        assert_eq!(reloaded, document);
    }
}
