//! Reading proposals and single actions from disk

use council_domain::{DomainError, Proposal, ProposedAction};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading a proposal file
#[derive(Error, Debug)]
pub enum ProposalLoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported proposal format '{0}' (expected .toml or .json)")]
    UnsupportedFormat(String),

    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Proposal file reader; the format is chosen by file extension.
pub struct ProposalLoader;

impl ProposalLoader {
    /// Load and validate a proposal.
    pub fn load(path: &Path) -> Result<Proposal, ProposalLoadError> {
        let proposal: Proposal = Self::read(path)?;
        proposal.validate()?;
        debug!(
            "Loaded proposal {} from {} ({} elements, {} modifications)",
            proposal.id,
            path.display(),
            proposal.elements.len(),
            proposal.modifications.len()
        );
        Ok(proposal)
    }

    /// Load a single action for a pre-check.
    pub fn load_action(path: &Path) -> Result<ProposedAction, ProposalLoadError> {
        Self::read(path)
    }

    fn read<T: DeserializeOwned>(path: &Path) -> Result<T, ProposalLoadError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if extension != "toml" && extension != "json" {
            return Err(ProposalLoadError::UnsupportedFormat(extension));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ProposalLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if extension == "toml" {
            toml::from_str(&content).map_err(|source| ProposalLoadError::Toml {
                path: path.to_path_buf(),
                source,
            })
        } else {
            serde_json::from_str(&content).map_err(|source| ProposalLoadError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::ElementType;
    use std::fs;

    #[test]
    fn test_load_toml_proposal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proposal.toml");
        fs::write(
            &path,
            r#"
id = "P-100"
description = "Add a partition and widen a door"

[[elements]]
id = "W-9"
element_type = "wall"
type_name = "Generic - 100mm"
geometry = { width = 0.1, height = 2.7, length = 4.0 }
parameters = { load_bearing = false }

[[modifications]]
element_id = "D-2"
element_type = "door"
parameter = "width"
new_value = 0.9
"#,
        )
        .unwrap();

        let proposal = ProposalLoader::load(&path).unwrap();
        assert_eq!(proposal.id, "P-100");
        assert_eq!(proposal.elements[0].element_type, ElementType::Wall);
        assert_eq!(proposal.elements[0].param_bool("load_bearing"), Some(false));
        assert_eq!(proposal.modifications[0].numeric_value(), Some(0.9));
    }

    #[test]
    fn test_load_json_proposal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proposal.json");
        fs::write(
            &path,
            r#"{
                "id": "P-7",
                "elements": [
                    { "element_type": "door", "geometry": { "width": 0.9, "height": 2.1 } }
                ]
            }"#,
        )
        .unwrap();

        let proposal = ProposalLoader::load(&path).unwrap();
        assert_eq!(proposal.elements.len(), 1);
        assert!(proposal.description.is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = ProposalLoader::load(Path::new("proposal.yaml")).unwrap_err();
        assert!(matches!(err, ProposalLoadError::UnsupportedFormat(ref e) if e == "yaml"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProposalLoader::load(&dir.path().join("gone.toml")).unwrap_err();
        assert!(matches!(err, ProposalLoadError::Io { .. }));
    }

    #[test]
    fn test_invalid_proposal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.json");
        fs::write(&path, r#"{ "id": "  " }"#).unwrap();
        let err = ProposalLoader::load(&path).unwrap_err();
        assert!(matches!(err, ProposalLoadError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ \"id\": ").unwrap();
        assert!(matches!(
            ProposalLoader::load(&path).unwrap_err(),
            ProposalLoadError::Json { .. }
        ));
    }

    #[test]
    fn test_load_delete_action() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("action.toml");
        fs::write(
            &path,
            r#"
action = "delete"
element_id = "W-3"
element_type = "wall"
load_bearing = true
"#,
        )
        .unwrap();
        let action = ProposalLoader::load_action(&path).unwrap();
        assert_eq!(action.kind(), "delete");
    }
}
