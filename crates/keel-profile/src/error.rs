//! Error types for profile document handling.
//!
//! The overlay itself is total and raises nothing; errors only occur while
//! reading, parsing, or rendering documents.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors reading, parsing, or rendering a profile document.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid YAML in profile document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("profile could not be rendered as JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed, but its top level is not a mapping.
    #[error("profile root must be a YAML mapping")]
    NotAMapping,
}
