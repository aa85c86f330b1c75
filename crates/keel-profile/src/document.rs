//! Profile documents: loading, rendering, and writing the YAML mapping the
//! overlay operates on.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::ProfileError;
use crate::overlay;

/// A profile document held as a YAML mapping.
///
/// The document may start empty (no base profile) or be parsed from YAML or
/// JSON text. Keys the overlay does not own survive a round trip untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDocument {
    root: Mapping,
}

impl ProfileDocument {
    /// Empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-parsed mapping.
    pub fn from_mapping(root: Mapping) -> Self {
        Self { root }
    }

    /// Parse a YAML (or JSON) document. Empty and `null` documents count as
    /// an empty profile; any other non-mapping root is rejected.
    pub fn parse(text: &str) -> Result<Self, ProfileError> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        match serde_yaml::from_str::<Value>(text)? {
            Value::Null => Ok(Self::new()),
            Value::Mapping(root) => Ok(Self { root }),
            _ => Err(ProfileError::NotAMapping),
        }
    }

    /// Read and parse a profile from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ProfileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Apply the overlay to this document in place.
    pub fn apply_overlay(&mut self) {
        overlay::apply(&mut self.root);
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.root
    }

    pub fn into_mapping(self) -> Mapping {
        self.root
    }

    /// Render the document as YAML.
    pub fn to_yaml(&self) -> Result<String, ProfileError> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// Render the document as pretty JSON. Fails when the document carries
    /// mapping keys JSON cannot represent.
    pub fn to_json(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    /// Write the document to `path` as YAML.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ProfileError> {
        let path = path.as_ref();
        let text = self.to_yaml()?;
        fs::write(path, text).map_err(|source| ProfileError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
