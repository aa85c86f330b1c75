//! Keel: profile overlay generation for Clash-family proxy clients.
//!
//! The crate takes a base profile document (the client's YAML mapping),
//! filters its proxy list, attaches remote rule-set descriptors, builds the
//! selection groups, and appends the routing rule table. Unknown keys in the
//! base document are preserved untouched.
//!
//! # Example
//!
//! ```no_run
//! use keel_profile::ProfileDocument;
//!
//! let mut profile = ProfileDocument::from_file("base.yaml").unwrap();
//! profile.apply_overlay();
//! profile.write_to("profile.yaml").unwrap();
//! ```

// ===== Core overlay modules =====
pub mod baseline;
pub mod classify;
pub mod groups;
pub mod overlay;
pub mod providers;
pub mod roster;
pub mod rules;

// ===== Document handling =====
pub mod document;
pub mod error;

pub use document::ProfileDocument;
pub use error::ProfileError;
pub use overlay::{apply, transform};

/// Serialize one of the overlay's own data model values into YAML.
///
/// The emitted model contains only strings, numbers, booleans, and lists, so
/// serialization cannot fail; a panic here is a bug in the model itself.
pub(crate) fn yaml_value<T: serde::Serialize>(value: &T) -> serde_yaml::Value {
    serde_yaml::to_value(value).expect("overlay data model serializes to YAML")
}
