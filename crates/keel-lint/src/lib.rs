//! Profile linting library for Clash-family profile documents.
//!
//! Validates a profile document (YAML or JSON) before it is handed to the
//! routing engine: section shapes, rule-provider descriptors, proxy-group
//! member resolution, and the routing rule table. It can be used as a
//! standalone library or through the `keel-lint` CLI binary.
//!
//! # Example
//!
//! ```no_run
//! use keel_lint::{lint_file, LintOptions};
//! use std::path::Path;
//!
//! let result = lint_file(Path::new("profile.yaml"), &LintOptions::default());
//! if result.has_errors() {
//!     eprintln!("Found {} errors", result.errors);
//! }
//! ```

mod types;
mod validator;

use std::path::Path;

pub use types::{LintIssue, LintOptions, LintResult, Severity};
pub use validator::validate_profile;

/// Lint a single profile document file.
///
/// Returns a `LintResult` containing all issues found.
pub fn lint_file(path: &Path, options: &LintOptions) -> LintResult {
    let mut result = LintResult::new();
    result.files_checked = 1;

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            result.add_issue(LintIssue::error(
                "E001",
                format!("Failed to read file: {e}"),
                path.to_path_buf(),
            ));
            return result;
        }
    };

    lint_str_into(&content, path, &mut result, options);
    result
}

/// Lint profile text directly (useful for in-memory validation). YAML and
/// JSON both parse; `source_name` labels the issues.
pub fn lint_str(text: &str, source_name: &str, options: &LintOptions) -> LintResult {
    let mut result = LintResult::new();
    result.files_checked = 1;
    lint_str_into(text, Path::new(source_name), &mut result, options);
    result
}

/// Lint an already-parsed profile value.
pub fn lint_value(
    value: &serde_yaml::Value,
    source_name: &str,
    options: &LintOptions,
) -> LintResult {
    let mut result = LintResult::new();
    result.files_checked = 1;
    validate_profile(Path::new(source_name), value, &mut result, options);
    result
}

fn lint_str_into(text: &str, path: &Path, result: &mut LintResult, options: &LintOptions) {
    let value: serde_yaml::Value = match serde_yaml::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            result.add_issue(LintIssue::error(
                "E002",
                format!("Invalid document: {e}"),
                path.to_path_buf(),
            ));
            return;
        }
    };

    validator::validate_profile(path, &value, result, options);
}
