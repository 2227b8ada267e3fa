//! Read and write options.

use serde::{Deserialize, Serialize};

/// Options for reading documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Resolve every reference after parsing and fail on the first dangling one.
    pub validate_references: bool,
    /// Fail when `extensionsRequired` names an extension not listed in
    /// `supported_extensions`.
    pub check_required_extensions: bool,
    /// Extensions the caller knows how to interpret.
    pub supported_extensions: Vec<String>,
}

impl ReadOptions {
    /// Create default read options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate references after parsing.
    pub fn validated(mut self) -> Self {
        self.validate_references = true;
        self
    }

    /// Reject documents requiring extensions outside `supported_extensions`.
    pub fn strict_extensions(mut self) -> Self {
        self.check_required_extensions = true;
        self
    }

    /// Declare support for an extension.
    pub fn with_extension(mut self, name: impl Into<String>) -> Self {
        self.supported_extensions.push(name.into());
        self
    }

    pub fn supports(&self, name: &str) -> bool {
        self.supported_extensions.iter().any(|e| e == name)
    }
}

/// Options for writing documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WriteOptions {
    /// Pretty-print the JSON output.
    pub pretty: bool,
}

impl WriteOptions {
    /// Create default write options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty-print output.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}
