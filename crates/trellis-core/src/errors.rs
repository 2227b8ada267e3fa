//! Error types for trellis.

use crate::id::EntityKind;
use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Clone(#[from] CloneError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document is not valid UTF-8")]
    InvalidUtf8,

    #[error("document requires unsupported extension: {0}")]
    UnsupportedExtension(String),
}

/// Errors during parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unexpected token at line {line}, column {column}: expected {expected}, found {found}")]
    UnexpectedToken {
        found: String,
        expected: String,
        line: u32,
        column: u32,
    },

    #[error("Unterminated string starting at line {line}, column {column}")]
    UnterminatedString { line: u32, column: u32 },

    #[error("Invalid escape sequence at line {line}, column {column}")]
    InvalidEscape { line: u32, column: u32 },

    #[error("Trailing characters at line {line}, column {column}")]
    TrailingCharacters { line: u32, column: u32 },

    #[error("Nesting too deep at line {line}, column {column}")]
    NestingTooDeep { line: u32, column: u32 },

    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Value {value} is out of range (maximum {max})")]
    OutOfRange { value: String, max: String },

    #[error("Unknown {what}: {value}")]
    InvalidEnum { what: &'static str, value: String },

    #[error("Expected an array of {expected} elements, found {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("Duplicate key '{key}'")]
    DuplicateKey { key: String },

    #[error("Missing required property '{property}' on {entity}")]
    MissingProperty {
        entity: &'static str,
        property: &'static str,
    },

    #[error("Invalid embedded JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("In {entity} property '{property}': {source}")]
    InProperty {
        entity: &'static str,
        property: String,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// Attach the entity kind and property name that was being read.
    ///
    /// Only the innermost context is kept, so nested objects report the
    /// property closest to the failure.
    pub fn within(self, entity: &'static str, property: &str) -> Self {
        match self {
            Self::InProperty { .. } | Self::MissingProperty { .. } => self,
            other => Self::InProperty {
                entity,
                property: property.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The error without its property context.
    pub fn root_cause(&self) -> &ParseError {
        match self {
            Self::InProperty { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Entity kind and property name, if known.
    pub fn context(&self) -> Option<(&'static str, &str)> {
        match self {
            Self::InProperty {
                entity, property, ..
            } => Some((*entity, property.as_str())),
            Self::MissingProperty { entity, property } => Some((*entity, *property)),
            _ => None,
        }
    }
}

/// Errors when dereferencing a typed reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("{kind} index {index} is out of range (length {len})")]
    OutOfRange {
        kind: EntityKind,
        index: u32,
        len: usize,
    },

    #[error("{kind} index {index} belongs to a different root")]
    ForeignRoot { kind: EntityKind, index: u32 },

    #[error("animation {animation} references sampler {sampler} (length {len})")]
    SamplerOutOfRange {
        animation: u32,
        sampler: u32,
        len: usize,
    },
}

/// Errors during graph cloning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CloneError {
    #[error("Structural cycle detected at {kind} index {index}")]
    Cycle { kind: EntityKind, index: u32 },

    #[error(transparent)]
    Reference(#[from] ReferenceError),
}
