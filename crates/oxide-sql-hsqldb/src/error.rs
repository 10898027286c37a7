//! Error types for the HSQLDB dialect layer.

use std::fmt;

/// Error reported by the execution collaborator.
///
/// The dialect layer never interprets driver failures; it carries the
/// original error through unchanged so callers can inspect it.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct DriverError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl DriverError {
    /// Wraps any driver error.
    #[must_use]
    pub fn new<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self(error.into())
    }

    /// Creates a driver error from a plain message.
    #[must_use]
    pub fn msg(message: impl fmt::Display) -> Self {
        Self(message.to_string().into())
    }

    /// Returns the wrapped error.
    #[must_use]
    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync> {
        self.0
    }
}

/// Errors that can occur in the dialect layer.
#[derive(Debug, thiserror::Error)]
pub enum HsqldbError {
    /// A value cannot be coerced to the type its column demands.
    #[error("Cannot coerce {value:?} to {target}")]
    TypeCoercion {
        /// The offending value, as supplied.
        value: String,
        /// The type the column required.
        target: &'static str,
    },

    /// A type name has no entry in the native type catalog.
    #[error("No native type mapping for '{0}'")]
    UnmappedType(String),

    /// Column options the type renderer cannot express.
    #[error("Invalid column definition: {0}")]
    InvalidDefinition(String),

    /// The execution collaborator failed.
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// A statement of a replayed structure dump failed.
    #[error("Structure load failed at statement {index}: {source}\n{fragment}")]
    SchemaReplay {
        /// Zero-based position of the fragment in the script.
        index: usize,
        /// The raw fragment text.
        fragment: String,
        /// The driver failure.
        #[source]
        source: DriverError,
    },
}

/// Result type for dialect operations.
pub type Result<T> = std::result::Result<T, HsqldbError>;
