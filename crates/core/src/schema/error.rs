//! Error types for raw schema interpretation.

use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while interpreting a raw field type.
///
/// None of these abort schema building: the offending field is skipped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A union type with no members.
    #[error("union type has no members")]
    EmptyUnion,

    /// A nested type object that is neither a map nor has `items`.
    #[error("nested type has no `items` member: {0}")]
    MissingItems(String),

    /// A type that is not a string, array or object.
    #[error("unsupported field type: {0}")]
    UnsupportedType(String),
}
