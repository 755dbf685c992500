//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent catalog invariant violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("duplicate course code in catalog: {0}")]
    DuplicateCode(String),

    #[error("course has no category: {0}")]
    EmptyCategory(String),

    #[error("category holds both sub-tabs and courses: {0}")]
    MixedCategory(String),

    #[error("unknown course tag: {0} (expected planned, completed, eligible or ineligible)")]
    UnknownTag(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
