//! Error types for the dataset model

/// A relevance grade string that is not one of High, Medium or Low
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid relevance grade: '{0}' (expected High, Medium or Low)")]
pub struct GradeParseError(pub String);
