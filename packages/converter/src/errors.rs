//! Error types for layout conversion

use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Failures raised while converting between the external layout format and
/// the internal entity model. Any error aborts the whole conversion; a
/// half-built result is never returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("node '{id}' is malformed: {reason}")]
    MalformedNode { id: String, reason: String },

    #[error("group '{parent_id}' references unknown child '{child_id}'")]
    DanglingReference { parent_id: String, child_id: String },

    #[error("duplicate node id '{id}'")]
    DuplicateId { id: String },

    #[error("group nesting exceeds the maximum depth of {max_depth}")]
    MaxDepthExceeded { max_depth: usize },
}

impl ConvertError {
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedNode {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn dangling(parent_id: impl Into<String>, child_id: impl Into<String>) -> Self {
        Self::DanglingReference {
            parent_id: parent_id.into(),
            child_id: child_id.into(),
        }
    }
}
