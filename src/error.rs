//! Error types for the assistant core.
//!
//! Almost nothing here is fatal by design: lookup misses are normal branches,
//! gateway failures are soft-failed to miss-shaped replies at the boundary,
//! and generation failures are reported as text. The variants below cover
//! caller misuse and the few places where an error must be named.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    /// The form-data aggregate was projected before all required identifiers
    /// were collected. This is a caller error: projection is only valid once
    /// the workflow has reached SQL generation.
    #[error("form data incomplete, missing: {missing}")]
    IncompleteFormData { missing: String },

    /// The aggregate could not be serialized for the generation tool.
    #[error("failed to encode form data: {0}")]
    Encode(#[from] serde_json::Error),
}
