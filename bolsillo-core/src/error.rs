use thiserror::Error;

/// Errors raised at the boundaries of the core data model.
///
/// The parser itself never fails; these cover registry loading and the
/// hand-off to a transaction sink.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("category record has an empty `{field}`")]
    InvalidCategory { field: &'static str },

    #[error("account `{0}` has no usable keywords")]
    InvalidAccount(String),

    #[error("transaction `{id}` rejected: {reason}")]
    Rejected { id: String, reason: String },

    #[error("malformed category list: {0}")]
    Json(#[from] serde_json::Error),
}
