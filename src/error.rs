// src/error.rs

//! Generation errors.
//!
//! Every detected error is fatal to the run: the consuming build includes the
//! artifact verbatim and cannot validate it, so a partial or ambiguous
//! dispatch table must never be written.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    /// Two distinct registrations encoded to the same dispatch tag.
    #[error("dispatch tag `{tag}` is generated by both `{first}` and `{second}`")]
    DuplicateTag {
        tag: String,
        first: String,
        second: String,
    },

    /// An operation landed outside the representable arity range.
    #[error("operation `{source_name}` has arity {arity}, expected 1 to 3")]
    BadArity { source_name: String, arity: u8 },

    /// The model invariant that every operation carries a reference function
    /// was breached.
    #[error("operation `{source_name}` resolved to an empty exact-function name")]
    EmptyExactRef { source_name: String },

    #[error("failed to read catalog file: {0}")]
    CatalogIo(#[from] std::io::Error),

    #[error("failed to parse catalog file: {0}")]
    CatalogParse(#[from] serde_json::Error),
}
