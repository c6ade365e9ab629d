//! Error type shared by the reducer, the derivation combinators, and the
//! configuration loaders.
//!
//! Every failure is local to the call that raised it: a reduction either
//! returns a fully merged value or one of these errors, never a partial result.
//!
//! Non-associative operations are deliberately absent from this enum. They
//! cannot be detected at runtime; see [`crate::testing::laws`] for the checks
//! that surface them.

use thiserror::Error;

/// Errors raised by `ironfold`.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A reduction was asked to collapse zero items and no identity was supplied.
    #[error("cannot reduce an empty input without an identity element")]
    EmptyInputWithoutIdentity,

    /// A derivation combinator was built from incompatible parts.
    #[error("{combinator}: expected {expected}, found {found}")]
    DerivationTypeMismatch {
        combinator: &'static str,
        expected: String,
        found: String,
    },

    /// A projection failed while summarizing raw records.
    #[error("projection failed: {0}")]
    Projection(String),

    /// A configuration value is out of range or could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A dedicated rayon pool could not be built.
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Configuration JSON could not be decoded.
    #[error(transparent)]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MergeError {
    pub(crate) fn mismatch(
        combinator: &'static str,
        expected: impl ToString,
        found: impl ToString,
    ) -> Self {
        Self::DerivationTypeMismatch {
            combinator,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = MergeError> = std::result::Result<T, E>;
