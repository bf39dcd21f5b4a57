//! Error types for the instrumented caching layer
//!
//! Provides unified error handling using thiserror.
//!
//! Missing keys and failed conversions are not errors anywhere in this
//! crate; they surface as `None`. The variants here cover the cases that
//! must reach the caller: store failures and external fetch failures.

use thiserror::Error;

// == Error Enum ==
/// Unified error type for the caching layer.
#[derive(Error, Debug)]
pub enum Error {
    /// The key-value store could not serve the request
    #[error("store error: {0}")]
    Store(String),

    /// An increment hit a value that does not hold integer bytes
    #[error("wrong value type at key '{0}': expected integer bytes")]
    WrongType(String),

    /// The external fetch failed (unreachable, timeout, or error status)
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the caching layer.
pub type Result<T> = std::result::Result<T, Error>;
