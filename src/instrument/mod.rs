//! Instrumentation Module
//!
//! Counting and history recording for named operations, plus replay of
//! what was recorded.
//!
//! An operation is a value implementing [`Operation`]; the wrappers in
//! this module take an operation and return a wrapped operation, so the
//! behaviors compose by nesting, in either order. Operation identity is
//! passed explicitly at construction: the name is the counter key, and
//! the history lists hang off it with `:inputs` / `:outputs` suffixes.

mod replay;
mod wrap;

use std::future::Future;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use replay::{CallRecord, CallReport, ReplayReporter};
pub use wrap::{Counted, Recorded};

// == Operation ==
/// A unary async operation, the unit the wrappers compose over.
#[async_trait]
pub trait Operation<I, O>: Send + Sync {
    /// Invokes the operation.
    async fn call(&self, input: I) -> Result<O>;
}

// == Function Adapter ==
/// Adapts a plain async function or closure into an [`Operation`].
///
/// See [`from_fn`].
pub struct FnOp<F> {
    f: F,
}

/// Wraps an async function or closure as an [`Operation`] so it can be
/// counted and recorded.
pub fn from_fn<F>(f: F) -> FnOp<F> {
    FnOp { f }
}

#[async_trait]
impl<F, Fut, I, O> Operation<I, O> for FnOp<F>
where
    F: Fn(I) -> Fut + Send + Sync,
    Fut: Future<Output = Result<O>> + Send,
    I: Send + 'static,
    O: 'static,
{
    async fn call(&self, input: I) -> Result<O> {
        (self.f)(input).await
    }
}

// == Key Derivation ==
/// List key holding the recorded input representations for `name`.
pub(crate) fn inputs_key(name: &str) -> String {
    format!("{name}:inputs")
}

/// List key holding the recorded output representations for `name`.
pub(crate) fn outputs_key(name: &str) -> String {
    format!("{name}:outputs")
}
