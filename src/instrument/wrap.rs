//! Wrapping Behaviors
//!
//! The two independent instrumentation wrappers: invocation counting and
//! invocation history recording.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::trace;

use crate::error::Result;
use crate::instrument::{inputs_key, outputs_key, Operation};
use crate::store::KeyValueStore;

// == Counted ==
/// Counts invocations of the wrapped operation.
///
/// The counter, keyed by the operation name, is incremented before the
/// inner operation runs: it reflects attempts, not successes.
pub struct Counted<Op> {
    name: String,
    kv: Arc<dyn KeyValueStore>,
    inner: Op,
}

impl<Op> Counted<Op> {
    /// Wraps `inner`, counting invocations under `name`.
    pub fn new(name: impl Into<String>, kv: Arc<dyn KeyValueStore>, inner: Op) -> Self {
        Self {
            name: name.into(),
            kv,
            inner,
        }
    }
}

#[async_trait]
impl<I, O, Op> Operation<I, O> for Counted<Op>
where
    Op: Operation<I, O>,
    I: Send + 'static,
    O: Send + 'static,
{
    async fn call(&self, input: I) -> Result<O> {
        let count = self.kv.incr(&self.name).await?;
        trace!(operation = %self.name, count, "invocation counted");
        self.inner.call(input).await
    }
}

// == Recorded ==
/// Records the call history of the wrapped operation.
///
/// The input representation is appended before the inner operation runs;
/// the output representation is appended only after it returns
/// successfully, so a failed invocation leaves an input with no paired
/// output.
pub struct Recorded<Op> {
    name: String,
    kv: Arc<dyn KeyValueStore>,
    inner: Op,
}

impl<Op> Recorded<Op> {
    /// Wraps `inner`, recording call history under `name`.
    pub fn new(name: impl Into<String>, kv: Arc<dyn KeyValueStore>, inner: Op) -> Self {
        Self {
            name: name.into(),
            kv,
            inner,
        }
    }
}

#[async_trait]
impl<I, O, Op> Operation<I, O> for Recorded<Op>
where
    Op: Operation<I, O>,
    I: fmt::Debug + Send + 'static,
    O: fmt::Debug + Send + 'static,
{
    async fn call(&self, input: I) -> Result<O> {
        let input_repr = format!("{input:?}");
        self.kv
            .rpush(&inputs_key(&self.name), input_repr.as_bytes())
            .await?;

        let output = self.inner.call(input).await?;

        let output_repr = format!("{output:?}");
        self.kv
            .rpush(&outputs_key(&self.name), output_repr.as_bytes())
            .await?;
        trace!(operation = %self.name, %input_repr, %output_repr, "invocation recorded");

        Ok(output)
    }
}
