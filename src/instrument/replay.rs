//! Replay Module
//!
//! Read-only rendering of recorded call counts and histories.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::instrument::{inputs_key, outputs_key};
use crate::store::KeyValueStore;

// == Call Record ==
/// One recorded invocation: the input representation paired with the
/// output representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallRecord {
    /// Representation of the call input
    pub input: String,
    /// Representation of the call output
    pub output: String,
}

// == Call Report ==
/// Everything recorded for a named operation.
///
/// `Display` renders the replay text:
///
/// ```text
/// <name> was called <count> times:
/// <name>(*<input>) -> <output>
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CallReport {
    /// Operation name the counters and history are keyed by
    pub name: String,
    /// Invocation attempts recorded for the operation
    pub count: i64,
    /// Completed invocations, in call order
    pub calls: Vec<CallRecord>,
}

impl fmt::Display for CallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} was called {} times:", self.name, self.count)?;
        for call in &self.calls {
            write!(f, "\n{}(*{}) -> {}", self.name, call.input, call.output)?;
        }
        Ok(())
    }
}

// == Replay Reporter ==
/// Reads recorded counts and histories back out of the store.
///
/// Every method is read-only; nothing here mutates store state.
pub struct ReplayReporter {
    kv: Arc<dyn KeyValueStore>,
}

impl ReplayReporter {
    // == Constructor ==
    /// Creates a new reporter over the given store handle.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    // == Call Count ==
    /// Returns the recorded invocation count for `name`.
    ///
    /// A missing counter reads as zero.
    pub async fn call_count(&self, name: &str) -> Result<i64> {
        let count = self
            .kv
            .get(name)
            .await?
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .and_then(|text| text.parse().ok())
            .unwrap_or(0);
        Ok(count)
    }

    // == Report ==
    /// Builds the structured report for `name`.
    ///
    /// Inputs and outputs are paired positionally and truncated to the
    /// shorter history, so an input left unpaired by a failed invocation
    /// never renders.
    pub async fn report(&self, name: &str) -> Result<CallReport> {
        let count = self.call_count(name).await?;
        let inputs = self.kv.lrange(&inputs_key(name), 0, -1).await?;
        let outputs = self.kv.lrange(&outputs_key(name), 0, -1).await?;

        let calls = inputs
            .iter()
            .zip(outputs.iter())
            .map(|(input, output)| CallRecord {
                input: String::from_utf8_lossy(input).into_owned(),
                output: String::from_utf8_lossy(output).into_owned(),
            })
            .collect();

        Ok(CallReport {
            name: name.to_string(),
            count,
            calls,
        })
    }

    // == Replay ==
    /// Renders the replay text for `name`.
    pub async fn replay(&self, name: &str) -> Result<String> {
        Ok(self.report(name).await?.to_string())
    }
}
