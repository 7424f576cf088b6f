//! Testing utilities for hark.
//!
//! - [`Transcript`]: a shared, cloneable log that handler bodies can append to
//! - [`RecordingHandler`]: an opaque handler that records every call it gets

use hark_core::{BoxError, Call, Capability, Handler, HarkError, Payload};
use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

// ============================================================================
// Transcript
// ============================================================================

/// A shared log of entries.
///
/// Clones append to and read from the same log, so a clone can be moved into
/// a handler body while the test keeps the original.
///
/// # Example
///
/// ```rust
/// use hark_std::{Input, StrictListener, listener, testing::Transcript};
///
/// let transcript = Transcript::new();
/// let log = transcript.clone();
/// let listener: StrictListener<i32, ()> =
///     listener([Input::on("success", move |call| log.push(("succeeded", call.args()[0])))]);
///
/// listener.dispatch("success", &[42]).unwrap();
/// assert_eq!(transcript.entries(), vec![("succeeded", 42)]);
/// ```
pub struct Transcript<T> {
    entries: Arc<Mutex<Vec<T>>>,
}

impl<T> Transcript<T> {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Append an entry.
    pub fn push(&self, entry: T) {
        self.lock().push(entry);
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Transcript<T> {
    /// Get a copy of the entries so far.
    pub fn entries(&self) -> Vec<T> {
        self.lock().clone()
    }
}

impl<T> Default for Transcript<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Transcript<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Transcript<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.lock().iter()).finish()
    }
}

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler that responds to a fixed set of capabilities, records every
/// call it receives, and answers each with a clone of `reply`.
///
/// Useful for checking which handlers a dispatch reached and with what.
pub struct RecordingHandler<A, R> {
    capabilities: Arc<[Capability]>,
    reply: R,
    calls: Transcript<(Capability, Vec<A>)>,
}

impl<A, R> RecordingHandler<A, R> {
    /// Create a recording handler for `capabilities`.
    pub fn new<I>(capabilities: I, reply: R) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Capability>,
    {
        Self {
            capabilities: capabilities.into_iter().map(Into::into).collect(),
            reply,
            calls: Transcript::new(),
        }
    }

    /// Get the number of calls received.
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }
}

impl<A: Clone, R> RecordingHandler<A, R> {
    /// Get the recorded calls, in order.
    pub fn calls(&self) -> Vec<(Capability, Vec<A>)> {
        self.calls.entries()
    }
}

impl<A, R: Clone> Clone for RecordingHandler<A, R> {
    fn clone(&self) -> Self {
        Self {
            capabilities: Arc::clone(&self.capabilities),
            reply: self.reply.clone(),
            calls: self.calls.clone(),
        }
    }
}

impl<A, R> fmt::Debug for RecordingHandler<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingHandler")
            .field("capabilities", &self.capabilities)
            .field("calls", &self.calls.len())
            .finish()
    }
}

impl<A, R> Handler<A, R> for RecordingHandler<A, R>
where
    A: Payload + Clone,
    R: Payload + Clone,
{
    fn responds_to(&self, capability: &Capability) -> bool {
        self.capabilities.contains(capability)
    }

    fn invoke(&self, call: &Call<'_, A, R>) -> Result<R, BoxError> {
        if !self.responds_to(call.capability()) {
            return Err(HarkError::MissingCapability(call.capability().clone()).into());
        }
        self.calls
            .push((call.capability().clone(), call.args().to_vec()));
        Ok(self.reply.clone())
    }
}
