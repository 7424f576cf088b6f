//! A single invocation of a capability.

use crate::{capability::Capability, error::HarkError};
use std::fmt;

/// A marker trait for argument and result types carried through a listener.
///
/// Payloads must be `Send + Sync + 'static` so that handlers, dispatchers and
/// listeners can be shared freely once built. Every such type qualifies.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be carried as a hark payload",
    label = "must be `Send + Sync + 'static`",
    note = "Arguments and results are shared across handlers and must be thread-safe and static."
)]
pub trait Payload: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Payload for T {}

/// A trailing callable passed along with a call, handed to every handler.
///
/// Handlers may yield to it any number of times via [`Call::yield_block`].
pub type Block<A, R> = dyn Fn(&[A]) -> R + Send + Sync;

/// One invocation: the capability being asked for, its positional arguments,
/// and an optional trailing [`Block`].
///
/// A `Call` only borrows its parts and is `Copy`; the same call is handed by
/// reference to every handler that responds to the capability.
pub struct Call<'a, A, R> {
    capability: &'a Capability,
    args: &'a [A],
    block: Option<&'a Block<A, R>>,
}

impl<'a, A, R> Call<'a, A, R> {
    /// Create a call without a block.
    pub fn new(capability: &'a Capability, args: &'a [A]) -> Self {
        Self {
            capability,
            args,
            block: None,
        }
    }

    /// Attach a trailing block.
    pub fn with_block(mut self, block: &'a Block<A, R>) -> Self {
        self.block = Some(block);
        self
    }

    /// The capability being invoked.
    pub fn capability(&self) -> &'a Capability {
        self.capability
    }

    /// All positional arguments.
    pub fn args(&self) -> &'a [A] {
        self.args
    }

    /// The positional argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&'a A> {
        self.args.get(index)
    }

    /// The positional argument at `index`, or a [`HarkError::MissingArgument`].
    pub fn require(&self, index: usize) -> Result<&'a A, HarkError> {
        self.arg(index).ok_or_else(|| HarkError::MissingArgument {
            capability: self.capability.clone(),
            index,
        })
    }

    /// The trailing block, if one was supplied.
    pub fn block(&self) -> Option<&'a Block<A, R>> {
        self.block
    }

    /// Invoke the trailing block with `args`. `None` when no block was given.
    pub fn yield_block(&self, args: &[A]) -> Option<R> {
        self.block.map(|block| block(args))
    }
}

impl<A, R> Clone for Call<'_, A, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, R> Copy for Call<'_, A, R> {}

impl<A, R> fmt::Debug for Call<'_, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("capability", self.capability)
            .field("args", &self.args.len())
            .field("block", &self.block.is_some())
            .finish()
    }
}
