//! Handler aggregation and fan-out.
//!
//! A [`Dispatcher`] is an immutable, ordered list of handlers. It is built
//! once from heterogeneous [`Input`]s and never changes afterwards, so the
//! same dispatcher can back any number of listeners.

use crate::{
    ad_hoc::{AdHoc, Registrar},
    input::{Input, Trailing},
    listener::{Listener, Mode},
};
use hark_core::{BoxError, Block, Call, Capability, Handler, HarkError, Payload};
use std::{fmt, sync::Arc};

/// An immutable, ordered collection of handlers with fan-out invocation.
///
/// Cloning is cheap: clones share the same handler list.
pub struct Dispatcher<A, R> {
    handlers: Arc<[Arc<dyn Handler<A, R>>]>,
}

impl<A: Payload, R: Payload> Dispatcher<A, R> {
    /// A dispatcher with no handlers.
    pub fn empty() -> Self {
        Self {
            handlers: Arc::from(Vec::new()),
        }
    }

    /// Start a fluent [`DispatcherBuilder`].
    pub fn builder() -> DispatcherBuilder<A, R> {
        DispatcherBuilder::new()
    }

    /// Normalize `inputs` (and an optional trailing callable) into a flat
    /// handler list.
    ///
    /// A trailing callable is appended after the positional inputs. Output
    /// order follows input order, depth first through nested inputs.
    pub fn from_inputs<I>(inputs: I, trailing: Option<Trailing<A, R>>) -> Self
    where
        I: IntoIterator<Item = Input<A, R>>,
    {
        let mut handlers = Vec::new();
        for input in inputs.into_iter().chain(trailing.map(Trailing::into_input)) {
            normalize(input, &mut handlers);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(handlers = handlers.len(), "built dispatcher");

        Self {
            handlers: Arc::from(handlers),
        }
    }

    /// The flattened handler list, in dispatch order.
    pub fn handlers(&self) -> &[Arc<dyn Handler<A, R>>] {
        &self.handlers
    }

    /// Number of handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether there are no handlers at all.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Whether at least one handler responds to `capability`.
    pub fn handles(&self, capability: &Capability) -> bool {
        self.handlers
            .iter()
            .any(|handler| handler.responds_to(capability))
    }

    /// Invoke `call` on every handler that responds to its capability.
    ///
    /// Results come back in handler order. Handlers that do not respond are
    /// skipped; if none respond the result is empty, which is not an error
    /// here. The first handler failure aborts the fan-out and is returned
    /// as-is.
    pub fn handle(&self, call: &Call<'_, A, R>) -> Result<Vec<R>, HarkError> {
        let mut results = Vec::new();
        for handler in self.handlers.iter() {
            if !handler.responds_to(call.capability()) {
                continue;
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(capability = %call.capability(), position = results.len(), "invoking handler");

            results.push(handler.invoke(call).map_err(HarkError::from_handler)?);
        }
        Ok(results)
    }

    /// Shorthand for [`handle`](Self::handle) with positional arguments.
    pub fn handle_args(
        &self,
        capability: impl Into<Capability>,
        args: &[A],
    ) -> Result<Vec<R>, HarkError> {
        let capability = capability.into();
        self.handle(&Call::new(&capability, args))
    }

    /// Shorthand for [`handle`](Self::handle) with positional arguments and a block.
    pub fn handle_with_block(
        &self,
        capability: impl Into<Capability>,
        args: &[A],
        block: &Block<A, R>,
    ) -> Result<Vec<R>, HarkError> {
        let capability = capability.into();
        self.handle(&Call::new(&capability, args).with_block(block))
    }
}

fn normalize<A: Payload, R: Payload>(input: Input<A, R>, out: &mut Vec<Arc<dyn Handler<A, R>>>) {
    #[cfg(feature = "tracing")]
    tracing::trace!(?input, "normalizing input");

    match input {
        Input::Dispatcher(dispatcher) => out.extend(dispatcher.handlers.iter().cloned()),
        Input::Mapping(mapping) => out.push(Arc::new(AdHoc::from_mapping(mapping))),
        Input::Registrar(register) => out.push(Arc::new(AdHoc::from_registrar(register))),
        Input::Nested(inputs) => {
            for input in inputs {
                normalize(input, out);
            }
        }
        Input::Handler(handler) => out.push(handler),
    }
}

impl<A, R> Clone for Dispatcher<A, R> {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
        }
    }
}

impl<A: Payload, R: Payload> Default for Dispatcher<A, R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<A, R> fmt::Debug for Dispatcher<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

// ============================================================================
// DispatcherBuilder
// ============================================================================

/// Fluent construction of a [`Dispatcher`] or a listener.
///
/// # Example
///
/// ```rust
/// use hark_std::Dispatcher;
///
/// let dispatcher = Dispatcher::<u32, u32>::builder()
///     .on("double", |call| call.args()[0] * 2)
///     .on("double", |call| call.args()[0] + call.args()[0])
///     .build();
///
/// assert_eq!(dispatcher.len(), 2);
/// assert_eq!(dispatcher.handle_args("double", &[4]).unwrap(), vec![8, 8]);
/// ```
pub struct DispatcherBuilder<A, R> {
    inputs: Vec<Input<A, R>>,
}

impl<A: Payload, R: Payload> DispatcherBuilder<A, R> {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self { inputs: Vec::new() }
    }

    /// Add any input.
    pub fn input(mut self, input: impl Into<Input<A, R>>) -> Self {
        self.inputs.push(input.into());
        self
    }

    /// Add an opaque handler.
    pub fn handler<H: Handler<A, R>>(self, handler: H) -> Self {
        self.input(Input::handler(handler))
    }

    /// Add a single-capability handler with an infallible body.
    pub fn on<F>(self, name: impl Into<Capability>, f: F) -> Self
    where
        F: Fn(&Call<'_, A, R>) -> R + Send + Sync + 'static,
    {
        self.input(Input::on(name, f))
    }

    /// Add a single-capability handler with a fallible body.
    pub fn try_on<F>(self, name: impl Into<Capability>, f: F) -> Self
    where
        F: Fn(&Call<'_, A, R>) -> Result<R, BoxError> + Send + Sync + 'static,
    {
        self.input(Input::try_on(name, f))
    }

    /// Add a handler set filled by a registration block.
    pub fn register<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut Registrar<'_, A, R>) + 'static,
    {
        self.input(Input::registrar(f))
    }

    /// Build the immutable dispatcher.
    pub fn build(self) -> Dispatcher<A, R> {
        Dispatcher::from_inputs(self.inputs, None)
    }

    /// Build a listener in mode `M` around the dispatcher.
    pub fn listener<M: Mode>(self) -> Listener<A, R, M> {
        Listener::from_dispatcher(self.build())
    }

    /// Get the number of inputs added so far.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Check if no inputs were added.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl<A: Payload, R: Payload> Default for DispatcherBuilder<A, R> {
    fn default() -> Self {
        Self::new()
    }
}
