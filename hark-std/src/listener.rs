//! # Listener
//!
//! A listener holds a [`Dispatcher`] and forwards every message it is sent
//! to it. It comes in two modes, fixed in its type:
//!
//! - [`Strict`] (the default): a message no handler responds to fails with
//!   [`HarkError::UnknownCapability`].
//! - [`Lax`]: such a message is silently absorbed and yields an empty result
//!   list.
//!
//! Listeners are immutable. [`strict`](Listener::strict) and
//! [`lax`](Listener::lax) return new listeners over the same dispatcher, and
//! [`hark`](Listener::hark) returns a new listener of the *same* mode whose
//! dispatcher is this listener's handlers followed by the new ones.
//!
//! A handler that responds but returns a "falsy" value still counts as a
//! response: strictness only looks at whether the result list is empty.

use crate::{
    dispatcher::Dispatcher,
    input::{Input, Trailing},
};
use hark_core::{Block, Call, Capability, HarkError, Payload};
use std::{fmt, iter, marker::PhantomData};

/// Names of the operations a listener implements itself.
///
/// A strict listener reports these through
/// [`responds_to`](Listener::responds_to) even when no handler does. They
/// are reached through the typed methods of the same name, never through
/// [`dispatch`](Listener::dispatch).
pub const BUILTIN_OPERATIONS: &[&str] = &["hark", "strict", "lax"];

mod sealed {
    pub trait Sealed {}
}

/// Runtime view of a listener's mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strictness {
    /// Unknown messages fail.
    Strict,
    /// Unknown messages are absorbed.
    Lax,
}

/// How a listener treats messages nobody handles.
///
/// Sealed: implemented only by [`Strict`] and [`Lax`].
pub trait Mode: sealed::Sealed + Send + Sync + 'static {
    /// The runtime counterpart of this mode.
    const STRICTNESS: Strictness;

    /// Whether a listener in this mode claims to respond to `capability`.
    fn responds_to<A: Payload, R: Payload>(
        dispatcher: &Dispatcher<A, R>,
        capability: &Capability,
    ) -> bool;

    /// Turn the raw fan-out results into the listener's answer.
    fn settle<R>(capability: &Capability, results: Vec<R>) -> Result<Vec<R>, HarkError>;
}

/// Unknown messages fail with [`HarkError::UnknownCapability`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Strict;

/// Unknown messages return an empty result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lax;

impl sealed::Sealed for Strict {}
impl sealed::Sealed for Lax {}

impl Mode for Strict {
    const STRICTNESS: Strictness = Strictness::Strict;

    fn responds_to<A: Payload, R: Payload>(
        dispatcher: &Dispatcher<A, R>,
        capability: &Capability,
    ) -> bool {
        BUILTIN_OPERATIONS.contains(&capability.as_str()) || dispatcher.handles(capability)
    }

    fn settle<R>(capability: &Capability, results: Vec<R>) -> Result<Vec<R>, HarkError> {
        if results.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(%capability, "strict listener rejected unknown capability");

            return Err(HarkError::UnknownCapability(capability.clone()));
        }
        Ok(results)
    }
}

impl Mode for Lax {
    const STRICTNESS: Strictness = Strictness::Lax;

    fn responds_to<A: Payload, R: Payload>(
        _dispatcher: &Dispatcher<A, R>,
        _capability: &Capability,
    ) -> bool {
        true
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn settle<R>(capability: &Capability, results: Vec<R>) -> Result<Vec<R>, HarkError> {
        #[cfg(feature = "tracing")]
        {
            if results.is_empty() {
                tracing::debug!(%capability, "lax listener absorbed unknown capability");
            }
        }

        Ok(results)
    }
}

/// A listener that fails on unknown messages.
pub type StrictListener<A, R> = Listener<A, R, Strict>;

/// A listener that absorbs unknown messages.
pub type LaxListener<A, R> = Listener<A, R, Lax>;

/// A dynamic-dispatch proxy over a [`Dispatcher`], in mode `M`.
///
/// # Example
///
/// ```rust
/// use hark_std::{Input, StrictListener, listener};
///
/// let greeter: StrictListener<&'static str, String> =
///     listener([Input::on("greet", |call| format!("hello {}", call.args()[0]))]);
///
/// assert_eq!(greeter.dispatch("greet", &["Fred"]).unwrap(), vec!["hello Fred"]);
/// assert!(greeter.dispatch("wave", &[]).unwrap_err().is_unknown_capability());
/// assert!(greeter.lax().dispatch("wave", &[]).unwrap().is_empty());
/// ```
pub struct Listener<A, R, M = Strict> {
    dispatcher: Dispatcher<A, R>,
    mode: PhantomData<M>,
}

impl<A, R, M: Mode> Listener<A, R, M> {
    /// The dispatcher this listener forwards to.
    pub fn dispatcher(&self) -> &Dispatcher<A, R> {
        &self.dispatcher
    }

    /// Give up the listener, keeping its dispatcher.
    pub fn into_dispatcher(self) -> Dispatcher<A, R> {
        self.dispatcher
    }

    /// This listener's mode.
    pub fn mode(&self) -> Strictness {
        M::STRICTNESS
    }
}

impl<A: Payload, R: Payload, M: Mode> Listener<A, R, M> {
    /// Build a listener from inputs.
    pub fn new<I>(inputs: I) -> Self
    where
        I: IntoIterator<Item = Input<A, R>>,
    {
        Self::with_trailing(inputs, None)
    }

    /// Build a listener from inputs and an optional trailing callable.
    pub fn with_trailing<I>(inputs: I, trailing: Option<Trailing<A, R>>) -> Self
    where
        I: IntoIterator<Item = Input<A, R>>,
    {
        Self::from_dispatcher(Dispatcher::from_inputs(inputs, trailing))
    }

    /// Wrap an existing dispatcher.
    pub fn from_dispatcher(dispatcher: Dispatcher<A, R>) -> Self {
        Self {
            dispatcher,
            mode: PhantomData,
        }
    }

    /// A strict listener over the same dispatcher.
    pub fn strict(&self) -> StrictListener<A, R> {
        self.switch()
    }

    /// A lax listener over the same dispatcher.
    pub fn lax(&self) -> LaxListener<A, R> {
        self.switch()
    }

    fn switch<N: Mode>(&self) -> Listener<A, R, N> {
        #[cfg(feature = "tracing")]
        tracing::debug!(from = ?M::STRICTNESS, to = ?N::STRICTNESS, "switching listener mode");

        Listener::from_dispatcher(self.dispatcher.clone())
    }

    /// A listener of the same mode handling this listener's messages plus
    /// those of `input`.
    pub fn hark(&self, input: impl Into<Input<A, R>>) -> Self {
        self.hark_with([input.into()], None)
    }

    /// A listener of the same mode over this listener's handlers followed by
    /// `inputs` and the optional trailing callable.
    pub fn hark_with<I>(&self, inputs: I, trailing: Option<Trailing<A, R>>) -> Self
    where
        I: IntoIterator<Item = Input<A, R>>,
    {
        let inputs = iter::once(Input::from(&self.dispatcher)).chain(inputs);
        Self::with_trailing(inputs, trailing)
    }

    /// A listener of the same mode that also handles `name` with `f`.
    pub fn on<F>(&self, name: impl Into<Capability>, f: F) -> Self
    where
        F: Fn(&Call<'_, A, R>) -> R + Send + Sync + 'static,
    {
        self.hark_with([], Some(Trailing::named(name, f)))
    }

    /// Whether this listener accepts `name`.
    ///
    /// Strict listeners accept their own [`BUILTIN_OPERATIONS`] and anything
    /// a handler responds to. Lax listeners accept everything.
    ///
    /// The built-in names are answered by the typed methods
    /// ([`hark`](Self::hark), [`strict`](Self::strict), [`lax`](Self::lax)),
    /// not by [`dispatch`](Self::dispatch): dispatching one of them reaches
    /// only handlers registered under that name, and a strict listener
    /// without such a handler fails with [`HarkError::UnknownCapability`].
    pub fn responds_to(&self, name: impl Into<Capability>) -> bool {
        M::responds_to(&self.dispatcher, &name.into())
    }

    /// Send message `name` with positional arguments.
    pub fn dispatch(&self, name: impl Into<Capability>, args: &[A]) -> Result<Vec<R>, HarkError> {
        let capability = name.into();
        self.dispatch_call(&Call::new(&capability, args))
    }

    /// Send message `name` with positional arguments and a trailing block.
    pub fn dispatch_with_block(
        &self,
        name: impl Into<Capability>,
        args: &[A],
        block: &Block<A, R>,
    ) -> Result<Vec<R>, HarkError> {
        let capability = name.into();
        self.dispatch_call(&Call::new(&capability, args).with_block(block))
    }

    /// Send a prepared call.
    ///
    /// Returns the results of every responding handler in order. Handler
    /// failures propagate unchanged in either mode; only the "nobody
    /// responded" case depends on the mode.
    pub fn dispatch_call(&self, call: &Call<'_, A, R>) -> Result<Vec<R>, HarkError> {
        let results = self.dispatcher.handle(call)?;
        M::settle(call.capability(), results)
    }
}

impl<A: Payload, R: Payload, M: Mode> Default for Listener<A, R, M> {
    fn default() -> Self {
        Self::from_dispatcher(Dispatcher::empty())
    }
}

impl<A, R, M> Clone for Listener<A, R, M> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            mode: PhantomData,
        }
    }
}

impl<A, R, M: Mode> fmt::Debug for Listener<A, R, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("mode", &M::STRICTNESS)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    type C<'a> = Call<'a, i32, Option<i32>>;

    fn checked() -> StrictListener<i32, Option<i32>> {
        Listener::new([Input::on("half", |call: &C<'_>| {
            let n = call.args()[0];
            (n % 2 == 0).then_some(n / 2)
        })])
    }

    #[test]
    fn test_default_listener_is_strict_and_empty() {
        let listener: Listener<i32, i32> = Listener::default();
        assert_eq!(listener.mode(), Strictness::Strict);
        assert!(listener.dispatcher().is_empty());
        assert!(listener.dispatch("anything", &[]).unwrap_err().is_unknown_capability());
    }

    #[test]
    fn test_falsy_result_is_still_a_response() {
        let listener = checked();
        assert_eq!(listener.dispatch("half", &[3]).unwrap(), vec![None]);
        assert_eq!(listener.dispatch("half", &[4]).unwrap(), vec![Some(2)]);
    }

    #[test]
    fn test_strict_rejects_unknown() {
        let err = checked().dispatch("double", &[3]).unwrap_err();
        assert!(matches!(err, HarkError::UnknownCapability(ref c) if c == "double"));
    }

    #[test]
    fn test_lax_absorbs_unknown() {
        let lax = checked().lax();
        assert_eq!(lax.mode(), Strictness::Lax);
        assert!(lax.dispatch("double", &[3]).unwrap().is_empty());
        assert_eq!(lax.dispatch("half", &[8]).unwrap(), vec![Some(4)]);
    }

    #[test]
    fn test_responds_to() {
        let strict = checked();
        assert!(strict.responds_to("half"));
        assert!(!strict.responds_to("double"));
        for builtin in BUILTIN_OPERATIONS {
            assert!(strict.responds_to(*builtin));
        }

        let lax = strict.lax();
        assert!(lax.responds_to("double"));
        assert!(lax.responds_to(String::from("anything at all")));
    }

    #[test]
    fn test_mode_switches_share_the_dispatcher() {
        let strict = checked();
        let round_trip = strict.lax().strict();

        assert_eq!(round_trip.mode(), Strictness::Strict);
        assert!(Arc::ptr_eq(
            &strict.dispatcher().handlers()[0],
            &round_trip.dispatcher().handlers()[0]
        ));
        assert!(round_trip.dispatch("double", &[1]).unwrap_err().is_unknown_capability());
    }

    #[test]
    fn test_hark_preserves_mode() {
        let strict = checked().hark(Input::on("double", |call: &C<'_>| Some(call.args()[0] * 2)));
        assert_eq!(strict.mode(), Strictness::Strict);
        assert_eq!(strict.dispatch("double", &[5]).unwrap(), vec![Some(10)]);

        let lax = checked().lax().on("double", |call| Some(call.args()[0] * 2));
        assert_eq!(lax.mode(), Strictness::Lax);
        assert!(lax.dispatch("triple", &[5]).unwrap().is_empty());
    }

    #[test]
    fn test_hark_prepends_existing_handlers() {
        let listener = checked().on("half", |_| Some(-1));
        assert_eq!(listener.dispatcher().len(), 2);
        assert_eq!(listener.dispatch("half", &[6]).unwrap(), vec![Some(3), Some(-1)]);
    }

    #[test]
    fn test_handler_failure_propagates_in_lax_mode() {
        let lax: LaxListener<i32, i32> =
            Listener::new([Input::try_on("boom", |_| Err("kaboom".into()))]);

        let err = lax.dispatch("boom", &[]).unwrap_err();
        assert_eq!(err.to_string(), "kaboom");
        assert!(!err.is_unknown_capability());
    }

    #[test]
    fn test_debug_shows_mode() {
        let rendered = format!("{:?}", checked().lax());
        assert!(rendered.contains("Lax"));
        assert!(rendered.contains("handlers: 1"));
    }

    #[test]
    fn test_builtin_names_are_answered_by_typed_methods() {
        let strict = checked();
        assert!(strict.responds_to("lax"));
        assert!(strict.dispatch("lax", &[]).unwrap_err().is_unknown_capability());
        assert_eq!(strict.lax().mode(), Strictness::Lax);

        let shadowed = strict.on("lax", |_| Some(0));
        assert_eq!(shadowed.dispatch("lax", &[]).unwrap(), vec![Some(0)]);
    }

    #[test]
    fn test_listener_converts_into_an_input_of_its_handlers() {
        let listener = checked();

        let Input::Dispatcher(borrowed) = Input::from(&listener) else {
            panic!("expected a dispatcher input");
        };
        assert!(Arc::ptr_eq(
            &borrowed.handlers()[0],
            &listener.dispatcher().handlers()[0]
        ));

        let Input::Dispatcher(owned) = Input::from(listener.lax()) else {
            panic!("expected a dispatcher input");
        };
        assert_eq!(owned.len(), 1);
    }
}
