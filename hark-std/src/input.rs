//! Inputs accepted by dispatcher and listener construction.
//!
//! Every input is one of a closed set of shapes, consumed by a single
//! normalization pass in [`Dispatcher::from_inputs`]:
//!
//! | shape                    | contributes                                   |
//! |--------------------------|-----------------------------------------------|
//! | listener / dispatcher    | its already-flattened handlers, shared        |
//! | mapping                  | one new [`AdHoc`] built from the mapping      |
//! | registration block       | one new [`AdHoc`] filled by the block         |
//! | nested inputs            | each element normalized, results concatenated |
//! | handler                  | itself, as an opaque handler                  |
//!
//! [`Dispatcher::from_inputs`]: crate::Dispatcher::from_inputs

use crate::{
    ad_hoc::{AdHoc, Body, Registrar, RegistrarFn, body, registrar, try_body},
    dispatcher::Dispatcher,
    listener::{Listener, Mode},
};
use hark_core::{BoxError, Call, Capability, Handler, Payload};
use std::{fmt, sync::Arc};

/// One construction input.
pub enum Input<A, R> {
    /// An existing dispatcher (or a listener's dispatcher). Its handlers are
    /// spliced in as they are.
    Dispatcher(Dispatcher<A, R>),
    /// Name to body pairs, turned into a fresh handler set.
    Mapping(Vec<(Capability, Body<A, R>)>),
    /// A registration block, run against a fresh handler set.
    Registrar(RegistrarFn<A, R>),
    /// Further inputs, flattened in order.
    Nested(Vec<Input<A, R>>),
    /// Any other handler, passed through untouched.
    Handler(Arc<dyn Handler<A, R>>),
}

impl<A: Payload, R: Payload> Input<A, R> {
    /// A mapping input from name to body pairs.
    pub fn mapping<I, K>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, Body<A, R>)>,
        K: Into<Capability>,
    {
        Input::Mapping(
            mapping
                .into_iter()
                .map(|(name, body)| (name.into(), body))
                .collect(),
        )
    }

    /// A single-capability mapping with an infallible body.
    pub fn on<F>(name: impl Into<Capability>, f: F) -> Self
    where
        F: Fn(&Call<'_, A, R>) -> R + Send + Sync + 'static,
    {
        Input::Mapping(vec![(name.into(), body(f))])
    }

    /// A single-capability mapping with a fallible body.
    pub fn try_on<F>(name: impl Into<Capability>, f: F) -> Self
    where
        F: Fn(&Call<'_, A, R>) -> Result<R, BoxError> + Send + Sync + 'static,
    {
        Input::Mapping(vec![(name.into(), try_body(f))])
    }

    /// A registration block input.
    pub fn registrar<F>(f: F) -> Self
    where
        F: FnOnce(&mut Registrar<'_, A, R>) + 'static,
    {
        Input::Registrar(registrar(f))
    }

    /// A nested collection of inputs.
    pub fn nested<I>(inputs: I) -> Self
    where
        I: IntoIterator<Item = Input<A, R>>,
    {
        Input::Nested(inputs.into_iter().collect())
    }

    /// An opaque handler input.
    pub fn handler<H: Handler<A, R>>(handler: H) -> Self {
        Input::Handler(Arc::new(handler))
    }
}

impl<A, R> From<Dispatcher<A, R>> for Input<A, R> {
    fn from(dispatcher: Dispatcher<A, R>) -> Self {
        Input::Dispatcher(dispatcher)
    }
}

impl<A, R> From<&Dispatcher<A, R>> for Input<A, R> {
    fn from(dispatcher: &Dispatcher<A, R>) -> Self {
        Input::Dispatcher(dispatcher.clone())
    }
}

impl<A, R, M: Mode> From<Listener<A, R, M>> for Input<A, R> {
    fn from(listener: Listener<A, R, M>) -> Self {
        Input::Dispatcher(listener.into_dispatcher())
    }
}

impl<A, R, M: Mode> From<&Listener<A, R, M>> for Input<A, R> {
    fn from(listener: &Listener<A, R, M>) -> Self {
        Input::Dispatcher(listener.dispatcher().clone())
    }
}

impl<A: Payload, R: Payload> From<AdHoc<A, R>> for Input<A, R> {
    fn from(ad_hoc: AdHoc<A, R>) -> Self {
        Input::Handler(Arc::new(ad_hoc))
    }
}

impl<A, R> From<Arc<dyn Handler<A, R>>> for Input<A, R> {
    fn from(handler: Arc<dyn Handler<A, R>>) -> Self {
        Input::Handler(handler)
    }
}

impl<A, R> From<Vec<Input<A, R>>> for Input<A, R> {
    fn from(inputs: Vec<Input<A, R>>) -> Self {
        Input::Nested(inputs)
    }
}

impl<A, R> fmt::Debug for Input<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Dispatcher(dispatcher) => f.debug_tuple("Dispatcher").field(dispatcher).finish(),
            Input::Mapping(mapping) => {
                let names: Vec<&str> = mapping.iter().map(|(name, _)| name.as_str()).collect();
                f.debug_tuple("Mapping").field(&names).finish()
            }
            Input::Registrar(_) => f.write_str("Registrar(..)"),
            Input::Nested(inputs) => f.debug_tuple("Nested").field(inputs).finish(),
            Input::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

/// The trailing callable of a construction call.
pub enum Trailing<A, R> {
    /// A capability name paired with its body; becomes a one-entry mapping.
    Named(Capability, Body<A, R>),
    /// A registration block; becomes one more input.
    Registrar(RegistrarFn<A, R>),
}

impl<A: Payload, R: Payload> Trailing<A, R> {
    /// Pair `name` with an infallible body.
    pub fn named<F>(name: impl Into<Capability>, f: F) -> Self
    where
        F: Fn(&Call<'_, A, R>) -> R + Send + Sync + 'static,
    {
        Trailing::Named(name.into(), body(f))
    }

    /// A trailing registration block.
    pub fn registrar<F>(f: F) -> Self
    where
        F: FnOnce(&mut Registrar<'_, A, R>) + 'static,
    {
        Trailing::Registrar(registrar(f))
    }

    /// The input this trailing callable stands for.
    pub fn into_input(self) -> Input<A, R> {
        match self {
            Trailing::Named(name, body) => Input::Mapping(vec![(name, body)]),
            Trailing::Registrar(register) => Input::Registrar(register),
        }
    }
}

impl<A, R> fmt::Debug for Trailing<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trailing::Named(name, _) => f.debug_tuple("Named").field(name).finish(),
            Trailing::Registrar(_) => f.write_str("Registrar(..)"),
        }
    }
}
