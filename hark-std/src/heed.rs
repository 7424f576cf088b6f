//! Handing a freshly built listener to another object.
//!
//! A common shape for callback-style APIs is "do this, and tell my listener
//! how it went": the callee takes a listener as its last argument and sends
//! it `success` or `failure`. [`heed`] builds that listener on the spot and
//! appends it to the call.

use crate::{
    ad_hoc::{Registrar, RegistrarFn, registrar},
    input::Trailing,
    listener::{Listener, Mode, Strict},
};
use hark_core::{Call, Capability, Handler, HarkError, Payload};
use std::fmt;

/// Where the listener passed by [`heed`] comes from.
pub enum Reply<A, R, M = Strict> {
    /// A registration block, wrapped into a new listener.
    Register(RegistrarFn<A, R>),
    /// A factory that already produces a listener.
    Build(Box<dyn FnOnce() -> Listener<A, R, M>>),
}

impl<A: Payload, R: Payload, M: Mode> Reply<A, R, M> {
    /// Reply through a listener built from a registration block.
    pub fn register<F>(f: F) -> Self
    where
        F: FnOnce(&mut Registrar<'_, A, R>) + 'static,
    {
        Reply::Register(registrar(f))
    }

    /// Reply through the listener returned by `f`.
    pub fn build<F>(f: F) -> Self
    where
        F: FnOnce() -> Listener<A, R, M> + 'static,
    {
        Reply::Build(Box::new(f))
    }

    /// Produce the listener.
    pub fn into_listener(self) -> Listener<A, R, M> {
        match self {
            Reply::Register(register) => {
                Listener::with_trailing([], Some(Trailing::Registrar(register)))
            }
            Reply::Build(build) => build(),
        }
    }
}

impl<A, R, M> fmt::Debug for Reply<A, R, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Register(_) => f.write_str("Register(..)"),
            Reply::Build(_) => f.write_str("Build(..)"),
        }
    }
}

/// Invoke `capability` on `target`, passing `args` followed by the listener
/// described by `reply`.
///
/// The target's argument type must be able to carry the listener. Fails with
/// [`HarkError::MissingCapability`] when the target does not respond to
/// `capability`; the target's own failures are returned as-is.
///
/// # Example
///
/// ```rust
/// use hark_core::{BoxError, Call, Capability, Handler};
/// use hark_std::{Reply, StrictListener, heed};
///
/// enum Arg {
///     Name(String),
///     Reply(StrictListener<String, ()>),
/// }
///
/// impl From<StrictListener<String, ()>> for Arg {
///     fn from(listener: StrictListener<String, ()>) -> Self {
///         Arg::Reply(listener)
///     }
/// }
///
/// struct Signup;
///
/// impl Handler<Arg, bool> for Signup {
///     fn responds_to(&self, capability: &Capability) -> bool {
///         capability == "signup"
///     }
///
///     fn invoke(&self, call: &Call<'_, Arg, bool>) -> Result<bool, BoxError> {
///         let [Arg::Name(name), Arg::Reply(listener)] = call.args() else {
///             return Err("bad arguments".into());
///         };
///         listener.dispatch("success", std::slice::from_ref(name))?;
///         Ok(true)
///     }
/// }
///
/// let done = heed(
///     &Signup,
///     "signup",
///     vec![Arg::Name("Fred".into())],
///     Reply::register(|on| {
///         on.on("success", |call| println!("welcome {}", call.args()[0]));
///     }),
/// );
/// assert!(done.unwrap());
/// ```
pub fn heed<T, X, Y, A, R, M>(
    target: &T,
    capability: impl Into<Capability>,
    mut args: Vec<X>,
    reply: Reply<A, R, M>,
) -> Result<Y, HarkError>
where
    T: Handler<X, Y> + ?Sized,
    X: Payload + From<Listener<A, R, M>>,
    Y: Payload,
    A: Payload,
    R: Payload,
    M: Mode,
{
    let capability = capability.into();
    if !target.responds_to(&capability) {
        return Err(HarkError::MissingCapability(capability));
    }

    args.push(X::from(reply.into_listener()));
    target
        .invoke(&Call::new(&capability, &args))
        .map_err(HarkError::from_handler)
}
