//! # hark-std
//!
//! Standard implementations for building ad-hoc, composable listeners.
//!
//! This crate provides:
//! - **Handler sets**: [`AdHoc`] and its [`Registrar`], built from named closures
//! - **Normalization**: [`Input`] and [`Trailing`], the shapes a listener can be built from
//! - **Fan-out**: [`Dispatcher`], an immutable ordered list of handlers
//! - **Listeners**: [`Listener`] in [`Strict`] or [`Lax`] mode
//! - **Sugar**: [`heed`], for passing a fresh listener to another object
//! - **Testing**: [`testing::Transcript`], [`testing::RecordingHandler`]
//!
//! # Flow
//!
//! ```text
//! inputs ──normalize──▶ Dispatcher ──wrap──▶ Listener
//!                                              │ dispatch("name", args)
//!                                              ▼
//!                        handlers that respond, in order ──▶ Vec<R>
//!                                              │
//!                     Strict: empty ▶ UnknownCapability / Lax: empty ▶ Ok(vec![])
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core vocabulary
pub use hark_core;

// Modules
mod ad_hoc;
mod dispatcher;
mod heed;
mod input;
mod listener;
pub mod testing;

pub use ad_hoc::{AdHoc, Body, Registrar, RegistrarFn, body, registrar, try_body};
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use heed::{Reply, heed};
pub use input::{Input, Trailing};
pub use listener::{
    BUILTIN_OPERATIONS, Lax, LaxListener, Listener, Mode, Strict, StrictListener, Strictness,
};

use hark_core::Payload;

/// Build a new top-level listener from `inputs`.
///
/// New listeners are strict; call [`Listener::lax`] for one that absorbs
/// unknown messages.
pub fn listener<A, R, I>(inputs: I) -> StrictListener<A, R>
where
    A: Payload,
    R: Payload,
    I: IntoIterator<Item = Input<A, R>>,
{
    Listener::new(inputs)
}

/// Build a new top-level listener from `inputs` and a trailing callable.
pub fn listener_with<A, R, I>(inputs: I, trailing: Option<Trailing<A, R>>) -> StrictListener<A, R>
where
    A: Payload,
    R: Payload,
    I: IntoIterator<Item = Input<A, R>>,
{
    Listener::with_trailing(inputs, trailing)
}

/// Build a mapping [`Input`] from `name => body` pairs.
///
/// Each body is an infallible closure taking `&Call`.
///
/// # Example
///
/// ```rust
/// use hark_core::Call;
/// use hark_std::{StrictListener, hark, listener};
///
/// let calculator: StrictListener<i64, i64> = listener([hark! {
///     add => |call: &Call<'_, i64, i64>| call.args().iter().sum(),
///     negate => |call: &Call<'_, i64, i64>| -call.args()[0],
/// }]);
///
/// assert_eq!(calculator.dispatch("add", &[1, 2, 3]).unwrap(), vec![6]);
/// ```
#[macro_export]
macro_rules! hark {
    () => {
        $crate::Input::Mapping(::std::vec::Vec::new())
    };
    ($($name:ident => $body:expr),+ $(,)?) => {
        $crate::Input::mapping([$((stringify!($name), $crate::body($body))),+])
    };
}
