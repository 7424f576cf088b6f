//! # Handler
//!
//! The one interface every participant in a dispatch implements.
//!
//! A handler is asked two things: whether it supports a [`Capability`], and,
//! if so, to invoke it for a [`Call`]. Handler sets built from closures,
//! recording doubles in tests, and user types annotated with
//! `#[hark::handler]` all meet here.
//!
//! The capability set of a handler is finite and declared by its
//! implementation of [`Handler::responds_to`]; there is no reflection.

use crate::{call::Call, capability::Capability, error::BoxError};
use std::sync::Arc;

/// Something that can be asked "do you support X" and invoked for X.
///
/// # Contract
///
/// - `responds_to` must be pure and stable for the lifetime of the handler.
/// - `invoke` is only called by dispatchers after `responds_to` returned
///   `true`. Direct callers that skip the check should expect a
///   [`HarkError::MissingCapability`] boxed in the error.
///
/// # Example
///
/// ```rust
/// use hark_core::{BoxError, Call, Capability, Handler, HarkError};
///
/// struct Square;
///
/// impl Handler<f64, f64> for Square {
///     fn responds_to(&self, capability: &Capability) -> bool {
///         capability == "area"
///     }
///
///     fn invoke(&self, call: &Call<'_, f64, f64>) -> Result<f64, BoxError> {
///         match call.capability().as_str() {
///             "area" => Ok(call.require(0)?.powi(2)),
///             _ => Err(HarkError::MissingCapability(call.capability().clone()).into()),
///         }
///     }
/// }
/// ```
///
/// [`HarkError::MissingCapability`]: crate::HarkError::MissingCapability
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a hark `Handler<{A}, {R}>`",
    label = "missing `Handler` implementation",
    note = "Implement `responds_to` and `invoke`, or annotate an impl block with `#[hark::handler]`."
)]
pub trait Handler<A, R>: Send + Sync + 'static {
    /// Whether this handler supports `capability`.
    fn responds_to(&self, capability: &Capability) -> bool;

    /// Invoke the capability named by `call`, returning its result verbatim.
    fn invoke(&self, call: &Call<'_, A, R>) -> Result<R, BoxError>;
}

impl<A, R, H> Handler<A, R> for Arc<H>
where
    H: Handler<A, R> + ?Sized,
{
    fn responds_to(&self, capability: &Capability) -> bool {
        (**self).responds_to(capability)
    }

    fn invoke(&self, call: &Call<'_, A, R>) -> Result<R, BoxError> {
        (**self).invoke(call)
    }
}

impl<A, R, H> Handler<A, R> for Box<H>
where
    H: Handler<A, R> + ?Sized,
{
    fn responds_to(&self, capability: &Capability) -> bool {
        (**self).responds_to(capability)
    }

    fn invoke(&self, call: &Call<'_, A, R>) -> Result<R, BoxError> {
        (**self).invoke(call)
    }
}
