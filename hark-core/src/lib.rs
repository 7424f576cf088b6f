//! # hark-core
//!
//! Core vocabulary for building ad-hoc, composable listeners.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! code that only needs to *implement* handlers, without pulling in the
//! normalization and listener machinery from `hark-std`.
//!
//! # Pieces
//!
//! - [`Capability`] - the name of an operation a handler may support
//! - [`Call`] - one invocation: capability, positional arguments, optional [`Block`]
//! - [`Handler`] - anything that can answer "do you support X" and "invoke X"
//! - [`HarkError`] - the error kinds surfaced by dispatch
//!
//! Arguments and results are opaque to this crate. They are carried as the
//! type parameters `A` and `R`, bounded only by the [`Payload`] marker.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod call;
mod capability;
mod error;
mod handler;

// Re-exports
pub use call::{Block, Call, Payload};
pub use capability::Capability;
pub use error::{BoxError, HarkError};
pub use handler::Handler;
