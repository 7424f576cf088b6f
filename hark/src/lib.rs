//! # hark - ad-hoc, composable listeners
//!
//! `hark` builds listener objects that respond to an open-ended set of
//! message names by dispatching to whatever handlers they were built from.
//!
//! ## Quick Start
//!
//! ```rust
//! use hark::{Call, Input, StrictListener, hark, testing::Transcript};
//!
//! let transcript = Transcript::new();
//! let (ok, failed) = (transcript.clone(), transcript.clone());
//!
//! let listener: StrictListener<i32, ()> = hark::listener([hark! {
//!     success => move |call: &Call<'_, i32, ()>| ok.push(("succeeded", call.args()[0])),
//!     failure => move |call: &Call<'_, i32, ()>| failed.push(("failed", call.args()[0])),
//! }]);
//!
//! listener.dispatch("success", &[42]).unwrap();
//! assert_eq!(transcript.entries(), vec![("succeeded", 42)]);
//!
//! // Strict listeners refuse messages nobody handles...
//! assert!(listener.dispatch("other", &[]).unwrap_err().is_unknown_capability());
//! // ...lax ones absorb them.
//! assert!(listener.lax().dispatch("other", &[]).unwrap().is_empty());
//!
//! // Composition keeps the mode and runs the old handlers first.
//! let louder = listener.hark(Input::on("success", |_: &Call<'_, i32, ()>| ()));
//! assert_eq!(louder.dispatch("success", &[1]).unwrap().len(), 2);
//! ```
//!
//! ## Inputs
//!
//! A listener can be built from any mix of:
//!
//! - mappings of name to closure ([`hark!`], [`Input::mapping`], [`Input::on`])
//! - registration blocks ([`Input::registrar`])
//! - other listeners and dispatchers (their handlers are spliced in)
//! - any [`Handler`], including types annotated with `#[hark::handler]`
//! - nested collections of the above ([`Input::nested`])
//!
//! ## Features
//!
//! - `macros`: the `#[hark::handler]` attribute
//! - `tracing`: debug/trace events for normalization and dispatch

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use hark_core::{
    // Call
    Block,
    // Error types
    BoxError,
    Call,
    // Capability
    Capability,
    // Handler
    Handler,
    HarkError,
    Payload,
};

pub use hark_std::{
    // Handler sets
    AdHoc,
    BUILTIN_OPERATIONS,
    Body,
    // Dispatch
    Dispatcher,
    DispatcherBuilder,
    // Inputs
    Input,
    Lax,
    LaxListener,
    // Listener
    Listener,
    Mode,
    Registrar,
    RegistrarFn,
    // Sugar
    Reply,
    Strict,
    StrictListener,
    Strictness,
    Trailing,
    body,
    hark,
    heed,
    listener,
    listener_with,
    registrar,
    try_body,
};

/// Testing utilities.
pub mod testing {
    pub use hark_std::testing::{RecordingHandler, Transcript};
}

/// Prelude module - common imports for hark.
///
/// # Usage
///
/// ```rust,ignore
/// use hark::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Core
        BoxError,
        Call,
        Capability,
        Handler,
        HarkError,
        // Building
        Input,
        Lax,
        LaxListener,
        Listener,
        Strict,
        StrictListener,
        Trailing,
        hark,
    };
}

#[cfg(feature = "macros")]
pub use hark_macros::handler;
