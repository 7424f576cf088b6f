//! Error types for hark.
//!
//! - [`HarkError`] - every failure a listener, dispatcher or handler set can surface
//! - [`BoxError`] - the error type handler bodies return

use crate::capability::Capability;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by hark.
///
/// Nothing in hark catches or retries: a failure always reaches the caller
/// that sent the message.
#[derive(Error, Debug)]
pub enum HarkError {
    /// A strict listener was sent a message no handler responds to.
    #[error("undefined capability `{0}` for strict listener")]
    UnknownCapability(Capability),

    /// A handler was invoked directly for a capability it does not implement.
    #[error("handler does not implement `{0}`")]
    MissingCapability(Capability),

    /// A handler needed a positional argument the caller did not supply.
    #[error("`{capability}` expects an argument at position {index}")]
    MissingArgument {
        /// The capability being invoked.
        capability: Capability,
        /// Zero-based position of the missing argument.
        index: usize,
    },

    /// A handler's own body failed. Display and source are the original error's.
    #[error(transparent)]
    Handler(BoxError),
}

impl HarkError {
    /// Lift an error returned by a handler body.
    ///
    /// A `HarkError` that was boxed on its way through a handler is restored
    /// as-is; any other error is wrapped in [`HarkError::Handler`] untouched.
    pub fn from_handler(err: BoxError) -> Self {
        match err.downcast::<HarkError>() {
            Ok(err) => *err,
            Err(err) => HarkError::Handler(err),
        }
    }

    /// The capability this error is about, if any.
    pub fn capability(&self) -> Option<&Capability> {
        match self {
            HarkError::UnknownCapability(capability)
            | HarkError::MissingCapability(capability)
            | HarkError::MissingArgument { capability, .. } => Some(capability),
            HarkError::Handler(_) => None,
        }
    }

    /// Whether this is a strict listener refusing an unknown message.
    pub fn is_unknown_capability(&self) -> bool {
        matches!(self, HarkError::UnknownCapability(_))
    }

    /// Take the original handler error back out, if this wraps one.
    pub fn into_handler_error(self) -> Result<BoxError, Self> {
        match self {
            HarkError::Handler(err) => Ok(err),
            other => Err(other),
        }
    }
}

// Convenience conversions
impl From<BoxError> for HarkError {
    fn from(err: BoxError) -> Self {
        HarkError::from_handler(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_boxed_hark_error_is_restored() {
        let boxed: BoxError = Box::new(HarkError::MissingCapability("area".into()));
        let err = HarkError::from_handler(boxed);
        assert!(matches!(err, HarkError::MissingCapability(ref c) if c == "area"));
    }

    #[test]
    fn test_foreign_error_is_wrapped_verbatim() {
        let boxed: BoxError = Box::new(io::Error::other("disk on fire"));
        let err = HarkError::from(boxed);

        assert_eq!(err.to_string(), "disk on fire");
        assert!(err.capability().is_none());

        let original = err.into_handler_error().unwrap();
        let io_err = original.downcast::<io::Error>().unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn test_unknown_capability_display() {
        let err = HarkError::UnknownCapability("other".into());
        assert!(err.is_unknown_capability());
        assert_eq!(err.to_string(), "undefined capability `other` for strict listener");
        assert_eq!(err.capability().map(Capability::as_str), Some("other"));
    }
}
