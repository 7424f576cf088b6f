//! Capability names.

use std::{borrow::Borrow, borrow::Cow, fmt};

/// The name of an operation a handler may or may not support.
///
/// Capabilities compare by string identity. Building one from a string
/// literal does not allocate.
///
/// # Example
///
/// ```rust
/// use hark_core::Capability;
///
/// let success = Capability::from("success");
/// assert_eq!(success, "success");
/// assert_eq!(success, Capability::from(String::from("success")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capability(Cow<'static, str>);

impl Capability {
    /// Create a capability from a static name, usable in `const` context.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create a capability from any owned or static name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// The capability name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Capability {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for Capability {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl From<&Capability> for Capability {
    fn from(capability: &Capability) -> Self {
        capability.clone()
    }
}

// Lets `HashMap<Capability, _>` be queried with a plain `&str`.
impl Borrow<str> for Capability {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Capability {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Capability {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Capability {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
