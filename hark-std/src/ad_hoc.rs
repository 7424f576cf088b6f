//! Ad-hoc handler sets.
//!
//! An [`AdHoc`] is a tiny object assembled at runtime from named closures.
//! It can be filled from a mapping of name to body:
//!
//! ```rust
//! use hark_core::Call;
//! use hark_std::{AdHoc, body};
//!
//! let handler = AdHoc::from_mapping([
//!     ("double", body(|call: &Call<'_, i32, i32>| call.args()[0] * 2)),
//!     ("negate", body(|call: &Call<'_, i32, i32>| -call.args()[0])),
//! ]);
//! assert_eq!(handler.call("double", &[21]).unwrap(), 42);
//! ```
//!
//! or from a registration block, which receives a [`Registrar`]:
//!
//! ```rust
//! use hark_std::AdHoc;
//!
//! let handler = AdHoc::<i32, i32>::from_registrar(|on| {
//!     on.on("double", |call| call.args()[0] * 2)
//!       .on("negate", |call| -call.args()[0]);
//! });
//! assert_eq!(handler.call("negate", &[7]).unwrap(), -7);
//! ```
//!
//! Bodies keep whatever they captured, so a handler set can close over a
//! transcript, a channel, or a controller-style object.

use hark_core::{BoxError, Call, Capability, Handler, HarkError, Payload};
use std::{collections::HashMap, fmt, sync::Arc};

/// A type-erased, shareable capability body.
pub type Body<A, R> = Arc<dyn Fn(&Call<'_, A, R>) -> Result<R, BoxError> + Send + Sync>;

/// A registration block, run once against a fresh [`Registrar`].
pub type RegistrarFn<A, R> = Box<dyn FnOnce(&mut Registrar<'_, A, R>)>;

/// Erase an infallible closure into a [`Body`].
pub fn body<A, R, F>(f: F) -> Body<A, R>
where
    A: Payload,
    R: Payload,
    F: Fn(&Call<'_, A, R>) -> R + Send + Sync + 'static,
{
    Arc::new(move |call: &Call<'_, A, R>| -> Result<R, BoxError> { Ok(f(call)) })
}

/// Box a registration block into a [`RegistrarFn`].
pub fn registrar<A, R, F>(f: F) -> RegistrarFn<A, R>
where
    A: Payload,
    R: Payload,
    F: FnOnce(&mut Registrar<'_, A, R>) + 'static,
{
    Box::new(f)
}

/// Erase a fallible closure into a [`Body`].
pub fn try_body<A, R, F>(f: F) -> Body<A, R>
where
    A: Payload,
    R: Payload,
    F: Fn(&Call<'_, A, R>) -> Result<R, BoxError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A handler built purely from named closures.
///
/// Registering a name twice replaces the earlier body.
pub struct AdHoc<A, R> {
    methods: HashMap<Capability, Body<A, R>>,
}

impl<A: Payload, R: Payload> AdHoc<A, R> {
    /// Create an empty handler set.
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
        }
    }

    /// Create a handler set from a mapping of name to body.
    pub fn from_mapping<I, K>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, Body<A, R>)>,
        K: Into<Capability>,
    {
        let mut ad_hoc = Self::new();
        ad_hoc.extend(mapping);
        ad_hoc
    }

    /// Create a handler set by running a registration block.
    pub fn from_registrar<F>(register: F) -> Self
    where
        F: FnOnce(&mut Registrar<'_, A, R>),
    {
        let mut ad_hoc = Self::new();
        register(&mut Registrar {
            ad_hoc: &mut ad_hoc,
        });
        ad_hoc
    }

    /// Create a handler set from both styles at once.
    ///
    /// The registration block runs first, then the mapping is applied, so a
    /// mapping entry wins over a registered body of the same name.
    pub fn build<I, K>(register: Option<RegistrarFn<A, R>>, mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, Body<A, R>)>,
        K: Into<Capability>,
    {
        let mut ad_hoc = match register {
            Some(register) => Self::from_registrar(register),
            None => Self::new(),
        };
        ad_hoc.extend(mapping);
        ad_hoc
    }

    /// Bind `name` to an infallible body.
    pub fn add_method<F>(&mut self, name: impl Into<Capability>, f: F) -> &mut Self
    where
        F: Fn(&Call<'_, A, R>) -> R + Send + Sync + 'static,
    {
        self.add_body(name, body(f))
    }

    /// Bind `name` to a fallible body.
    pub fn try_add_method<F>(&mut self, name: impl Into<Capability>, f: F) -> &mut Self
    where
        F: Fn(&Call<'_, A, R>) -> Result<R, BoxError> + Send + Sync + 'static,
    {
        self.add_body(name, try_body(f))
    }

    /// Bind `name` to an already erased body.
    pub fn add_body(&mut self, name: impl Into<Capability>, body: Body<A, R>) -> &mut Self {
        self.methods.insert(name.into(), body);
        self
    }

    /// Whether a body is registered under `name`.
    pub fn handles(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Invoke `name` directly with positional arguments.
    ///
    /// Fails with [`HarkError::MissingCapability`] when nothing is registered
    /// under `name`.
    pub fn call(&self, name: impl Into<Capability>, args: &[A]) -> Result<R, HarkError> {
        let capability = name.into();
        self.invoke(&Call::new(&capability, args))
            .map_err(HarkError::from_handler)
    }

    /// Number of registered capabilities.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<A: Payload, R: Payload> Default for AdHoc<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Payload, R: Payload, K: Into<Capability>> Extend<(K, Body<A, R>)> for AdHoc<A, R> {
    fn extend<I: IntoIterator<Item = (K, Body<A, R>)>>(&mut self, mapping: I) {
        for (name, body) in mapping {
            self.add_body(name, body);
        }
    }
}

impl<A, R> fmt::Debug for AdHoc<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.methods.keys().map(Capability::as_str).collect();
        names.sort_unstable();
        f.debug_struct("AdHoc").field("methods", &names).finish()
    }
}

impl<A: Payload, R: Payload> Handler<A, R> for AdHoc<A, R> {
    fn responds_to(&self, capability: &Capability) -> bool {
        self.methods.contains_key(capability)
    }

    fn invoke(&self, call: &Call<'_, A, R>) -> Result<R, BoxError> {
        match self.methods.get(call.capability()) {
            Some(body) => body(call),
            None => Err(HarkError::MissingCapability(call.capability().clone()).into()),
        }
    }
}

/// The proxy handed to registration blocks.
///
/// Every `on`/`try_on` sent to it registers a capability on the handler set
/// under construction.
pub struct Registrar<'a, A, R> {
    ad_hoc: &'a mut AdHoc<A, R>,
}

impl<A: Payload, R: Payload> Registrar<'_, A, R> {
    /// Declare capability `name` with an infallible body.
    pub fn on<F>(&mut self, name: impl Into<Capability>, f: F) -> &mut Self
    where
        F: Fn(&Call<'_, A, R>) -> R + Send + Sync + 'static,
    {
        self.ad_hoc.add_method(name, f);
        self
    }

    /// Declare capability `name` with a fallible body.
    pub fn try_on<F>(&mut self, name: impl Into<Capability>, f: F) -> &mut Self
    where
        F: Fn(&Call<'_, A, R>) -> Result<R, BoxError> + Send + Sync + 'static,
    {
        self.ad_hoc.try_add_method(name, f);
        self
    }
}
