//! Procedural macros for hark.
//!
//! - `#[handler]` - turn an inherent `impl` block into a `hark::Handler`

use proc_macro::TokenStream;

mod handler;

/// Implement `hark::Handler` for a type from its inherent methods.
///
/// Every `pub fn` taking `&self` becomes a capability named after the
/// method. Positional arguments are taken from the call in order: a
/// parameter of type `&Args` borrows the argument, any other parameter type
/// clones it. A method whose return type is spelled `Result<..>` is treated
/// as fallible; anything else is the reply as-is.
///
/// # Attribute arguments
///
/// - `args = Type` (required): the listener's argument type
/// - `output = Type` (default `()`): the listener's result type
///
/// # Method attributes
///
/// - `#[capability(rename = "name")]`: expose the method under another name
/// - `#[capability(skip)]`: keep the method out of the capability set
///
/// # Example
///
/// ```rust,ignore
/// struct PlainListener {
///     transcript: Transcript<(&'static str, i32)>,
/// }
///
/// #[hark::handler(args = i32)]
/// impl PlainListener {
///     pub fn success(&self, value: i32) {
///         self.transcript.push(("succeeded", value));
///     }
///
///     pub fn failure(&self, value: &i32) {
///         self.transcript.push(("failed", *value));
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn handler(attr: TokenStream, item: TokenStream) -> TokenStream {
    handler::handler_impl(attr, item)
}
