//! The injected native-render capability.
//!
//! The actual rendering engine (layout, rasterization, PNG encoding) lives in
//! an external component; the bridge only needs something that turns a JSON
//! plot description into a [`Locator`]. Abstracting that behind a trait keeps
//! the bridge testable with stub renderers.

use std::fmt;

use crate::{Resource, Result};

/// An opaque URI returned by a renderer, pointing at PNG bytes.
///
/// The bridge never interprets the locator beyond handing it to the fetch
/// layer, which accepts `data:`, `file:` and `http(s):` schemes as well as
/// bare filesystem paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator(String);

impl Locator {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Locator {
    fn from(uri: String) -> Self {
        Self(uri)
    }
}

impl From<&str> for Locator {
    fn from(uri: &str) -> Self {
        Self(uri.to_string())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Core trait for native renderer backends
///
/// Contract: `plot_json` is always the plot description serialized to JSON
/// text (the bridge serializes before calling; implementations never receive a
/// structured value). `resource` is forwarded unchanged from the caller; when
/// `None`, the backend uses its own asset default.
pub trait Renderer {
    /// Render the plot and return a locator resolvable to PNG bytes
    fn render(&self, plot_json: &str, resource: Option<&Resource>) -> Result<Locator>;
}

/// Adapter returned by [`from_fn`], wrapping a closure as a [`Renderer`]
pub struct FnRenderer<F>(F);

/// Wrap a closure as a renderer, which keeps test stubs terse
pub fn from_fn<F>(f: F) -> FnRenderer<F>
where
    F: Fn(&str, Option<&Resource>) -> Result<Locator>,
{
    FnRenderer(f)
}

impl<F> Renderer for FnRenderer<F>
where
    F: Fn(&str, Option<&Resource>) -> Result<Locator>,
{
    fn render(&self, plot_json: &str, resource: Option<&Resource>) -> Result<Locator> {
        (self.0)(plot_json, resource)
    }
}
