//! Bokeh-to-Image Bridge
//!
//! Converts a Bokeh plot's JSON representation into a decoded in-memory image
//! by delegating to an external native renderer, fetching the locator it
//! returns, and decoding the PNG bytes.
//!
//! The renderer is injected as a capability (the [`Renderer`] trait) so hosts
//! can plug in the real native engine while tests substitute stubs. The
//! pipeline is pure plumbing: serialize, render, fetch, decode. Nothing is
//! cached or retried, and no state survives between calls.
//!
//! # Example
//!
//! ```no_run
//! use bokeh_bridge::{from_fn, Bridge, Locator, Resource, Result};
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! // A renderer is anything implementing `Renderer`; wrapped closures qualify.
//! let renderer = from_fn(|_json: &str, _res: Option<&Resource>| -> Result<Locator> {
//!     Ok(Locator::from("data:image/png;base64,...".to_string()))
//! });
//!
//! let bridge = Bridge::new(renderer)?;
//! let plot = serde_json::json!({"type": "circle", "data": {"x": [1, 2, 3]}});
//! let image = bridge.convert(&plot, Some(&Resource::cdn("3.5.2")))?;
//! println!("{}x{}", image.width(), image.height());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod resource;
pub use resource::{Resource, ResourceKind};

pub mod renderer;
pub use renderer::{from_fn, FnRenderer, Locator, Renderer};

pub mod fetch;

pub mod bridge;
pub use bridge::{convert, Bridge};

// Async-friendly facade (worker-thread backed) for event-driven hosts
pub mod async_api;
pub use async_api::AsyncBridge;

/// Configuration for the fetch step of the bridge
///
/// Only the locator fetch is configurable; the render call's duration is
/// controlled entirely by the external renderer.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// User agent string to send with http(s) fetches
    pub user_agent: String,
    /// Timeout for http(s) fetches in milliseconds
    pub timeout_ms: u64,
    /// Maximum fetched payload size in bytes (0 => disabled)
    pub max_bytes: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("bokeh-bridge/{}", env!("CARGO_PKG_VERSION")),
            timeout_ms: 30000,
            max_bytes: 64 * 1024 * 1024,
        }
    }
}
