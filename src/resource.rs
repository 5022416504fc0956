//! Resource hints forwarded to the native renderer.
//!
//! A [`Resource`] tells the renderer where its supporting assets (the BokehJS
//! bundle) live. It is passed through the bridge unchanged; when absent the
//! renderer falls back to its own default.

use serde::{Deserialize, Serialize};

/// The kind half of a resource reference pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Assets are loaded from the Bokeh release CDN
    Cdn,
    /// Assets are loaded from a local directory
    Local,
}

/// An optional hint telling the renderer which asset bundle to use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resource {
    /// Load BokehJS from the release CDN at the given version (e.g. "3.5.2")
    Cdn { version: String },
    /// Load BokehJS from a local directory URI/path
    Local { dir: String },
}

impl Resource {
    /// A CDN resource pinned to a Bokeh release version
    pub fn cdn(version: impl Into<String>) -> Self {
        Self::Cdn {
            version: version.into(),
        }
    }

    /// A local resource rooted at a directory
    pub fn local(dir: impl Into<String>) -> Self {
        Self::Local { dir: dir.into() }
    }

    /// The kind half of the (kind, value) pair
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Cdn { .. } => ResourceKind::Cdn,
            Self::Local { .. } => ResourceKind::Local,
        }
    }

    /// The value half of the (kind, value) pair
    pub fn value(&self) -> &str {
        match self {
            Self::Cdn { version } => version,
            Self::Local { dir } => dir,
        }
    }
}
