//! The convert pipeline: serialize, render, fetch, decode.

use image::{ImageFormat, RgbaImage};
use log::debug;
use serde::Serialize;

use crate::fetch::Fetcher;
use crate::{BridgeConfig, Error, Renderer, Resource, Result};

/// Converts Bokeh plot descriptions into decoded images.
///
/// The bridge owns an injected [`Renderer`] and a [`Fetcher`]; each call to
/// [`Bridge::convert`] is an independent, strictly sequential pipeline with no
/// state shared between calls, so a `Bridge` can be used from many threads at
/// once behind a shared reference.
pub struct Bridge<R: Renderer> {
    renderer: R,
    fetcher: Fetcher,
}

impl<R: Renderer> Bridge<R> {
    /// Create a bridge with default configuration
    pub fn new(renderer: R) -> Result<Self> {
        Self::with_config(renderer, BridgeConfig::default())
    }

    /// Create a bridge with an explicit configuration
    pub fn with_config(renderer: R, config: BridgeConfig) -> Result<Self> {
        Ok(Self {
            renderer,
            fetcher: Fetcher::new(config)?,
        })
    }

    /// Convert a JSON-serializable plot description into a decoded image.
    ///
    /// The description is serialized to JSON text, handed to the renderer
    /// together with the optional `resource` hint (forwarded unchanged), and
    /// the locator the renderer returns is fetched and decoded as PNG. The
    /// returned image is fully owned by the caller; no stream or temporary
    /// state outlives the call.
    pub fn convert<T: Serialize>(
        &self,
        plot: &T,
        resource: Option<&Resource>,
    ) -> Result<RgbaImage> {
        let json = serde_json::to_string(plot).map_err(|e| Error::Serialize(e.to_string()))?;
        debug!("rendering plot description ({} bytes of JSON)", json.len());

        let locator = self.renderer.render(&json, resource)?;
        let bytes = self.fetcher.fetch(&locator)?;
        let image = decode_png(&bytes)?;

        debug!("decoded {}x{} image", image.width(), image.height());
        Ok(image)
    }
}

/// One-shot conversion without keeping a bridge around
pub fn convert<R, T>(renderer: R, plot: &T, resource: Option<&Resource>) -> Result<RgbaImage>
where
    R: Renderer,
    T: Serialize,
{
    Bridge::new(renderer)?.convert(plot, resource)
}

/// Decode PNG bytes into an RGBA8 pixel buffer
pub(crate) fn decode_png(bytes: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| Error::Decode(format!("Not a valid PNG: {}", e)))?;
    Ok(img.to_rgba8())
}
