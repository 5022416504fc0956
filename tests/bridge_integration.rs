use std::io::Cursor;
use std::sync::{Arc, Mutex};

use base64::Engine as Base64Engine;
use image::{ImageFormat, Rgba, RgbaImage};

use bokeh_bridge::{
    convert, from_fn, AsyncBridge, Bridge, Error, Locator, Renderer, Resource, Result,
};

fn png_bytes(width: u32, height: u32, pixel: Rgba<u8>) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, pixel);
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .expect("Failed to encode test PNG");
    buf.into_inner()
}

fn data_locator(bytes: &[u8]) -> Locator {
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    Locator::from(format!("data:image/png;base64,{}", b64))
}

/// A deterministic stub renderer that records every call it receives.
struct RecordingRenderer {
    locator: Locator,
    calls: Arc<Mutex<Vec<(String, Option<Resource>)>>>,
}

impl RecordingRenderer {
    fn new(locator: Locator) -> (Self, Arc<Mutex<Vec<(String, Option<Resource>)>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                locator,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, plot_json: &str, resource: Option<&Resource>) -> Result<Locator> {
        self.calls
            .lock()
            .unwrap()
            .push((plot_json.to_string(), resource.cloned()));
        Ok(self.locator.clone())
    }
}

#[test]
fn test_red_circle_scenario() {
    // Stub renderer returns a 10x10 red PNG for any plot
    let red = Rgba([255, 0, 0, 255]);
    let (renderer, _calls) = RecordingRenderer::new(data_locator(&png_bytes(10, 10, red)));

    let bridge = Bridge::new(renderer).expect("Failed to create bridge");
    let plot = serde_json::json!({"type": "circle", "data": {"x": [0.0], "y": [0.0]}});
    let img = bridge.convert(&plot, None).expect("Failed to convert");

    assert_eq!(img.dimensions(), (10, 10));
    assert_eq!(img.get_pixel(0, 0), &red);
}

#[test]
fn test_resource_passes_through_unchanged() {
    let (renderer, calls) = RecordingRenderer::new(data_locator(&png_bytes(3, 3, Rgba([0; 4]))));
    let bridge = Bridge::new(renderer).unwrap();

    let resource = Resource::cdn("3.5.2");
    bridge
        .convert(&serde_json::json!({"k": 1}), Some(&resource))
        .unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1.as_ref(), Some(&resource));
}

#[test]
fn test_absent_resource_means_no_hint() {
    let (renderer, calls) = RecordingRenderer::new(data_locator(&png_bytes(3, 3, Rgba([0; 4]))));
    let bridge = Bridge::new(renderer).unwrap();

    bridge.convert(&serde_json::json!({"k": 1}), None).unwrap();
    assert_eq!(calls.lock().unwrap()[0].1, None);
}

#[test]
fn test_render_failure_propagates() {
    let failing = from_fn(|_json: &str, _res: Option<&Resource>| -> Result<Locator> {
        Err(Error::Render("no display available".into()))
    });

    let err = convert(failing, &serde_json::json!({}), None).unwrap_err();
    assert!(matches!(err, Error::Render(_)));
}

#[test]
fn test_fetch_failure_propagates() {
    // Renderer succeeds but points at a file that does not exist
    let (renderer, _calls) =
        RecordingRenderer::new(Locator::from("/nonexistent/bokeh-bridge.png"));
    let bridge = Bridge::new(renderer).unwrap();

    let err = bridge.convert(&serde_json::json!({}), None).unwrap_err();
    assert!(matches!(err, Error::Fetch(_)));
}

#[test]
fn test_decode_failure_propagates() {
    // Fetchable locator whose bytes are not a PNG
    let (renderer, _calls) = RecordingRenderer::new(data_locator(b"<html>not a png</html>"));
    let bridge = Bridge::new(renderer).unwrap();

    let err = bridge.convert(&serde_json::json!({}), None).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn test_idempotent_dimensions() {
    let (renderer, calls) = RecordingRenderer::new(data_locator(&png_bytes(7, 5, Rgba([0; 4]))));
    let bridge = Bridge::new(renderer).unwrap();

    let plot = serde_json::json!({"type": "line", "data": {"x": [1, 2], "y": [3, 4]}});
    let first = bridge.convert(&plot, None).unwrap();
    let second = bridge.convert(&plot, None).unwrap();

    assert_eq!(first.dimensions(), second.dimensions());

    // Identical inputs reach the renderer identically both times
    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].0, calls[1].0);
}

#[tokio::test]
async fn test_async_bridge_convert_and_close() {
    let blue = Rgba([0, 0, 255, 255]);
    let locator = data_locator(&png_bytes(4, 4, blue));
    let renderer = from_fn(move |_json: &str, _res: Option<&Resource>| -> Result<Locator> {
        Ok(locator.clone())
    });

    let bridge = AsyncBridge::new(renderer, None)
        .await
        .expect("Failed to create async bridge");

    let img = bridge
        .convert(serde_json::json!({"type": "circle"}), None)
        .await
        .expect("Failed to convert");
    assert_eq!(img.dimensions(), (4, 4));
    assert_eq!(img.get_pixel(3, 3), &blue);

    bridge.close().await.expect("Failed to close");
}

#[tokio::test]
async fn test_async_bridge_propagates_render_errors() {
    let failing = from_fn(|_json: &str, _res: Option<&Resource>| -> Result<Locator> {
        Err(Error::Render("renderer unavailable".into()))
    });

    let bridge = AsyncBridge::new(failing, None).await.unwrap();
    let err = bridge.convert(serde_json::json!({}), None).await.unwrap_err();
    assert!(matches!(err, Error::Render(_)));
    bridge.close().await.unwrap();
}
