//! Shared test utilities: in-memory PNG fixtures and a recording fetcher.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let red = solid_png(40, 10, [255, 0, 0, 255]);
//! let fetcher = MockFetcher::new().with("https://x/red.png", red);
//! ```

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

use crate::source::{FetchError, ImageFetcher};

// =========================================================================
// Image fixtures
// =========================================================================

/// Encode a single-color `width × height` PNG.
pub fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba(rgba));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

/// Decode any encoded image into RGBA8 for pixel assertions.
pub fn decode_rgba(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

// =========================================================================
// Fetcher
// =========================================================================

/// Fetcher serving canned bodies and recording every requested URL.
///
/// Unknown URLs fail with an HTTP 404 style error.
#[derive(Default)]
pub struct MockFetcher {
    bodies: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: Vec<u8>) -> Self {
        self.bodies.insert(url.to_string(), body);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl ImageFetcher for MockFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::new(url, "HTTP 404 Not Found"))
    }
}
