//! Drawing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the 2D drawing surface the compositors work
//! against: identify an image, measure a line of text, paint a collage, and
//! paint an overlay stack. Everything geometric is decided before the call;
//! the backend only rasterizes and encodes.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend): `image` for codecs and
//! resampling, `usvg`/`resvg` for shapes and text.

use super::params::{CollageParams, OverlayParams};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    /// The bytes are not an image the backend can read.
    #[error("{0}")]
    Decode(String),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("PNG encode failed: {0}")]
    Encode(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for drawing backends.
///
/// `collage` and `overlay` return encoded PNG bytes.
pub trait ImageBackend {
    /// Pixel dimensions of an encoded image, without a full decode where the
    /// format allows it.
    fn identify(&self, image: &[u8]) -> Result<Dimensions, BackendError>;

    /// Advance width of `text` set at `font_size` pixels, leading and trailing
    /// whitespace included.
    fn measure_text(&self, text: &str, font_size: f32) -> Result<f32, BackendError>;

    /// Paint a tile grid over a flat background.
    fn collage(&self, params: &CollageParams) -> Result<Vec<u8>, BackendError>;

    /// Paint the overlay layers over the base image.
    fn overlay(&self, params: &OverlayParams) -> Result<Vec<u8>, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::imaging::params::{ShapeLayer, TextLayer};
    use std::sync::Mutex;

    /// Bytes every mock draw call returns.
    pub const MOCK_PNG: &[u8] = b"mock-png";

    /// Mock backend that records operations without executing them.
    ///
    /// Identify pops from `identify_results` (last in, first out); text is
    /// measured as `chars * font_size * 0.5` unless a fixed width is set.
    #[derive(Default)]
    pub struct MockBackend {
        pub identify_results: Mutex<Vec<Dimensions>>,
        pub text_width: Option<f32>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(usize),
        MeasureText {
            text: String,
            font_size: f32,
        },
        Collage {
            width: u32,
            height: u32,
            tile_size: u32,
            background: Rgba,
            /// `(image bytes, left, top)` per tile.
            tiles: Vec<(Vec<u8>, u32, u32)>,
        },
        Overlay {
            base: Vec<u8>,
            stamp: Option<(Vec<u8>, f32, f32, f32)>,
            shape: Option<ShapeLayer>,
            text: Option<TextLayer>,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            Self {
                identify_results: Mutex::new(dims),
                ..Self::default()
            }
        }

        pub fn with_text_width(mut self, width: f32) -> Self {
            self.text_width = Some(width);
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn record(&self, op: RecordedOp) {
            self.operations.lock().unwrap().push(op);
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, image: &[u8]) -> Result<Dimensions, BackendError> {
            self.record(RecordedOp::Identify(image.len()));
            self.identify_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| BackendError::Decode("No mock dimensions".to_string()))
        }

        fn measure_text(&self, text: &str, font_size: f32) -> Result<f32, BackendError> {
            self.record(RecordedOp::MeasureText {
                text: text.to_string(),
                font_size,
            });
            Ok(self
                .text_width
                .unwrap_or(text.chars().count() as f32 * font_size * 0.5))
        }

        fn collage(&self, params: &CollageParams) -> Result<Vec<u8>, BackendError> {
            self.record(RecordedOp::Collage {
                width: params.width,
                height: params.height,
                tile_size: params.tile_size,
                background: params.background,
                tiles: params
                    .tiles
                    .iter()
                    .map(|t| (t.image.to_vec(), t.left, t.top))
                    .collect(),
            });
            Ok(MOCK_PNG.to_vec())
        }

        fn overlay(&self, params: &OverlayParams) -> Result<Vec<u8>, BackendError> {
            self.record(RecordedOp::Overlay {
                base: params.base.to_vec(),
                stamp: params
                    .stamp
                    .as_ref()
                    .map(|s| (s.image.to_vec(), s.x, s.y, s.opacity)),
                shape: params.shape,
                text: params.text.clone(),
            });
            Ok(MOCK_PNG.to_vec())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 800,
            height: 600,
        }]);

        let result = backend.identify(&[0u8; 12]).unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops, vec![RecordedOp::Identify(12)]);
    }

    #[test]
    fn mock_identify_without_results_is_decode_error() {
        let backend = MockBackend::new();
        assert!(matches!(
            backend.identify(b"x"),
            Err(BackendError::Decode(_))
        ));
    }

    #[test]
    fn mock_measures_text_by_char_count() {
        let backend = MockBackend::new();
        assert_eq!(backend.measure_text("abcd", 10.0).unwrap(), 20.0);

        let fixed = MockBackend::new().with_text_width(42.0);
        assert_eq!(fixed.measure_text("abcd", 10.0).unwrap(), 42.0);
    }

    #[test]
    fn mock_records_collage_tiles() {
        let backend = MockBackend::new();
        let a = [1u8];
        let out = backend
            .collage(&CollageParams {
                width: 300,
                height: 300,
                tile_size: 300,
                background: Rgba::WHITE,
                tiles: vec![crate::imaging::params::TilePlacement {
                    image: &a,
                    left: 0,
                    top: 0,
                }],
            })
            .unwrap();

        assert_eq!(out, MOCK_PNG);
        assert!(matches!(
            &backend.get_operations()[0],
            RecordedOp::Collage { tiles, .. } if tiles == &vec![(vec![1u8], 0, 0)]
        ));
    }
}
