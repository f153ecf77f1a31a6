//! Compositing, pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Collage** | Lanczos3 stretch to 300×300 + `imageops::overlay` |
//! | **Text / shapes** | SVG fragment rasterized by `resvg` |
//! | **Image stamp** | `tiny_skia::Pixmap::draw_pixmap` with opacity |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for layout math (unit testable)
//! - **Parameters**: Data structures describing draw calls
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
pub mod calculations;
pub mod operations;
pub mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use operations::{add_image_watermark, add_text, add_watermark, create_collage};
pub use rust_backend::RustBackend;
