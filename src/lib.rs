//! # Image Editor Pro
//!
//! A compositor for workflow automation: one call takes an ordered list of
//! images plus a mode and its options, and returns one PNG.
//!
//! | Mode | Result |
//! |------|--------|
//! | `collage` | `rows × columns` grid of 300×300 tiles on a flat background |
//! | `addText` | text on the first image, optionally over a circle or box |
//! | `addWatermark` | 32px black text, or an image stamp, on the first image |
//!
//! # Architecture: Resolve, Plan, Draw
//!
//! ```text
//! 1. Resolve   URLs + inline bytes  →  ordered image buffers   (source)
//! 2. Plan      options + dimensions →  draw parameters         (imaging::operations)
//! 3. Draw      draw parameters      →  PNG bytes               (imaging::backend)
//! ```
//!
//! Planning is pure: every coordinate the output depends on is computed in
//! [`imaging::calculations`] before the backend is called, so layout is
//! tested without rasterizing anything. The backend is a trait; tests use a
//! recording mock and the binary uses [`imaging::RustBackend`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | Entry point: mode check, option parsing, routing |
//! | [`source`] | Image resolution and the HTTP fetcher |
//! | [`imaging`] | Layout math, draw parameters, backend trait, compositors |
//! | [`types`] | Requests and per-mode options |
//! | [`color`] | CSS-style color parsing |
//! | [`error`] | [`error::EditorError`], the one error every call returns |
//! | [`node`] | Flat workflow-node parameters to a request |
//! | [`schema`] | Static parameter table for host UIs |
//! | [`config`] | Optional `config.toml`: fonts and HTTP settings |
//! | [`output`] | CLI render summaries |
//!
//! # Example
//!
//! ```no_run
//! use image_editor_pro::config::EditorConfig;
//! use image_editor_pro::editor::edit;
//! use image_editor_pro::imaging::RustBackend;
//! use image_editor_pro::source::HttpFetcher;
//! use image_editor_pro::types::{EditRequest, ImageInput};
//!
//! let config = EditorConfig::default();
//! let backend = RustBackend::with_fonts(&config.fonts);
//! let fetcher = HttpFetcher::new(&config.http)?;
//!
//! let request = EditRequest {
//!     mode: "addWatermark".into(),
//!     input: ImageInput {
//!         urls: vec!["https://example.com/photo.jpg".into()],
//!         binary_image: None,
//!     },
//!     options: serde_json::json!({"content": "© me", "position": "bottom-right", "opacity": 0.6}),
//! };
//! let png = edit(&backend, &fetcher, &request)?;
//! std::fs::write("out.png", png)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Design Decisions
//!
//! ## Text Through SVG
//!
//! Shapes and text are emitted as a small SVG document and rasterized with
//! `resvg` on top of the decoded base image. `usvg` brings font fallback,
//! `text-anchor` and `dominant-baseline`, which is the vocabulary the anchor
//! rules are written in, so the backend needs no glyph layout of its own.
//!
//! ## Explicit Positions Are Not Clamped
//!
//! `{x, y}` positions go to the canvas verbatim. Off-canvas text is clipped by
//! the renderer, never moved.

pub mod color;
pub mod config;
pub mod editor;
pub mod error;
pub mod imaging;
pub mod node;
pub mod output;
pub mod schema;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
