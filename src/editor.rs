//! Request dispatch: one call in, one PNG out.
//!
//! [`edit`] is the library entry point. It checks the mode, resolves the
//! images, reads the options for that mode, and routes to the matching
//! compositor in [`imaging::operations`](crate::imaging::operations).
//!
//! Checks run cheapest first: an unknown mode or an empty input fails before
//! any option parsing, and malformed options fail before any download.

use crate::error::{EditorError, Result};
use crate::imaging::ImageBackend;
use crate::imaging::operations::{add_image_watermark, add_text, add_watermark, create_collage};
use crate::source::{ImageFetcher, resolve_images};
use crate::types::{
    CollageOptions, EditRequest, EditorMode, TextOverlayOptions, WatermarkKind, WatermarkOptions,
};
use serde::de::DeserializeOwned;

/// Options after they have been read for a known mode.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeOptions {
    Collage(CollageOptions),
    AddText(TextOverlayOptions),
    AddWatermark(WatermarkOptions),
}

impl ModeOptions {
    /// Read raw JSON options as the option type `mode` expects.
    pub fn parse(mode: EditorMode, raw: &serde_json::Value) -> Result<Self> {
        Ok(match mode {
            EditorMode::Collage => ModeOptions::Collage(from_raw(raw)?),
            EditorMode::AddText => ModeOptions::AddText(from_raw(raw)?),
            EditorMode::AddWatermark => {
                let opts: WatermarkOptions = from_raw(raw)?;
                if opts.kind == WatermarkKind::Image && opts.content.trim().is_empty() {
                    return Err(EditorError::invalid(
                        "image watermark needs the stamp image URL as content",
                    ));
                }
                ModeOptions::AddWatermark(opts)
            }
        })
    }

    pub fn mode(&self) -> EditorMode {
        match self {
            ModeOptions::Collage(_) => EditorMode::Collage,
            ModeOptions::AddText(_) => EditorMode::AddText,
            ModeOptions::AddWatermark(_) => EditorMode::AddWatermark,
        }
    }
}

fn from_raw<T: DeserializeOwned>(raw: &serde_json::Value) -> Result<T> {
    serde_json::from_value(raw.clone()).map_err(|e| EditorError::invalid(e.to_string()))
}

/// Parse a host mode string.
pub fn parse_mode(mode: &str) -> Result<EditorMode> {
    mode.parse().map_err(EditorError::UnsupportedMode)
}

/// Route already-resolved images to the compositor for `options`.
///
/// Overlay and watermark modes draw on `images[0]` and ignore the rest. An
/// image watermark downloads its stamp through `fetcher`.
pub fn dispatch(
    backend: &impl ImageBackend,
    fetcher: &dyn ImageFetcher,
    images: &[Vec<u8>],
    options: &ModeOptions,
) -> Result<Vec<u8>> {
    let base = images.first().ok_or(EditorError::NoInput)?;
    if images.len() > 1 && options.mode() != EditorMode::Collage {
        tracing::debug!(ignored = images.len() - 1, "only the first image is used");
    }

    match options {
        ModeOptions::Collage(opts) => create_collage(backend, images, opts),
        ModeOptions::AddText(opts) => add_text(backend, base, opts),
        ModeOptions::AddWatermark(opts) => match opts.kind {
            WatermarkKind::Text => add_watermark(backend, base, opts),
            WatermarkKind::Image => {
                let stamp = fetcher.fetch(&opts.content)?;
                add_image_watermark(backend, base, &stamp, opts)
            }
        },
    }
}

/// Run one edit request end to end and return the encoded PNG.
#[tracing::instrument(skip_all, fields(mode = %request.mode))]
pub fn edit(
    backend: &impl ImageBackend,
    fetcher: &dyn ImageFetcher,
    request: &EditRequest,
) -> Result<Vec<u8>> {
    let mode = parse_mode(&request.mode)?;
    if request.input.is_empty() {
        return Err(EditorError::NoInput);
    }
    let options = ModeOptions::parse(mode, &request.options)?;
    let images = resolve_images(&request.input, fetcher)?;
    let png = dispatch(backend, fetcher, &images, &options)?;
    tracing::info!(%mode, bytes = png.len(), "edit complete");
    Ok(png)
}
