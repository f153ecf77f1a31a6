//! High-level compositing operations.
//!
//! These functions combine calculations with backend execution. They
//! validate options, turn them into draw parameters, and call the backend.
//! The `plan_*` functions do everything except the drawing, so tests can
//! check the geometry directly.

use super::backend::{Dimensions, ImageBackend};
use super::calculations::{
    MAX_COLLAGE_PIXELS, THUMB_SIZE, collage_dimensions, resolve_anchor, shape_geometry,
    shape_size, stamp_origin, text_in_shape, tile_positions,
};
use super::params::{Border, CollageParams, OverlayParams, ShapeLayer, StampLayer, TextLayer, TilePlacement};
use crate::color::Rgba;
use crate::error::{EditorError, Result};
use crate::types::{
    BackgroundShape, CollageOptions, DEFAULT_BORDER_COLOR, DEFAULT_SHAPE_BACKGROUND, Position,
    TextOverlayOptions, WatermarkOptions,
};

// =========================================================================
// Collage
// =========================================================================

/// Plan a collage without executing it.
///
/// Keeps the first `rows * columns` images in order; the rest are dropped.
pub fn plan_collage<'a>(images: &'a [Vec<u8>], opts: &CollageOptions) -> Result<CollageParams<'a>> {
    let (width, height) = validate_collage(opts)?;
    let background = Rgba::parse(&opts.background_color)?;

    let positions = tile_positions(opts.rows, opts.columns, opts.spacing, images.len());
    if positions.len() < images.len() {
        tracing::debug!(
            supplied = images.len(),
            placed = positions.len(),
            "collage capacity reached, extra images dropped"
        );
    }

    let tiles = images
        .iter()
        .zip(positions)
        .map(|(image, (left, top))| TilePlacement {
            image: image.as_slice(),
            left,
            top,
        })
        .collect();

    Ok(CollageParams {
        width,
        height,
        tile_size: THUMB_SIZE,
        background,
        tiles,
    })
}

/// Tile `images` into a `rows × columns` grid of 300×300 thumbnails.
#[tracing::instrument(skip_all, fields(rows = opts.rows, columns = opts.columns, images = images.len()))]
pub fn create_collage(
    backend: &impl ImageBackend,
    images: &[Vec<u8>],
    opts: &CollageOptions,
) -> Result<Vec<u8>> {
    let params = plan_collage(images, opts)?;
    tracing::info!(width = params.width, height = params.height, "rendering collage");
    Ok(backend.collage(&params)?)
}

/// Check the grid and return its canvas size.
fn validate_collage(opts: &CollageOptions) -> Result<(u32, u32)> {
    if opts.rows == 0 || opts.columns == 0 {
        return Err(EditorError::invalid("rows and columns must be at least 1"));
    }
    let (width, height) = collage_dimensions(opts.rows, opts.columns, opts.spacing)
        .ok_or_else(|| EditorError::invalid("collage canvas size overflows"))?;
    if u64::from(width) * u64::from(height) > MAX_COLLAGE_PIXELS {
        return Err(EditorError::invalid(format!(
            "collage canvas {width}x{height} exceeds {MAX_COLLAGE_PIXELS} pixels"
        )));
    }
    Ok((width, height))
}

// =========================================================================
// Text overlay
// =========================================================================

/// Plan a text overlay on an image of `dims` without executing it.
///
/// `measured_text_width` is only consulted when a shape is requested
/// without an explicit width.
pub fn plan_text_overlay<'a>(
    base: &'a [u8],
    dims: Dimensions,
    opts: &TextOverlayOptions,
    measured_text_width: f32,
) -> Result<OverlayParams<'a>> {
    validate_text(opts)?;
    let color = Rgba::parse(&opts.color)?;
    let anchor = resolve_anchor(opts.position, (dims.width, dims.height), opts.font_size);

    let mut placement = anchor;
    let mut shape = None;

    if let Some(kind) = opts.shape() {
        let size = shape_size(
            opts.shape_width,
            opts.shape_height,
            measured_text_width,
            opts.font_size,
            opts.shape_padding,
        );
        if kind == BackgroundShape::Square && size.0 != size.1 {
            tracing::warn!(
                width = size.0,
                height = size.1,
                "square background drawn with unequal sides"
            );
        }

        if let Some(geometry) = shape_geometry(kind, &anchor, size, opts.font_size) {
            shape = Some(ShapeLayer {
                geometry,
                fill: Rgba::parse(
                    opts.background_color
                        .as_deref()
                        .unwrap_or(DEFAULT_SHAPE_BACKGROUND),
                )?,
                border: shape_border(opts)?,
            });
        }

        placement = text_in_shape(
            anchor,
            opts.text_align_in_shape,
            size.1,
            opts.font_size,
            (opts.text_offset_x, opts.text_offset_y),
        );
    }

    tracing::debug!(x = placement.x, y = placement.y, shape = ?opts.shape(), "text placement");

    Ok(OverlayParams {
        base,
        stamp: None,
        shape,
        text: Some(TextLayer {
            text: opts.text.clone(),
            font_size: opts.font_size,
            color,
            x: placement.x,
            y: placement.y,
            align: placement.align,
            baseline: placement.baseline,
            opacity: opts.opacity,
        }),
    })
}

fn shape_border(opts: &TextOverlayOptions) -> Result<Option<Border>> {
    if opts.border_width <= 0.0 {
        return Ok(None);
    }
    let color = Rgba::parse(opts.border_color.as_deref().unwrap_or(DEFAULT_BORDER_COLOR))?;
    Ok(Some(Border {
        color,
        width: opts.border_width,
    }))
}

/// Draw `opts.text` (and its optional background shape) onto `base`.
///
/// The output has the base image's dimensions.
#[tracing::instrument(skip_all, fields(font_size = opts.font_size, position = ?opts.position))]
pub fn add_text(backend: &impl ImageBackend, base: &[u8], opts: &TextOverlayOptions) -> Result<Vec<u8>> {
    validate_text(opts)?;
    let dims = backend.identify(base)?;

    let needs_measure = opts.shape().is_some() && opts.shape_width.is_none();
    let measured = if needs_measure {
        backend.measure_text(&opts.text, opts.font_size)?
    } else {
        0.0
    };

    let params = plan_text_overlay(base, dims, opts, measured)?;
    tracing::info!(width = dims.width, height = dims.height, "rendering text overlay");
    Ok(backend.overlay(&params)?)
}

fn validate_text(opts: &TextOverlayOptions) -> Result<()> {
    if !(opts.font_size.is_finite() && opts.font_size > 0.0) {
        return Err(EditorError::invalid(format!(
            "fontSize must be a positive number, got {}",
            opts.font_size
        )));
    }
    validate_opacity(opts.opacity)?;
    validate_position(opts.position)?;

    let numbers = [
        ("borderWidth", Some(opts.border_width)),
        ("shapeWidth", opts.shape_width),
        ("shapeHeight", opts.shape_height),
        ("shapePadding", Some(opts.shape_padding)),
        ("textOffsetX", Some(opts.text_offset_x)),
        ("textOffsetY", Some(opts.text_offset_y)),
    ];
    for (name, value) in numbers {
        if let Some(v) = value
            && !v.is_finite()
        {
            return Err(EditorError::invalid(format!("{name} must be finite, got {v}")));
        }
    }
    Ok(())
}

fn validate_opacity(opacity: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(EditorError::invalid(format!(
            "opacity must be between 0 and 1, got {opacity}"
        )));
    }
    Ok(())
}

fn validate_position(position: Position) -> Result<()> {
    if let Position::Point { x, y } = position
        && !(x.is_finite() && y.is_finite())
    {
        return Err(EditorError::invalid(format!(
            "position coordinates must be finite, got ({x}, {y})"
        )));
    }
    Ok(())
}

// =========================================================================
// Watermark
// =========================================================================

/// Stamp a text watermark: a 32px black overlay with no shape.
pub fn add_watermark(
    backend: &impl ImageBackend,
    base: &[u8],
    opts: &WatermarkOptions,
) -> Result<Vec<u8>> {
    add_text(backend, base, &opts.to_text_overlay())
}

/// Plan an image watermark without executing it.
pub fn plan_image_watermark<'a>(
    base: &'a [u8],
    base_dims: Dimensions,
    stamp: &'a [u8],
    stamp_dims: Dimensions,
    opts: &WatermarkOptions,
) -> Result<OverlayParams<'a>> {
    validate_opacity(opts.opacity)?;
    validate_position(opts.position)?;
    let (x, y) = stamp_origin(
        opts.position,
        (base_dims.width, base_dims.height),
        (stamp_dims.width, stamp_dims.height),
    );

    Ok(OverlayParams {
        base,
        stamp: Some(StampLayer {
            image: stamp,
            x,
            y,
            opacity: opts.opacity,
        }),
        shape: None,
        text: None,
    })
}

/// Composite `stamp` over `base` at the watermark position, unscaled.
#[tracing::instrument(skip_all, fields(position = ?opts.position))]
pub fn add_image_watermark(
    backend: &impl ImageBackend,
    base: &[u8],
    stamp: &[u8],
    opts: &WatermarkOptions,
) -> Result<Vec<u8>> {
    let base_dims = backend.identify(base)?;
    let stamp_dims = backend.identify(stamp)?;
    let params = plan_image_watermark(base, base_dims, stamp, stamp_dims, opts)?;
    tracing::info!(x = ?params.stamp.as_ref().map(|s| (s.x, s.y)), "rendering image watermark");
    Ok(backend.overlay(&params)?)
}
