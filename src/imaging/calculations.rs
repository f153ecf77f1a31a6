//! Pure layout math for collages and overlays.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::{ShapeGeometry, TextAlign, TextBaseline};
use crate::types::{Anchor, BackgroundShape, Position, TextAlignInShape};

/// Edge length every collage tile is stretched to.
pub const THUMB_SIZE: u32 = 300;

/// Distance kept from the image edge by the `top-left` and `bottom-right`
/// anchors.
pub const EDGE_MARGIN: f32 = 20.0;

/// Largest collage canvas, in pixels, that a request may ask for.
pub const MAX_COLLAGE_PIXELS: u64 = 100_000_000;

/// Calculate the collage canvas size.
///
/// Returns `None` when either side does not fit in a `u32`.
///
/// # Examples
/// ```
/// # use image_editor_pro::imaging::calculations::collage_dimensions;
/// // 2x2 grid with 10px gutters
/// assert_eq!(collage_dimensions(2, 2, 10), Some((610, 610)));
/// // A single row of three, no gutters
/// assert_eq!(collage_dimensions(1, 3, 0), Some((900, 300)));
/// // Gutters too wide for any canvas
/// assert_eq!(collage_dimensions(2, 2, u32::MAX), None);
/// ```
pub fn collage_dimensions(rows: u32, columns: u32, spacing: u32) -> Option<(u32, u32)> {
    let span = |cells: u32| {
        cells
            .checked_mul(THUMB_SIZE)?
            .checked_add(spacing.checked_mul(cells.saturating_sub(1))?)
    };
    Some((span(columns)?, span(rows)?))
}

/// Top-left corners `(left, top)` for the first `count` tiles, row-major.
///
/// Never returns more than `rows * columns` entries: images beyond the grid
/// capacity have no cell. Coordinates saturate at `u32::MAX`, so they are
/// only exact when [`collage_dimensions`] returns a size.
pub fn tile_positions(rows: u32, columns: u32, spacing: u32, count: usize) -> Vec<(u32, u32)> {
    if columns == 0 {
        return Vec::new();
    }
    let capacity = (rows as usize).saturating_mul(columns as usize);
    let pitch = THUMB_SIZE.saturating_add(spacing);

    (0..count.min(capacity))
        .map(|index| {
            let row = (index / columns as usize) as u32;
            let col = (index % columns as usize) as u32;
            (col.saturating_mul(pitch), row.saturating_mul(pitch))
        })
        .collect()
}

/// A draw point together with the text alignment it implies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

/// Resolve an overlay position against an image of `size` pixels.
///
/// | Position | Point | Alignment |
/// |---|---|---|
/// | `top-left` | `(20, 20 + font_size)` | left / alphabetic |
/// | `center` | `(w/2, h/2)` | center / middle |
/// | `bottom-right` | `(w - 20, h - 20)` | right / bottom |
/// | `{x, y}` | verbatim | left / alphabetic |
///
/// The `top-left` y already includes the font size so the text's baseline,
/// not its top, sits below the margin.
pub fn resolve_anchor(position: Position, size: (u32, u32), font_size: f32) -> Placement {
    let (width, height) = (size.0 as f32, size.1 as f32);

    match position {
        Position::Anchor(Anchor::TopLeft) => Placement {
            x: EDGE_MARGIN,
            y: EDGE_MARGIN + font_size,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
        },
        Position::Anchor(Anchor::Center) => Placement {
            x: width / 2.0,
            y: height / 2.0,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        },
        Position::Anchor(Anchor::BottomRight) => Placement {
            x: width - EDGE_MARGIN,
            y: height - EDGE_MARGIN,
            align: TextAlign::Right,
            baseline: TextBaseline::Bottom,
        },
        Position::Point { x, y } => Placement {
            x,
            y,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
        },
    }
}

/// Effective `(width, height)` of a background shape.
///
/// Explicit sizes win; otherwise the shape hugs the text plus `padding`.
pub fn shape_size(
    explicit_width: Option<f32>,
    explicit_height: Option<f32>,
    measured_text_width: f32,
    font_size: f32,
    padding: f32,
) -> (f32, f32) {
    (
        explicit_width.unwrap_or(measured_text_width + padding),
        explicit_height.unwrap_or(font_size + padding),
    )
}

/// Geometry of a background shape around `anchor`.
///
/// Circles sit half a font size above the anchor so they wrap an
/// alphabetic-baseline line of text; boxes are centered on the anchor.
/// Returns `None` for [`BackgroundShape::None`].
pub fn shape_geometry(
    shape: BackgroundShape,
    anchor: &Placement,
    size: (f32, f32),
    font_size: f32,
) -> Option<ShapeGeometry> {
    let (width, height) = size;
    match shape {
        BackgroundShape::None => None,
        BackgroundShape::Circle => Some(ShapeGeometry::Circle {
            cx: anchor.x,
            cy: anchor.y - font_size / 2.0,
            radius: width.max(height) / 2.0,
        }),
        BackgroundShape::Rectangle | BackgroundShape::Square => Some(ShapeGeometry::Rect {
            x: anchor.x - width / 2.0,
            y: anchor.y - height / 2.0,
            width,
            height,
        }),
    }
}

/// Where text goes once a shape has been drawn behind it.
///
/// - `top`: baseline at `y - shape_height/2 + font_size`
/// - `bottom`: baseline at `y + shape_height/2 - font_size/2`
/// - `center`: `y` unchanged, vertically centered baseline
/// - `custom`: anchor shifted by `offset`
///
/// Horizontal alignment stays whatever the anchor chose.
pub fn text_in_shape(
    anchor: Placement,
    align: TextAlignInShape,
    shape_height: f32,
    font_size: f32,
    offset: (f32, f32),
) -> Placement {
    match align {
        TextAlignInShape::Top => Placement {
            y: anchor.y - shape_height / 2.0 + font_size,
            ..anchor
        },
        TextAlignInShape::Bottom => Placement {
            y: anchor.y + shape_height / 2.0 - font_size / 2.0,
            ..anchor
        },
        TextAlignInShape::Center => Placement {
            baseline: TextBaseline::Middle,
            ..anchor
        },
        TextAlignInShape::Custom => Placement {
            x: anchor.x + offset.0,
            y: anchor.y + offset.1,
            ..anchor
        },
    }
}

/// Top-left corner for an image stamp of `stamp` pixels on an image of
/// `size` pixels.
///
/// Mirrors [`resolve_anchor`] without the baseline term: `top-left` puts the
/// stamp's corner at the margin, `center` centers it, `bottom-right` puts the
/// stamp's far corner at the margin, and explicit points are the stamp's
/// top-left corner.
pub fn stamp_origin(position: Position, size: (u32, u32), stamp: (u32, u32)) -> (f32, f32) {
    let (width, height) = (size.0 as f32, size.1 as f32);
    let (stamp_w, stamp_h) = (stamp.0 as f32, stamp.1 as f32);

    match position {
        Position::Anchor(Anchor::TopLeft) => (EDGE_MARGIN, EDGE_MARGIN),
        Position::Anchor(Anchor::Center) => ((width - stamp_w) / 2.0, (height - stamp_h) / 2.0),
        Position::Anchor(Anchor::BottomRight) => (
            width - EDGE_MARGIN - stamp_w,
            height - EDGE_MARGIN - stamp_h,
        ),
        Position::Point { x, y } => (x, y),
    }
}
