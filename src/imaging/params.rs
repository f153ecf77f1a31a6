//! Parameter types for drawing operations.
//!
//! These structs describe *what* to draw, not *how*. They are the interface
//! between [`operations`](super::operations), which turns user options into
//! concrete geometry, and the [`backend`](super::backend), which does the
//! pixel work. Keeping them plain data lets tests swap in a recording mock
//! and assert on geometry without rasterizing anything.
//!
//! ## Types
//!
//! - [`CollageParams`]: output size, background, and where each tile goes.
//! - [`OverlayParams`]: a base image plus up to three layers, drawn in this
//!   order: [`StampLayer`], [`ShapeLayer`], [`TextLayer`].

use crate::color::Rgba;

/// Horizontal text alignment relative to the draw point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Which part of the text sits on the draw point's y coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Middle,
    Bottom,
}

/// One collage cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TilePlacement<'a> {
    pub image: &'a [u8],
    pub left: u32,
    pub top: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollageParams<'a> {
    pub width: u32,
    pub height: u32,
    /// Every tile is stretched to `tile_size × tile_size`.
    pub tile_size: u32,
    pub background: Rgba,
    pub tiles: Vec<TilePlacement<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeGeometry {
    Circle { cx: f32, cy: f32, radius: f32 },
    /// Axis-aligned box; `(x, y)` is its top-left corner.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub color: Rgba,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeLayer {
    pub geometry: ShapeGeometry,
    pub fill: Rgba,
    /// Stroked after the fill; absent when the border width is zero.
    pub border: Option<Border>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLayer {
    pub text: String,
    pub font_size: f32,
    pub color: Rgba,
    pub x: f32,
    pub y: f32,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub opacity: f32,
}

/// A second image composited unscaled with its top-left corner at `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct StampLayer<'a> {
    pub image: &'a [u8],
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayParams<'a> {
    /// Bottom layer; also fixes the output dimensions.
    pub base: &'a [u8],
    pub stamp: Option<StampLayer<'a>>,
    pub shape: Option<ShapeLayer>,
    pub text: Option<TextLayer>,
}
