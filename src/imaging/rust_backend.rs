//! Pure Rust drawing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` |
//! | Decode (JPEG, PNG, GIF, BMP, TIFF, WebP) | `image::load_from_memory` |
//! | Tile resize (stretch) | `image::imageops::resize` with `Lanczos3` |
//! | Tile placement | `image::imageops::overlay` |
//! | Shapes + text | one SVG document rendered by `resvg` onto the base pixmap |
//! | Text measurement | `usvg` text layout bounding box |
//! | Image stamp | `tiny_skia::Pixmap::draw_pixmap` with paint opacity |
//! | Encode → PNG | `image::DynamicImage::write_to` |
//!
//! Text is laid out by usvg against a font database built once per backend:
//! system fonts plus any configured font directories.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{
    CollageParams, OverlayParams, ShapeGeometry, ShapeLayer, StampLayer, TextAlign, TextBaseline,
    TextLayer,
};
use crate::config::FontsConfig;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use resvg::tiny_skia;
use std::io::Cursor;
use std::sync::Arc;

/// Pure Rust backend using `image` and `resvg`.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend {
    fontdb: Arc<usvg::fontdb::Database>,
    font_family: String,
}

impl RustBackend {
    /// Backend using system fonts and the default `sans-serif` family.
    pub fn new() -> Self {
        Self::with_fonts(&FontsConfig::default())
    }

    pub fn with_fonts(config: &FontsConfig) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in &config.dirs {
            db.load_fonts_dir(dir);
        }
        tracing::debug!(faces = db.len(), family = %config.family, "font database ready");

        Self {
            fontdb: Arc::new(db),
            font_family: config.family.clone(),
        }
    }

    /// Number of font faces available for text layout.
    pub fn font_count(&self) -> usize {
        self.fontdb.len()
    }

    fn svg_options(&self) -> usvg::Options<'static> {
        usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            font_resolver: font_resolver(),
            ..Default::default()
        }
    }

    /// Width of the laid-out line, from its bounding box.
    fn text_extent(&self, text: &str, font_size: f32) -> Result<f32, BackendError> {
        let layer = TextLayer {
            text: text.to_string(),
            font_size,
            color: crate::color::Rgba::BLACK,
            x: 0.0,
            y: font_size,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
            opacity: 1.0,
        };
        let mut svg = svg_open(1, 1);
        push_text(&mut svg, &layer, &self.font_family);
        svg.push_str("</svg>");

        let tree = self.parse_svg(&svg)?;
        Ok(text_width(tree.root()))
    }

    fn parse_svg(&self, svg: &str) -> Result<usvg::Tree, BackendError> {
        usvg::Tree::from_str(svg, &self.svg_options())
            .map_err(|e| BackendError::ProcessingFailed(format!("SVG layer rejected: {e}")))
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, image: &[u8]) -> Result<Dimensions, BackendError> {
        let (width, height) = ImageReader::new(Cursor::new(image))
            .with_guessed_format()
            .map_err(|e| BackendError::Decode(format!("Failed to read image header: {e}")))?
            .into_dimensions()
            .map_err(|e| BackendError::Decode(format!("Failed to read dimensions: {e}")))?;
        Ok(Dimensions { width, height })
    }

    fn measure_text(&self, text: &str, font_size: f32) -> Result<f32, BackendError> {
        if text.is_empty() {
            return Ok(0.0);
        }
        // Leading and trailing whitespace only counts between visible glyphs.
        let bracketed = self.text_extent(&format!("|{text}|"), font_size)?;
        let brackets = self.text_extent("||", font_size)?;
        Ok((bracketed - brackets).max(0.0))
    }

    fn collage(&self, params: &CollageParams) -> Result<Vec<u8>, BackendError> {
        let mut canvas = RgbaImage::from_pixel(
            params.width,
            params.height,
            image::Rgba(params.background.to_array()),
        );

        for (index, tile) in params.tiles.iter().enumerate() {
            let source = decode(tile.image)?;
            let thumb = image::imageops::resize(
                &source.to_rgba8(),
                params.tile_size,
                params.tile_size,
                FilterType::Lanczos3,
            );
            image::imageops::overlay(
                &mut canvas,
                &thumb,
                i64::from(tile.left),
                i64::from(tile.top),
            );
            tracing::debug!(index, left = tile.left, top = tile.top, "tile placed");
        }

        encode_png(DynamicImage::ImageRgba8(canvas))
    }

    fn overlay(&self, params: &OverlayParams) -> Result<Vec<u8>, BackendError> {
        let base = decode(params.base)?.to_rgba8();
        let (width, height) = base.dimensions();
        let mut pixmap = pixmap_from_rgba(base)?;

        if let Some(stamp) = &params.stamp {
            draw_stamp(&mut pixmap, stamp)?;
        }

        if params.shape.is_some() || params.text.is_some() {
            let mut svg = svg_open(width, height);
            if let Some(shape) = &params.shape {
                push_shape(&mut svg, shape);
            }
            if let Some(text) = &params.text {
                push_text(&mut svg, text, &self.font_family);
            }
            svg.push_str("</svg>");

            let tree = self.parse_svg(&svg)?;
            resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
        }

        encode_png(DynamicImage::ImageRgba8(rgba_from_pixmap(pixmap)?))
    }
}

fn decode(bytes: &[u8]) -> Result<DynamicImage, BackendError> {
    image::load_from_memory(bytes)
        .map_err(|e| BackendError::Decode(format!("Failed to decode image: {e}")))
}

fn encode_png(img: DynamicImage) -> Result<Vec<u8>, BackendError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| BackendError::Encode(e.to_string()))?;
    Ok(buf)
}

fn draw_stamp(pixmap: &mut tiny_skia::Pixmap, stamp: &StampLayer) -> Result<(), BackendError> {
    let stamp_pixmap = pixmap_from_rgba(decode(stamp.image)?.to_rgba8())?;
    let paint = tiny_skia::PixmapPaint {
        opacity: stamp.opacity,
        ..tiny_skia::PixmapPaint::default()
    };
    pixmap.draw_pixmap(
        stamp.x.round() as i32,
        stamp.y.round() as i32,
        stamp_pixmap.as_ref(),
        &paint,
        tiny_skia::Transform::identity(),
        None,
    );
    Ok(())
}

// =========================================================================
// Pixel conversion: image (straight alpha) <-> tiny-skia (premultiplied)
// =========================================================================

fn pixmap_from_rgba(img: RgbaImage) -> Result<tiny_skia::Pixmap, BackendError> {
    let (width, height) = img.dimensions();
    let size = tiny_skia::IntSize::from_wh(width, height).ok_or_else(|| {
        BackendError::ProcessingFailed(format!("Invalid canvas size {width}x{height}"))
    })?;
    let mut data = img.into_raw();
    premultiply_rgba8_in_place(&mut data);
    tiny_skia::Pixmap::from_vec(data, size)
        .ok_or_else(|| BackendError::ProcessingFailed("Failed to allocate canvas".into()))
}

fn rgba_from_pixmap(pixmap: tiny_skia::Pixmap) -> Result<RgbaImage, BackendError> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let mut data = pixmap.take();
    demultiply_rgba8_in_place(&mut data);
    RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| BackendError::ProcessingFailed("Canvas buffer size mismatch".into()))
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * a + 127) / 255) as u8;
        }
    }
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

// =========================================================================
// SVG layer construction
// =========================================================================

fn svg_open(width: u32, height: u32) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )
}

fn push_shape(svg: &mut String, shape: &ShapeLayer) {
    match shape.geometry {
        ShapeGeometry::Circle { cx, cy, radius } => {
            svg.push_str(&format!(r#"<circle cx="{cx}" cy="{cy}" r="{radius}""#));
        }
        ShapeGeometry::Rect {
            x,
            y,
            width,
            height,
        } => {
            svg.push_str(&format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}""#
            ));
        }
    }
    svg.push_str(&format!(
        r#" fill="{}" fill-opacity="{}""#,
        shape.fill.svg_rgb(),
        shape.fill.alpha_f32()
    ));
    if let Some(border) = shape.border {
        svg.push_str(&format!(
            r#" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
            border.color.svg_rgb(),
            border.color.alpha_f32(),
            border.width
        ));
    }
    svg.push_str("/>");
}

fn push_text(svg: &mut String, text: &TextLayer, family: &str) {
    let anchor = match text.align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    };
    let baseline = match text.baseline {
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Middle => "central",
        TextBaseline::Bottom => "text-after-edge",
    };
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}" fill-opacity="{}" opacity="{}" text-anchor="{anchor}" dominant-baseline="{baseline}" xml:space="preserve">{}</text>"#,
        text.x,
        text.y,
        escape_xml(family),
        text.font_size,
        text.color.svg_rgb(),
        text.color.alpha_f32(),
        text.opacity,
        escape_xml(&text.text),
    ));
}

/// Escape markup and drop characters XML 1.0 cannot carry: C0 controls
/// other than tab, LF and CR, plus U+FFFE and U+FFFF.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {}
            c => out.push(c),
        }
    }
    out
}

/// Widest text node in the tree.
fn text_width(group: &usvg::Group) -> f32 {
    group
        .children()
        .iter()
        .map(|node| match node {
            usvg::Node::Text(text) => text.bounding_box().width(),
            usvg::Node::Group(g) => text_width(g),
            usvg::Node::Path(_) | usvg::Node::Image(_) => 0.0,
        })
        .fold(0.0, f32::max)
}

/// Resolve requested families through fontdb, then the generic sans-serif
/// and serif families, then any installed face.
fn font_resolver() -> usvg::FontResolver<'static> {
    usvg::FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);
            families.push(usvg::fontdb::Family::Serif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };

            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}
