//! CLI output formatting for render results.
//!
//! # Output Format
//!
//! ```text
//! Collage → output.png
//!     Input: 3 images (1 inline, 2 URLs)
//!     Grid: 2×2, spacing 10
//!     Size: 610×610, 14.2 KiB
//!
//! Add Text → out.png
//!     Input: 1 image (1 URL)
//!     Text: "Hello there" 48px at center
//!     Shape: rectangle
//!     Size: 800×600, 301.0 KiB
//! ```
//!
//! # Architecture
//!
//! [`format_render_summary`] returns `Vec<String>` for testability and
//! [`print_render_summary`] writes it to stdout. Formatting is pure: no I/O,
//! no side effects.

use crate::editor::ModeOptions;
use crate::imaging::Dimensions;
use crate::types::{Anchor, ImageInput, Position, WatermarkKind};
use std::path::{Path, PathBuf};

/// Everything the CLI reports after one render.
#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub output: PathBuf,
    pub inline_images: usize,
    pub url_images: usize,
    pub options: ModeOptions,
    pub dimensions: Dimensions,
    pub bytes: usize,
}

impl RenderSummary {
    pub fn new(
        output: &Path,
        input: &ImageInput,
        options: ModeOptions,
        dimensions: Dimensions,
        bytes: usize,
    ) -> Self {
        Self {
            output: output.to_path_buf(),
            inline_images: usize::from(input.binary_image.is_some()),
            url_images: input.urls.len(),
            options,
            dimensions,
            bytes,
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Human byte count: bytes under 1 KiB, then KiB/MiB with one decimal.
fn format_bytes(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{bytes} B")
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{:.1} MiB", b / (KIB * KIB))
    }
}

/// Truncate to `max` characters, appending `...` if truncated.
fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}

fn format_position(position: Position) -> String {
    match position {
        Position::Anchor(Anchor::TopLeft) => "top-left".to_string(),
        Position::Anchor(Anchor::Center) => "center".to_string(),
        Position::Anchor(Anchor::BottomRight) => "bottom-right".to_string(),
        Position::Point { x, y } => format!("({x}, {y})"),
    }
}

fn input_line(summary: &RenderSummary) -> String {
    let total = summary.inline_images + summary.url_images;
    let mut sources = Vec::new();
    if summary.inline_images > 0 {
        sources.push(format!("{} inline", summary.inline_images));
    }
    if summary.url_images > 0 {
        sources.push(plural(summary.url_images, "URL"));
    }
    format!(
        "{}Input: {} ({})",
        indent(1),
        plural(total, "image"),
        sources.join(", ")
    )
}

// ============================================================================
// Render summary
// ============================================================================

fn mode_title(options: &ModeOptions) -> &'static str {
    match options {
        ModeOptions::Collage(_) => "Collage",
        ModeOptions::AddText(_) => "Add Text",
        ModeOptions::AddWatermark(_) => "Add Watermark",
    }
}

pub fn format_render_summary(summary: &RenderSummary) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{} → {}",
            mode_title(&summary.options),
            summary.output.display()
        ),
        input_line(summary),
    ];

    match &summary.options {
        ModeOptions::Collage(opts) => {
            lines.push(format!(
                "{}Grid: {}×{}, spacing {}",
                indent(1),
                opts.rows,
                opts.columns,
                opts.spacing
            ));
            let placed = (summary.inline_images + summary.url_images)
                .min((opts.rows as usize).saturating_mul(opts.columns as usize));
            let dropped = summary.inline_images + summary.url_images - placed;
            if dropped > 0 {
                lines.push(format!(
                    "{}Dropped: {} beyond grid capacity",
                    indent(1),
                    plural(dropped, "image")
                ));
            }
        }
        ModeOptions::AddText(opts) => {
            lines.push(format!(
                "{}Text: \"{}\" {}px at {}",
                indent(1),
                truncate_text(&opts.text, 40),
                opts.font_size,
                format_position(opts.position)
            ));
            if let Some(shape) = opts.shape() {
                lines.push(format!(
                    "{}Shape: {}",
                    indent(1),
                    format!("{shape:?}").to_lowercase()
                ));
            }
        }
        ModeOptions::AddWatermark(opts) => {
            let what = match opts.kind {
                WatermarkKind::Text => format!("\"{}\"", truncate_text(&opts.content, 40)),
                WatermarkKind::Image => format!("image {}", opts.content),
            };
            lines.push(format!(
                "{}Watermark: {} at {}, opacity {}",
                indent(1),
                what,
                format_position(opts.position),
                opts.opacity
            ));
        }
    }

    lines.push(format!(
        "{}Size: {}×{}, {}",
        indent(1),
        summary.dimensions.width,
        summary.dimensions.height,
        format_bytes(summary.bytes)
    ));
    lines
}

pub fn print_render_summary(summary: &RenderSummary) {
    for line in format_render_summary(summary) {
        println!("{line}");
    }
}
