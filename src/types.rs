//! Request and option types shared by the dispatcher, the compositors and the
//! host adapter.
//!
//! Field names serialize in camelCase so an options object written for the
//! workflow node (`backgroundColor`, `fontSize`, ...) deserializes directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three supported transformations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorMode {
    Collage,
    AddText,
    AddWatermark,
}

impl EditorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EditorMode::Collage => "collage",
            EditorMode::AddText => "addText",
            EditorMode::AddWatermark => "addWatermark",
        }
    }
}

impl FromStr for EditorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "collage" => Ok(EditorMode::Collage),
            "addText" => Ok(EditorMode::AddText),
            "addWatermark" => Ok(EditorMode::AddWatermark),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named overlay anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    Center,
    BottomRight,
}

/// Where an overlay goes: a named anchor or an explicit pixel coordinate
/// relative to the image's top-left corner.
///
/// Explicit coordinates are never clamped; text or stamps may land partly or
/// fully off-canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    Anchor(Anchor),
    Point { x: f32, y: f32 },
}

impl Default for Position {
    fn default() -> Self {
        Position::Anchor(Anchor::Center)
    }
}

/// Images supplied to one invocation, before resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInput {
    #[serde(default)]
    pub urls: Vec<String>,
    /// Inline payload. Never part of a serialized request; hosts attach it
    /// after parsing.
    #[serde(skip)]
    pub binary_image: Option<Vec<u8>>,
}

impl ImageInput {
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty() && self.binary_image.is_none()
    }
}

/// One invocation: mode, images, and the mode-specific options still in raw
/// form. The dispatcher picks the option type once it knows the mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub mode: String,
    #[serde(default)]
    pub input: ImageInput,
    #[serde(default)]
    pub options: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollageOptions {
    pub rows: u32,
    pub columns: u32,
    #[serde(default)]
    pub spacing: u32,
    #[serde(default = "default_collage_background")]
    pub background_color: String,
}

fn default_collage_background() -> String {
    "#ffffff".to_string()
}

impl Default for CollageOptions {
    fn default() -> Self {
        Self {
            rows: 2,
            columns: 2,
            spacing: 10,
            background_color: default_collage_background(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundShape {
    #[default]
    None,
    Circle,
    Rectangle,
    /// Same box logic as [`BackgroundShape::Rectangle`]; sides are not forced
    /// equal.
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignInShape {
    Top,
    #[default]
    Center,
    Bottom,
    Custom,
}

/// Fill used behind text when no background color is given.
pub const DEFAULT_SHAPE_BACKGROUND: &str = "rgba(255,255,255,0.5)";
pub const DEFAULT_BORDER_COLOR: &str = "#000000";
pub const DEFAULT_SHAPE_PADDING: f32 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOverlayOptions {
    pub text: String,
    pub font_size: f32,
    pub color: String,
    pub position: Position,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Absent is the same as [`BackgroundShape::None`].
    #[serde(default)]
    pub background_shape: Option<BackgroundShape>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub border_color: Option<String>,
    #[serde(default)]
    pub border_width: f32,
    #[serde(default)]
    pub shape_width: Option<f32>,
    #[serde(default)]
    pub shape_height: Option<f32>,
    #[serde(default = "default_shape_padding")]
    pub shape_padding: f32,
    #[serde(default)]
    pub text_align_in_shape: TextAlignInShape,
    #[serde(default)]
    pub text_offset_x: f32,
    #[serde(default)]
    pub text_offset_y: f32,
}

fn default_opacity() -> f32 {
    1.0
}

fn default_shape_padding() -> f32 {
    DEFAULT_SHAPE_PADDING
}

impl TextOverlayOptions {
    /// Plain text with no background shape.
    pub fn new(text: impl Into<String>, font_size: f32, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size,
            color: color.into(),
            position: Position::default(),
            opacity: default_opacity(),
            background_shape: None,
            background_color: None,
            border_color: None,
            border_width: 0.0,
            shape_width: None,
            shape_height: None,
            shape_padding: DEFAULT_SHAPE_PADDING,
            text_align_in_shape: TextAlignInShape::default(),
            text_offset_x: 0.0,
            text_offset_y: 0.0,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_shape(mut self, shape: BackgroundShape) -> Self {
        self.background_shape = Some(shape);
        self
    }

    /// The requested shape, with `None` and absent folded together.
    pub fn shape(&self) -> Option<BackgroundShape> {
        match self.background_shape {
            None | Some(BackgroundShape::None) => None,
            Some(shape) => Some(shape),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatermarkKind {
    #[default]
    Text,
    /// `content` is the URL of the stamp image.
    Image,
}

pub const WATERMARK_FONT_SIZE: f32 = 32.0;
pub const WATERMARK_COLOR: &str = "#000000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatermarkOptions {
    pub content: String,
    pub position: Position,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default, rename = "type")]
    pub kind: WatermarkKind,
}

impl WatermarkOptions {
    /// The overlay a text watermark reduces to: fixed size and color, no
    /// shape.
    pub fn to_text_overlay(&self) -> TextOverlayOptions {
        TextOverlayOptions::new(self.content.clone(), WATERMARK_FONT_SIZE, WATERMARK_COLOR)
            .with_position(self.position)
            .with_opacity(self.opacity)
    }
}
