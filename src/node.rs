//! Host adapter: flat workflow-node parameters to an [`EditRequest`].
//!
//! A workflow host hands over every parameter of the node as one flat
//! camelCase object, whatever the selected mode. [`NodeParameters`] reads
//! that object (missing keys take the defaults declared in
//! [`schema`](crate::schema)) and [`NodeParameters::into_request`] keeps only
//! what the selected mode uses.

use crate::error::{EditorError, Result};
use crate::types::{
    Anchor, BackgroundShape, CollageOptions, EditRequest, EditorMode, ImageInput, Position,
    TextAlignInShape, TextOverlayOptions, WatermarkKind, WatermarkOptions,
};
use serde::{Deserialize, Serialize};

/// The node's position picker; `custom` reads `customX`/`customY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionParam {
    TopLeft,
    #[default]
    Center,
    BottomRight,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeParameters {
    pub mode: String,
    /// Comma-separated; see [`parse_url_list`].
    pub image_urls: String,

    pub rows: u32,
    pub columns: u32,
    pub spacing: u32,
    pub background_color: String,

    pub text: String,
    pub font_size: f32,
    pub color: String,
    pub text_background_shape: BackgroundShape,
    pub text_background_color: String,
    pub text_border_color: String,
    pub text_border_width: f32,
    pub shape_width: f32,
    pub shape_height: f32,
    pub shape_padding: f32,
    pub text_align_in_shape: TextAlignInShape,
    pub text_offset_x: f32,
    pub text_offset_y: f32,

    pub position: PositionParam,
    pub custom_x: f32,
    pub custom_y: f32,
    pub opacity: f32,

    pub watermark_type: WatermarkKind,
    pub watermark_text: String,
    pub watermark_image_url: String,
}

impl Default for NodeParameters {
    fn default() -> Self {
        Self {
            mode: EditorMode::Collage.as_str().to_string(),
            image_urls: String::new(),
            rows: 2,
            columns: 2,
            spacing: 10,
            background_color: "#ffffff".to_string(),
            text: "Sample".to_string(),
            font_size: 48.0,
            color: "#000000".to_string(),
            text_background_shape: BackgroundShape::None,
            text_background_color: "#ffffff".to_string(),
            text_border_color: "#000000".to_string(),
            text_border_width: 0.0,
            shape_width: 100.0,
            shape_height: 100.0,
            shape_padding: 20.0,
            text_align_in_shape: TextAlignInShape::Center,
            text_offset_x: 0.0,
            text_offset_y: 0.0,
            position: PositionParam::Center,
            custom_x: 50.0,
            custom_y: 50.0,
            opacity: 1.0,
            watermark_type: WatermarkKind::Text,
            watermark_text: "© Image Editor Pro".to_string(),
            watermark_image_url: String::new(),
        }
    }
}

/// Split a comma-separated URL list, keeping only `http://` and `https://`
/// entries.
pub fn parse_url_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|u| u.starts_with("http://") || u.starts_with("https://"))
        .map(String::from)
        .collect()
}

impl NodeParameters {
    pub fn position(&self) -> Position {
        match self.position {
            PositionParam::TopLeft => Position::Anchor(Anchor::TopLeft),
            PositionParam::Center => Position::Anchor(Anchor::Center),
            PositionParam::BottomRight => Position::Anchor(Anchor::BottomRight),
            PositionParam::Custom => Position::Point {
                x: self.custom_x,
                y: self.custom_y,
            },
        }
    }

    /// Build the request for the selected mode, attaching `binary` as the
    /// inline image.
    ///
    /// An unknown mode still produces a request (with empty options) so the
    /// dispatcher reports it.
    pub fn into_request(self, binary: Option<Vec<u8>>) -> Result<EditRequest> {
        let options = match self.mode.parse::<EditorMode>() {
            Ok(EditorMode::Collage) => to_json(&self.collage_options())?,
            Ok(EditorMode::AddText) => to_json(&self.text_options())?,
            Ok(EditorMode::AddWatermark) => to_json(&self.watermark_options())?,
            Err(_) => serde_json::Value::Object(Default::default()),
        };

        Ok(EditRequest {
            input: ImageInput {
                urls: parse_url_list(&self.image_urls),
                binary_image: binary,
            },
            mode: self.mode,
            options,
        })
    }

    fn collage_options(&self) -> CollageOptions {
        CollageOptions {
            rows: self.rows,
            columns: self.columns,
            spacing: self.spacing,
            background_color: self.background_color.clone(),
        }
    }

    fn text_options(&self) -> TextOverlayOptions {
        let shape = self.text_background_shape;
        let boxed = matches!(shape, BackgroundShape::Rectangle | BackgroundShape::Square);
        let custom = self.text_align_in_shape == TextAlignInShape::Custom;

        let mut opts = TextOverlayOptions::new(self.text.clone(), self.font_size, self.color.clone())
            .with_position(self.position())
            .with_opacity(self.opacity)
            .with_shape(shape);
        opts.background_color = Some(self.text_background_color.clone());
        opts.border_color = Some(self.text_border_color.clone());
        opts.border_width = self.text_border_width;
        opts.shape_width = Some(self.shape_width);
        // Circles size from the width alone.
        opts.shape_height = boxed.then_some(self.shape_height);
        opts.shape_padding = self.shape_padding;
        opts.text_align_in_shape = self.text_align_in_shape;
        if custom {
            opts.text_offset_x = self.text_offset_x;
            opts.text_offset_y = self.text_offset_y;
        }
        opts
    }

    fn watermark_options(&self) -> WatermarkOptions {
        let content = match self.watermark_type {
            WatermarkKind::Text => self.watermark_text.clone(),
            WatermarkKind::Image => self.watermark_image_url.trim().to_string(),
        };
        WatermarkOptions {
            content,
            position: self.position(),
            opacity: self.opacity,
            kind: self.watermark_type,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| EditorError::invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_list_keeps_only_http_entries() {
        let urls = parse_url_list(" https://a/1.png ,ftp://b/2.png,, http://c/3.jpg,file:///x,notaurl");
        assert_eq!(urls, vec!["https://a/1.png", "http://c/3.jpg"]);
    }

    #[test]
    fn url_list_of_blank_string_is_empty() {
        assert!(parse_url_list("").is_empty());
        assert!(parse_url_list(" , ").is_empty());
    }

    #[test]
    fn missing_parameters_take_defaults() {
        let params: NodeParameters = serde_json::from_value(json!({"mode": "addText"})).unwrap();
        assert_eq!(params.font_size, 48.0);
        assert_eq!(params.text, "Sample");
        assert_eq!(params.position, PositionParam::Center);
        assert_eq!(params.shape_width, 100.0);
    }

    #[test]
    fn collage_request_carries_grid_options() {
        let params: NodeParameters = serde_json::from_value(json!({
            "mode": "collage",
            "imageUrls": "https://a/1.png,https://a/2.png",
            "rows": 1,
            "columns": 2,
            "spacing": 0,
            "text": "ignored"
        }))
        .unwrap();
        let req = params.into_request(None).unwrap();

        assert_eq!(req.mode, "collage");
        assert_eq!(req.input.urls.len(), 2);
        assert_eq!(
            req.options,
            json!({"rows": 1, "columns": 2, "spacing": 0, "backgroundColor": "#ffffff"})
        );
    }

    #[test]
    fn text_request_maps_custom_position_and_shape() {
        let params: NodeParameters = serde_json::from_value(json!({
            "mode": "addText",
            "position": "custom",
            "customX": 12,
            "customY": 34,
            "textBackgroundShape": "circle",
            "textAlignInShape": "custom",
            "textOffsetX": 5
        }))
        .unwrap();
        let req = params.into_request(Some(vec![1])).unwrap();
        let opts: TextOverlayOptions = serde_json::from_value(req.options).unwrap();

        assert_eq!(opts.position, Position::Point { x: 12.0, y: 34.0 });
        assert_eq!(opts.shape(), Some(BackgroundShape::Circle));
        assert_eq!(opts.shape_width, Some(100.0));
        assert_eq!(opts.shape_height, None);
        assert_eq!(opts.text_offset_x, 5.0);
        assert_eq!(req.input.binary_image, Some(vec![1]));
    }

    #[test]
    fn offsets_ignored_unless_alignment_is_custom() {
        let params: NodeParameters = serde_json::from_value(json!({
            "mode": "addText",
            "textBackgroundShape": "rectangle",
            "textOffsetX": 5,
            "textOffsetY": 6
        }))
        .unwrap();
        let opts = params.text_options();
        assert_eq!((opts.text_offset_x, opts.text_offset_y), (0.0, 0.0));
        assert_eq!(opts.shape_height, Some(100.0));
    }

    #[test]
    fn watermark_content_follows_type() {
        let mut params = NodeParameters {
            mode: "addWatermark".into(),
            watermark_text: "© me".into(),
            watermark_image_url: " https://a/logo.png ".into(),
            position: PositionParam::BottomRight,
            ..NodeParameters::default()
        };
        let text = params.watermark_options();
        assert_eq!(text.content, "© me");
        assert_eq!(text.kind, WatermarkKind::Text);
        assert_eq!(text.position, Position::Anchor(Anchor::BottomRight));

        params.watermark_type = WatermarkKind::Image;
        let image = params.watermark_options();
        assert_eq!(image.content, "https://a/logo.png");
        assert_eq!(image.kind, WatermarkKind::Image);
    }

    #[test]
    fn unknown_mode_passes_through_for_dispatch() {
        let params = NodeParameters {
            mode: "blur".into(),
            ..NodeParameters::default()
        };
        let req = params.into_request(None).unwrap();
        assert_eq!(req.mode, "blur");
        assert_eq!(req.options, json!({}));
    }
}
