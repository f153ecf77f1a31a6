//! Declarative parameter schema for host UIs.
//!
//! Every parameter [`NodeParameters`](crate::node::NodeParameters) reads is
//! listed here once, with its display name, input kind, default, allowed
//! values, and the conditions under which a host should show it. The table
//! is static data; [`schema_json`] serializes it for hosts that build their
//! forms at runtime.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    Color,
    Options,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Str(&'static str),
    Num(f64),
}

/// Show the parameter only when `param` has one of `values`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShowWhen {
    pub param: &'static str,
    pub values: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    pub name: &'static str,
    pub display_name: &'static str,
    pub kind: ParamKind,
    pub default: DefaultValue,
    #[serde(skip_serializing_if = "is_empty")]
    pub options: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "is_empty")]
    pub show_when: &'static [ShowWhen],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

fn is_empty<T>(items: &&'static [T]) -> bool {
    items.is_empty()
}

const ALL_MODES: &[&str] = &["collage", "addText", "addWatermark"];
const SHAPES: &[&str] = &["none", "circle", "rectangle", "square"];
const WITH_SHAPE: &[&str] = &["circle", "rectangle", "square"];
const BOXED: &[&str] = &["rectangle", "square"];
const POSITIONS: &[&str] = &["top-left", "center", "bottom-right", "custom"];

const COLLAGE: &[ShowWhen] = &[ShowWhen {
    param: "mode",
    values: &["collage"],
}];
const TEXT: &[ShowWhen] = &[ShowWhen {
    param: "mode",
    values: &["addText"],
}];
const TEXT_WITH_SHAPE: &[ShowWhen] = &[
    ShowWhen {
        param: "mode",
        values: &["addText"],
    },
    ShowWhen {
        param: "textBackgroundShape",
        values: WITH_SHAPE,
    },
];
const TEXT_WITH_BOX: &[ShowWhen] = &[
    ShowWhen {
        param: "mode",
        values: &["addText"],
    },
    ShowWhen {
        param: "textBackgroundShape",
        values: BOXED,
    },
];
const TEXT_CUSTOM_ALIGN: &[ShowWhen] = &[
    ShowWhen {
        param: "mode",
        values: &["addText"],
    },
    ShowWhen {
        param: "textBackgroundShape",
        values: WITH_SHAPE,
    },
    ShowWhen {
        param: "textAlignInShape",
        values: &["custom"],
    },
];
const OVERLAY: &[ShowWhen] = &[ShowWhen {
    param: "mode",
    values: &["addText", "addWatermark"],
}];
const CUSTOM_POSITION: &[ShowWhen] = &[
    ShowWhen {
        param: "mode",
        values: &["addText", "addWatermark"],
    },
    ShowWhen {
        param: "position",
        values: &["custom"],
    },
];
const WATERMARK: &[ShowWhen] = &[ShowWhen {
    param: "mode",
    values: &["addWatermark"],
}];
const TEXT_WATERMARK: &[ShowWhen] = &[
    ShowWhen {
        param: "mode",
        values: &["addWatermark"],
    },
    ShowWhen {
        param: "watermarkType",
        values: &["text"],
    },
];
const IMAGE_WATERMARK: &[ShowWhen] = &[
    ShowWhen {
        param: "mode",
        values: &["addWatermark"],
    },
    ShowWhen {
        param: "watermarkType",
        values: &["image"],
    },
];

const fn param(
    name: &'static str,
    display_name: &'static str,
    kind: ParamKind,
    default: DefaultValue,
    show_when: &'static [ShowWhen],
) -> ParameterSpec {
    ParameterSpec {
        name,
        display_name,
        kind,
        default,
        options: &[],
        description: None,
        show_when,
        min: None,
        max: None,
    }
}

use DefaultValue::{Num, Str};
use ParamKind::{Color, Number, Options, String as Text};

/// Every node parameter, in display order.
pub const PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec {
        options: ALL_MODES,
        ..param("mode", "Mode", Options, Str("collage"), &[])
    },
    ParameterSpec {
        description: Some("Comma-separated; only http:// and https:// URLs are used"),
        ..param("imageUrls", "Image URLs", Text, Str(""), &[])
    },
    // Collage
    ParameterSpec {
        min: Some(1.0),
        ..param("rows", "Rows", Number, Num(2.0), COLLAGE)
    },
    ParameterSpec {
        min: Some(1.0),
        ..param("columns", "Columns", Number, Num(2.0), COLLAGE)
    },
    ParameterSpec {
        min: Some(0.0),
        ..param("spacing", "Spacing", Number, Num(10.0), COLLAGE)
    },
    param("backgroundColor", "Background Color", Color, Str("#ffffff"), COLLAGE),
    // Text
    param("text", "Text", Text, Str("Sample"), TEXT),
    param("fontSize", "Font Size", Number, Num(48.0), TEXT),
    param("color", "Text Color", Color, Str("#000000"), TEXT),
    ParameterSpec {
        options: SHAPES,
        ..param("textBackgroundShape", "Text Background Shape", Options, Str("none"), TEXT)
    },
    param("textBackgroundColor", "Text Background Color", Color, Str("#ffffff"), TEXT_WITH_SHAPE),
    param("textBorderColor", "Text Border Color", Color, Str("#000000"), TEXT_WITH_SHAPE),
    ParameterSpec {
        min: Some(0.0),
        description: Some("Border stroke width; 0 draws no border"),
        ..param("textBorderWidth", "Text Border Width", Number, Num(0.0), TEXT_WITH_SHAPE)
    },
    ParameterSpec {
        description: Some("The width of the background shape"),
        ..param("shapeWidth", "Shape Width", Number, Num(100.0), TEXT_WITH_SHAPE)
    },
    ParameterSpec {
        description: Some("The height of the background shape"),
        ..param("shapeHeight", "Shape Height", Number, Num(100.0), TEXT_WITH_BOX)
    },
    ParameterSpec {
        description: Some("Padding (in pixels) between the shape border and the text"),
        ..param("shapePadding", "Shape Padding", Number, Num(20.0), TEXT_WITH_SHAPE)
    },
    ParameterSpec {
        options: &["top", "center", "bottom", "custom"],
        description: Some("Position of the text within the background shape"),
        ..param("textAlignInShape", "Text Alignment in Shape", Options, Str("center"), TEXT_WITH_SHAPE)
    },
    param("textOffsetX", "Text X Offset (inside shape)", Number, Num(0.0), TEXT_CUSTOM_ALIGN),
    param("textOffsetY", "Text Y Offset (inside shape)", Number, Num(0.0), TEXT_CUSTOM_ALIGN),
    // Shared overlay placement
    ParameterSpec {
        options: POSITIONS,
        ..param("position", "Position", Options, Str("center"), OVERLAY)
    },
    param("customX", "Custom X", Number, Num(50.0), CUSTOM_POSITION),
    param("customY", "Custom Y", Number, Num(50.0), CUSTOM_POSITION),
    ParameterSpec {
        min: Some(0.0),
        max: Some(1.0),
        ..param("opacity", "Opacity", Number, Num(1.0), OVERLAY)
    },
    // Watermark
    ParameterSpec {
        options: &["text", "image"],
        ..param("watermarkType", "Watermark Type", Options, Str("text"), WATERMARK)
    },
    param("watermarkText", "Watermark Text", Text, Str("© Image Editor Pro"), TEXT_WATERMARK),
    ParameterSpec {
        description: Some("Image composited unscaled at the chosen position"),
        ..param("watermarkImageUrl", "Watermark Image URL", Text, Str(""), IMAGE_WATERMARK)
    },
];

/// Look up one parameter by name.
pub fn find(name: &str) -> Option<&'static ParameterSpec> {
    PARAMETERS.iter().find(|p| p.name == name)
}

/// The full schema as pretty JSON.
pub fn schema_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "name": "imageEditorPro",
        "displayName": "Image Editor Pro",
        "description": "Advanced image editing: collage, text overlay, watermark",
        "output": {"fileName": "output.png", "mimeType": "image/png"},
        "parameters": PARAMETERS,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeParameters;

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = PARAMETERS.iter().map(|p| p.name).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn every_node_parameter_is_declared_with_matching_default() {
        let defaults = serde_json::to_value(NodeParameters::default()).unwrap();
        let defaults = defaults.as_object().unwrap();

        assert_eq!(defaults.len(), PARAMETERS.len());
        for spec in PARAMETERS {
            let actual = &defaults[spec.name];
            match spec.default {
                Str(s) => assert_eq!(actual.as_str(), Some(s), "{}", spec.name),
                Num(n) => assert_eq!(actual.as_f64(), Some(n), "{}", spec.name),
            }
        }
    }

    #[test]
    fn option_defaults_are_allowed_values() {
        for spec in PARAMETERS.iter().filter(|p| p.kind == Options) {
            let Str(default) = spec.default else {
                panic!("{} has a numeric default", spec.name);
            };
            assert!(spec.options.contains(&default), "{}", spec.name);
        }
    }

    #[test]
    fn conditions_refer_to_declared_parameters() {
        for spec in PARAMETERS {
            for cond in spec.show_when {
                let target = find(cond.param).unwrap_or_else(|| panic!("{}", cond.param));
                for value in cond.values {
                    assert!(target.options.contains(value), "{} -> {value}", spec.name);
                }
            }
        }
    }

    #[test]
    fn schema_json_lists_parameters() {
        let json: serde_json::Value = serde_json::from_str(&schema_json().unwrap()).unwrap();
        let params = json["parameters"].as_array().unwrap();
        assert_eq!(params.len(), PARAMETERS.len());
        assert_eq!(params[0]["name"], "mode");
        assert_eq!(params[0]["kind"], "options");
        assert_eq!(params[2]["min"], 1.0);
        assert!(params[1].get("options").is_none());
    }
}
