//! CSS-style color strings.
//!
//! Every color that reaches the compositor (collage background, text, shape
//! fill and border) arrives as a string from the host. Accepted forms:
//!
//! | Form | Example |
//! |---|---|
//! | Hex, 3/4/6/8 digits | `#fff`, `#ffff`, `#ff0000`, `#0000ff80` |
//! | Functional | `rgb(255, 0, 0)`, `rgba(255, 255, 255, 0.5)` |
//! | Named | `black`, `white`, `transparent`, ... |
//!
//! Colors are kept straight (not premultiplied); the backend premultiplies
//! when it hands pixels to tiny-skia.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color \"{input}\": {reason}")]
pub struct ColorError {
    pub input: String,
    pub reason: String,
}

impl ColorError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// 8-bit straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse any of the accepted color forms.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let s = input.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(input, hex);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
        {
            let args = args
                .strip_suffix(')')
                .ok_or_else(|| ColorError::new(input, "missing closing parenthesis"))?;
            return parse_functional(input, args);
        }
        named(&lower).ok_or_else(|| ColorError::new(input, "unknown color name"))
    }

    pub fn alpha_f32(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// `rgb(r,g,b)` form for SVG paint attributes. Alpha travels separately
    /// as a `*-opacity` attribute.
    pub fn svg_rgb(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

fn parse_hex(input: &str, hex: &str) -> Result<Rgba, ColorError> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::new(input, "non-hex digit"));
    }

    let byte = |pair: &str| {
        u8::from_str_radix(pair, 16)
            .map_err(|_| ColorError::new(input, format!("invalid hex byte \"{pair}\"")))
    };
    // Short forms repeat each nibble: `f` → `ff`.
    let nibble = |c: &str| byte(&c.repeat(2));

    match hex.len() {
        3 => Ok(Rgba::rgb(
            nibble(&hex[0..1])?,
            nibble(&hex[1..2])?,
            nibble(&hex[2..3])?,
        )),
        4 => Ok(Rgba::rgba(
            nibble(&hex[0..1])?,
            nibble(&hex[1..2])?,
            nibble(&hex[2..3])?,
            nibble(&hex[3..4])?,
        )),
        6 => Ok(Rgba::rgb(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
        )),
        8 => Ok(Rgba::rgba(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            byte(&hex[6..8])?,
        )),
        _ => Err(ColorError::new(
            input,
            "hex color must have 3, 4, 6 or 8 digits",
        )),
    }
}

fn parse_functional(input: &str, args: &str) -> Result<Rgba, ColorError> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ColorError::new(input, "expected 3 or 4 components"));
    }

    let channel = |s: &str| -> Result<u8, ColorError> {
        let v: f32 = s
            .parse()
            .map_err(|_| ColorError::new(input, format!("invalid channel \"{s}\"")))?;
        if !v.is_finite() {
            return Err(ColorError::new(input, format!("invalid channel \"{s}\"")));
        }
        Ok(v.round().clamp(0.0, 255.0) as u8)
    };

    let alpha = match parts.get(3) {
        Some(s) => {
            let v: f32 = s
                .parse()
                .map_err(|_| ColorError::new(input, format!("invalid alpha \"{s}\"")))?;
            if !v.is_finite() {
                return Err(ColorError::new(input, format!("invalid alpha \"{s}\"")));
            }
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        None => 255,
    };

    Ok(Rgba::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

fn named(name: &str) -> Option<Rgba> {
    let c = match name {
        "black" => Rgba::BLACK,
        "white" => Rgba::WHITE,
        "transparent" => Rgba::TRANSPARENT,
        "red" => Rgba::rgb(255, 0, 0),
        "green" => Rgba::rgb(0, 128, 0),
        "lime" => Rgba::rgb(0, 255, 0),
        "blue" => Rgba::rgb(0, 0, 255),
        "yellow" => Rgba::rgb(255, 255, 0),
        "cyan" | "aqua" => Rgba::rgb(0, 255, 255),
        "magenta" | "fuchsia" => Rgba::rgb(255, 0, 255),
        "gray" | "grey" => Rgba::rgb(128, 128, 128),
        "silver" => Rgba::rgb(192, 192, 192),
        "orange" => Rgba::rgb(255, 165, 0),
        "purple" => Rgba::rgb(128, 0, 128),
        "navy" => Rgba::rgb(0, 0, 128),
        _ => return None,
    };
    Some(c)
}
