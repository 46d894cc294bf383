//! RGBA fill colors

use crate::{Error, Result};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A four-component floating-point color.
///
/// The layout matches a WGSL `vec4<f32>` uniform (16 bytes), so a `Color` can be
/// uploaded as-is. No range check is applied: components outside `[0, 1]`, NaN
/// and infinities are all stored, and only clamped when converted to the
/// 8-bit unsigned-normalized form by [`Color::to_rgba8`].
///
/// Serialized as a 4-element array. Non-finite components are written as the
/// strings `"inf"`, `"-inf"` and `"NaN"` so they survive formats without a
/// literal for them, such as JSON.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Default, Pod, Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

    /// Create a color from its components
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit channel values
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self::new(
            rgba[0] as f32 / 255.0,
            rgba[1] as f32 / 255.0,
            rgba[2] as f32 / 255.0,
            rgba[3] as f32 / 255.0,
        )
    }

    /// Components as an array in r, g, b, a order
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Convert to the value an `rgba8unorm` texel stores for this color
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            unorm8(self.r),
            unorm8(self.g),
            unorm8(self.b),
            unorm8(self.a),
        ]
    }
}

/// Float to 8-bit unsigned-normalized conversion: clamp to [0, 1], NaN maps to 0
pub fn unorm8(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

/// A serialized color component
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Component {
    Number(f32),
    Named(String),
}

impl From<f32> for Component {
    fn from(value: f32) -> Self {
        if value.is_finite() {
            Component::Number(value)
        } else {
            Component::Named(value.to_string())
        }
    }
}

impl Component {
    fn value(self) -> std::result::Result<f32, String> {
        match self {
            Component::Number(value) => Ok(value),
            Component::Named(name) => name
                .parse::<f32>()
                .map_err(|e| format!("Invalid color component '{}': {}", name, e)),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_array().map(Component::from).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let components = <[Component; 4]>::deserialize(deserializer)?;
        let mut values = [0.0f32; 4];
        for (value, component) in values.iter_mut().zip(components) {
            *value = component.value().map_err(serde::de::Error::custom)?;
        }
        Ok(Color::from(values))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parse `r,g,b[,a]` float lists or `#RRGGBB[AA]` hex strings
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }

        let components = s
            .split(',')
            .map(|c| {
                c.trim()
                    .parse::<f32>()
                    .map_err(|e| Error::InvalidData(format!("Invalid color component '{}': {}", c.trim(), e)))
            })
            .collect::<Result<Vec<f32>>>()?;

        match components.as_slice() {
            [r, g, b] => Ok(Color::new(*r, *g, *b, 1.0)),
            [r, g, b, a] => Ok(Color::new(*r, *g, *b, *a)),
            _ => Err(Error::InvalidData(format!(
                "Expected 3 or 4 color components, got {}",
                components.len()
            ))),
        }
    }
}

fn parse_hex(hex: &str) -> Result<Color> {
    if !(hex.len() == 6 || hex.len() == 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidData(format!("Invalid hex color '#{}'", hex)));
    }

    let mut rgba = [0u8, 0, 0, 255];
    for (i, channel) in rgba.iter_mut().enumerate().take(hex.len() / 2) {
        let pair = &hex[i * 2..i * 2 + 2];
        *channel = u8::from_str_radix(pair, 16)
            .map_err(|e| Error::InvalidData(format!("Invalid hex color '#{}': {}", hex, e)))?;
    }
    Ok(Color::from_rgba8(rgba))
}
