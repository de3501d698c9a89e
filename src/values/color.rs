use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{MorphError, MorphResult};
use crate::values::Morphable;

/// RGB color with integer channels.
///
/// Channels are stored as given, including values outside `0..=255`; the textual
/// formats clamp when writing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: i32,
    pub g: i32,
    pub b: i32,
    destination: Option<[i32; 3]>,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: i32, g: i32, b: i32) -> Self {
        Self {
            r,
            g,
            b,
            destination: None,
        }
    }

    /// Lenient parse: unmatched input is black.
    pub fn parse(s: &str) -> Self {
        s.parse().unwrap_or_else(|err| {
            tracing::debug!(input = s, %err, "color fallback to black");
            Self::BLACK
        })
    }

    /// Whether `s` looks like a hex or `rgb(...)` color.
    pub fn is_color(s: &str) -> bool {
        let s = s.trim();
        if s.starts_with("rgb(") {
            return true;
        }
        s.strip_prefix('#').is_some_and(|hex| {
            (3..=6).contains(&hex.len()) && hex.bytes().all(|b| b.is_ascii_hexdigit())
        })
    }

    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            clamp_channel(self.r),
            clamp_channel(self.g),
            clamp_channel(self.b)
        )
    }

    pub fn to_rgb(&self) -> String {
        format!(
            "rgb({},{},{})",
            clamp_channel(self.r),
            clamp_channel(self.g),
            clamp_channel(self.b)
        )
    }

    /// Perceived brightness in `[0, 1]` for in-range channels.
    pub fn brightness(&self) -> f64 {
        f64::from(self.r) / 255.0 * 0.30
            + f64::from(self.g) / 255.0 * 0.59
            + f64::from(self.b) / 255.0 * 0.11
    }

    pub fn morph(mut self, destination: impl Into<Color>) -> Self {
        let d = destination.into();
        self.destination = Some([d.r, d.g, d.b]);
        self
    }

    pub fn destination(&self) -> Option<Color> {
        self.destination.map(|[r, g, b]| Color::rgb(r, g, b))
    }
}

fn clamp_channel(c: i32) -> u8 {
    c.clamp(0, 255) as u8
}

impl Morphable for Color {
    fn at(&self, pos: f64) -> Self {
        let Some([dr, dg, db]) = self.destination else {
            return *self;
        };
        let pos = pos.clamp(0.0, 1.0);
        let channel = |from: i32, to: i32| {
            let from = f64::from(from);
            (from + (f64::from(to) - from) * pos) as i32
        };
        Color::rgb(channel(self.r, dr), channel(self.g, dg), channel(self.b, db))
    }

    fn has_destination(&self) -> bool {
        self.destination.is_some()
    }
}

impl FromStr for Color {
    type Err = MorphError;

    fn from_str(s: &str) -> MorphResult<Self> {
        let s = s.trim();
        if s.starts_with("rgb(") {
            return parse_rgb(s);
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        Err(MorphError::parse(format!("unrecognized color \"{s}\"")))
    }
}

fn parse_rgb(s: &str) -> MorphResult<Color> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let inner = compact
        .strip_prefix("rgb(")
        .and_then(|rest| rest.split_once(')'))
        .map(|(inner, _)| inner)
        .ok_or_else(|| MorphError::parse(format!("unterminated rgb color \"{s}\"")))?;

    let mut channels = [0i32; 3];
    let mut parts = inner.split(',');
    for slot in &mut channels {
        let part = parts
            .next()
            .filter(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| MorphError::parse(format!("invalid rgb channel in \"{s}\"")))?;
        *slot = part
            .parse()
            .map_err(|_| MorphError::parse(format!("rgb channel out of range in \"{s}\"")))?;
    }
    if parts.next().is_some() {
        return Err(MorphError::parse(format!("too many rgb channels in \"{s}\"")));
    }
    Ok(Color::rgb(channels[0], channels[1], channels[2]))
}

fn parse_hex(hex: &str) -> MorphResult<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(MorphError::parse(format!("invalid hex color \"#{hex}\"")));
    }
    let full: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_owned(),
        _ => {
            return Err(MorphError::parse(
                "hex color must be #rgb or #rrggbb (case-insensitive)",
            ));
        }
    };
    let byte = |i: usize| i32::from_str_radix(&full[i..i + 2], 16);
    match (byte(0), byte(2), byte(4)) {
        (Ok(r), Ok(g), Ok(b)) => Ok(Color::rgb(r, g, b)),
        _ => Err(MorphError::parse(format!("invalid hex color \"#{hex}\""))),
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<(i32, i32, i32)> for Color {
    fn from((r, g, b): (i32, i32, i32)) -> Self {
        Self::rgb(r, g, b)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            RgbObj { r: i32, g: i32, b: i32 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::RgbObj { r, g, b } => Ok(Self::rgb(r, g, b)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/values/color.rs"]
mod tests;
