use std::fmt;

pub use kurbo::{Affine, BezPath, Line, Point, Rect, Vec2};

/// Identity of an animatable target inside a host registry.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TargetId(pub u64);

/// Axis-aligned bounds as reported by a measurement provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x2(self) -> f64 {
        self.x + self.width
    }

    pub fn y2(self) -> f64 {
        self.y + self.height
    }

    pub fn cx(self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn cy(self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Smallest box containing both `self` and `other`.
    pub fn merge(self, other: BBox) -> BBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        BBox {
            x,
            y,
            width: self.x2().max(other.x2()) - x,
            height: self.y2().max(other.y2()) - y,
        }
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x2(), self.y2())
    }
}

impl From<Rect> for BBox {
    fn from(r: Rect) -> Self {
        let r = r.abs();
        Self::new(r.x0, r.y0, r.width(), r.height())
    }
}

/// Degrees to radians, wrapping the input into `(-360, 360)` first.
pub(crate) fn radians(deg: f64) -> f64 {
    (deg % 360.0).to_radians()
}

/// Number formatting used by every textual wire format.
///
/// Integral values print without a fractional part, `-0` prints as `0`, and very
/// large or very small magnitudes switch to exponent notation (`3.4e+38`).
pub(crate) struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v == 0.0 {
            return f.write_str("0");
        }
        if v.is_nan() {
            return f.write_str("NaN");
        }
        if v.is_infinite() {
            return f.write_str(if v < 0.0 { "-Infinity" } else { "Infinity" });
        }
        let abs = v.abs();
        if !(1e-6..1e21).contains(&abs) {
            let s = format!("{v:e}");
            return match s.split_once('e') {
                Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{mantissa}e+{exp}"),
                _ => f.write_str(&s),
            };
        }
        write!(f, "{v}")
    }
}

/// Parse the longest leading float of `s`, the way a lenient number reader does
/// (`"1.5.2"` reads as `1.5`, `"12px"` as `12`).
pub(crate) fn leading_float(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut i = 0usize;
    if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
        i += 1;
    }
    let digits_start = i;
    let mut seen_dot = false;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => i += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                i += 1;
            }
            _ => break,
        }
    }
    if i == digits_start || (i == digits_start + 1 && seen_dot) {
        return None;
    }
    // exponent
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    s[..i].parse().ok()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
