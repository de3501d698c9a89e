use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Affine, Num, Point, radians};
use crate::foundation::error::{MorphError, MorphResult};
use crate::values::{Lerp, Morphable};

const IDENTITY_COEFFS: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// Mirror axis for [`AffineTransform::flip`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Coefficient object; absent slots take the identity's value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatrixParts {
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub c: Option<f64>,
    pub d: Option<f64>,
    pub e: Option<f64>,
    pub f: Option<f64>,
}

/// Result of [`AffineTransform::extract`]. Angles are in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decomposed {
    pub x: f64,
    pub y: f64,
    pub skew_x: f64,
    pub skew_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
}

/// `matrix(a,b,c,d,e,f)`, mapping `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
    destination: Option<[f64; 6]>,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self {
            a,
            b,
            c,
            d,
            e,
            f,
            destination: None,
        }
    }

    pub fn from_coeffs([a, b, c, d, e, f]: [f64; 6]) -> Self {
        Self::new(a, b, c, d, e, f)
    }

    pub fn coeffs(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// Lenient parse of `"a,b,c,d,e,f"` or `"matrix(a,b,c,d,e,f)"`.
    ///
    /// Missing or unreadable slots take the identity's value.
    pub fn parse(s: &str) -> Self {
        let mut coeffs = IDENTITY_COEFFS;
        for (slot, part) in coeffs.iter_mut().zip(matrix_parts(s)) {
            if let Some(v) = part.parse::<f64>().ok().filter(|v| v.is_finite()) {
                *slot = v;
            }
        }
        Self::from_coeffs(coeffs)
    }

    pub fn to_affine(&self) -> Affine {
        Affine::new(self.coeffs())
    }

    /// `self ∘ other`: `other` is applied first.
    pub fn multiply(&self, other: &AffineTransform) -> Self {
        (self.to_affine() * other.to_affine()).into()
    }

    /// `None` for singular matrices.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.to_affine().determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(self.to_affine().inverse().into())
    }

    pub fn translate(&self, x: f64, y: f64) -> Self {
        self.multiply(&Self::new(1.0, 0.0, 0.0, 1.0, x, y))
    }

    pub fn scale(&self, sx: f64, sy: f64) -> Self {
        self.scale_around(sx, sy, 0.0, 0.0)
    }

    pub fn scale_uniform(&self, s: f64) -> Self {
        self.scale_around(s, s, 0.0, 0.0)
    }

    pub fn scale_uniform_around(&self, s: f64, cx: f64, cy: f64) -> Self {
        self.scale_around(s, s, cx, cy)
    }

    /// `translate(cx, cy) · scale(sx, sy) · translate(-cx, -cy)`.
    pub fn scale_around(&self, sx: f64, sy: f64, cx: f64, cy: f64) -> Self {
        self.around(cx, cy, &Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0))
    }

    pub fn rotate(&self, degrees: f64) -> Self {
        self.rotate_around(degrees, 0.0, 0.0)
    }

    pub fn rotate_around(&self, degrees: f64, cx: f64, cy: f64) -> Self {
        let (sin, cos) = radians(degrees).sin_cos();
        self.around(cx, cy, &Self::new(cos, sin, -sin, cos, 0.0, 0.0))
    }

    /// `skewX(x)` then `skewY(y)`, both in degrees.
    pub fn skew(&self, x: f64, y: f64) -> Self {
        let skew_x = Self::new(1.0, 0.0, x.to_radians().tan(), 1.0, 0.0, 0.0);
        let skew_y = Self::new(1.0, y.to_radians().tan(), 0.0, 1.0, 0.0, 0.0);
        self.multiply(&skew_x).multiply(&skew_y)
    }

    pub fn flip(&self, axis: Axis) -> Self {
        match axis {
            Axis::X => self.scale(-1.0, 1.0),
            Axis::Y => self.scale(1.0, -1.0),
        }
    }

    /// Decompose into translation, scale, skew and rotation.
    ///
    /// Exact for translate/rotate/scale plus a single skew; other combinations
    /// have no unique decomposition and yield an approximation.
    pub fn extract(&self) -> Decomposed {
        let px = self.delta_transform(Point::new(0.0, 1.0));
        let py = self.delta_transform(Point::new(1.0, 0.0));
        let skew_x = px.y.atan2(px.x).to_degrees() - 90.0;
        Decomposed {
            x: self.e,
            y: self.f,
            skew_x,
            skew_y: py.y.atan2(py.x).to_degrees(),
            scale_x: self.a.hypot(self.b),
            scale_y: self.c.hypot(self.d),
            rotation: skew_x,
        }
    }

    /// Apply to a point.
    pub fn apply(&self, p: Point) -> Point {
        self.to_affine() * p
    }

    fn delta_transform(&self, p: Point) -> Point {
        Point::new(self.a * p.x + self.c * p.y, self.b * p.x + self.d * p.y)
    }

    fn around(&self, cx: f64, cy: f64, core: &AffineTransform) -> Self {
        self.multiply(&Self::new(1.0, 0.0, 0.0, 1.0, cx, cy))
            .multiply(core)
            .multiply(&Self::new(1.0, 0.0, 0.0, 1.0, -cx, -cy))
    }

    pub fn morph(mut self, destination: impl Into<AffineTransform>) -> Self {
        self.destination = Some(destination.into().coeffs());
        self
    }

    pub fn destination(&self) -> Option<AffineTransform> {
        self.destination.map(Self::from_coeffs)
    }
}

fn matrix_parts(s: &str) -> impl Iterator<Item = &str> {
    let s = s.trim();
    let inner = s
        .strip_prefix("matrix(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(s);
    inner.split(',').map(str::trim)
}

impl Lerp for AffineTransform {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let (from, to) = (a.coeffs(), b.coeffs());
        Self::from_coeffs(std::array::from_fn(|i| f64::lerp(&from[i], &to[i], t)))
    }
}

impl Morphable for AffineTransform {
    fn at(&self, pos: f64) -> Self {
        match self.destination() {
            Some(dest) => Self::lerp(&Self::from_coeffs(self.coeffs()), &dest, pos),
            None => *self,
        }
    }

    fn has_destination(&self) -> bool {
        self.destination.is_some()
    }
}

impl FromStr for AffineTransform {
    type Err = MorphError;

    /// Strict form: exactly six finite numbers.
    fn from_str(s: &str) -> MorphResult<Self> {
        let parts: Vec<&str> = matrix_parts(s).collect();
        if parts.len() != 6 {
            return Err(MorphError::parse(format!(
                "matrix needs 6 coefficients, got {} in \"{s}\"",
                parts.len()
            )));
        }
        let mut coeffs = IDENTITY_COEFFS;
        for (slot, part) in coeffs.iter_mut().zip(parts) {
            *slot = part
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| MorphError::parse(format!("invalid matrix coefficient \"{part}\"")))?;
        }
        Ok(Self::from_coeffs(coeffs))
    }
}

impl fmt::Display for AffineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matrix({},{},{},{},{},{})",
            Num(self.a),
            Num(self.b),
            Num(self.c),
            Num(self.d),
            Num(self.e),
            Num(self.f)
        )
    }
}

impl From<Affine> for AffineTransform {
    fn from(m: Affine) -> Self {
        Self::from_coeffs(m.as_coeffs())
    }
}

impl From<AffineTransform> for Affine {
    fn from(m: AffineTransform) -> Self {
        m.to_affine()
    }
}

impl From<MatrixParts> for AffineTransform {
    fn from(p: MatrixParts) -> Self {
        Self::new(
            p.a.unwrap_or(IDENTITY_COEFFS[0]),
            p.b.unwrap_or(IDENTITY_COEFFS[1]),
            p.c.unwrap_or(IDENTITY_COEFFS[2]),
            p.d.unwrap_or(IDENTITY_COEFFS[3]),
            p.e.unwrap_or(IDENTITY_COEFFS[4]),
            p.f.unwrap_or(IDENTITY_COEFFS[5]),
        )
    }
}

impl From<[f64; 6]> for AffineTransform {
    fn from(coeffs: [f64; 6]) -> Self {
        Self::from_coeffs(coeffs)
    }
}

impl From<&str> for AffineTransform {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl Serialize for AffineTransform {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AffineTransform {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Coeffs([f64; 6]),
            Parts(MatrixParts),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::Coeffs(c) => Ok(Self::from_coeffs(c)),
            Repr::Parts(p) => Ok(p.into()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
