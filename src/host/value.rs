use std::fmt;

use crate::foundation::core::{Num, leading_float};
use crate::transform::AffineTransform;
use crate::values::color::Color;
use crate::values::geometry::Geometry;
use crate::values::path::PathArray;
use crate::values::points::PointArray;
use crate::values::scalar::Scalar;
use crate::values::viewbox::ViewBox;

/// Value carried across the property accessor.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    Number(f64),
    Scalar(Scalar),
    Color(Color),
    Text(String),
    Points(PointArray),
    Path(PathArray),
    Transform(AffineTransform),
    ViewBox(ViewBox),
}

impl PropValue {
    /// Numeric reading; text yields its leading number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Scalar(s) => Some(s.value),
            Self::Text(s) => leading_float(s.trim()),
            _ => None,
        }
    }

    pub fn to_scalar(&self) -> Scalar {
        match self {
            Self::Number(v) => Scalar::new(*v),
            Self::Scalar(s) => Scalar::from(s),
            other => Scalar::parse(&other.to_string()),
        }
    }

    pub fn to_color(&self) -> Color {
        match self {
            Self::Color(c) => *c,
            other => Color::parse(&other.to_string()),
        }
    }

    pub fn to_geometry(&self) -> Option<Geometry> {
        match self {
            Self::Points(p) => Some(Geometry::Points(p.clone())),
            Self::Path(p) => Some(Geometry::Path(p.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{}", Num(*v)),
            Self::Scalar(s) => write!(f, "{s}"),
            Self::Color(c) => write!(f, "{c}"),
            Self::Text(s) => f.write_str(s),
            Self::Points(p) => write!(f, "{p}"),
            Self::Path(p) => write!(f, "{p}"),
            Self::Transform(m) => write!(f, "{m}"),
            Self::ViewBox(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for PropValue {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Scalar> for PropValue {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<Color> for PropValue {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

impl From<PointArray> for PropValue {
    fn from(p: PointArray) -> Self {
        Self::Points(p)
    }
}

impl From<PathArray> for PropValue {
    fn from(p: PathArray) -> Self {
        Self::Path(p)
    }
}

impl From<Geometry> for PropValue {
    fn from(g: Geometry) -> Self {
        match g {
            Geometry::Points(p) => Self::Points(p),
            Geometry::Path(p) => Self::Path(p),
        }
    }
}

impl From<AffineTransform> for PropValue {
    fn from(m: AffineTransform) -> Self {
        Self::Transform(m)
    }
}

impl From<ViewBox> for PropValue {
    fn from(v: ViewBox) -> Self {
        Self::ViewBox(v)
    }
}
