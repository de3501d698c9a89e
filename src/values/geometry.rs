use std::fmt;

use kurbo::Shape;

use crate::foundation::core::{BBox, Point};
use crate::values::path::{PathArray, PathSegment};
use crate::values::points::PointArray;
use crate::values::Morphable;

/// Bounds of free-standing geometry values.
///
/// Hosts that render strokes or markers can override these; the defaults are the
/// analytic bounds of the fill geometry.
pub trait GeometryMeasure {
    fn points_bbox(&self, points: &[Point]) -> BBox {
        let mut it = points.iter();
        let Some(first) = it.next() else {
            return BBox::default();
        };
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in it {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        BBox::new(x0, y0, x1 - x0, y1 - y0)
    }

    fn path_bbox(&self, segments: &[PathSegment]) -> BBox {
        let path = PathArray::new(segments.to_vec());
        let bez = path.to_bez_path();
        if bez.segments().next().is_none() {
            return self.points_bbox(&path.endpoints());
        }
        BBox::from(bez.bounding_box())
    }
}

/// Analytic bounds via `kurbo` (exact curve extrema, arcs approximated).
#[derive(Clone, Copy, Debug, Default)]
pub struct KurboBounds;

impl GeometryMeasure for KurboBounds {}

/// Morphable shape geometry: a point list or a path.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Points(PointArray),
    Path(PathArray),
}

impl Geometry {
    pub fn bbox<M: GeometryMeasure + ?Sized>(&self, measure: &M) -> BBox {
        match self {
            Self::Points(p) => p.bbox(measure),
            Self::Path(p) => p.bbox(measure),
        }
    }

    pub fn move_to<M: GeometryMeasure + ?Sized>(&mut self, x: f64, y: f64, measure: &M) {
        match self {
            Self::Points(p) => {
                p.move_to(x, y, measure);
            }
            Self::Path(p) => {
                p.move_to(x, y, measure);
            }
        }
    }

    pub fn size<M: GeometryMeasure + ?Sized>(&mut self, width: f64, height: f64, measure: &M) {
        match self {
            Self::Points(p) => {
                p.size(width, height, measure);
            }
            Self::Path(p) => {
                p.size(width, height, measure);
            }
        }
    }

    /// Convert `other` into the same kind as `self`.
    ///
    /// Points become `M`/`L` polylines; paths keep their segment endpoints.
    pub fn coerce_like(&self, other: Geometry) -> Geometry {
        match (self, other) {
            (Self::Points(_), Self::Path(path)) => Self::Points(PointArray::new(path.endpoints())),
            (Self::Path(_), Self::Points(points)) => {
                Self::Path(PathArray::polyline(points.points()))
            }
            (_, other) => other,
        }
    }

    /// Attach `destination` (coerced to this kind).
    pub fn morph(self, destination: Geometry) -> Geometry {
        match (self, destination) {
            (Self::Points(src), Self::Points(dst)) => Self::Points(src.morph(dst)),
            (Self::Path(src), Self::Path(dst)) => Self::Path(src.morph(dst)),
            (src, dst) => {
                let dst = src.coerce_like(dst);
                src.morph(dst)
            }
        }
    }

    /// Destination with padding duplicates removed.
    pub fn settled_destination(&self) -> Option<Geometry> {
        match self {
            Self::Points(p) => p.settled_destination().map(Self::Points),
            Self::Path(p) => p.settled_destination().map(Self::Path),
        }
    }
}

impl Morphable for Geometry {
    fn at(&self, pos: f64) -> Self {
        match self {
            Self::Points(p) => Self::Points(p.at(pos)),
            Self::Path(p) => Self::Path(p.at(pos)),
        }
    }

    fn has_destination(&self) -> bool {
        match self {
            Self::Points(p) => p.has_destination(),
            Self::Path(p) => p.has_destination(),
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Points(p) => fmt::Display::fmt(p, f),
            Self::Path(p) => fmt::Display::fmt(p, f),
        }
    }
}

impl From<PointArray> for Geometry {
    fn from(p: PointArray) -> Self {
        Self::Points(p)
    }
}

impl From<PathArray> for Geometry {
    fn from(p: PathArray) -> Self {
        Self::Path(p)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/values/geometry.rs"]
mod tests;
