use std::fmt;
use std::str::FromStr;

use crate::foundation::core::{BBox, Line, Num, Point};
use crate::foundation::error::{MorphError, MorphResult};
use crate::values::geometry::GeometryMeasure;
use crate::values::list::{OrderedList, split_tokens};
use crate::values::Morphable;

const FALLBACK: [Point; 1] = [Point::ORIGIN];

/// Polyline/polygon point list (`"x,y x,y ..."`).
#[derive(Clone, Debug, PartialEq)]
pub struct PointArray(OrderedList<Point>);

impl Default for PointArray {
    fn default() -> Self {
        Self(OrderedList::new(Vec::new(), &FALLBACK))
    }
}

impl PointArray {
    /// Build from points; an empty list becomes the single origin point.
    pub fn new(points: Vec<Point>) -> Self {
        Self(OrderedList::new(points, &FALLBACK))
    }

    /// Lenient parse; malformed or empty input yields the single origin point.
    pub fn parse(s: &str) -> Self {
        s.parse().unwrap_or_else(|err| {
            tracing::debug!(input = s, %err, "point list fallback");
            Self::default()
        })
    }

    pub fn points(&self) -> &[Point] {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn destination(&self) -> Option<PointArray> {
        self.0.destination().map(|d| Self::new(d.to_vec()))
    }

    /// The destination as requested, without padding entries.
    pub fn settled_destination(&self) -> Option<PointArray> {
        self.0.settled_destination().map(|d| Self::new(d.to_vec()))
    }

    /// The first two points as a line segment.
    pub fn to_line(&self) -> Option<Line> {
        match self.points() {
            [p0, p1, ..] => Some(Line::new(*p0, *p1)),
            _ => None,
        }
    }

    pub fn bbox<M: GeometryMeasure + ?Sized>(&self, measure: &M) -> BBox {
        measure.points_bbox(self.points())
    }

    /// Translate so the measured box starts at `(x, y)`.
    pub fn move_to<M: GeometryMeasure + ?Sized>(&mut self, x: f64, y: f64, measure: &M) -> &mut Self {
        let b = self.bbox(measure);
        let (dx, dy) = (x - b.x, y - b.y);
        if dx.is_finite() && dy.is_finite() {
            for p in self.0.values_mut() {
                p.x += dx;
                p.y += dy;
            }
        }
        self
    }

    /// Rescale so the measured box becomes `width` x `height`, anchored at its origin.
    pub fn size<M: GeometryMeasure + ?Sized>(
        &mut self,
        width: f64,
        height: f64,
        measure: &M,
    ) -> &mut Self {
        let b = self.bbox(measure);
        for p in self.0.values_mut() {
            p.x = rescale(p.x, b.x, b.width, width);
            p.y = rescale(p.y, b.y, b.height, height);
        }
        self
    }

    pub fn morph(self, destination: impl Into<PointArray>) -> Self {
        Self(self.0.morph(destination.into().0.into_values()))
    }

    pub fn settle(&mut self) -> &[Point] {
        self.0.settle()
    }

    pub fn reverse(&mut self) -> &mut Self {
        self.0.reverse();
        self
    }
}

/// Map `v` from a span of `from_len` starting at `origin` onto a span of `to_len`.
///
/// A degenerate source span leaves the coordinate where it is.
pub(crate) fn rescale(v: f64, origin: f64, from_len: f64, to_len: f64) -> f64 {
    if from_len == 0.0 {
        return v;
    }
    (v - origin) * to_len / from_len + origin
}

impl Morphable for PointArray {
    fn at(&self, pos: f64) -> Self {
        Self(self.0.at(pos))
    }

    fn has_destination(&self) -> bool {
        self.0.has_destination()
    }
}

impl FromStr for PointArray {
    type Err = MorphError;

    fn from_str(s: &str) -> MorphResult<Self> {
        let points = split_tokens(s)
            .map(parse_pair)
            .collect::<MorphResult<Vec<_>>>()?;
        if points.is_empty() {
            return Err(MorphError::parse("empty point list"));
        }
        Ok(Self::new(points))
    }
}

fn parse_pair(tok: &str) -> MorphResult<Point> {
    let coord = |c: Option<&str>| {
        c.and_then(|c| c.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .ok_or_else(|| MorphError::parse(format!("invalid point \"{tok}\"")))
    };
    let mut parts = tok.split(',');
    let x = coord(parts.next())?;
    let y = coord(parts.next())?;
    if parts.next().is_some() {
        return Err(MorphError::parse(format!("invalid point \"{tok}\"")));
    }
    Ok(Point::new(x, y))
}

impl fmt::Display for PointArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.points().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{},{}", Num(p.x), Num(p.y))?;
        }
        Ok(())
    }
}

impl From<&str> for PointArray {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<Vec<Point>> for PointArray {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl From<Vec<(f64, f64)>> for PointArray {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points.into_iter().map(Point::from).collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/values/points.rs"]
mod tests;
