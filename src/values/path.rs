//! Path mini-language values.
//!
//! Every stored segment is absolute and upper-case. Parsing resolves relative
//! commands, implicit repetition and `Z` subpath returns; the textual form
//! written back is `M0 0 L10 10 Z ` (letter glued to its first argument,
//! trailing space included).

use std::fmt;
use std::str::FromStr;

use kurbo::{Arc, PathEl, SvgArc};

use crate::foundation::core::{BBox, BezPath, Num, Point, Vec2, radians};
use crate::foundation::error::{MorphError, MorphResult};
use crate::values::geometry::GeometryMeasure;
use crate::values::list::OrderedList;
use crate::values::path_lexer::PathLexer;
use crate::values::points::rescale;
use crate::values::{Lerp, Morphable};

const ARC_TOLERANCE: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathCommand {
    MoveTo,
    LineTo,
    Horizontal,
    Vertical,
    CubicTo,
    SmoothCubicTo,
    QuadTo,
    SmoothQuadTo,
    Arc,
    Close,
}

impl PathCommand {
    pub fn letter(self) -> char {
        match self {
            Self::MoveTo => 'M',
            Self::LineTo => 'L',
            Self::Horizontal => 'H',
            Self::Vertical => 'V',
            Self::CubicTo => 'C',
            Self::SmoothCubicTo => 'S',
            Self::QuadTo => 'Q',
            Self::SmoothQuadTo => 'T',
            Self::Arc => 'A',
            Self::Close => 'Z',
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Self::MoveTo | Self::LineTo | Self::SmoothQuadTo => 2,
            Self::Horizontal | Self::Vertical => 1,
            Self::CubicTo => 6,
            Self::SmoothCubicTo | Self::QuadTo => 4,
            Self::Arc => 7,
            Self::Close => 0,
        }
    }

    /// Command for a letter of either case, plus whether it was relative.
    pub fn from_letter(c: char) -> Option<(Self, bool)> {
        let cmd = match c.to_ascii_uppercase() {
            'M' => Self::MoveTo,
            'L' => Self::LineTo,
            'H' => Self::Horizontal,
            'V' => Self::Vertical,
            'C' => Self::CubicTo,
            'S' => Self::SmoothCubicTo,
            'Q' => Self::QuadTo,
            'T' => Self::SmoothQuadTo,
            'A' => Self::Arc,
            'Z' => Self::Close,
            _ => return None,
        };
        Some((cmd, c.is_ascii_lowercase()))
    }

    /// Indices of the x component of every coordinate pair in the arguments.
    fn pair_starts(self) -> &'static [usize] {
        match self {
            Self::MoveTo | Self::LineTo | Self::SmoothQuadTo => &[0],
            Self::CubicTo => &[0, 2, 4],
            Self::SmoothCubicTo | Self::QuadTo => &[0, 2],
            Self::Arc => &[5],
            Self::Horizontal | Self::Vertical | Self::Close => &[],
        }
    }

    fn is_arc_flag(self, index: usize) -> bool {
        self == Self::Arc && (index == 3 || index == 4)
    }
}

/// One absolute path command with its fixed-arity arguments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSegment {
    pub command: PathCommand,
    args: [f64; 7],
}

impl PathSegment {
    /// Build a segment; missing arguments are `0`, extra ones are ignored.
    pub fn new(command: PathCommand, args: &[f64]) -> Self {
        let mut slots = [0.0; 7];
        for (slot, v) in slots.iter_mut().zip(args.iter().take(command.arity())) {
            *slot = *v;
        }
        Self {
            command,
            args: slots,
        }
    }

    pub fn args(&self) -> &[f64] {
        &self.args[..self.command.arity()]
    }

    /// Position of the cursor after this segment, starting from `cursor`.
    ///
    /// `Z` returns `subpath_start`.
    fn advance(&self, cursor: Point, subpath_start: Point) -> Point {
        match self.command {
            PathCommand::Horizontal => Point::new(self.args[0], cursor.y),
            PathCommand::Vertical => Point::new(cursor.x, self.args[0]),
            PathCommand::Close => subpath_start,
            cmd => match cmd.pair_starts().last() {
                Some(&i) => Point::new(self.args[i], self.args[i + 1]),
                None => cursor,
            },
        }
    }

    fn point(&self, i: usize) -> Point {
        Point::new(self.args[i], self.args[i + 1])
    }

    fn map_pairs(&mut self, mut f: impl FnMut(f64, f64) -> (f64, f64)) {
        for &i in self.command.pair_starts() {
            let (x, y) = f(self.args[i], self.args[i + 1]);
            self.args[i] = x;
            self.args[i + 1] = y;
        }
    }
}

impl Lerp for PathSegment {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        if a.command != b.command {
            return if t >= 1.0 { *b } else { *a };
        }
        let mut out = *a;
        for i in 0..a.command.arity() {
            out.args[i] = if a.command.is_arc_flag(i) {
                if t >= 1.0 { b.args[i] } else { a.args[i] }
            } else {
                f64::lerp(&a.args[i], &b.args[i], t)
            };
        }
        out
    }
}

fn fallback() -> [PathSegment; 1] {
    [PathSegment::new(PathCommand::MoveTo, &[0.0, 0.0])]
}

/// Absolutized path: an ordered list of [`PathSegment`]s.
#[derive(Clone, Debug, PartialEq)]
pub struct PathArray(OrderedList<PathSegment>);

impl Default for PathArray {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl PathArray {
    /// Build from segments; an empty list becomes `M 0 0`.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(OrderedList::new(segments, &fallback()))
    }

    /// Lenient parse; malformed or empty input yields `M 0 0`.
    pub fn parse(s: &str) -> Self {
        s.parse().unwrap_or_else(|err| {
            tracing::debug!(input = s, %err, "path fallback");
            Self::default()
        })
    }

    /// `M` to the first point, then `L` through the rest.
    pub fn polyline(points: &[Point]) -> Self {
        let segments = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let cmd = if i == 0 {
                    PathCommand::MoveTo
                } else {
                    PathCommand::LineTo
                };
                PathSegment::new(cmd, &[p.x, p.y])
            })
            .collect();
        Self::new(segments)
    }

    /// Convert a `kurbo` path; every element maps onto one segment.
    pub fn from_bez_path(path: &BezPath) -> Self {
        let segments = path
            .elements()
            .iter()
            .map(|el| match *el {
                PathEl::MoveTo(p) => PathSegment::new(PathCommand::MoveTo, &[p.x, p.y]),
                PathEl::LineTo(p) => PathSegment::new(PathCommand::LineTo, &[p.x, p.y]),
                PathEl::QuadTo(p1, p2) => {
                    PathSegment::new(PathCommand::QuadTo, &[p1.x, p1.y, p2.x, p2.y])
                }
                PathEl::CurveTo(p1, p2, p3) => PathSegment::new(
                    PathCommand::CubicTo,
                    &[p1.x, p1.y, p2.x, p2.y, p3.x, p3.y],
                ),
                PathEl::ClosePath => PathSegment::new(PathCommand::Close, &[]),
            })
            .collect();
        Self::new(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn destination(&self) -> Option<PathArray> {
        self.0.destination().map(|d| Self::new(d.to_vec()))
    }

    /// The destination as requested, without padding entries.
    pub fn settled_destination(&self) -> Option<PathArray> {
        self.0.settled_destination().map(|d| Self::new(d.to_vec()))
    }

    pub fn bbox<M: GeometryMeasure + ?Sized>(&self, measure: &M) -> BBox {
        measure.path_bbox(self.segments())
    }

    /// Translate so the measured box starts at `(x, y)`.
    ///
    /// Arc radii, rotation and flags are left alone.
    pub fn move_to<M: GeometryMeasure + ?Sized>(&mut self, x: f64, y: f64, measure: &M) -> &mut Self {
        let b = self.bbox(measure);
        let (dx, dy) = (x - b.x, y - b.y);
        if !(dx.is_finite() && dy.is_finite()) {
            return self;
        }
        for seg in self.0.values_mut() {
            match seg.command {
                PathCommand::Horizontal => seg.args[0] += dx,
                PathCommand::Vertical => seg.args[0] += dy,
                _ => seg.map_pairs(|px, py| (px + dx, py + dy)),
            }
        }
        self
    }

    /// Rescale against the measured box; arc radii scale by the plain ratios.
    pub fn size<M: GeometryMeasure + ?Sized>(
        &mut self,
        width: f64,
        height: f64,
        measure: &M,
    ) -> &mut Self {
        let b = self.bbox(measure);
        for seg in self.0.values_mut() {
            match seg.command {
                PathCommand::Horizontal => seg.args[0] = rescale(seg.args[0], b.x, b.width, width),
                PathCommand::Vertical => seg.args[0] = rescale(seg.args[0], b.y, b.height, height),
                cmd => {
                    if cmd == PathCommand::Arc {
                        seg.args[0] = rescale(seg.args[0], 0.0, b.width, width);
                        seg.args[1] = rescale(seg.args[1], 0.0, b.height, height);
                    }
                    seg.map_pairs(|px, py| {
                        (
                            rescale(px, b.x, b.width, width),
                            rescale(py, b.y, b.height, height),
                        )
                    });
                }
            }
        }
        self
    }

    /// Cursor position after every non-`Z` segment.
    pub fn endpoints(&self) -> Vec<Point> {
        let mut cursor = Point::ORIGIN;
        let mut start = Point::ORIGIN;
        let mut out = Vec::with_capacity(self.len());
        for seg in self.segments() {
            cursor = seg.advance(cursor, start);
            match seg.command {
                PathCommand::Close => continue,
                PathCommand::MoveTo => start = cursor,
                _ => {}
            }
            out.push(cursor);
        }
        out
    }

    /// Flatten into a `kurbo` path. Smooth commands reflect the previous control
    /// point and arcs become cubic approximations.
    pub fn to_bez_path(&self) -> BezPath {
        let mut bez = BezPath::new();
        let mut cursor = Point::ORIGIN;
        let mut start = Point::ORIGIN;
        let mut open = false;
        let mut last_cubic: Option<Point> = None;
        let mut last_quad: Option<Point> = None;

        for seg in self.segments() {
            let end = seg.advance(cursor, start);
            if seg.command == PathCommand::MoveTo {
                bez.move_to(end);
                open = true;
                start = end;
                cursor = end;
                last_cubic = None;
                last_quad = None;
                continue;
            }
            if seg.command == PathCommand::Close {
                if open {
                    bez.close_path();
                    open = false;
                }
                cursor = start;
                last_cubic = None;
                last_quad = None;
                continue;
            }
            if !open {
                bez.move_to(cursor);
                open = true;
            }

            let (mut cubic, mut quad) = (None, None);
            match seg.command {
                PathCommand::CubicTo => {
                    bez.curve_to(seg.point(0), seg.point(2), end);
                    cubic = Some(seg.point(2));
                }
                PathCommand::SmoothCubicTo => {
                    let c1 = reflect(last_cubic, cursor);
                    bez.curve_to(c1, seg.point(0), end);
                    cubic = Some(seg.point(0));
                }
                PathCommand::QuadTo => {
                    bez.quad_to(seg.point(0), end);
                    quad = Some(seg.point(0));
                }
                PathCommand::SmoothQuadTo => {
                    let c = reflect(last_quad, cursor);
                    bez.quad_to(c, end);
                    quad = Some(c);
                }
                PathCommand::Arc => {
                    let arc = SvgArc {
                        from: cursor,
                        to: end,
                        radii: Vec2::new(seg.args[0], seg.args[1]),
                        x_rotation: radians(seg.args[2]),
                        large_arc: seg.args[3] != 0.0,
                        sweep: seg.args[4] != 0.0,
                    };
                    match Arc::from_svg_arc(&arc) {
                        Some(arc) => arc.append_iter(ARC_TOLERANCE).for_each(|el| bez.push(el)),
                        None => bez.line_to(end),
                    }
                }
                _ => bez.line_to(end),
            }
            last_cubic = cubic;
            last_quad = quad;
            cursor = end;
        }
        bez
    }

    pub fn morph(self, destination: impl Into<PathArray>) -> Self {
        Self(self.0.morph(destination.into().0.into_values()))
    }

    /// Drop consecutive repeats left behind by morph padding.
    pub fn settle(&mut self) -> &[PathSegment] {
        self.0.dedup()
    }
}

fn reflect(control: Option<Point>, cursor: Point) -> Point {
    match control {
        Some(c) => Point::new(2.0 * cursor.x - c.x, 2.0 * cursor.y - c.y),
        None => cursor,
    }
}

impl Morphable for PathArray {
    fn at(&self, pos: f64) -> Self {
        Self(self.0.at(pos))
    }

    fn has_destination(&self) -> bool {
        self.0.has_destination()
    }
}

impl FromStr for PathArray {
    type Err = MorphError;

    fn from_str(s: &str) -> MorphResult<Self> {
        let mut lx = PathLexer::new(s);
        let mut segments = Vec::new();
        let mut cursor = Point::ORIGIN;
        let mut start = Point::ORIGIN;
        let mut repeat: Option<(PathCommand, bool)> = None;

        while !lx.is_eof() {
            let (cmd, relative) = match lx.command() {
                Some(c) => PathCommand::from_letter(c).ok_or_else(|| {
                    MorphError::parse(format!("path: unknown command '{c}' in \"{s}\""))
                })?,
                None => match repeat {
                    Some((PathCommand::Close, _)) | None => {
                        return Err(MorphError::parse(format!(
                            "path: expected command in \"{s}\""
                        )));
                    }
                    // extra pairs after a move are implicit lines
                    Some((PathCommand::MoveTo, rel)) => (PathCommand::LineTo, rel),
                    Some(prev) => prev,
                },
            };

            let mut args = [0.0; 7];
            for (i, slot) in args.iter_mut().enumerate().take(cmd.arity()) {
                *slot = if cmd.is_arc_flag(i) {
                    lx.flag()?
                } else {
                    lx.number()?
                };
            }
            let mut seg = PathSegment {
                command: cmd,
                args,
            };

            if relative {
                match cmd {
                    PathCommand::Horizontal => seg.args[0] += cursor.x,
                    PathCommand::Vertical => seg.args[0] += cursor.y,
                    _ => seg.map_pairs(|x, y| (x + cursor.x, y + cursor.y)),
                }
            }

            cursor = seg.advance(cursor, start);
            if cmd == PathCommand::MoveTo {
                start = cursor;
            }
            segments.push(seg);
            repeat = Some((cmd, relative));
        }

        if segments.is_empty() {
            return Err(MorphError::parse("empty path"));
        }
        Ok(Self::new(segments))
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command.letter())?;
        for (i, v) in self.args().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", Num(*v))?;
        }
        Ok(())
    }
}

impl fmt::Display for PathArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seg in self.segments() {
            write!(f, "{seg} ")?;
        }
        Ok(())
    }
}

impl From<&str> for PathArray {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<Vec<PathSegment>> for PathArray {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self::new(segments)
    }
}

impl From<&BezPath> for PathArray {
    fn from(path: &BezPath) -> Self {
        Self::from_bez_path(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/values/path.rs"]
mod tests;
