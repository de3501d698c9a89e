//! Typed, morphable values.
//!
//! Every value here can carry a destination and be sampled at a position in
//! `[0, 1]`. Lenient constructors never fail: malformed input resolves to a
//! documented default. Strict parsing is available through `FromStr`.

pub mod color;
pub mod geometry;
pub mod list;
pub mod path;
mod path_lexer;
pub mod points;
pub mod scalar;
pub mod viewbox;

use crate::foundation::core::Point;

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

/// A value that can be sampled between itself and an attached destination.
pub trait Morphable: Clone {
    /// Sample at `pos`; returns a copy of `self` when no destination is attached.
    fn at(&self, pos: f64) -> Self;

    fn has_destination(&self) -> bool;
}
