use serde::Deserialize;

use crate::foundation::core::BBox;
use crate::transform::affine::{AffineTransform, Axis};

/// One transform step applied on top of an element's current matrix.
///
/// Missing pivots are resolved against the element's bounds: rotation turns
/// around the box center, scale anchors at the box origin.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TransformOp {
    Matrix {
        matrix: AffineTransform,
    },
    Rotate {
        degrees: f64,
        #[serde(default)]
        cx: Option<f64>,
        #[serde(default)]
        cy: Option<f64>,
    },
    Scale {
        sx: f64,
        sy: f64,
        #[serde(default)]
        cx: Option<f64>,
        #[serde(default)]
        cy: Option<f64>,
    },
    Skew {
        x: f64,
        y: f64,
    },
    Translate {
        x: f64,
        y: f64,
    },
    Flip {
        axis: Axis,
    },
}

impl TransformOp {
    pub fn rotate(degrees: f64) -> Self {
        Self::Rotate {
            degrees,
            cx: None,
            cy: None,
        }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::Scale {
            sx,
            sy,
            cx: None,
            cy: None,
        }
    }

    pub fn uniform_scale(s: f64) -> Self {
        Self::scale(s, s)
    }

    /// Compose onto `base`. `bbox` is only consulted for a missing pivot.
    pub fn apply(&self, base: &AffineTransform, bbox: impl FnOnce() -> BBox) -> AffineTransform {
        match *self {
            Self::Matrix { matrix } => base.multiply(&matrix),
            Self::Rotate { degrees, cx, cy } => {
                let (cx, cy) = pivot(cx, cy, bbox, |b| (b.cx(), b.cy()));
                base.rotate_around(degrees, cx, cy)
            }
            Self::Scale { sx, sy, cx, cy } => {
                let (cx, cy) = pivot(cx, cy, bbox, |b| (b.x, b.y));
                base.scale_around(sx, sy, cx, cy)
            }
            Self::Skew { x, y } => base.skew(x, y),
            Self::Translate { x, y } => base.translate(x, y),
            Self::Flip { axis } => base.flip(axis),
        }
    }
}

fn pivot(
    cx: Option<f64>,
    cy: Option<f64>,
    bbox: impl FnOnce() -> BBox,
    default: impl Fn(BBox) -> (f64, f64),
) -> (f64, f64) {
    match (cx, cy) {
        (Some(cx), Some(cy)) => (cx, cy),
        _ => {
            let (dx, dy) = default(bbox());
            (cx.unwrap_or(dx), cy.unwrap_or(dy))
        }
    }
}

impl From<AffineTransform> for TransformOp {
    fn from(matrix: AffineTransform) -> Self {
        Self::Matrix { matrix }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/ops.rs"]
mod tests;
