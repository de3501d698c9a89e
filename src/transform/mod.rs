//! 2D affine matrices and the element-level transform operations built on them.

pub mod affine;
pub mod ops;

pub use affine::{AffineTransform, Axis, Decomposed, MatrixParts};
pub use ops::TransformOp;
