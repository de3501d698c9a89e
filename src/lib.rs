#![forbid(unsafe_code)]
//! `morphfx` morphs typed visual values (unit numbers, colors, point lists,
//! paths, affine matrices, viewboxes) and animates them on host-owned targets.
//!
//! The host side is a pair of traits ([`PropertyAccessor`], [`MeasurementProvider`])
//! plus a [`FrameClock`]; [`Registry`] and [`ManualClock`] are in-memory
//! implementations of both.

pub(crate) mod foundation;

pub mod animation;
pub mod element;
pub mod group;
pub mod host;
pub mod transform;
pub mod values;

pub use animation::{
    AnimOptions, Ease, Easing, FrameClock, Fx, Loop, ManualClock, Morph, Phase, Sampler,
    SharedClock, Timing,
};
pub use element::{Context, Element, Positioned, Styleable, Transformable};
pub use foundation::core::{BBox, Point, TargetId};
pub use foundation::error::{MorphError, MorphResult};
pub use group::{Set, SetFx};
pub use host::{
    Host, MeasurementProvider, NodeKind, PropValue, Property, PropertyAccessor, Registry,
    SharedHost,
};
pub use transform::{AffineTransform, Axis, Decomposed, MatrixParts, TransformOp};
pub use values::color::Color;
pub use values::geometry::{Geometry, GeometryMeasure, KurboBounds};
pub use values::list::OrderedList;
pub use values::path::{PathArray, PathCommand, PathSegment};
pub use values::points::PointArray;
pub use values::scalar::{Scalar, Unit};
pub use values::viewbox::ViewBox;
pub use values::{Lerp, Morphable};
