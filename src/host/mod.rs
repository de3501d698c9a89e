//! Collaborator contracts between animated values and whatever owns the
//! targets: property access, measurement and geometry bounds.
//!
//! [`Registry`] is an in-memory implementation used by the crate's own tests and
//! by callers that do not bring a document model of their own.

pub mod defaults;
pub mod registry;
pub mod value;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::foundation::core::{BBox, TargetId};
use crate::values::geometry::GeometryMeasure;

pub use registry::{NodeKind, Registry};
pub use value::PropValue;

/// Addressable property of a target.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Attr(String),
    Style(String),
    X,
    Y,
    Cx,
    Cy,
    Width,
    Height,
    /// Point list or path geometry of a shape.
    Plot,
    Transform,
    ViewBox,
}

impl Property {
    pub fn attr(name: impl Into<String>) -> Self {
        Self::Attr(name.into())
    }

    pub fn style(name: impl Into<String>) -> Self {
        Self::Style(name.into())
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attr(name) => write!(f, "attr:{name}"),
            Self::Style(name) => write!(f, "style:{name}"),
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
            Self::Cx => f.write_str("cx"),
            Self::Cy => f.write_str("cy"),
            Self::Width => f.write_str("width"),
            Self::Height => f.write_str("height"),
            Self::Plot => f.write_str("plot"),
            Self::Transform => f.write_str("transform"),
            Self::ViewBox => f.write_str("viewbox"),
        }
    }
}

pub trait PropertyAccessor {
    fn get(&self, target: TargetId, property: &Property) -> Option<PropValue>;

    fn set(&mut self, target: TargetId, property: &Property, value: PropValue);

    /// Whether `target` is known to this accessor.
    fn contains(&self, _target: TargetId) -> bool {
        true
    }
}

pub trait MeasurementProvider {
    /// Rendered bounds of `target` in its own user space.
    fn bbox(&self, target: TargetId) -> BBox;
}

/// Everything an animated target needs from its owner.
pub trait Host: PropertyAccessor + MeasurementProvider + GeometryMeasure {}

impl<T> Host for T where T: PropertyAccessor + MeasurementProvider + GeometryMeasure {}

pub type SharedHost = Rc<RefCell<dyn Host>>;
