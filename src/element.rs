//! Element handles and the capability traits shared by elements, groups and
//! schedulers.
//!
//! An [`Element`] is a [`TargetId`] plus the [`Context`] that owns the host, the
//! clock and one [`Fx`] per animated target. Setters on an element write
//! through the host immediately; the same calls on an [`Fx`] queue morphs.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::animation::clock::SharedClock;
use crate::animation::fx::Fx;
use crate::animation::options::AnimOptions;
use crate::foundation::core::{BBox, TargetId};
use crate::foundation::error::{MorphError, MorphResult};
use crate::host::value::PropValue;
use crate::host::{Property, SharedHost};
use crate::transform::{AffineTransform, Axis, Decomposed, TransformOp};
use crate::values::geometry::Geometry;
use crate::values::viewbox::ViewBox;

/// Attribute and style writes.
pub trait Styleable {
    fn attr(&self, name: &str, value: impl Into<PropValue>) -> &Self;

    fn style(&self, name: &str, value: impl Into<PropValue>) -> &Self;

    fn fill(&self, color: impl Into<PropValue>) -> &Self {
        self.attr("fill", color)
    }

    fn stroke(&self, color: impl Into<PropValue>) -> &Self {
        self.attr("stroke", color)
    }

    fn opacity(&self, opacity: f64) -> &Self {
        self.attr("opacity", opacity)
    }
}

/// Bounding-box driven position and size.
pub trait Positioned {
    fn x(&self, x: f64) -> &Self;

    fn y(&self, y: f64) -> &Self;

    fn cx(&self, cx: f64) -> &Self;

    fn cy(&self, cy: f64) -> &Self;

    /// Relative to the current `x`.
    fn dx(&self, dx: f64) -> &Self;

    fn dy(&self, dy: f64) -> &Self;

    fn size(&self, width: f64, height: f64) -> &Self;

    fn move_to(&self, x: f64, y: f64) -> &Self {
        self.x(x).y(y)
    }

    fn center(&self, cx: f64, cy: f64) -> &Self {
        self.cx(cx).cy(cy)
    }

    fn dmove(&self, dx: f64, dy: f64) -> &Self {
        self.dx(dx).dy(dy)
    }
}

/// Transform steps composed onto the current matrix.
pub trait Transformable {
    fn transform(&self, op: impl Into<TransformOp>) -> &Self;

    /// Rotate around the bounding-box center.
    fn rotate(&self, degrees: f64) -> &Self {
        self.transform(TransformOp::rotate(degrees))
    }

    fn rotate_around(&self, degrees: f64, cx: f64, cy: f64) -> &Self {
        self.transform(TransformOp::Rotate {
            degrees,
            cx: Some(cx),
            cy: Some(cy),
        })
    }

    /// Scale from the bounding-box origin.
    fn scale(&self, sx: f64, sy: f64) -> &Self {
        self.transform(TransformOp::scale(sx, sy))
    }

    fn scale_around(&self, sx: f64, sy: f64, cx: f64, cy: f64) -> &Self {
        self.transform(TransformOp::Scale {
            sx,
            sy,
            cx: Some(cx),
            cy: Some(cy),
        })
    }

    fn skew(&self, x: f64, y: f64) -> &Self {
        self.transform(TransformOp::Skew { x, y })
    }

    fn translate(&self, x: f64, y: f64) -> &Self {
        self.transform(TransformOp::Translate { x, y })
    }

    fn flip(&self, axis: Axis) -> &Self {
        self.transform(TransformOp::Flip { axis })
    }
}

/// Owner of the host, the clock and the per-target schedulers.
pub struct Context {
    host: SharedHost,
    clock: SharedClock,
    fx: RefCell<HashMap<TargetId, Fx>>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("animated", &self.fx.borrow().len())
            .finish_non_exhaustive()
    }
}

impl Context {
    pub fn new(host: SharedHost, clock: SharedClock) -> Rc<Self> {
        Rc::new(Self {
            host,
            clock,
            fx: RefCell::new(HashMap::new()),
        })
    }

    pub fn host(&self) -> &SharedHost {
        &self.host
    }

    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    pub fn element(self: &Rc<Self>, id: TargetId) -> Element {
        Element {
            id,
            ctx: Rc::clone(self),
        }
    }

    /// Scheduler of `id`, if it was ever animated.
    pub fn fx(&self, id: TargetId) -> Option<Fx> {
        self.fx.borrow().get(&id).cloned()
    }

    /// Drop the scheduler of `id`, cancelling anything it had pending.
    pub fn forget(&self, id: TargetId) -> Option<Fx> {
        let fx = self.fx.borrow_mut().remove(&id);
        if let Some(fx) = &fx {
            fx.stop(false);
        }
        fx
    }

    fn fx_for(&self, id: TargetId) -> Fx {
        self.fx
            .borrow_mut()
            .entry(id)
            .or_insert_with(|| Fx::new(id, Rc::clone(&self.host), Rc::clone(&self.clock)))
            .clone()
    }
}

/// Handle to one target of a [`Context`].
#[derive(Clone)]
pub struct Element {
    id: TargetId,
    ctx: Rc<Context>,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(&self.id.0).finish()
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Rc::ptr_eq(&self.ctx, &other.ctx)
    }
}

impl Element {
    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn context(&self) -> &Rc<Context> {
        &self.ctx
    }

    pub fn get(&self, property: &Property) -> Option<PropValue> {
        self.ctx.host.borrow().get(self.id, property)
    }

    /// Numeric reading of `property`; `0` when absent or non-numeric.
    pub fn number(&self, property: &Property) -> f64 {
        self.get(property).and_then(|v| v.as_f64()).unwrap_or(0.0)
    }

    pub fn bbox(&self) -> BBox {
        self.ctx.host.borrow().bbox(self.id)
    }

    fn set(&self, property: &Property, value: PropValue) -> &Self {
        self.ctx.host.borrow_mut().set(self.id, property, value);
        self
    }

    pub fn geometry(&self) -> Option<Geometry> {
        self.get(&Property::Plot).and_then(|v| v.to_geometry())
    }

    pub fn plot(&self, geometry: impl Into<Geometry>) -> &Self {
        self.set(&Property::Plot, geometry.into().into())
    }

    pub fn viewbox(&self, viewbox: impl Into<ViewBox>) -> &Self {
        self.set(&Property::ViewBox, viewbox.into().into())
    }

    /// Current transform matrix; identity when none is set.
    pub fn matrix(&self) -> AffineTransform {
        match self.get(&Property::Transform) {
            Some(PropValue::Transform(m)) => m,
            Some(other) => AffineTransform::parse(&other.to_string()),
            None => AffineTransform::IDENTITY,
        }
    }

    pub fn untransform(&self) -> &Self {
        self.set(&Property::Transform, AffineTransform::IDENTITY.into())
    }

    pub fn transform_values(&self) -> Decomposed {
        self.matrix().extract()
    }

    /// Start a new run on this target, discarding any previous one.
    pub fn animate(&self, opts: impl Into<AnimOptions>) -> Fx {
        let fx = self.ctx.fx_for(self.id);
        fx.animate(opts);
        fx
    }

    /// Like [`Element::animate`], but rejects invalid options and unknown targets.
    #[tracing::instrument(skip_all, fields(target_id = self.id.0))]
    pub fn try_animate(&self, opts: impl Into<AnimOptions>) -> MorphResult<Fx> {
        let opts = opts.into();
        opts.validate()?;
        if !self.ctx.host.borrow().contains(self.id) {
            return Err(MorphError::animation(format!(
                "target {} is not known to the host",
                self.id.0
            )));
        }
        Ok(self.animate(opts))
    }

    pub fn fx(&self) -> Option<Fx> {
        self.ctx.fx(self.id)
    }

    /// Stop this target's run, if any.
    pub fn stop(&self, fulfill: bool) -> &Self {
        if let Some(fx) = self.fx() {
            fx.stop(fulfill);
        }
        self
    }
}

impl Styleable for Element {
    fn attr(&self, name: &str, value: impl Into<PropValue>) -> &Self {
        self.set(&Property::attr(name), value.into())
    }

    fn style(&self, name: &str, value: impl Into<PropValue>) -> &Self {
        self.set(&Property::style(name), value.into())
    }
}

impl Positioned for Element {
    fn x(&self, x: f64) -> &Self {
        self.set(&Property::X, x.into())
    }

    fn y(&self, y: f64) -> &Self {
        self.set(&Property::Y, y.into())
    }

    fn cx(&self, cx: f64) -> &Self {
        self.set(&Property::Cx, cx.into())
    }

    fn cy(&self, cy: f64) -> &Self {
        self.set(&Property::Cy, cy.into())
    }

    fn dx(&self, dx: f64) -> &Self {
        self.x(self.number(&Property::X) + dx)
    }

    fn dy(&self, dy: f64) -> &Self {
        self.y(self.number(&Property::Y) + dy)
    }

    fn size(&self, width: f64, height: f64) -> &Self {
        self.set(&Property::Width, width.into())
            .set(&Property::Height, height.into())
    }
}

impl Transformable for Element {
    fn transform(&self, op: impl Into<TransformOp>) -> &Self {
        let base = self.matrix();
        let m = op.into().apply(&base, || self.bbox());
        self.set(&Property::Transform, m.into())
    }
}

#[cfg(test)]
#[path = "../tests/unit/element.rs"]
mod tests;
