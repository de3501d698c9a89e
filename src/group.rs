//! Ordered element groups that fan operations out to every member.

use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::fx::{AfterFn, DuringFn, Fx, Phase};
use crate::animation::morph::Sampler;
use crate::animation::options::{AnimOptions, Loop};
use crate::element::{Element, Positioned, Styleable, Transformable};
use crate::foundation::core::BBox;
use crate::host::value::PropValue;
use crate::transform::TransformOp;
use crate::values::geometry::Geometry;

/// Ordered, possibly heterogeneous collection of elements.
///
/// Operations run on every member in insertion order. Members stay
/// independent: nothing is shared between them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Set {
    members: Vec<Element>,
}

impl Set {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, element: Element) -> &mut Self {
        self.members.push(element);
        self
    }

    /// Remove the first occurrence of `element`.
    pub fn remove(&mut self, element: &Element) -> &mut Self {
        if let Some(i) = self.index(element) {
            self.members.remove(i);
        }
        self
    }

    pub fn has(&self, element: &Element) -> bool {
        self.index(element).is_some()
    }

    pub fn index(&self, element: &Element) -> Option<usize> {
        self.members.iter().position(|m| m == element)
    }

    pub fn get(&self, i: usize) -> Option<&Element> {
        self.members.get(i)
    }

    pub fn first(&self) -> Option<&Element> {
        self.members.first()
    }

    pub fn last(&self) -> Option<&Element> {
        self.members.last()
    }

    pub fn clear(&mut self) -> &mut Self {
        self.members.clear();
        self
    }

    pub fn each(&self, mut f: impl FnMut(usize, &Element)) -> &Self {
        for (i, m) in self.members.iter().enumerate() {
            f(i, m);
        }
        self
    }

    pub fn members(&self) -> &[Element] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Union of member boxes; an empty set yields the zero box.
    pub fn bbox(&self) -> BBox {
        self.members
            .iter()
            .map(Element::bbox)
            .reduce(BBox::merge)
            .unwrap_or_default()
    }

    pub fn plot(&self, geometry: impl Into<Geometry>) -> &Self {
        let g = geometry.into();
        self.each(|_, m| {
            m.plot(g.clone());
        })
    }

    /// Start one run per member with the same options.
    pub fn animate(&self, opts: impl Into<AnimOptions>) -> SetFx {
        let opts = opts.into();
        tracing::debug!(members = self.members.len(), "group animate");
        SetFx {
            members: self
                .members
                .iter()
                .map(|m| m.animate(opts.clone()))
                .collect(),
        }
    }

    pub fn stop(&self, fulfill: bool) -> &Self {
        self.each(|_, m| {
            m.stop(fulfill);
        })
    }
}

impl Styleable for Set {
    fn attr(&self, name: &str, value: impl Into<PropValue>) -> &Self {
        let value = value.into();
        self.each(|_, m| {
            m.attr(name, value.clone());
        })
    }

    fn style(&self, name: &str, value: impl Into<PropValue>) -> &Self {
        let value = value.into();
        self.each(|_, m| {
            m.style(name, value.clone());
        })
    }
}

impl Positioned for Set {
    fn x(&self, x: f64) -> &Self {
        self.each(|_, m| {
            m.x(x);
        })
    }

    fn y(&self, y: f64) -> &Self {
        self.each(|_, m| {
            m.y(y);
        })
    }

    fn cx(&self, cx: f64) -> &Self {
        self.each(|_, m| {
            m.cx(cx);
        })
    }

    fn cy(&self, cy: f64) -> &Self {
        self.each(|_, m| {
            m.cy(cy);
        })
    }

    fn dx(&self, dx: f64) -> &Self {
        self.each(|_, m| {
            m.dx(dx);
        })
    }

    fn dy(&self, dy: f64) -> &Self {
        self.each(|_, m| {
            m.dy(dy);
        })
    }

    fn size(&self, width: f64, height: f64) -> &Self {
        self.each(|_, m| {
            m.size(width, height);
        })
    }
}

impl Transformable for Set {
    fn transform(&self, op: impl Into<TransformOp>) -> &Self {
        let op = op.into();
        self.each(|_, m| {
            m.transform(op);
        })
    }
}

/// Per-member schedulers started by [`Set::animate`].
#[derive(Clone, Debug)]
pub struct SetFx {
    members: Vec<Fx>,
}

impl SetFx {
    pub fn members(&self) -> &[Fx] {
        &self.members
    }

    pub fn phases(&self) -> Vec<Phase> {
        self.members.iter().map(Fx::phase).collect()
    }

    fn each(&self, f: impl Fn(&Fx)) -> &Self {
        for fx in &self.members {
            f(fx);
        }
        self
    }

    pub fn pause(&self) -> &Self {
        self.each(|fx| {
            fx.pause();
        })
    }

    pub fn play(&self) -> &Self {
        self.each(|fx| {
            fx.play();
        })
    }

    pub fn stop(&self, fulfill: bool) -> &Self {
        self.each(|fx| {
            fx.stop(fulfill);
        })
    }

    pub fn looping(&self, times: impl Into<Loop>) -> &Self {
        let times = times.into();
        self.each(|fx| {
            fx.looping(times);
        })
    }

    pub fn plot(&self, geometry: impl Into<Geometry>) -> &Self {
        let g = geometry.into();
        self.each(|fx| {
            fx.plot(g.clone());
        })
    }

    pub fn viewbox(&self, x: f64, y: f64, width: f64, height: f64) -> &Self {
        self.each(|fx| {
            fx.viewbox(x, y, width, height);
        })
    }

    /// One callback shared by every member, called once per member frame.
    pub fn during(&self, f: impl FnMut(f64, &Sampler) + 'static) -> &Self {
        let shared: DuringFn = Rc::new(RefCell::new(f));
        self.each(|fx| {
            fx.set_during(Rc::clone(&shared));
        })
    }

    /// One callback shared by every member, called as each one finishes.
    pub fn after(&self, f: impl FnMut(&Fx) + 'static) -> &Self {
        let shared: AfterFn = Rc::new(RefCell::new(f));
        self.each(|fx| {
            fx.set_after(Rc::clone(&shared));
        })
    }
}

impl Styleable for SetFx {
    fn attr(&self, name: &str, value: impl Into<PropValue>) -> &Self {
        let value = value.into();
        self.each(|fx| {
            fx.attr(name, value.clone());
        })
    }

    fn style(&self, name: &str, value: impl Into<PropValue>) -> &Self {
        let value = value.into();
        self.each(|fx| {
            fx.style(name, value.clone());
        })
    }
}

impl Positioned for SetFx {
    fn x(&self, x: f64) -> &Self {
        self.each(|fx| {
            fx.x(x);
        })
    }

    fn y(&self, y: f64) -> &Self {
        self.each(|fx| {
            fx.y(y);
        })
    }

    fn cx(&self, cx: f64) -> &Self {
        self.each(|fx| {
            fx.cx(cx);
        })
    }

    fn cy(&self, cy: f64) -> &Self {
        self.each(|fx| {
            fx.cy(cy);
        })
    }

    fn dx(&self, dx: f64) -> &Self {
        self.each(|fx| {
            fx.dx(dx);
        })
    }

    fn dy(&self, dy: f64) -> &Self {
        self.each(|fx| {
            fx.dy(dy);
        })
    }

    fn size(&self, width: f64, height: f64) -> &Self {
        self.each(|fx| {
            fx.size(width, height);
        })
    }
}

impl Transformable for SetFx {
    fn transform(&self, op: impl Into<TransformOp>) -> &Self {
        let op = op.into();
        self.each(|fx| {
            fx.transform(op);
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/group.rs"]
mod tests;
