//! Per-target animation scheduler.
//!
//! An [`Fx`] owns one animation state for one target: queued property morphs, a
//! delay timer and a frame loop driven by a [`FrameClock`]. Clock callbacks hold
//! only a weak reference plus the generation they were scheduled for, so a
//! replaced or stopped run never writes again. No state borrow is held while
//! the host, the clock or a user callback runs.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::animation::clock::{SharedClock, TimerHandle};
use crate::animation::ease::Easing;
use crate::animation::morph::{Morph, Sampler};
use crate::animation::options::{AnimOptions, Loop, Timing};
use crate::element::{Positioned, Styleable, Transformable};
use crate::foundation::core::{BBox, TargetId};
use crate::host::value::PropValue;
use crate::host::{Property, SharedHost};
use crate::transform::{AffineTransform, TransformOp};
use crate::values::Morphable;
use crate::values::geometry::Geometry;
use crate::values::path::PathArray;
use crate::values::points::PointArray;
use crate::values::scalar::Scalar;
use crate::values::viewbox::ViewBox;

/// Attributes that carry shape geometry and merge into the plot morph.
const GEOMETRY_ATTRS: [&str; 2] = ["points", "d"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// No run in progress (includes waiting out a start delay).
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

pub(crate) type DuringFn = Rc<RefCell<dyn FnMut(f64, &Sampler)>>;
pub(crate) type AfterFn = Rc<RefCell<dyn FnMut(&Fx)>>;

#[derive(Clone, Debug)]
struct Schedule {
    duration: Timing,
    ease: Easing,
    delay: f64,
}

#[derive(Clone, Copy, Debug)]
struct Situation {
    start: f64,
    finish: f64,
    duration: f64,
    paused_at: Option<f64>,
}

#[derive(Clone, Debug)]
enum Edge {
    Start(Scalar),
    Center(Scalar),
}

#[derive(Clone, Debug)]
enum Plot {
    Requested(Geometry),
    /// Merged with queued position and size; sampled every frame.
    Merged(Geometry),
}

#[derive(Clone, Debug, Default)]
struct Queue {
    attrs: Vec<(String, Morph)>,
    styles: Vec<(String, Morph)>,
    x: Option<Edge>,
    y: Option<Edge>,
    size: Option<(Scalar, Scalar)>,
    plot: Option<Plot>,
    viewbox: Option<ViewBox>,
    transform: Option<AffineTransform>,
    prepared: bool,
}

impl Queue {
    fn is_empty(&self) -> bool {
        self.attrs.is_empty()
            && self.styles.is_empty()
            && self.x.is_none()
            && self.y.is_none()
            && self.size.is_none()
            && self.plot.is_none()
            && self.viewbox.is_none()
            && self.transform.is_none()
    }

    fn samples(&self, pos: f64) -> Vec<(Property, PropValue)> {
        let mut out = Vec::new();
        if let Some(Plot::Merged(g)) = &self.plot {
            out.push((Property::Plot, PropValue::from(g.at(pos))));
        } else {
            match &self.x {
                Some(Edge::Start(s)) => out.push((Property::X, s.at(pos).value.into())),
                Some(Edge::Center(s)) => out.push((Property::Cx, s.at(pos).value.into())),
                None => {}
            }
            match &self.y {
                Some(Edge::Start(s)) => out.push((Property::Y, s.at(pos).value.into())),
                Some(Edge::Center(s)) => out.push((Property::Cy, s.at(pos).value.into())),
                None => {}
            }
            if let Some((w, h)) = &self.size {
                out.push((Property::Width, w.at(pos).value.into()));
                out.push((Property::Height, h.at(pos).value.into()));
            }
        }
        if let Some(vb) = &self.viewbox {
            out.push((Property::ViewBox, vb.at(pos).into()));
        }
        for (name, m) in &self.attrs {
            if let Some(v) = m.at(pos) {
                out.push((Property::Attr(name.clone()), v));
            }
        }
        if let Some(m) = &self.transform {
            out.push((Property::Transform, m.at(pos).into()));
        }
        for (name, m) in &self.styles {
            if let Some(v) = m.at(pos) {
                out.push((Property::Style(name.clone()), v));
            }
        }
        out
    }

    fn settled_plot(&self) -> Option<Geometry> {
        match &self.plot {
            Some(Plot::Merged(g)) => g.settled_destination(),
            _ => None,
        }
    }
}

fn upsert(list: &mut Vec<(String, Morph)>, name: &str, morph: Morph) {
    match list.iter_mut().find(|(n, _)| n == name) {
        Some(slot) => slot.1 = morph,
        None => list.push((name.to_owned(), morph)),
    }
}

#[derive(Default)]
struct FxState {
    phase: Phase,
    generation: u64,
    schedule: Option<Schedule>,
    situation: Option<Situation>,
    queue: Queue,
    looping: Option<Loop>,
    during: Option<DuringFn>,
    after: Option<AfterFn>,
    timer: Option<TimerHandle>,
    frame: Option<TimerHandle>,
    position: Option<f64>,
    pause_pending: bool,
}

impl FxState {
    fn take_handles(&mut self) -> [Option<TimerHandle>; 2] {
        [self.timer.take(), self.frame.take()]
    }

    /// Drop everything queued and invalidate outstanding callbacks.
    fn reset(&mut self) -> [Option<TimerHandle>; 2] {
        let handles = self.take_handles();
        let generation = self.generation + 1;
        *self = Self {
            generation,
            ..Self::default()
        };
        handles
    }
}

struct FxInner {
    target: TargetId,
    host: SharedHost,
    clock: SharedClock,
    state: RefCell<FxState>,
}

enum Step {
    Wait,
    Apply { pos: f64, eased: f64, done: bool },
}

impl FxInner {
    fn cancel(&self, handles: [Option<TimerHandle>; 2]) {
        for h in handles.into_iter().flatten() {
            self.clock.cancel(h);
        }
    }

    fn get(&self, property: &Property) -> Option<PropValue> {
        self.host.borrow().get(self.target, property)
    }

    fn number(&self, property: &Property) -> f64 {
        self.get(property).and_then(|v| v.as_f64()).unwrap_or(0.0)
    }

    fn bbox(&self) -> BBox {
        self.host.borrow().bbox(self.target)
    }

    fn with_queue(&self, f: impl FnOnce(&mut Queue)) {
        f(&mut self.state.borrow_mut().queue);
    }

    fn schedule_start(self: &Rc<Self>, generation: u64, delay: f64) {
        let weak: Weak<Self> = Rc::downgrade(self);
        let handle = self.clock.set_delay(
            delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.start(generation);
                }
            }),
        );
        let mut st = self.state.borrow_mut();
        if st.generation == generation {
            st.timer = Some(handle);
        }
    }

    fn request_frame(self: &Rc<Self>, generation: u64) {
        if self.state.borrow().generation != generation {
            return;
        }
        let weak: Weak<Self> = Rc::downgrade(self);
        let handle = self.clock.request_frame(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.render(generation);
            }
        }));
        self.state.borrow_mut().frame = Some(handle);
    }

    fn start(self: &Rc<Self>, generation: u64) {
        let now = self.clock.now();
        {
            let mut st = self.state.borrow_mut();
            if st.generation != generation {
                return;
            }
            let Some(Timing::Millis(duration)) = st.schedule.as_ref().map(|s| s.duration) else {
                return;
            };
            st.timer = None;
            let paused = std::mem::take(&mut st.pause_pending);
            st.situation = Some(Situation {
                start: now,
                finish: now + duration,
                duration,
                paused_at: paused.then_some(now),
            });
            st.phase = if paused {
                Phase::Paused
            } else {
                Phase::Running
            };
        }
        tracing::debug!(target_id = self.target.0, now, "animation started");
        self.render(generation);
    }

    fn render(self: &Rc<Self>, generation: u64) {
        let now = self.clock.now();
        let step = {
            let mut st = self.state.borrow_mut();
            if st.generation != generation {
                return;
            }
            st.frame = None;
            match (st.phase, st.situation) {
                (Phase::Paused, _) => Step::Wait,
                (Phase::Running, Some(sit)) => {
                    let done = now >= sit.finish;
                    let pos = if done || sit.duration <= 0.0 {
                        1.0
                    } else {
                        ((now - sit.start) / sit.duration).clamp(0.0, 1.0)
                    };
                    let eased = match (&st.schedule, done) {
                        (_, true) => 1.0,
                        (Some(s), false) => s.ease.apply(pos),
                        (None, false) => pos,
                    };
                    st.position = Some(pos);
                    Step::Apply { pos, eased, done }
                }
                _ => return,
            }
        };

        match step {
            Step::Wait => self.request_frame(generation),
            Step::Apply { pos, eased, done } => {
                tracing::trace!(target_id = self.target.0, pos, eased, "frame");
                self.prepare();
                self.apply(eased);
                if done {
                    self.finish(generation);
                } else {
                    self.request_frame(generation);
                }
            }
        }
    }

    /// First-frame merge of plot, position and size into one destination shape.
    fn prepare(&self) {
        let (plot, geometry_attr, x, y, size) = {
            let mut st = self.state.borrow_mut();
            let q = &mut st.queue;
            if q.prepared {
                return;
            }
            q.prepared = true;
            let geometry_attr = q
                .attrs
                .iter()
                .find(|(n, _)| GEOMETRY_ATTRS.contains(&n.as_str()))
                .map(|(n, m)| (n.clone(), m.clone()));
            let plot = match &q.plot {
                Some(Plot::Requested(g)) => Some(g.clone()),
                _ => None,
            };
            if plot.is_none() && geometry_attr.is_none() {
                return;
            }
            (plot, geometry_attr, q.x.clone(), q.y.clone(), q.size.clone())
        };

        let Some(current) = self.get(&Property::Plot).and_then(|v| v.to_geometry()) else {
            tracing::debug!(target_id = self.target.0, "plot queued on a target without geometry");
            return;
        };

        let requested = plot.or_else(|| {
            geometry_attr.as_ref().and_then(|(_, m)| match m {
                Morph::Discrete { to, .. } => Some(geometry_from(to, &current)),
                _ => None,
            })
        });
        let mut dest = match requested {
            Some(g) => current.coerce_like(g),
            None => current.clone(),
        };

        {
            let host = self.host.borrow();
            let measure = &*host;
            if let Some((w, h)) = &size {
                dest.size(destination_value(w), destination_value(h), measure);
            }
            let b = dest.bbox(measure);
            match &x {
                Some(Edge::Start(s)) => dest.move_to(destination_value(s), b.y, measure),
                Some(Edge::Center(s)) => {
                    dest.move_to(destination_value(s) - b.width / 2.0, b.y, measure)
                }
                None => {}
            }
            let b = dest.bbox(measure);
            match &y {
                Some(Edge::Start(s)) => dest.move_to(b.x, destination_value(s), measure),
                Some(Edge::Center(s)) => {
                    dest.move_to(b.x, destination_value(s) - b.height / 2.0, measure)
                }
                None => {}
            }
        }

        let mut st = self.state.borrow_mut();
        let q = &mut st.queue;
        q.x = None;
        q.y = None;
        q.size = None;
        if let Some((name, _)) = geometry_attr {
            q.attrs.retain(|(n, _)| *n != name);
        }
        q.plot = Some(Plot::Merged(current.morph(dest)));
    }

    fn apply(&self, eased: f64) {
        let (writes, during) = {
            let st = self.state.borrow();
            (st.queue.samples(eased), st.during.clone())
        };
        {
            let mut host = self.host.borrow_mut();
            for (property, value) in writes {
                host.set(self.target, &property, value);
            }
        }
        if let Some(during) = during {
            match during.try_borrow_mut() {
                Ok(mut f) => f(eased, &Sampler::new(eased)),
                Err(_) => tracing::trace!(target_id = self.target.0, "during callback busy"),
            }
        }
    }

    fn write_settled_plot(&self) {
        let settled = self.state.borrow().queue.settled_plot();
        if let Some(g) = settled {
            self.host
                .borrow_mut()
                .set(self.target, &Property::Plot, g.into());
        }
    }

    fn finish(self: &Rc<Self>, generation: u64) {
        if self.state.borrow().generation != generation {
            return;
        }
        self.write_settled_plot();

        enum Next {
            Restart(f64),
            After(AfterFn),
            Reset,
        }
        let next = {
            let mut st = self.state.borrow_mut();
            if st.generation != generation {
                return;
            }
            let restart = match st.looping {
                Some(Loop::Forever) => true,
                Some(Loop::Times(n)) if n > 1 => {
                    st.looping = Some(Loop::Times(n - 1));
                    true
                }
                _ => false,
            };
            if restart {
                st.phase = Phase::Idle;
                st.situation = None;
                Next::Restart(st.schedule.as_ref().map_or(0.0, |s| s.delay))
            } else if let Some(after) = st.after.clone() {
                st.phase = Phase::Finished;
                Next::After(after)
            } else {
                let handles = st.reset();
                drop(st);
                self.cancel(handles);
                Next::Reset
            }
        };

        match next {
            Next::Restart(delay) => {
                tracing::debug!(target_id = self.target.0, "animation loop restart");
                self.schedule_start(generation, delay);
            }
            Next::After(after) => {
                tracing::debug!(target_id = self.target.0, "animation finished");
                self.call_after(&after);
            }
            Next::Reset => tracing::debug!(target_id = self.target.0, "animation complete"),
        }
    }

    fn call_after(self: &Rc<Self>, after: &AfterFn) {
        let fx = Fx {
            inner: Rc::clone(self),
        };
        match after.try_borrow_mut() {
            Ok(mut f) => f(&fx),
            Err(_) => tracing::trace!(target_id = self.target.0, "after callback busy"),
        }
    }
}

fn destination_value(s: &Scalar) -> f64 {
    s.destination().map_or(s.value, |d| d.value)
}

fn geometry_from(value: &PropValue, like: &Geometry) -> Geometry {
    value.to_geometry().unwrap_or_else(|| {
        let text = value.to_string();
        match like {
            Geometry::Points(_) => Geometry::Points(PointArray::parse(&text)),
            Geometry::Path(_) => Geometry::Path(PathArray::parse(&text)),
        }
    })
}

/// Handle to a target's animation state. Cloning shares the state.
#[derive(Clone)]
pub struct Fx {
    inner: Rc<FxInner>,
}

impl std::fmt::Debug for Fx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let st = self.inner.state.try_borrow();
        f.debug_struct("Fx")
            .field("target", &self.inner.target)
            .field("phase", &st.as_ref().map(|s| s.phase).ok())
            .finish()
    }
}

impl Fx {
    pub fn new(target: TargetId, host: SharedHost, clock: SharedClock) -> Self {
        Self {
            inner: Rc::new(FxInner {
                target,
                host,
                clock,
                state: RefCell::new(FxState::default()),
            }),
        }
    }

    pub fn target(&self) -> TargetId {
        self.inner.target
    }

    pub fn phase(&self) -> Phase {
        self.inner.state.borrow().phase
    }

    /// Un-eased progress of the last rendered frame.
    pub fn position(&self) -> Option<f64> {
        self.inner.state.borrow().position
    }

    pub fn bbox(&self) -> BBox {
        self.inner.bbox()
    }

    /// Discard any previous run and schedule a new one.
    ///
    /// Invalid options are logged and replaced by their defaults.
    pub fn animate(&self, opts: impl Into<AnimOptions>) -> &Self {
        let mut opts = opts.into();
        if let Err(err) = opts.validate() {
            tracing::warn!(target_id = self.inner.target.0, %err, "invalid animation options, using defaults");
            let defaults = AnimOptions::default();
            if let Timing::Millis(ms) = opts.duration
                && !(ms.is_finite() && ms >= 0.0)
            {
                opts.duration = defaults.duration;
            }
            if !(opts.delay.is_finite() && opts.delay >= 0.0) {
                opts.delay = defaults.delay;
            }
        }

        self.stop(false);
        let generation = {
            let mut st = self.inner.state.borrow_mut();
            st.schedule = Some(Schedule {
                duration: opts.duration,
                ease: opts.ease,
                delay: opts.delay,
            });
            st.generation
        };
        if let Timing::Millis(_) = opts.duration {
            self.inner.schedule_start(generation, opts.delay);
        }
        self
    }

    /// Acts while running, or while a delay or loop restart is pending; in
    /// the latter case the run starts paused.
    pub fn pause(&self) -> &Self {
        let now = self.inner.clock.now();
        let mut st = self.inner.state.borrow_mut();
        match st.phase {
            Phase::Running => {
                st.phase = Phase::Paused;
                if let Some(sit) = st.situation.as_mut() {
                    sit.paused_at = Some(now);
                }
            }
            Phase::Idle if st.timer.is_some() => st.pause_pending = true,
            _ => {}
        }
        self
    }

    /// Only acts while paused; the run resumes where it left off.
    pub fn play(&self) -> &Self {
        let now = self.inner.clock.now();
        let mut st = self.inner.state.borrow_mut();
        st.pause_pending = false;
        if st.phase == Phase::Paused {
            if let Some(sit) = st.situation.as_mut() {
                let paused = now - sit.paused_at.take().unwrap_or(now);
                sit.start += paused;
                sit.finish += paused;
            }
            st.phase = Phase::Running;
        }
        self
    }

    /// `true` applies the final values and runs the completion callback;
    /// `false` drops the run without a final write.
    pub fn stop(&self, fulfill: bool) -> &Self {
        let inner = &self.inner;
        if !fulfill {
            let handles = inner.state.borrow_mut().reset();
            inner.cancel(handles);
            return self;
        }

        let (generation, handles) = {
            let mut st = inner.state.borrow_mut();
            if st.phase == Phase::Finished || (st.schedule.is_none() && st.queue.is_empty()) {
                return self;
            }
            let handles = st.take_handles();
            st.generation += 1;
            st.situation = None;
            st.position = Some(1.0);
            (st.generation, handles)
        };
        inner.cancel(handles);

        inner.prepare();
        inner.apply(1.0);
        inner.write_settled_plot();

        let after = {
            let mut st = inner.state.borrow_mut();
            st.phase = Phase::Finished;
            st.after.clone()
        };
        tracing::debug!(target_id = inner.target.0, "animation fulfilled");
        if let Some(after) = after {
            inner.call_after(&after);
        }

        let mut st = inner.state.borrow_mut();
        if st.generation == generation {
            st.queue = Queue::default();
            st.schedule = None;
        }
        self
    }

    pub fn during(&self, f: impl FnMut(f64, &Sampler) + 'static) -> &Self {
        self.set_during(Rc::new(RefCell::new(f)))
    }

    pub fn after(&self, f: impl FnMut(&Fx) + 'static) -> &Self {
        self.set_after(Rc::new(RefCell::new(f)))
    }

    pub(crate) fn set_during(&self, f: DuringFn) -> &Self {
        self.inner.state.borrow_mut().during = Some(f);
        self
    }

    pub(crate) fn set_after(&self, f: AfterFn) -> &Self {
        self.inner.state.borrow_mut().after = Some(f);
        self
    }

    pub fn looping(&self, times: impl Into<Loop>) -> &Self {
        self.inner.state.borrow_mut().looping = Some(times.into());
        self
    }

    pub fn plot(&self, geometry: impl Into<Geometry>) -> &Self {
        let g = geometry.into();
        self.inner.with_queue(|q| {
            q.plot = Some(Plot::Requested(g));
            q.prepared = false;
        });
        self
    }

    /// Animate the viewbox; a target without one starts from its bounds.
    pub fn viewbox(&self, x: f64, y: f64, width: f64, height: f64) -> &Self {
        let current = match self.inner.get(&Property::ViewBox) {
            Some(PropValue::ViewBox(vb)) => vb,
            _ => ViewBox::from(self.inner.bbox()),
        };
        let m = current.morph((x, y, width, height));
        self.inner.with_queue(|q| q.viewbox = Some(m));
        self
    }

    fn queue_edge(&self, property: Property, value: f64) -> &Self {
        let from = Scalar::new(self.inner.number(&property)).morph(value);
        self.inner.with_queue(|q| match property {
            Property::X => q.x = Some(Edge::Start(from)),
            Property::Cx => q.x = Some(Edge::Center(from)),
            Property::Y => q.y = Some(Edge::Start(from)),
            Property::Cy => q.y = Some(Edge::Center(from)),
            _ => {}
        });
        self
    }
}

impl Styleable for Fx {
    fn attr(&self, name: &str, value: impl Into<PropValue>) -> &Self {
        let from = self.inner.get(&Property::attr(name));
        let m = Morph::select(from, value.into());
        self.inner.with_queue(|q| {
            upsert(&mut q.attrs, name, m);
            if GEOMETRY_ATTRS.contains(&name) {
                q.prepared = false;
            }
        });
        self
    }

    fn style(&self, name: &str, value: impl Into<PropValue>) -> &Self {
        let from = self.inner.get(&Property::style(name));
        let m = Morph::select(from, value.into());
        self.inner.with_queue(|q| upsert(&mut q.styles, name, m));
        self
    }
}

impl Positioned for Fx {
    fn x(&self, x: f64) -> &Self {
        self.queue_edge(Property::X, x)
    }

    fn y(&self, y: f64) -> &Self {
        self.queue_edge(Property::Y, y)
    }

    fn cx(&self, cx: f64) -> &Self {
        self.queue_edge(Property::Cx, cx)
    }

    fn cy(&self, cy: f64) -> &Self {
        self.queue_edge(Property::Cy, cy)
    }

    fn dx(&self, dx: f64) -> &Self {
        self.x(self.inner.number(&Property::X) + dx)
    }

    fn dy(&self, dy: f64) -> &Self {
        self.y(self.inner.number(&Property::Y) + dy)
    }

    fn size(&self, width: f64, height: f64) -> &Self {
        let b = self.inner.bbox();
        let size = (
            Scalar::new(b.width).morph(width),
            Scalar::new(b.height).morph(height),
        );
        self.inner.with_queue(|q| q.size = Some(size));
        self
    }
}

impl Transformable for Fx {
    fn transform(&self, op: impl Into<TransformOp>) -> &Self {
        let base = match self.inner.get(&Property::Transform) {
            Some(PropValue::Transform(m)) => m,
            _ => AffineTransform::IDENTITY,
        };
        let dest = op.into().apply(&base, || self.inner.bbox());
        self.inner
            .with_queue(|q| q.transform = Some(base.morph(dest)));
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/fx.rs"]
mod tests;
