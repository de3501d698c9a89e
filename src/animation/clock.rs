use std::cell::RefCell;
use std::rc::Rc;

/// Handle for a pending delay or frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

pub type Callback = Box<dyn FnOnce()>;

/// Time source plus one-shot scheduling primitives, in milliseconds.
///
/// Callbacks never run inside `set_delay`/`request_frame`; they run later, when
/// the clock fires them.
pub trait FrameClock {
    fn now(&self) -> f64;

    fn set_delay(&self, ms: f64, callback: Callback) -> TimerHandle;

    /// Run `callback` on the next frame.
    fn request_frame(&self, callback: Callback) -> TimerHandle;

    fn cancel(&self, handle: TimerHandle);
}

pub type SharedClock = Rc<dyn FrameClock>;

#[derive(Default)]
struct ClockState {
    now: f64,
    next_id: u64,
    timers: Vec<(TimerHandle, f64, Callback)>,
    frames: Vec<(TimerHandle, Callback)>,
}

/// Deterministic clock driven by the caller.
///
/// [`advance_to`](Self::advance_to) fires due delay timers in order (each at its
/// own due time), then runs one frame at the target time.
#[derive(Default)]
pub struct ManualClock {
    state: RefCell<ClockState>,
}

impl ManualClock {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn advance(&self, ms: f64) {
        let now = self.now();
        self.advance_to(now + ms);
    }

    pub fn advance_to(&self, t: f64) {
        while let Some(cb) = self.pop_due_timer(t) {
            cb();
        }
        {
            let mut st = self.state.borrow_mut();
            st.now = st.now.max(t);
        }
        self.tick();
    }

    /// Run every frame callback registered before this call.
    pub fn tick(&self) {
        let frames = std::mem::take(&mut self.state.borrow_mut().frames);
        tracing::trace!(count = frames.len(), "frame tick");
        for (_, cb) in frames {
            cb();
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    fn pop_due_timer(&self, limit: f64) -> Option<Callback> {
        let mut st = self.state.borrow_mut();
        let idx = st
            .timers
            .iter()
            .enumerate()
            .filter(|(_, (_, due, _))| *due <= limit)
            .min_by(|a, b| a.1.1.total_cmp(&b.1.1).then(a.1.0.0.cmp(&b.1.0.0)))
            .map(|(i, _)| i)?;
        let (_, due, cb) = st.timers.remove(idx);
        st.now = st.now.max(due);
        Some(cb)
    }

    fn next_handle(st: &mut ClockState) -> TimerHandle {
        st.next_id += 1;
        TimerHandle(st.next_id)
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> f64 {
        self.state.borrow().now
    }

    fn set_delay(&self, ms: f64, callback: Callback) -> TimerHandle {
        let mut st = self.state.borrow_mut();
        let handle = Self::next_handle(&mut st);
        let due = st.now + ms.max(0.0);
        st.timers.push((handle, due, callback));
        handle
    }

    fn request_frame(&self, callback: Callback) -> TimerHandle {
        let mut st = self.state.borrow_mut();
        let handle = Self::next_handle(&mut st);
        st.frames.push((handle, callback));
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        let mut st = self.state.borrow_mut();
        st.timers.retain(|(h, _, _)| *h != handle);
        st.frames.retain(|(h, _)| *h != handle);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
