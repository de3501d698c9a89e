use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::animation::clock::ManualClock;
use crate::animation::ease::Ease;
use crate::host::PropertyAccessor;
use crate::host::registry::Registry;

struct Rig {
    reg: Rc<RefCell<Registry>>,
    clock: Rc<ManualClock>,
}

impl Rig {
    fn new() -> Self {
        Self {
            reg: Rc::new(RefCell::new(Registry::new())),
            clock: ManualClock::new(),
        }
    }

    fn fx(&self, id: TargetId) -> Fx {
        let host: SharedHost = self.reg.clone();
        let clock: SharedClock = self.clock.clone();
        Fx::new(id, host, clock)
    }

    fn number(&self, id: TargetId, property: Property) -> f64 {
        self.reg
            .borrow()
            .get(id, &property)
            .and_then(|v| v.as_f64())
            .unwrap_or(f64::NAN)
    }

    fn text(&self, id: TargetId, property: Property) -> String {
        self.reg
            .borrow()
            .get(id, &property)
            .map(|v| v.to_string())
            .unwrap_or_default()
    }
}

fn linear(ms: f64) -> AnimOptions {
    AnimOptions::new(ms).ease(Ease::Linear)
}

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn linear_x_reaches_midpoint_and_end() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 10.0);
    let fx = rig.fx(id);
    fx.animate(linear(1000.0)).x(100.0);

    assert_eq!(fx.phase(), Phase::Idle);
    rig.clock.advance_to(0.0);
    assert_eq!(fx.phase(), Phase::Running);

    rig.clock.advance_to(500.0);
    approx(rig.number(id, Property::X), 50.0);
    assert_eq!(fx.position(), Some(0.5));

    rig.clock.advance_to(1000.0);
    approx(rig.number(id, Property::X), 100.0);
    assert_eq!(fx.phase(), Phase::Idle);
    assert_eq!(rig.clock.pending_frames(), 0);
}

#[test]
fn pause_shifts_the_remaining_run() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 10.0);
    let fx = rig.fx(id);
    fx.animate(linear(1000.0)).x(100.0);

    rig.clock.advance_to(300.0);
    fx.pause();
    assert_eq!(fx.phase(), Phase::Paused);
    rig.clock.advance_to(800.0);
    approx(rig.number(id, Property::X), 30.0);

    fx.play();
    rig.clock.advance_to(900.0);
    approx(fx.position().unwrap_or_default(), 0.4);
    approx(rig.number(id, Property::X), 40.0);
}

#[test]
fn pause_and_play_outside_their_phase_do_nothing() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 10.0);
    let fx = rig.fx(id);
    fx.play();
    fx.pause();
    assert_eq!(fx.phase(), Phase::Idle);
    fx.animate(linear(1000.0)).x(100.0);
    rig.clock.advance_to(1000.0);
    fx.pause();
    assert_eq!(fx.phase(), Phase::Idle);
    assert_eq!(rig.clock.pending_timers(), 0);
}

#[test]
fn pause_during_delay_starts_the_run_paused() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 10.0);
    let fx = rig.fx(id);
    fx.animate(linear(100.0).delay(50.0)).x(100.0);

    fx.pause();
    assert_eq!(fx.phase(), Phase::Idle);
    rig.clock.advance_to(120.0);
    assert_eq!(fx.phase(), Phase::Paused);
    approx(rig.number(id, Property::X), 0.0);

    fx.play();
    rig.clock.advance_to(170.0);
    approx(rig.number(id, Property::X), 50.0);
}

#[test]
fn pause_between_loop_iterations_is_kept() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 10.0);
    let fx = rig.fx(id);
    fx.animate(linear(100.0).delay(50.0)).x(100.0).looping(2);

    rig.clock.advance_to(150.0);
    approx(rig.number(id, Property::X), 100.0);
    assert_eq!(fx.phase(), Phase::Idle);

    fx.pause();
    rig.clock.advance_to(250.0);
    assert_eq!(fx.phase(), Phase::Paused);
    approx(rig.number(id, Property::X), 100.0);

    rig.clock.advance_to(300.0);
    fx.play();
    rig.clock.advance_to(350.0);
    assert_eq!(fx.phase(), Phase::Running);
    approx(rig.number(id, Property::X), 50.0);
}

#[test]
fn delay_holds_values_until_it_elapses() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 10.0);
    let fx = rig.fx(id);
    fx.animate(linear(100.0).delay(50.0)).x(100.0);

    rig.clock.advance_to(40.0);
    approx(rig.number(id, Property::X), 0.0);
    assert_eq!(fx.phase(), Phase::Idle);

    rig.clock.advance_to(100.0);
    approx(rig.number(id, Property::X), 50.0);
}

#[test]
fn after_runs_once_and_leaves_finished() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 10.0);
    let fx = rig.fx(id);
    let calls = Rc::new(Cell::new(0));
    let c = calls.clone();
    fx.animate(linear(100.0))
        .x(100.0)
        .after(move |_| c.set(c.get() + 1));

    rig.clock.advance_to(100.0);
    rig.clock.advance_to(200.0);
    assert_eq!(calls.get(), 1);
    assert_eq!(fx.phase(), Phase::Finished);
}

#[test]
fn loop_restarts_from_the_original_values() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 10.0);
    let fx = rig.fx(id);
    let calls = Rc::new(Cell::new(0));
    let c = calls.clone();
    fx.animate(linear(1000.0))
        .x(100.0)
        .looping(2)
        .after(move |_| c.set(c.get() + 1));

    rig.clock.advance_to(1000.0);
    approx(rig.number(id, Property::X), 100.0);
    assert_eq!(calls.get(), 0);

    rig.clock.advance_to(1500.0);
    approx(rig.number(id, Property::X), 50.0);

    rig.clock.advance_to(2000.0);
    assert_eq!(calls.get(), 1);
    assert_eq!(fx.phase(), Phase::Finished);
}

#[test]
fn stop_fulfilled_jumps_to_the_end() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 10.0);
    let fx = rig.fx(id);
    let called = Rc::new(Cell::new(false));
    let c = called.clone();
    fx.animate(linear(1000.0))
        .x(100.0)
        .attr("opacity", 0.0)
        .after(move |_| c.set(true));

    rig.clock.advance_to(500.0);
    fx.stop(true);
    approx(rig.number(id, Property::X), 100.0);
    approx(rig.number(id, Property::attr("opacity")), 0.0);
    assert!(called.get());
    assert_eq!(fx.phase(), Phase::Finished);

    rig.clock.advance_to(800.0);
    approx(rig.number(id, Property::X), 100.0);
}

#[test]
fn stop_unfulfilled_leaves_values_in_place() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 10.0);
    let fx = rig.fx(id);
    let called = Rc::new(Cell::new(false));
    let c = called.clone();
    fx.animate(linear(1000.0))
        .x(100.0)
        .after(move |_| c.set(true));

    rig.clock.advance_to(500.0);
    fx.stop(false);
    rig.clock.advance_to(1000.0);
    approx(rig.number(id, Property::X), 50.0);
    assert!(!called.get());
    assert_eq!(fx.phase(), Phase::Idle);
    assert_eq!(rig.clock.pending_frames(), 0);
}

#[test]
fn animate_replaces_a_running_animation() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 10.0);
    let fx = rig.fx(id);
    fx.animate(linear(1000.0)).x(100.0);
    rig.clock.advance_to(500.0);

    fx.animate(linear(1000.0)).y(10.0);
    rig.clock.advance_to(1000.0);
    approx(rig.number(id, Property::X), 50.0);
    approx(rig.number(id, Property::Y), 5.0);
}

#[test]
fn after_may_chain_the_next_run() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 10.0);
    let fx = rig.fx(id);
    fx.animate(linear(1000.0)).x(100.0).after(|fx| {
        fx.animate(AnimOptions::new(1000.0).ease(Ease::Linear)).x(0.0);
    });

    rig.clock.advance_to(1000.0);
    approx(rig.number(id, Property::X), 100.0);
    rig.clock.advance_to(1500.0);
    approx(rig.number(id, Property::X), 50.0);
}

#[test]
fn untimed_runs_only_through_stop() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 10.0);
    let fx = rig.fx(id);
    fx.animate(AnimOptions::untimed()).cx(40.0);
    assert_eq!(rig.clock.pending_timers(), 0);

    rig.clock.advance_to(5000.0);
    approx(rig.number(id, Property::Cx), 5.0);
    fx.stop(true);
    approx(rig.number(id, Property::Cx), 40.0);
}

#[test]
fn invalid_options_fall_back_to_defaults() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 10.0);
    let fx = rig.fx(id);
    fx.animate(AnimOptions::new(f64::NAN).ease(Ease::Linear).delay(-5.0))
        .x(100.0);
    rig.clock.advance_to(500.0);
    approx(rig.number(id, Property::X), 50.0);
}

#[test]
fn colors_and_discrete_attrs() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 10.0);
    let fx = rig.fx(id);
    fx.animate(linear(1000.0))
        .attr("fill", "#ffffff")
        .attr("stroke-linejoin", "round");

    rig.clock.advance_to(500.0);
    assert_eq!(rig.text(id, Property::attr("stroke-linejoin")), "miter");
    assert_ne!(rig.text(id, Property::attr("fill")), "#000000");

    rig.clock.advance_to(1000.0);
    assert_eq!(rig.text(id, Property::attr("fill")), "#ffffff");
    assert_eq!(rig.text(id, Property::attr("stroke-linejoin")), "round");
}

#[test]
fn plot_merges_queued_position() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().polyline("0,0 10,10");
    let fx = rig.fx(id);
    fx.animate(linear(1000.0)).plot(PointArray::from("0,0 20,20")).x(100.0);

    rig.clock.advance_to(500.0);
    assert_eq!(rig.text(id, Property::Plot), "50,0 65,15");
    rig.clock.advance_to(1000.0);
    assert_eq!(rig.text(id, Property::Plot), "100,0 120,20");
}

#[test]
fn points_attr_morphs_as_geometry() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().polyline("0,0 10,10");
    let fx = rig.fx(id);
    fx.animate(linear(1000.0)).attr("points", "0,0 50,50");

    rig.clock.advance_to(500.0);
    assert_eq!(rig.text(id, Property::Plot), "0,0 30,30");
    rig.clock.advance_to(1000.0);
    assert_eq!(rig.text(id, Property::Plot), "0,0 50,50");
}

#[test]
fn closed_polyline_keeps_its_closing_vertex() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().polyline("0,0 10,0 10,10 0,0");
    let fx = rig.fx(id);
    fx.animate(linear(100.0)).plot(PointArray::from("0,0 20,0 20,20 0,0"));

    rig.clock.advance_to(50.0);
    assert_eq!(rig.text(id, Property::Plot), "0,0 15,0 15,15 0,0");
    rig.clock.advance_to(100.0);
    assert_eq!(rig.text(id, Property::Plot), "0,0 20,0 20,20 0,0");
}

#[test]
fn plot_without_geometry_is_ignored() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 10.0);
    let fx = rig.fx(id);
    fx.animate(linear(100.0)).plot(PointArray::from("0,0 5,5")).x(20.0);
    rig.clock.advance_to(100.0);
    assert_eq!(rig.reg.borrow().get(id, &Property::Plot), None);
    approx(rig.number(id, Property::X), 20.0);
}

#[test]
fn rotation_pivots_on_the_box_center() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(100.0, 100.0);
    let fx = rig.fx(id);
    fx.animate(linear(100.0)).rotate(90.0);
    rig.clock.advance_to(100.0);

    let Some(PropValue::Transform(m)) = rig.reg.borrow().get(id, &Property::Transform) else {
        panic!("transform missing");
    };
    let p = m.apply(kurbo::Point::new(100.0, 50.0));
    approx(p.x, 50.0);
    approx(p.y, 100.0);
}

#[test]
fn during_sees_eased_position() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 10.0);
    let fx = rig.fx(id);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    fx.animate(linear(1000.0))
        .during(move |pos, at| s.borrow_mut().push((pos, at.number(0.0, 8.0))));

    rig.clock.advance_to(250.0);
    let last = seen.borrow().last().copied();
    assert_eq!(last, Some((0.25, 2.0)));
}

#[test]
fn size_queued_from_current_bounds() {
    let rig = Rig::new();
    let id = rig.reg.borrow_mut().rect(10.0, 20.0);
    let fx = rig.fx(id);
    fx.animate(linear(100.0)).size(30.0, 40.0);
    rig.clock.advance_to(50.0);
    assert_eq!(fx.bbox(), BBox::new(0.0, 0.0, 20.0, 30.0));
}
