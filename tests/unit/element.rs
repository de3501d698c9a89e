use super::*;
use crate::animation::clock::ManualClock;
use crate::animation::ease::Ease;
use crate::host::registry::Registry;
use crate::values::points::PointArray;

fn context() -> (Rc<Context>, Rc<RefCell<Registry>>, Rc<ManualClock>) {
    let reg = Rc::new(RefCell::new(Registry::new()));
    let clock = ManualClock::new();
    let host: SharedHost = reg.clone();
    let shared: SharedClock = clock.clone();
    (Context::new(host, shared), reg, clock)
}

#[test]
fn setters_write_through_immediately() {
    let (ctx, reg, _) = context();
    let el = ctx.element(reg.borrow_mut().rect(20.0, 10.0));
    el.move_to(5.0, 6.0).fill("#ff0000").opacity(0.5);
    assert_eq!(el.bbox(), BBox::new(5.0, 6.0, 20.0, 10.0));
    assert_eq!(
        el.get(&Property::attr("fill")).map(|v| v.to_string()),
        Some("#ff0000".to_owned())
    );
    assert_eq!(el.number(&Property::attr("opacity")), 0.5);

    el.dmove(1.0, -1.0).center(100.0, 100.0);
    assert_eq!(el.bbox(), BBox::new(90.0, 95.0, 20.0, 10.0));
}

#[test]
fn rotation_defaults_to_the_box_center() {
    let (ctx, reg, _) = context();
    let el = ctx.element(reg.borrow_mut().rect(100.0, 100.0));
    el.rotate(180.0);
    let p = el.matrix().apply(kurbo::Point::new(0.0, 0.0));
    assert!((p.x - 100.0).abs() < 1e-9 && (p.y - 100.0).abs() < 1e-9);

    el.untransform().translate(10.0, 20.0);
    let v = el.transform_values();
    assert_eq!((v.x, v.y), (10.0, 20.0));
}

#[test]
fn scale_defaults_to_the_box_origin() {
    let (ctx, reg, _) = context();
    let el = ctx.element(reg.borrow_mut().rect(10.0, 10.0));
    el.x(10.0).scale(2.0, 2.0);
    let p = el.matrix().apply(kurbo::Point::new(10.0, 0.0));
    assert_eq!((p.x, p.y), (10.0, 0.0));
}

#[test]
fn plot_replaces_geometry() {
    let (ctx, reg, _) = context();
    let el = ctx.element(reg.borrow_mut().polygon("0,0 1,1"));
    el.plot(PointArray::from("0,0 4,0 4,4"));
    assert_eq!(el.bbox(), BBox::new(0.0, 0.0, 4.0, 4.0));
    assert_eq!(el.geometry().map(|g| g.to_string()), Some("0,0 4,0 4,4".to_owned()));
}

#[test]
fn animate_reuses_one_scheduler_per_target() {
    let (ctx, reg, clock) = context();
    let el = ctx.element(reg.borrow_mut().rect(10.0, 10.0));
    assert!(el.fx().is_none());

    el.animate(AnimOptions::new(1000.0).ease(Ease::Linear)).x(100.0);
    clock.advance_to(500.0);
    el.animate(AnimOptions::new(1000.0).ease(Ease::Linear)).x(0.0);
    clock.advance_to(1000.0);
    assert_eq!(el.number(&Property::X), 25.0);

    el.stop(true);
    assert_eq!(el.number(&Property::X), 0.0);
}

#[test]
fn try_animate_rejects_bad_input() {
    let (ctx, reg, _) = context();
    let id = reg.borrow_mut().rect(10.0, 10.0);
    let el = ctx.element(id);
    assert!(el.try_animate(AnimOptions::new(-1.0)).is_err());

    reg.borrow_mut().remove(id);
    let err = el.try_animate(500.0).map(|_| ()).unwrap_err();
    assert!(err.to_string().contains("not known"), "{err}");
}

#[test]
fn forget_cancels_pending_work() {
    let (ctx, reg, clock) = context();
    let el = ctx.element(reg.borrow_mut().rect(10.0, 10.0));
    el.animate(1000.0).x(100.0);
    assert!(ctx.forget(el.id()).is_some());
    clock.advance_to(500.0);
    assert_eq!(el.number(&Property::X), 0.0);
    assert!(el.fx().is_none());
}
