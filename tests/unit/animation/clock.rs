use std::cell::RefCell;
use std::rc::Rc;

use super::*;

fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&str) -> Callback) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let make = {
        let log = log.clone();
        move |tag: &str| -> Callback {
            let log = log.clone();
            let tag = tag.to_owned();
            Box::new(move || log.borrow_mut().push(tag))
        }
    };
    (log, make)
}

#[test]
fn timers_fire_in_due_order_before_the_frame() {
    let clock = ManualClock::new();
    let (log, cb) = recorder();
    clock.set_delay(50.0, cb("late"));
    clock.set_delay(10.0, cb("early"));
    clock.request_frame(cb("frame"));
    clock.advance_to(100.0);
    assert_eq!(*log.borrow(), vec!["early", "late", "frame"]);
    assert_eq!(clock.now(), 100.0);
}

#[test]
fn timer_sees_its_own_due_time() {
    let clock = ManualClock::new();
    let seen = Rc::new(RefCell::new(None));
    let c = clock.clone();
    let s = seen.clone();
    clock.set_delay(30.0, Box::new(move || *s.borrow_mut() = Some(c.now())));
    clock.advance_to(100.0);
    assert_eq!(*seen.borrow(), Some(30.0));
}

#[test]
fn frames_requested_during_a_tick_wait_for_the_next() {
    let clock = ManualClock::new();
    let count = Rc::new(RefCell::new(0));
    let c = clock.clone();
    let n = count.clone();
    clock.request_frame(Box::new(move || {
        *n.borrow_mut() += 1;
        let n2 = n.clone();
        c.request_frame(Box::new(move || *n2.borrow_mut() += 1));
    }));
    clock.tick();
    assert_eq!(*count.borrow(), 1);
    assert_eq!(clock.pending_frames(), 1);
    clock.tick();
    assert_eq!(*count.borrow(), 2);
}

#[test]
fn cancelled_callbacks_never_run() {
    let clock = ManualClock::new();
    let (log, cb) = recorder();
    let t = clock.set_delay(5.0, cb("timer"));
    let f = clock.request_frame(cb("frame"));
    clock.cancel(t);
    clock.cancel(f);
    clock.advance(10.0);
    assert!(log.borrow().is_empty());
    assert_eq!(clock.pending_timers(), 0);
}
