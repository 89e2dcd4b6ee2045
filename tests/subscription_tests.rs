use std::cell::Cell;
use std::rc::Rc;

use lyric_time_ui::subscription::ListenerSlot;

fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
    let calls = Rc::new(Cell::new(0));
    let handle = {
        let calls = Rc::clone(&calls);
        move || calls.set(calls.get() + 1)
    };
    (calls, handle)
}

#[test]
fn release_after_attach_unlistens_once() {
    let slot = ListenerSlot::new();
    let (calls, unlisten) = counter();

    slot.attach(unlisten);
    assert!(slot.is_active());
    assert_eq!(calls.get(), 0);

    slot.release();
    slot.release();
    assert_eq!(calls.get(), 1);
    assert!(slot.is_released());
}

#[test]
fn attach_after_release_unlistens_immediately() {
    let slot = ListenerSlot::new();
    let (calls, unlisten) = counter();

    slot.release();
    assert!(slot.is_released());

    slot.attach(unlisten);
    assert_eq!(calls.get(), 1);
    assert!(!slot.is_active());

    slot.release();
    assert_eq!(calls.get(), 1);
}

#[test]
fn clones_share_the_same_listener() {
    let slot = ListenerSlot::new();
    let pending = slot.clone();
    let (calls, unlisten) = counter();

    pending.attach(unlisten);
    slot.release();
    assert_eq!(calls.get(), 1);
    assert!(pending.is_released());
}

#[test]
fn reattaching_releases_the_previous_listener() {
    let slot = ListenerSlot::new();
    let (first_calls, first) = counter();
    let (second_calls, second) = counter();

    slot.attach(first);
    slot.attach(second);
    assert_eq!(first_calls.get(), 1);
    assert_eq!(second_calls.get(), 0);

    slot.release();
    assert_eq!(second_calls.get(), 1);
}
