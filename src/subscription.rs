use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

type Unlisten = Box<dyn FnOnce()>;

#[derive(Default)]
enum Slot {
    #[default]
    Pending,
    Active(Unlisten),
    Released,
}

/// Holds the release handle of an event listener whose registration
/// resolves asynchronously.
///
/// `release` may run before the registration resolves; the handle passed to
/// a later `attach` is then invoked immediately instead of being kept.
#[derive(Clone, Default)]
pub struct ListenerSlot {
    inner: Rc<RefCell<Slot>>,
}

impl ListenerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, unlisten: impl FnOnce() + 'static) {
        let mut slot = self.inner.borrow_mut();
        if matches!(*slot, Slot::Released) {
            drop(slot);
            unlisten();
            return;
        }

        let previous = mem::replace(&mut *slot, Slot::Active(Box::new(unlisten)));
        drop(slot);
        if let Slot::Active(stale) = previous {
            stale();
        }
    }

    pub fn release(&self) {
        let previous = mem::replace(&mut *self.inner.borrow_mut(), Slot::Released);
        if let Slot::Active(unlisten) = previous {
            unlisten();
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(*self.inner.borrow(), Slot::Active(_))
    }

    pub fn is_released(&self) -> bool {
        matches!(*self.inner.borrow(), Slot::Released)
    }
}
