use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use eframe::egui::{Pos2, Rect};

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: BTreeMap<u64, Entry>,
}

#[derive(Default)]
struct Entry {
    regions: Vec<Rect>,
    dismissed: bool,
}

/// Fan-out point for pointer-down events. Subscriptions are scoped: a
/// listener is removed the moment its handle is dropped.
#[derive(Clone, Default)]
pub struct PointerHub {
    listeners: Rc<RefCell<Listeners>>,
}

impl PointerHub {
    pub fn subscribe_outside_click(&self) -> OutsideClickListener {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.insert(id, Entry::default());
        OutsideClickListener {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Marks every listener whose regions do not contain `pos` as dismissed.
    /// A listener with no regions yet is left alone.
    pub fn pointer_down(&self, pos: Pos2) {
        for entry in self.listeners.borrow_mut().entries.values_mut() {
            if entry.regions.is_empty() {
                continue;
            }
            if !entry.regions.iter().any(|rect| rect.contains(pos)) {
                entry.dismissed = true;
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

pub struct OutsideClickListener {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl OutsideClickListener {
    /// Replaces the area treated as "inside". Called every frame with the
    /// freshly laid out rects.
    pub fn set_regions(&self, regions: impl IntoIterator<Item = Rect>) {
        let Some(listeners) = self.listeners.upgrade() else {
            return;
        };
        let mut listeners = listeners.borrow_mut();
        if let Some(entry) = listeners.entries.get_mut(&self.id) {
            entry.regions = regions.into_iter().collect();
        }
    }

    pub fn take_dismissed(&self) -> bool {
        let Some(listeners) = self.listeners.upgrade() else {
            return false;
        };
        let mut listeners = listeners.borrow_mut();
        match listeners.entries.get_mut(&self.id) {
            Some(entry) => std::mem::take(&mut entry.dismissed),
            None => false,
        }
    }
}

impl Drop for OutsideClickListener {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().entries.remove(&self.id);
        }
    }
}
