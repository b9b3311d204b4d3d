//! Scoped registration of host-level input listeners
//!
//! The host event loop only forwards global pointer, scroll and modifier
//! events to the grid while the matching listener is attached. Attachments
//! are held by [`ListenerGuard`] values and released when they drop.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Global input streams a widget can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    KeyDown,
    KeyUp,
    PointerMove,
    PointerUp,
    Scroll,
}

/// Modifier key tracking, held for the widget's whole lifetime
pub const MODIFIER_LISTENERS: [Listener; 2] = [Listener::KeyDown, Listener::KeyUp];

/// Drag tracking, held only while a drag is in progress
pub const DRAG_LISTENERS: [Listener; 3] =
    [Listener::Scroll, Listener::PointerMove, Listener::PointerUp];

/// Shared table of attached listeners (single-threaded)
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    attached: Rc<RefCell<HashMap<Listener, usize>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `listeners` until the returned guard is dropped
    #[must_use = "listeners are detached as soon as the guard is dropped"]
    pub fn attach(&self, listeners: &[Listener]) -> ListenerGuard {
        let mut attached = self.attached.borrow_mut();
        for &listener in listeners {
            *attached.entry(listener).or_insert(0) += 1;
        }
        log::trace!("attached listeners {:?}", listeners);

        ListenerGuard {
            registry: self.clone(),
            listeners: listeners.to_vec(),
        }
    }

    pub fn is_attached(&self, listener: Listener) -> bool {
        self.attached.borrow().contains_key(&listener)
    }

    /// Total number of live attachments across all listener kinds
    pub fn attached_count(&self) -> usize {
        self.attached.borrow().values().sum()
    }

    fn detach(&self, listeners: &[Listener]) {
        let mut attached = self.attached.borrow_mut();
        for listener in listeners {
            if let Some(count) = attached.get_mut(listener) {
                *count -= 1;
                if *count == 0 {
                    attached.remove(listener);
                }
            }
        }
        log::trace!("detached listeners {:?}", listeners);
    }
}

/// Live attachment; detaches on drop
#[derive(Debug)]
pub struct ListenerGuard {
    registry: ListenerRegistry,
    listeners: Vec<Listener>,
}

impl ListenerGuard {
    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.registry.detach(&self.listeners);
    }
}
