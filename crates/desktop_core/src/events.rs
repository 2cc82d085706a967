//! Lifecycle notifications for the rendering layer.
//!
//! # Invariants
//! - Listeners run synchronously, in subscription order, after the transition
//!   that produced the event has been committed.
//! - Unsubscribed listeners never observe later events.

use crate::model::geometry::{Position, Size};
use crate::model::window::{InstanceId, WindowId};

/// State transition published by the desktop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopEvent {
    AppRegistered {
        app_id: String,
    },
    InstanceLaunched {
        instance_id: InstanceId,
        app_id: String,
    },
    InstanceTerminated {
        instance_id: InstanceId,
        app_id: String,
    },
    WindowCreated {
        window_id: WindowId,
        instance_id: InstanceId,
    },
    WindowOpened(WindowId),
    WindowFocused(WindowId),
    WindowMinimized(WindowId),
    WindowRestored(WindowId),
    WindowMaximized(WindowId),
    WindowUnmaximized(WindowId),
    WindowMoved {
        window_id: WindowId,
        position: Position,
    },
    WindowResized {
        window_id: WindowId,
        size: Size,
    },
    WindowClosing(WindowId),
    WindowDestroyed {
        window_id: WindowId,
        instance_id: InstanceId,
    },
    ComponentStateChanged {
        window_id: WindowId,
        state: &'static str,
    },
}

/// Listener registration handle.
pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&DesktopEvent)>;

#[derive(Default)]
pub struct EventBus {
    next_id: SubscriptionId,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&DesktopEvent) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = self.next_id;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes one listener; returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn publish(&mut self, event: &DesktopEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
