//! UI Events
//!
//! Event objects, listener registration and dispatch ordering.

use crate::NodeId;
use std::collections::HashMap;

/// Event type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    MouseDown,
    MouseUp,
    MouseMove,
    MouseOver,
    MouseOut,
    MouseEnter,
    MouseLeave,
    KeyDown,
    KeyUp,
    Focus,
    Blur,
    Load,
}

impl EventType {
    /// Check if this event type can bubble
    pub fn bubbles(&self) -> bool {
        !matches!(
            self,
            EventType::Focus | EventType::Blur | EventType::Load | EventType::MouseEnter | EventType::MouseLeave
        )
    }

    /// Check if the default action can be prevented
    pub fn cancelable(&self) -> bool {
        !matches!(
            self,
            EventType::Focus
                | EventType::Blur
                | EventType::Load
                | EventType::MouseEnter
                | EventType::MouseLeave
        )
    }

    /// DOM event name (`addEventListener` form)
    pub fn name(&self) -> &'static str {
        match self {
            EventType::Click => "click",
            EventType::MouseDown => "mousedown",
            EventType::MouseUp => "mouseup",
            EventType::MouseMove => "mousemove",
            EventType::MouseOver => "mouseover",
            EventType::MouseOut => "mouseout",
            EventType::MouseEnter => "mouseenter",
            EventType::MouseLeave => "mouseleave",
            EventType::KeyDown => "keydown",
            EventType::KeyUp => "keyup",
            EventType::Focus => "focus",
            EventType::Blur => "blur",
            EventType::Load => "load",
        }
    }
}

/// Event handler ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub u64);

/// Listener options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Fire during the capture phase
    pub capture: bool,
}

impl ListenerOptions {
    pub fn capture() -> Self {
        Self { capture: true }
    }

    pub fn bubble() -> Self {
        Self { capture: false }
    }
}

/// Registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventListener {
    pub handler_id: HandlerId,
    pub capture: bool,
}

/// Dispatch phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    Capturing,
    AtTarget,
    Bubbling,
}

/// One listener invocation in dispatch order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub current_target: NodeId,
    pub handler_id: HandlerId,
    pub phase: EventPhase,
}

/// Listener registry keyed by (target, event type)
#[derive(Debug, Default)]
pub struct EventRegistry {
    handlers: HashMap<(NodeId, EventType), Vec<EventListener>>,
    next_handler: u64,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a fresh handler ID
    pub fn allocate_handler(&mut self) -> HandlerId {
        self.next_handler += 1;
        HandlerId(self.next_handler)
    }

    /// Add a listener. Returns false if the same handler is already
    /// registered with the same capture flag.
    pub fn add_listener(
        &mut self,
        target: NodeId,
        event_type: EventType,
        handler_id: HandlerId,
        options: ListenerOptions,
    ) -> bool {
        let listeners = self.handlers.entry((target, event_type)).or_default();
        if listeners
            .iter()
            .any(|l| l.handler_id == handler_id && l.capture == options.capture)
        {
            return false;
        }
        listeners.push(EventListener {
            handler_id,
            capture: options.capture,
        });
        tracing::trace!("add {} listener {:?} on {:?}", event_type.name(), handler_id, target);
        true
    }

    /// Remove a listener
    pub fn remove_listener(
        &mut self,
        target: NodeId,
        event_type: EventType,
        handler_id: HandlerId,
        capture: bool,
    ) -> bool {
        let key = (target, event_type);
        let Some(listeners) = self.handlers.get_mut(&key) else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|l| !(l.handler_id == handler_id && l.capture == capture));
        let removed = listeners.len() < before;
        if listeners.is_empty() {
            self.handlers.remove(&key);
        }
        removed
    }

    /// Listeners on a target for one event type, in registration order
    pub fn listeners(&self, target: NodeId, event_type: EventType) -> &[EventListener] {
        self.handlers
            .get(&(target, event_type))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check whether a handler is registered on a target
    pub fn has_listener(&self, target: NodeId, event_type: EventType, handler_id: HandlerId) -> bool {
        self.listeners(target, event_type)
            .iter()
            .any(|l| l.handler_id == handler_id)
    }

    /// Total number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    /// Invocation order for an event travelling along `path` (outermost
    /// first, target last): capture listeners from the outside in, every
    /// listener on the target, then non-capture listeners from the inside
    /// out if the type bubbles.
    pub fn dispatch_order(&self, path: &[NodeId], event_type: EventType) -> Vec<Dispatch> {
        let Some((&target, ancestors)) = path.split_last() else {
            return Vec::new();
        };
        let mut order = Vec::new();

        for &node in ancestors {
            order.extend(
                self.listeners(node, event_type)
                    .iter()
                    .filter(|l| l.capture)
                    .map(|l| Dispatch {
                        current_target: node,
                        handler_id: l.handler_id,
                        phase: EventPhase::Capturing,
                    }),
            );
        }

        let at_target = self.listeners(target, event_type);
        let capture_first = at_target.iter().filter(|l| l.capture);
        let then_bubble = at_target.iter().filter(|l| !l.capture);
        order.extend(capture_first.chain(then_bubble).map(|l| Dispatch {
            current_target: target,
            handler_id: l.handler_id,
            phase: EventPhase::AtTarget,
        }));

        if event_type.bubbles() {
            for &node in ancestors.iter().rev() {
                order.extend(
                    self.listeners(node, event_type)
                        .iter()
                        .filter(|l| !l.capture)
                        .map(|l| Dispatch {
                            current_target: node,
                            handler_id: l.handler_id,
                            phase: EventPhase::Bubbling,
                        }),
                );
            }
        }

        order
    }
}

/// Mouse or keyboard event delivered to listeners
#[derive(Debug, Clone)]
pub struct UiEvent {
    pub event_type: EventType,
    pub target: NodeId,
    /// Key code as modern hosts report it (`event.which`)
    pub which: Option<u32>,
    /// Key code as legacy hosts report it (`window.event.keyCode`)
    pub key_code: Option<u32>,
    pub bubbles: bool,
    pub cancelable: bool,
    /// Legacy counterpart of `preventDefault()`
    pub return_value: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl UiEvent {
    /// Create an event of the given type aimed at `target`
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            which: None,
            key_code: None,
            bubbles: event_type.bubbles(),
            cancelable: event_type.cancelable(),
            return_value: true,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// `mouseover` on `target`
    pub fn mouse_over(target: NodeId) -> Self {
        Self::new(EventType::MouseOver, target)
    }

    /// `mouseout` on `target`
    pub fn mouse_out(target: NodeId) -> Self {
        Self::new(EventType::MouseOut, target)
    }

    /// `click` on `target`
    pub fn click(target: NodeId) -> Self {
        Self::new(EventType::Click, target)
    }

    /// `keydown` as a modern host delivers it (`which` and `keyCode` set)
    pub fn key_down(target: NodeId, code: u32) -> Self {
        Self {
            which: Some(code),
            key_code: Some(code),
            ..Self::new(EventType::KeyDown, target)
        }
    }

    /// `keydown` as a legacy host delivers it (no `which`)
    pub fn legacy_key_down(target: NodeId, code: u32) -> Self {
        Self {
            key_code: Some(code),
            ..Self::new(EventType::KeyDown, target)
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
            self.return_value = false;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Check if propagation was stopped
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
