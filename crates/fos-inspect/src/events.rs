//! Event plumbing between the host and the inspector
//!
//! The inspector observes four kinds of events at document scope. How
//! it subscribes depends on the host: modern hosts register in the
//! capture phase and report keys via `which`; legacy hosts only offer
//! bubble-phase registration and report keys via `keyCode`.

use fos_dom::{EventRegistry, EventType, HandlerId, ListenerOptions, NodeId, UiEvent};

/// Events the inspector reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerEnter,
    PointerLeave,
    Activate,
    KeyDown,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::PointerEnter,
        EventKind::PointerLeave,
        EventKind::Activate,
        EventKind::KeyDown,
    ];

    /// Host event type this kind maps onto
    pub fn event_type(self) -> EventType {
        match self {
            EventKind::PointerEnter => EventType::MouseOver,
            EventKind::PointerLeave => EventType::MouseOut,
            EventKind::Activate => EventType::Click,
            EventKind::KeyDown => EventType::KeyDown,
        }
    }

    pub fn from_event_type(event_type: EventType) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.event_type() == event_type)
    }
}

/// An event as the inspector sees it
pub trait HostEvent {
    type Node: Copy;

    /// `None` for events the inspector does not observe
    fn kind(&self) -> Option<EventKind>;

    /// Element the event was aimed at
    fn target(&self) -> Option<Self::Node>;

    /// Suppress the host's default action
    fn prevent_default(&mut self);

    /// Key code in the modern field
    fn which(&self) -> Option<u32>;

    /// Key code in the legacy field
    fn key_code(&self) -> Option<u32>;
}

impl HostEvent for UiEvent {
    type Node = NodeId;

    fn kind(&self) -> Option<EventKind> {
        EventKind::from_event_type(self.event_type)
    }

    fn target(&self) -> Option<NodeId> {
        self.target.to_option()
    }

    fn prevent_default(&mut self) {
        UiEvent::prevent_default(self);
    }

    fn which(&self) -> Option<u32> {
        self.which
    }

    fn key_code(&self) -> Option<u32> {
        self.key_code
    }
}

/// Document-scope listener registration
pub trait EventSource {
    /// Listeners run in the capture phase
    fn supports_capture(&self) -> bool;

    /// Register a document-scope listener for `kind`
    fn attach(&mut self, kind: EventKind) -> HandlerId;

    /// Remove a listener added by `attach`
    fn detach(&mut self, kind: EventKind, handler: HandlerId) -> bool;

    /// Read the pressed key using this host's convention
    fn pressed_key(&self, which: Option<u32>, key_code: Option<u32>) -> Option<u32>;

    /// Listeners registered so far
    fn registry(&self) -> &EventRegistry;
}

/// Capture-phase registration on the document, keys read from `which`
#[derive(Debug)]
pub struct CaptureEvents {
    registry: EventRegistry,
    scope: NodeId,
}

impl CaptureEvents {
    pub fn new() -> Self {
        Self::with_registry(EventRegistry::new())
    }

    /// Share a registry that already holds page listeners
    pub fn with_registry(registry: EventRegistry) -> Self {
        Self {
            registry,
            scope: NodeId::ROOT,
        }
    }
}

impl Default for CaptureEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CaptureEvents {
    fn supports_capture(&self) -> bool {
        true
    }

    fn attach(&mut self, kind: EventKind) -> HandlerId {
        attach(&mut self.registry, self.scope, kind, ListenerOptions::capture())
    }

    fn detach(&mut self, kind: EventKind, handler: HandlerId) -> bool {
        self.registry
            .remove_listener(self.scope, kind.event_type(), handler, true)
    }

    fn pressed_key(&self, which: Option<u32>, _key_code: Option<u32>) -> Option<u32> {
        which
    }

    fn registry(&self) -> &EventRegistry {
        &self.registry
    }
}

/// Bubble-phase registration on the document, keys read from `keyCode`
#[derive(Debug)]
pub struct LegacyEvents {
    registry: EventRegistry,
    scope: NodeId,
}

impl LegacyEvents {
    pub fn new() -> Self {
        Self::with_registry(EventRegistry::new())
    }

    pub fn with_registry(registry: EventRegistry) -> Self {
        Self {
            registry,
            scope: NodeId::ROOT,
        }
    }
}

impl Default for LegacyEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for LegacyEvents {
    fn supports_capture(&self) -> bool {
        false
    }

    fn attach(&mut self, kind: EventKind) -> HandlerId {
        attach(&mut self.registry, self.scope, kind, ListenerOptions::bubble())
    }

    fn detach(&mut self, kind: EventKind, handler: HandlerId) -> bool {
        self.registry
            .remove_listener(self.scope, kind.event_type(), handler, false)
    }

    fn pressed_key(&self, _which: Option<u32>, key_code: Option<u32>) -> Option<u32> {
        key_code
    }

    fn registry(&self) -> &EventRegistry {
        &self.registry
    }
}

fn attach(registry: &mut EventRegistry, scope: NodeId, kind: EventKind, options: ListenerOptions) -> HandlerId {
    let handler = registry.allocate_handler();
    registry.add_listener(scope, kind.event_type(), handler, options);
    handler
}
