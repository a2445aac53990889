//! Inspection session controller
//!
//! `Inspector` is Idle until `start` registers its four document-scope
//! listeners, and returns to Idle on `cancel`. Events that reach it
//! while Idle are ignored, so listeners already queued by the host when
//! the session ended are harmless.

use std::fmt;

use fos_dom::HandlerId;

use crate::{
    css_path, EventKind, EventSource, HostEvent, InspectHost, InspectorConfig, LogSink, SelectorSink,
    CLEARED_OUTLINE,
};

/// Lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
}

#[derive(Debug, Clone, Copy)]
struct Observers {
    pointer_enter: HandlerId,
    pointer_leave: HandlerId,
    activate: HandlerId,
    key_down: HandlerId,
}

impl Observers {
    fn attach(events: &mut dyn EventSource) -> Self {
        Self {
            pointer_enter: events.attach(EventKind::PointerEnter),
            pointer_leave: events.attach(EventKind::PointerLeave),
            activate: events.attach(EventKind::Activate),
            key_down: events.attach(EventKind::KeyDown),
        }
    }

    fn entries(&self) -> [(EventKind, HandlerId); 4] {
        [
            (EventKind::PointerEnter, self.pointer_enter),
            (EventKind::PointerLeave, self.pointer_leave),
            (EventKind::Activate, self.activate),
            (EventKind::KeyDown, self.key_down),
        ]
    }

    fn contains(&self, handler: HandlerId) -> bool {
        self.entries().iter().any(|&(_, id)| id == handler)
    }
}

#[derive(Debug)]
struct Session<N> {
    observers: Observers,
    last_highlighted: Option<N>,
}

/// Element inspector
pub struct Inspector<N, S = LogSink> {
    config: InspectorConfig,
    sink: S,
    session: Option<Session<N>>,
}

impl<N: Copy + Eq + fmt::Debug> Inspector<N, LogSink> {
    /// Inspector that logs selectors
    pub fn new(config: InspectorConfig) -> Self {
        Self::with_sink(config, LogSink)
    }
}

impl<N: Copy + Eq + fmt::Debug, S: SelectorSink> Inspector<N, S> {
    pub fn with_sink(config: InspectorConfig, sink: S) -> Self {
        Self {
            config,
            sink,
            session: None,
        }
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn state(&self) -> SessionState {
        if self.session.is_some() {
            SessionState::Active
        } else {
            SessionState::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Element most recently given the highlight in this session
    pub fn last_highlighted(&self) -> Option<N> {
        self.session.as_ref()?.last_highlighted
    }

    /// Handler was registered by the current session
    pub fn owns(&self, handler: HandlerId) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.observers.contains(handler))
    }

    /// Register listeners and enter Active. Returns false if a session is
    /// already running.
    pub fn start(&mut self, events: &mut dyn EventSource) -> bool {
        if self.session.is_some() {
            tracing::warn!("Inspector already active");
            return false;
        }

        let observers = Observers::attach(events);
        tracing::debug!(capture = events.supports_capture(), "Inspector started");
        self.session = Some(Session {
            observers,
            last_highlighted: None,
        });
        true
    }

    /// Remove listeners, clear the last highlight and return to Idle.
    /// Returns false if no session was running.
    pub fn cancel<H>(&mut self, host: &mut H, events: &mut dyn EventSource) -> bool
    where
        H: InspectHost<Node = N>,
    {
        let Some(session) = self.session.take() else {
            return false;
        };

        for (kind, handler) in session.observers.entries() {
            if !events.detach(kind, handler) {
                tracing::debug!("{:?} listener {:?} was already gone", kind, handler);
            }
        }
        if let Some(node) = session.last_highlighted {
            host.set_outline(node, CLEARED_OUTLINE);
        }

        tracing::debug!("Inspector stopped");
        true
    }

    /// React to one observed event. Returns the selector emitted for an
    /// activation, if any.
    pub fn handle_event<H, E>(&mut self, host: &mut H, events: &mut dyn EventSource, event: &mut E) -> Option<String>
    where
        H: InspectHost<Node = N>,
        E: HostEvent<Node = N>,
    {
        let Some(session) = self.session.as_mut() else {
            tracing::trace!("Inspector idle, ignoring {:?}", event.kind());
            return None;
        };

        match event.kind()? {
            EventKind::PointerEnter => {
                let target = event.target()?;
                host.set_outline(target, &self.config.highlight);
                session.last_highlighted = Some(target);
                None
            }
            EventKind::PointerLeave => {
                let target = event.target()?;
                host.set_outline(target, "");
                None
            }
            EventKind::Activate => {
                event.prevent_default();
                let selector = css_path(&*host, event.target(), self.config.css_path_options());
                if selector.is_empty() {
                    return None;
                }
                self.sink.emit(&selector);
                Some(selector)
            }
            EventKind::KeyDown => {
                let key = events.pressed_key(event.which(), event.key_code());
                if key == Some(self.config.cancel_key) {
                    self.cancel(host, events);
                }
                None
            }
        }
    }
}

impl<N: fmt::Debug, S> fmt::Debug for Inspector<N, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inspector")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use fos_dom::{Document, NodeId, UiEvent};

    use super::*;
    use crate::{CaptureEvents, CollectSink, LegacyEvents, DEFAULT_HIGHLIGHT, ESCAPE_KEY};

    fn page() -> (Document, NodeId, NodeId) {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        let tree = doc.tree_mut();
        let a = tree.create_element("a");
        tree.set_attribute(a, "id", "home");
        tree.append_child(body, a);
        let b = tree.create_element("b");
        tree.append_child(body, b);
        (doc, a, b)
    }

    fn outline(doc: &Document, node: NodeId) -> Option<&str> {
        doc.tree().element(node)?.style.get_property("outline")
    }

    #[test]
    fn test_start_registers_four_listeners() {
        let mut events = CaptureEvents::new();
        let mut inspector = Inspector::<NodeId, _>::with_sink(InspectorConfig::default(), CollectSink::new());

        assert_eq!(inspector.state(), SessionState::Idle);
        assert!(inspector.start(&mut events));
        assert_eq!(inspector.state(), SessionState::Active);
        assert_eq!(events.registry().listener_count(), 4);

        assert!(!inspector.start(&mut events));
        assert_eq!(events.registry().listener_count(), 4);
    }

    #[test]
    fn test_idle_ignores_events() {
        let (mut doc, a, _) = page();
        let mut events = CaptureEvents::new();
        let mut inspector = Inspector::with_sink(InspectorConfig::default(), CollectSink::new());

        let mut click = UiEvent::click(a);
        assert_eq!(inspector.handle_event(&mut doc, &mut events, &mut click), None);
        assert!(!click.is_default_prevented());

        let mut hover = UiEvent::mouse_over(a);
        inspector.handle_event(&mut doc, &mut events, &mut hover);
        assert_eq!(outline(&doc, a), None);
        assert!(inspector.sink().is_empty());
    }

    #[test]
    fn test_hover_click_cancel() {
        let (mut doc, a, b) = page();
        let mut events = CaptureEvents::new();
        let mut inspector = Inspector::with_sink(InspectorConfig::default(), CollectSink::new());
        inspector.start(&mut events);

        inspector.handle_event(&mut doc, &mut events, &mut UiEvent::mouse_over(a));
        assert_eq!(outline(&doc, a), Some(DEFAULT_HIGHLIGHT));
        inspector.handle_event(&mut doc, &mut events, &mut UiEvent::mouse_out(a));
        assert_eq!(outline(&doc, a), None);
        inspector.handle_event(&mut doc, &mut events, &mut UiEvent::mouse_over(b));
        assert_eq!(inspector.last_highlighted(), Some(b));

        let mut click = UiEvent::click(a);
        let selector = inspector.handle_event(&mut doc, &mut events, &mut click);
        assert_eq!(selector.as_deref(), Some("a#home"));
        assert!(click.is_default_prevented());
        assert!(!click.return_value);

        let mut other_key = UiEvent::key_down(NodeId::ROOT, 13);
        inspector.handle_event(&mut doc, &mut events, &mut other_key);
        assert!(inspector.is_active());

        let mut escape = UiEvent::key_down(NodeId::ROOT, ESCAPE_KEY);
        inspector.handle_event(&mut doc, &mut events, &mut escape);
        assert!(!inspector.is_active());
        assert_eq!(outline(&doc, b), Some(CLEARED_OUTLINE));
        assert_eq!(events.registry().listener_count(), 0);
        assert_eq!(inspector.sink().selectors(), ["a#home".to_string()]);
    }

    #[test]
    fn test_legacy_cancel_reads_key_code() {
        let (mut doc, _, _) = page();
        let mut events = LegacyEvents::new();
        let mut inspector = Inspector::with_sink(InspectorConfig::default(), CollectSink::new());
        inspector.start(&mut events);

        let mut modern = UiEvent::key_down(NodeId::ROOT, ESCAPE_KEY);
        modern.key_code = None;
        inspector.handle_event(&mut doc, &mut events, &mut modern);
        assert!(inspector.is_active());

        let mut legacy = UiEvent::legacy_key_down(NodeId::ROOT, ESCAPE_KEY);
        inspector.handle_event(&mut doc, &mut events, &mut legacy);
        assert!(!inspector.is_active());
    }

    #[test]
    fn test_cancel_without_hover_touches_nothing() {
        let (mut doc, a, b) = page();
        let mut events = CaptureEvents::new();
        let mut inspector = Inspector::<NodeId, _>::with_sink(InspectorConfig::default(), CollectSink::new());

        assert!(!inspector.cancel(&mut doc, &mut events));
        inspector.start(&mut events);
        assert!(inspector.cancel(&mut doc, &mut events));
        assert_eq!(outline(&doc, a), None);
        assert_eq!(outline(&doc, b), None);
    }

    #[test]
    fn test_restart_after_cancel() {
        let (mut doc, a, _) = page();
        let mut events = CaptureEvents::new();
        let mut inspector = Inspector::with_sink(InspectorConfig::default(), CollectSink::new());

        inspector.start(&mut events);
        inspector.handle_event(&mut doc, &mut events, &mut UiEvent::mouse_over(a));
        inspector.cancel(&mut doc, &mut events);

        assert!(inspector.start(&mut events));
        assert_eq!(inspector.last_highlighted(), None);
        assert_eq!(events.registry().listener_count(), 4);
    }

    #[test]
    fn test_owns_only_current_handlers() {
        let (mut doc, _, _) = page();
        let mut events = CaptureEvents::new();
        let mut inspector = Inspector::<NodeId, _>::with_sink(InspectorConfig::default(), CollectSink::new());
        inspector.start(&mut events);

        let handlers: Vec<_> = events
            .registry()
            .dispatch_order(&[NodeId::ROOT], fos_dom::EventType::Click)
            .into_iter()
            .map(|d| d.handler_id)
            .collect();
        assert_eq!(handlers.len(), 1);
        assert!(inspector.owns(handlers[0]));

        inspector.cancel(&mut doc, &mut events);
        assert!(!inspector.owns(handlers[0]));
    }

    #[test]
    fn test_closure_sink_receives_selector() {
        let (mut doc, a, _) = page();
        let mut events = CaptureEvents::new();
        let mut seen = Vec::new();
        {
            let mut inspector = Inspector::with_sink(InspectorConfig::default(), |s: &str| seen.push(s.to_string()));
            inspector.start(&mut events);
            inspector.handle_event(&mut doc, &mut events, &mut UiEvent::click(a));
        }
        assert_eq!(seen, vec!["a#home".to_string()]);
    }
}
