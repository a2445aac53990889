//! A document with an inspector attached
//!
//! `Page` owns the document, its document-scope listener registry and
//! the inspector, and routes dispatched events through the registry's
//! capture/target/bubble order.

use fos_dom::{Document, NodeId, UiEvent};

use crate::{EventSource, Inspector, InspectorConfig, LogSink, SelectorSink};

/// What one dispatched event did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Selector emitted during dispatch
    pub selector: Option<String>,
    /// Host default action was suppressed
    pub default_prevented: bool,
    /// Inspector listeners that ran
    pub handled: usize,
}

/// Document plus inspector
pub struct Page<S: SelectorSink = LogSink> {
    document: Document,
    events: Box<dyn EventSource>,
    inspector: Inspector<NodeId, S>,
}

impl Page<LogSink> {
    pub fn new(document: Document, config: InspectorConfig) -> Self {
        Self::with_sink(document, config, LogSink)
    }
}

impl<S: SelectorSink> Page<S> {
    pub fn with_sink(document: Document, config: InspectorConfig, sink: S) -> Self {
        let events = config.event_source();
        Self {
            document,
            events,
            inspector: Inspector::with_sink(config, sink),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn inspector(&self) -> &Inspector<NodeId, S> {
        &self.inspector
    }

    pub fn events(&self) -> &dyn EventSource {
        self.events.as_ref()
    }

    pub fn sink(&self) -> &S {
        self.inspector.sink()
    }

    /// Begin an inspection session
    pub fn start(&mut self) -> bool {
        self.inspector.start(self.events.as_mut())
    }

    /// End the session as if the cancel key had been pressed
    pub fn stop(&mut self) -> bool {
        self.inspector.cancel(&mut self.document, self.events.as_mut())
    }

    /// Current `outline` of an element
    pub fn outline(&self, node: NodeId) -> Option<&str> {
        self.document.tree().element(node)?.style.get_property("outline")
    }

    /// Deliver `event` to every listener on its propagation path
    pub fn dispatch(&mut self, mut event: UiEvent) -> DispatchOutcome {
        let path = self.document.tree().path_from_root(event.target);
        let order = self.events.registry().dispatch_order(&path, event.event_type);
        let mut outcome = DispatchOutcome::default();

        for entry in order {
            // Listeners removed earlier in this dispatch still appear in `order`
            if !self.inspector.owns(entry.handler_id) {
                continue;
            }

            outcome.handled += 1;
            let selector = self
                .inspector
                .handle_event(&mut self.document, self.events.as_mut(), &mut event);
            if selector.is_some() {
                outcome.selector = selector;
            }
            if event.is_propagation_stopped() {
                break;
            }
        }

        outcome.default_prevented = event.is_default_prevented();
        outcome
    }

    pub fn hover(&mut self, target: NodeId) -> DispatchOutcome {
        self.dispatch(UiEvent::mouse_over(target))
    }

    pub fn leave(&mut self, target: NodeId) -> DispatchOutcome {
        self.dispatch(UiEvent::mouse_out(target))
    }

    pub fn click(&mut self, target: NodeId) -> DispatchOutcome {
        self.dispatch(UiEvent::click(target))
    }

    /// Key press aimed at the body, shaped the way this host reports keys
    pub fn press_key(&mut self, code: u32) -> DispatchOutcome {
        let target = self.document.body().unwrap_or(NodeId::ROOT);
        let event = if self.events.supports_capture() {
            UiEvent::key_down(target, code)
        } else {
            UiEvent::legacy_key_down(target, code)
        };
        self.dispatch(event)
    }
}
