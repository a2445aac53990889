//! Selector output sinks

/// Receives each selector the inspector synthesizes
pub trait SelectorSink {
    fn emit(&mut self, selector: &str);
}

/// Writes selectors to the log at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl SelectorSink for LogSink {
    fn emit(&mut self, selector: &str) {
        tracing::info!(target: "fos_inspect", "{}", selector);
    }
}

/// Keeps every emitted selector in order
#[derive(Debug, Default, Clone)]
pub struct CollectSink {
    selectors: Vec<String>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    pub fn last(&self) -> Option<&str> {
        self.selectors.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.selectors)
    }
}

impl SelectorSink for CollectSink {
    fn emit(&mut self, selector: &str) {
        self.selectors.push(selector.to_string());
    }
}

impl<F: FnMut(&str)> SelectorSink for F {
    fn emit(&mut self, selector: &str) {
        self(selector)
    }
}
