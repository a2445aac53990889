//! Inline style declarations (`element.style`)

/// Ordered list of inline `property: value` pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    properties: Vec<(String, String)>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `style` attribute value. Malformed declarations are skipped.
    pub fn parse(text: &str) -> Self {
        let mut style = Self::new();
        for declaration in text.split(';') {
            if let Some((name, value)) = declaration.split_once(':') {
                style.set_property(name.trim(), value.trim());
            }
        }
        style
    }

    /// Get a property value
    pub fn get_property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a property. An empty value removes it, as `style.outline = ''` does.
    pub fn set_property(&mut self, name: &str, value: &str) {
        if name.is_empty() {
            return;
        }
        if value.is_empty() {
            self.remove_property(name);
            return;
        }
        let name = name.to_ascii_lowercase();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.properties.push((name, value.to_string())),
        }
    }

    /// Remove a property, returning its old value
    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let index = self
            .properties
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))?;
        Some(self.properties.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Serialize back to `style` attribute text
    pub fn css_text(&self) -> String {
        self.properties
            .iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
