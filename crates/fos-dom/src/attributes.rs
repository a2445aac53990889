//! Element Attributes
//!
//! Ordered attribute storage. Elements carry few attributes, so lookups
//! are linear scans over a `Vec`.

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            value: value.into(),
        }
    }

    pub fn is_id(&self) -> bool {
        self.name == "id"
    }
}

/// Named node map (attribute collection), in source order
#[derive(Debug, Clone, Default)]
pub struct NamedNodeMap {
    attributes: Vec<Attr>,
}

impl NamedNodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of attributes
    pub fn length(&self) -> usize {
        self.attributes.len()
    }

    /// Get attribute by index
    pub fn item(&self, index: usize) -> Option<&Attr> {
        self.attributes.get(index)
    }

    /// Get attribute by name (names are ASCII case-insensitive)
    pub fn get_named_item(&self, name: &str) -> Option<&Attr> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Get attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.get_named_item(name).map(|a| a.value.as_str())
    }

    /// Set attribute, returning the replaced one
    pub fn set_named_item(&mut self, attr: Attr) -> Option<Attr> {
        match self.attributes.iter_mut().find(|a| a.name == attr.name) {
            Some(existing) => Some(std::mem::replace(existing, attr)),
            None => {
                self.attributes.push(attr);
                None
            }
        }
    }

    /// Set attribute by name/value
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.set_named_item(Attr::new(name, value));
    }

    /// Remove attribute by name
    pub fn remove_named_item(&mut self, name: &str) -> Option<Attr> {
        let index = self
            .attributes
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))?;
        Some(self.attributes.remove(index))
    }

    /// Check if attribute exists
    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_named_item(name).is_some()
    }

    /// Iterate over attributes
    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_attribute() {
        let mut attrs = NamedNodeMap::new();
        attrs.set_attribute("class", "btn");
        attrs.set_attribute("ID", "submit");

        assert_eq!(attrs.length(), 2);
        assert_eq!(attrs.get_attribute("class"), Some("btn"));
        assert_eq!(attrs.get_attribute("id"), Some("submit"));
        assert!(attrs.item(1).is_some_and(Attr::is_id));
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut attrs = NamedNodeMap::new();
        attrs.set_attribute("id", "a");
        attrs.set_attribute("class", "b");

        let old = attrs.set_named_item(Attr::new("id", "c"));
        assert_eq!(old.map(|a| a.value), Some("a".to_string()));
        assert_eq!(attrs.item(0).map(|a| a.value.as_str()), Some("c"));
    }

    #[test]
    fn test_remove_attribute() {
        let mut attrs = NamedNodeMap::new();
        attrs.set_attribute("foo", "bar");

        assert!(attrs.has_attribute("foo"));
        attrs.remove_named_item("foo");
        assert!(!attrs.has_attribute("foo"));
        assert!(attrs.remove_named_item("foo").is_none());
    }
}
