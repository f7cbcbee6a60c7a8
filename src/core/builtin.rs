use std::collections::HashMap;

/// Lookup for vocabularies the target runtime already provides.
pub trait BuiltinVocabulary {
    /// The runtime type replacing `name`, or `None` when it must be generated.
    fn lookup(&self, name: &str) -> Option<&str>;

    fn is_builtin(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|target| !target.is_empty())
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuiltinTable {
    entries: HashMap<String, String>,
}

impl BuiltinTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.entries.insert(name.into(), target.into());
        self
    }
}

impl From<HashMap<String, String>> for BuiltinTable {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl BuiltinVocabulary for BuiltinTable {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .map(String::as_str)
            .filter(|target| !target.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_target_is_not_builtin() {
        let table = BuiltinTable::new()
            .with_entry("NullFlavor", "NullFlavor")
            .with_entry("Empty", "");

        assert_eq!(table.lookup("NullFlavor"), Some("NullFlavor"));
        assert!(table.is_builtin("NullFlavor"));
        assert!(!table.is_builtin("Empty"));
        assert!(!table.is_builtin("Gender"));
    }
}
