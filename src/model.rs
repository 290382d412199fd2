use serde::{Deserialize, Serialize};
use std::fmt;

pub type TreeValue = serde_json::Value;
pub type TreeMap = serde_json::Map<String, serde_json::Value>;

/// Dotted address of a node inside the tree. The empty path is the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyPath(pub String);

impl KeyPath {
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        split_key(&self.0).into_iter()
    }

    /// Splits into the path of the parent container and the final key.
    /// `None` for the root.
    pub fn location(&self) -> Option<Location> {
        if self.is_root() {
            return None;
        }
        let (container, key) = match self.0.rsplit_once('.') {
            Some((parent, last)) => (KeyPath(parent.to_string()), last),
            None => (KeyPath::root(), self.0.as_str()),
        };
        Some(Location {
            container,
            key: key.to_string(),
        })
    }
}

impl From<&str> for KeyPath {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for KeyPath {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Purely syntactic split on `.`; the empty string has no segments.
pub fn split_key(dotted: &str) -> Vec<&str> {
    if dotted.is_empty() {
        Vec::new()
    } else {
        dotted.split('.').collect()
    }
}

/// Where a value lives or should be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub container: KeyPath,
    pub key: String,
}

/// Short kind label used in errors and logs.
pub fn kind_of(value: &TreeValue) -> &'static str {
    match value {
        TreeValue::Null => "null",
        TreeValue::Bool(_) => "boolean",
        TreeValue::Number(_) => "number",
        TreeValue::String(_) => "string",
        TreeValue::Array(_) => "array",
        TreeValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_segments() {
        assert_eq!(split_key("a.b.c"), vec!["a", "b", "c"]);
        assert!(split_key("").is_empty());
        assert_eq!(KeyPath::from("x").segments().collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn location_names_container_and_key() {
        let loc = KeyPath::from("a.b.c").location().unwrap();
        assert_eq!(loc.container, KeyPath::from("a.b"));
        assert_eq!(loc.key, "c");

        let loc = KeyPath::from("a").location().unwrap();
        assert!(loc.container.is_root());
        assert_eq!(loc.key, "a");

        assert!(KeyPath::root().location().is_none());
    }
}
