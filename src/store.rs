//! The owning store. Every value handed out is an owned copy, so nothing a
//! caller does with a result can reach the tree held here.

use crate::access::{self, Resolution};
use crate::codec::{JsonCodec, TreeCodec};
use crate::errors::TreeError;
use crate::merge::{deep_merge, merge_object};
use crate::model::{kind_of, KeyPath, TreeMap, TreeValue};
use crate::options::{ArrayRemoval, SetOptions, StoreOptions};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

#[derive(Clone)]
pub struct TreeStore {
    tree: TreeValue,
    initial: TreeValue,
    options: StoreOptions,
    codec: Arc<dyn TreeCodec>,
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new(TreeValue::Object(TreeMap::new()))
    }
}

impl fmt::Debug for TreeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeStore")
            .field("tree", &self.tree)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl TreeStore {
    pub fn new(initial: TreeValue) -> Self {
        Self::with_options(initial, StoreOptions::default())
    }

    pub fn with_options(initial: TreeValue, options: StoreOptions) -> Self {
        Self {
            tree: initial.clone(),
            initial,
            options,
            codec: Arc::new(JsonCodec),
        }
    }

    pub fn with_codec(mut self, codec: impl TreeCodec) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Copy of the value at `path`, `None` when nothing lives there.
    /// The empty path addresses the whole tree.
    pub fn get(&self, path: &str) -> Option<TreeValue> {
        let found = access::get_path(&self.tree, path).cloned();
        if found.is_none() {
            trace!(path = %path, "config tree read miss");
        }
        found
    }

    pub fn get_or(&self, path: &str, default: TreeValue) -> TreeValue {
        self.get(path).unwrap_or(default)
    }

    /// Typed read. Absence is `Ok(None)`; a value of the wrong shape is an error.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, TreeError> {
        match access::get_path(&self.tree, path) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| TreeError::Decode {
                    path: KeyPath::from(path),
                    detail: e.to_string(),
                }),
        }
    }

    pub fn has(&self, path: &str) -> bool {
        access::get_path(&self.tree, path).is_some()
    }

    pub fn snapshot(&self) -> TreeValue {
        self.tree.clone()
    }

    /// Writes `value` at `path`, creating missing intermediate mappings.
    ///
    /// With `merge`, mappings are deep-merged into what is already there;
    /// everything else replaces it. With `parse`, string values are first
    /// decoded as JSON text and kept verbatim when they are not valid JSON.
    /// Returns a copy of the value now stored at `path`.
    ///
    /// A path through an array that its segment cannot index, or an index more
    /// than [`MAX_ARRAY_PADDING`](access::MAX_ARRAY_PADDING) past the end,
    /// writes nothing; the result is then whatever `path` already holds, or
    /// null.
    pub fn set(&mut self, path: &str, value: TreeValue, options: SetOptions) -> TreeValue {
        let value = if options.parse {
            self.decode_text(value)
        } else {
            value
        };

        let path = KeyPath::from(path);
        if path.is_root() {
            return self.set_root(value, options.merge);
        }

        let written = match access::resolve_for_mutation(&mut self.tree, &path, true) {
            Resolution::Slot { container, key } => slot_mut(container, &key).map(|slot| {
                assign(slot, value, options.merge);
                slot.clone()
            }),
            Resolution::Blocked { .. } | Resolution::Absent => None,
        };

        match written {
            Some(stored) => {
                debug!(path = %path, merge = options.merge, "config tree value set");
                stored
            }
            None => {
                warn!(path = %path, "config tree write skipped, array cannot hold the path");
                self.get(&path.0).unwrap_or(TreeValue::Null)
            }
        }
    }

    pub fn set_with_defaults(&mut self, path: &str, value: TreeValue) -> TreeValue {
        let options = self.options.set_defaults;
        self.set(path, value, options)
    }

    fn set_root(&mut self, value: TreeValue, merge: bool) -> TreeValue {
        let computed = match (&mut self.tree, value) {
            (TreeValue::Object(tree), TreeValue::Object(map)) => {
                if merge {
                    merge_object(tree, map);
                    TreeValue::Object(tree.clone())
                } else {
                    tree.extend(map.clone());
                    TreeValue::Object(map)
                }
            }
            (TreeValue::Object(_), other) => {
                debug!(kind = kind_of(&other), "config tree root left as is, value is not a mapping");
                other
            }
            (tree, other) => {
                *tree = other.clone();
                other
            }
        };
        debug!(path = %KeyPath::root(), merge, "config tree value set");
        computed
    }

    fn decode_text(&self, value: TreeValue) -> TreeValue {
        match value {
            TreeValue::String(text) => match self.codec.decode(&text) {
                Ok(decoded) => decoded,
                Err(_) => TreeValue::String(text),
            },
            other => other,
        }
    }

    /// Appends to the array stored at `path` and returns a copy of it.
    pub fn push(&mut self, path: &str, value: TreeValue) -> Result<TreeValue, TreeError> {
        let key_path = KeyPath::from(path);
        match access::get_path_mut(&mut self.tree, path) {
            Some(TreeValue::Array(items)) => {
                items.push(value);
                debug!(path = %key_path, len = items.len(), "config tree value pushed");
                Ok(TreeValue::Array(items.clone()))
            }
            Some(other) => Err(TreeError::not_an_array(&key_path, kind_of(other))),
            None => Err(TreeError::not_an_array(&key_path, "nothing")),
        }
    }

    /// Deletes the entry at `path` and returns a copy of its container as it
    /// is afterwards. `None` when the container does not exist. The root
    /// itself cannot be removed; use [`reset`](Self::reset).
    pub fn remove(&mut self, path: &str) -> Option<TreeValue> {
        let key_path = KeyPath::from(path);
        if key_path.is_root() {
            return Some(self.snapshot());
        }

        let mode = self.options.array_removal;
        let Resolution::Slot { container, key } =
            access::resolve_for_mutation(&mut self.tree, &key_path, false)
        else {
            trace!(path = %key_path, "config tree remove found no container");
            return None;
        };

        let removed = match &mut *container {
            TreeValue::Object(map) => map.remove(&key).is_some(),
            TreeValue::Array(items) => remove_element(items, &key, mode),
            _ => false,
        };
        if removed {
            debug!(path = %key_path, "config tree value removed");
        }
        Some(container.clone())
    }

    /// Replaces the tree with `to`, or with the construction value when `to`
    /// is `None`. The construction value itself never changes.
    pub fn reset(&mut self, to: Option<TreeValue>) -> TreeValue {
        let to_initial = to.is_none();
        self.tree = to.unwrap_or_else(|| self.initial.clone());
        debug!(to_initial, "config tree reset");
        self.tree.clone()
    }

    pub fn serialize(&self) -> String {
        if self.options.pretty {
            self.codec.encode_pretty(&self.tree)
        } else {
            self.codec.encode(&self.tree)
        }
    }
}

/// The entry `key` names inside `container`, created as null when missing.
/// Array keys must be indices; writing shortly past the end pads with null.
fn slot_mut<'a>(container: &'a mut TreeValue, key: &str) -> Option<&'a mut TreeValue> {
    match container {
        TreeValue::Object(map) => Some(map.entry(key.to_string()).or_insert(TreeValue::Null)),
        TreeValue::Array(items) => access::array_slot(items, key),
        _ => None,
    }
}

fn assign(slot: &mut TreeValue, value: TreeValue, merge: bool) {
    if !merge {
        *slot = value;
        return;
    }
    if slot.is_null() {
        *slot = TreeValue::Object(TreeMap::new());
    }
    deep_merge(slot, value);
}

fn remove_element(items: &mut Vec<TreeValue>, key: &str, mode: ArrayRemoval) -> bool {
    let Some(idx) = access::parse_index(key).filter(|idx| *idx < items.len()) else {
        return false;
    };
    match mode {
        ArrayRemoval::ByIndex => {
            items.remove(idx);
            true
        }
        ArrayRemoval::ByValue => {
            let target = items[idx].clone();
            match items.iter().position(|item| *item == target) {
                Some(pos) => {
                    items.remove(pos);
                    true
                }
                None => false,
            }
        }
    }
}
