use crate::errors::TreeError;
use crate::model::TreeValue;
use serde::{Deserialize, Serialize};

/// Per-call switches for [`TreeStore::set`](crate::store::TreeStore::set).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetOptions {
    /// Decode string values as JSON text, keeping the raw string when that fails.
    pub parse: bool,
    /// Deep-merge into the existing value instead of replacing it.
    pub merge: bool,
}

impl Default for SetOptions {
    fn default() -> Self {
        Self {
            parse: true,
            merge: true,
        }
    }
}

impl SetOptions {
    pub fn raw() -> Self {
        Self {
            parse: false,
            merge: true,
        }
    }

    pub fn replace() -> Self {
        Self {
            parse: true,
            merge: false,
        }
    }

    pub fn with_parse(mut self, parse: bool) -> Self {
        self.parse = parse;
        self
    }

    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }
}

/// How `remove` treats a key addressing an array element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayRemoval {
    /// Drop the element at the numeric index.
    #[default]
    ByIndex,
    /// Drop the first element equal to the addressed one.
    ByValue,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    pub array_removal: ArrayRemoval,
    pub set_defaults: SetOptions,
    /// Pretty-print in `serialize`.
    pub pretty: bool,
}

impl StoreOptions {
    pub fn from_value(value: TreeValue) -> Result<Self, TreeError> {
        serde_json::from_value(value).map_err(|e| TreeError::InvalidOptions(e.to_string()))
    }

    pub fn with_array_removal(mut self, mode: ArrayRemoval) -> Self {
        self.array_removal = mode;
        self
    }

    pub fn with_set_defaults(mut self, defaults: SetOptions) -> Self {
        self.set_defaults = defaults;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
