pub use crate::{
    codec::{JsonCodec, TreeCodec},
    errors::TreeError,
    model::{KeyPath, TreeMap, TreeValue},
    options::{ArrayRemoval, SetOptions, StoreOptions},
    shared::SharedTreeStore,
    store::TreeStore,
};
