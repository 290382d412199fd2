//! Dot-path addressed, in-memory JSON tree used as the runtime backing of
//! configuration objects.
//!
//! Reads never fail: a path that leads nowhere is simply absent. Writes create
//! the mappings they need and deep-merge into what is already there. Every
//! value crossing the store boundary is an owned copy.

pub mod access;
pub mod codec;
pub mod errors;
pub mod merge;
pub mod model;
pub mod options;
pub mod prelude;
pub mod shared;
pub mod store;
pub mod telemetry;

pub use codec::{JsonCodec, TreeCodec};
pub use errors::TreeError;
pub use merge::deep_merge;
pub use model::{KeyPath, Location, TreeMap, TreeValue};
pub use options::{ArrayRemoval, SetOptions, StoreOptions};
pub use shared::SharedTreeStore;
pub use store::TreeStore;
pub use telemetry::{init_logging, LoggingError};
