//! Durable name-to-descriptor record store.
//!
//! A [`Record`] pairs a unique name with a face descriptor (a numeric
//! feature vector produced by an external recognition model). The full
//! roster of records is persisted as one unit: callers load the whole
//! roster, operate on it in memory, and write the whole roster back.
//!
//! Durability sits behind the [`RecordStore`] trait. [`FileStore`] keeps
//! the roster in a single pretty-printed JSON file; [`MemoryStore`] is for
//! testing and ephemeral use.

mod error;
mod record;
mod store;

pub use error::StoreError;
pub use record::{list_names, remove, upsert, Record};
pub use store::{FileStore, MemoryStore, RecordStore};
