//! Storage - Key/Value Persistence
//!
//! The store persists user preferences through [`KeyValueStorage`], a
//! synchronous string-keyed surface modeled on browser local storage.
//! Backends:
//!
//! - [`MemoryStorage`] keeps entries in memory, shared between clones.
//! - [`FileStorage`] keeps entries in a flat TOML table on disk.
//!
//! A store constructed without any storage runs in a non-persistent context
//! and simply skips reads and writes.

mod file;
mod memory;

pub use file::*;
pub use memory::*;

use crate::error::Result;

/// Synchronous string key/value storage
pub trait KeyValueStorage {
    /// Read the value stored at `key`, `None` when absent
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` at `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}
