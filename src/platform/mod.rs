//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing
//! - Input events
//! - Key-value storage (LocalStorage on web, a JSON file natively)

pub mod input;
pub mod storage;
pub mod time;

pub use input::{InputEvent, Key};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use time::FrameClock;
