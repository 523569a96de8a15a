//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (fixed-step accumulator)
//! - Input latching (held keys to per-tick commands)
//! - Storage (LocalStorage on web, a JSON file on native)

pub mod input;
pub mod storage;
pub mod time;

pub use input::{InputLatch, InputState};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use time::FrameClock;

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
