//! Storage abstraction and implementations for the Gunathon tracker.
//!
//! This crate provides a trait-based storage interface with a file-backed
//! implementation (CSV tracker file, TOML preferences) and an in-memory one.

#![warn(missing_docs)]

pub mod trait_;
pub mod tabular;
pub mod file_storage;
pub mod memory;

pub use trait_::{Storage, StorageError, Result};
pub use file_storage::FileStorage;
pub use memory::MemoryStorage;
