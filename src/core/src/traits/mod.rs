//! Shared traits for the content store

pub mod source;

pub use source::SnapshotSource;
