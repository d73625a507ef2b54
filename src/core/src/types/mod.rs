//! Shared types for the content store

pub mod path;
pub mod property;

pub use path::NodePath;
pub use property::{PropertyState, PropertyValue};
