//! Node classification and asset resolution
//!
//! The two leaf components of the provider pipeline: [`NodeClassifier`]
//! decides whether a node is ordinary content, and
//! [`AncestorAssetResolver`] finds the asset an ordinary node belongs to.

mod classification;
mod asset;

pub use classification::{NodeClassification, NodeClassifier};
pub use asset::AncestorAssetResolver;
