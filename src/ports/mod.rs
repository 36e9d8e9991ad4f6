//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and its artifacts (model file, curve tables).

mod classifier;
mod reference;

pub use classifier::Classifier;
pub use reference::ReferenceStore;
