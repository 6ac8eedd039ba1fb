// src/core/mod.rs

pub mod dom;
pub mod html;
pub mod sanitize;
pub mod selector;

pub use dom::{Document, Mutation, NodeId, ObserveConfig, ObserverId};
pub use selector::{AttrTest, Compound, Selector};
