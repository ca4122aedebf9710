//! generated interfaces types, do not edit

pub mod node;

pub use node::{Node, NodeFields};
