//! generated schema types, do not edit

pub mod model;
pub mod input;
pub mod enums;
pub mod union;
pub mod interfaces;
