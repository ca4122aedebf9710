//! generated enums types, do not edit

pub mod role;

pub use role::Role;
