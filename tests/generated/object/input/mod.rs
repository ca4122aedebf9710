//! generated input types, do not edit

pub mod user_filter;

pub use user_filter::UserFilter;
