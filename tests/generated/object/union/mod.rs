//! generated union types, do not edit

pub mod search_result;

pub use search_result::SearchResult;
