//! support code for generated clients
//!
//! generated crates depend on this crate only; every file they contain starts
//! with `use <runtime>::runtime::prelude::*;`.

pub mod api;
pub mod dispatch;
pub mod enums;
pub mod selection;
pub mod value;

pub use api::{expect_data, operation_text, paging, set_variable, take_root, BaseApiClient};
pub use dispatch::{dispatch, DecodeFn, Polymorphic, Variant};
pub use enums::GraphQlEnum;
pub use selection::{Selection, SelectionItem};
pub use value::{
    datetime, each, each_nullable, optional, required, scalar, Lower, RawObject, Selected,
};

pub use chrono;
pub use serde_json;

/// everything generated code refers to by its short name
pub mod prelude {
    pub use super::api::{operation_text, set_variable, BaseApiClient};
    pub use super::dispatch::{Polymorphic, Variant};
    pub use super::enums::GraphQlEnum;
    pub use super::selection::Selection;
    pub use super::value::{
        datetime, each, each_nullable, optional, required, scalar, Lower, RawObject, Selected,
    };
    pub use crate::error::{Error, Result};
    pub use crate::transport::Transport;
    pub use chrono::{DateTime, FixedOffset};
    pub use serde_json::{Map, Value};
}
