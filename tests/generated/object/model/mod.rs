//! generated model types, do not edit

pub mod bot;
pub mod user;

pub use bot::Bot;
pub use user::User;
