//! Data Transfer Objects for REST request serialization.
//!
//! Response bodies reuse the domain types directly.

pub mod user_dto;

pub use user_dto::*;
