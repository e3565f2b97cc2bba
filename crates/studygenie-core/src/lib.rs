//! # studygenie-core
//!
//! Core types, traits, and abstractions for StudyGenie.
//!
//! This crate holds the data model, the storage and generation traits and the
//! shared error type that the other StudyGenie crates build on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;
pub mod uuid_utils;

// Re-export commonly used types at crate root
pub use defaults::truncate_chars;
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
pub use uuid_utils::{new_v7, parse_id};
