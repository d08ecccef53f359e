// src/lib.rs
pub mod config;
pub mod error;
pub mod fetch;
pub mod link;
pub mod plot;
pub mod process;
pub mod table;

pub use error::{Error, Result};
