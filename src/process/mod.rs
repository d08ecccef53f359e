// src/process/mod.rs
pub mod numeric;
pub mod resolve;

pub use numeric::extract_numeric;
pub use resolve::{resolve_column, resolve_from_tables};
