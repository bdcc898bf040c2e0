//! Data models

pub mod language;

pub use language::*;
