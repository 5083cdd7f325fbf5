//! CLI command implementations.

pub mod config;
pub mod render;
pub mod resize;
pub mod scan;
pub mod terminal;
pub mod types;
