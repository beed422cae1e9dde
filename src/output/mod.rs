//! Output formatting module
//!
//! Handles different output formats: table, CSV, JSON, YAML

mod common;
mod contexts;

pub use contexts::{output_contexts, render_contexts};
