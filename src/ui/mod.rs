//! UI utilities for terminal interaction
//!
//! This module provides the confirmation prompts used when an added entry
//! collides with an existing one.

mod confirm;

pub use confirm::{is_affirmative, read_answer, AssumeYes, StdinPrompt};
