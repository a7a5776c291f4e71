//! Shared helpers that do not belong to a single view.

pub mod clipboard;
pub mod text_processing;
