//! Common types and utilities for the movecheck conflict checker.
//!
//! This crate provides foundational pieces used across all movecheck crates:
//! - Conflict message catalog (`diagnostics`): codes, categories, templates
//! - Message formatting (`format_message`, `capitalize`)
//! - Centralized traversal limits (`limits`)

// Conflict message catalog and formatting helpers
pub mod diagnostics;
pub use diagnostics::{
    DiagnosticCategory, DiagnosticMessage, capitalize, diagnostic_codes, diagnostic_messages,
    format_message, get_message_template,
};

// Centralized limits and thresholds
pub mod limits;
