//! Tracing configuration for debugging conflict checks.
//!
//! Supports three output formats controlled by `MOVECHECK_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`, nesting events
//!   under the `check_all_conflicts` span
//! - `json`: One JSON object per span/event, for tooling
//!
//! ## Quick start
//!
//! ```bash
//! # Human-readable tree
//! MOVECHECK_LOG=debug MOVECHECK_LOG_FORMAT=tree movecheck -p movecheck.json
//!
//! # JSON (for tooling or sharing full traces)
//! MOVECHECK_LOG=debug MOVECHECK_LOG_FORMAT=json movecheck -p movecheck.json
//!
//! # Every emitted conflict
//! MOVECHECK_LOG="movecheck_checker=trace" movecheck -p movecheck.json
//! ```
//!
//! The subscriber is only initialised when `MOVECHECK_LOG` (or `RUST_LOG`) is
//! set, so normal runs pay nothing.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Filter directives, in `RUST_LOG` syntax.
pub const LOG_ENV: &str = "MOVECHECK_LOG";
/// Output format: `text`, `tree` or `json`.
pub const LOG_FORMAT_ENV: &str = "MOVECHECK_LOG_FORMAT";

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines.
    #[default]
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Case-insensitive; anything unrecognised falls back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(LOG_FORMAT_ENV).unwrap_or_default())
    }
}

/// `MOVECHECK_LOG` wins over `RUST_LOG` when both are set.
fn build_filter() -> EnvFilter {
    if let Ok(directives) = std::env::var(LOG_ENV) {
        EnvFilter::builder().parse_lossy(directives)
    } else {
        // Only reached with RUST_LOG set.
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `MOVECHECK_LOG` nor `RUST_LOG` is set. All
/// output goes to stderr so it never mixes with the report on stdout.
pub fn init_tracing() {
    if std::env::var_os(LOG_ENV).is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tracing_config_tests;
