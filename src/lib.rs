//! movecheck: conflict checking for move-declaration refactorings.
//!
//! The workspace is split into three library crates, re-exported here:
//! - `movecheck_common` - conflict message catalog and traversal limits
//! - `movecheck_model` - the semantic project model, manifests and search services
//! - `movecheck_checker` - the conflict detectors and the report they fill
//!
//! This crate adds the `movecheck` command-line front end (`cli`) and
//! tracing setup for it (`tracing_config`).

pub use movecheck_checker as checker;
pub use movecheck_common as common;
pub use movecheck_model as model;

#[cfg(feature = "cli")]
pub mod cli;
pub mod tracing_config;

pub use movecheck_checker::{
    CheckerOptions, Conflict, ConflictReport, MoveConflictChecker, RenderStyle, Services,
    analyze_conflicts_in_file,
};
pub use movecheck_model::{MoveRequest, MoveTarget, Project, ProjectManifest};
