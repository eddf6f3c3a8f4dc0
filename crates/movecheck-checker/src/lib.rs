//! Move conflict checker.
//!
//! Given declarations about to be moved, the references to them, and the
//! move target, `MoveConflictChecker` runs a fixed pipeline of detectors and
//! collects advisory conflicts into a `ConflictReport`:
//! - `module_conflicts` - module boundaries for usages and moved code
//! - `visibility_conflicts` - visibility of usages and of references in moved code
//! - `internal_members` - internal members used from other modules
//! - `sealed` - sealed hierarchies split by the move
//! - `name_clash` - equivalent declarations already present at the destination
//!
//! Detectors share the usage sets and prune usages they have explained, so
//! they run strictly in that order.

pub mod checker;
pub mod context;
pub mod internal_members;
pub mod module_conflicts;
pub mod name_clash;
pub mod predicted;
pub mod render;
pub mod report;
pub mod sealed;
pub mod visibility;
pub mod visibility_conflicts;

pub use checker::{MoveConflictChecker, analyze_conflicts_in_file, partition_usages};
pub use context::{CheckerContext, CheckerOptions, Services};
pub use name_clash::declarations_equivalent;
pub use predicted::PredictedDecl;
pub use render::{RenderStyle, Renderer, render_for_comparison};
pub use report::{Conflict, ConflictReport};
