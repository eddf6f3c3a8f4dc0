//! Centralized limits for traversals over the semantic model.
//!
//! Project data handed to the checker may be malformed: supertype links can
//! form cycles and container chains can be arbitrarily long. Every walk over
//! such data is bounded either by a visited set or by one of these limits.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum depth for structural type equivalence.
///
/// Equivalence follows single-supertype chains (`T : Bound`), which loop
/// forever on a class that lists itself as its only supertype. When the
/// limit is hit the types are treated as not equivalent.
pub const MAX_TYPE_EQUIVALENCE_DEPTH: u32 = 64;

/// Maximum length of a container chain (member → class → outer class → package).
///
/// Container links are acyclic in well-formed projects; a manifest that
/// nests a declaration inside itself is cut off here.
pub const MAX_CONTAINER_CHAIN_LENGTH: usize = 256;

// =============================================================================
// Operation Count Limits
// =============================================================================

/// Maximum number of classes visited while collecting one sealed hierarchy.
///
/// The hierarchy walk is an explicit worklist guarded by a visited set, so
/// this only bounds pathological fan-out.
pub const MAX_SEALED_HIERARCHY_MEMBERS: usize = 10_000;
