//! Semantic project model for the movecheck conflict checker.
//!
//! The checker never touches syntax trees or an IDE index directly. Instead
//! it reads a frozen `Project` (modules, source roots, files, declarations,
//! references and interned types) and asks injected services for anything
//! that would need a whole-project query:
//! - `UsageSearch` - all references to a declaration
//! - `InheritorSearch` - direct inheritors of a class
//! - `ImportResolver` - what a qualified name resolves to from a module
//!
//! `ProjectSearch` implements all three over a `Project`; tests can swap in
//! fakes.

pub mod builder;
pub mod decl;
pub mod element;
pub mod ids;
pub mod manifest;
pub mod module;
pub mod names;
pub mod project;
pub mod reference;
pub mod scope;
pub mod search;
pub mod target;
pub mod types;
pub mod usage;

pub use builder::{DeclBuilder, ProjectBuilder};
pub use decl::{
    Container, DeclFlags, DeclKind, Declaration, Language, Modality, PackageFragment, Parent,
    ValueParam, Visibility,
};
pub use element::Element;
pub use ids::{DeclId, DirId, FileId, LibraryId, ModuleId, RefId, SdkId, TypeId};
pub use manifest::{
    DeclSpec, LanguageSettings, ManifestError, MoveRequest, ProjectManifest, TargetSpec,
};
pub use module::{Directory, Library, Module, Platform, Sdk, SdkKind, SourceFile, SourceRoot};
pub use names::FqName;
pub use project::Project;
pub use reference::{RefFlags, Reference};
pub use scope::ModuleScope;
pub use search::{ImportResolver, InheritorSearch, ProjectSearch, UsageSearch};
pub use target::{MoveTarget, TargetLocation};
pub use types::{TypeArg, TypeData, TypeInterner, Variance};
pub use usage::{Usage, UsageSet, collect_usages};
