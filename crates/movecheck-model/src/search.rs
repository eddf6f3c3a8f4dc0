//! Whole-project queries, injected into the checker as services.
//!
//! Usage search, inheritor search and import resolution are the expensive
//! index queries of a move refactoring. Keeping them behind traits lets the
//! checker run against a real index, the project-backed `ProjectSearch`, or
//! a test fake.

use crate::ids::{DeclId, ModuleId, RefId};
use crate::names::FqName;
use crate::project::Project;

pub trait UsageSearch {
    /// All references to `decl`, project-wide.
    fn references_to(&self, decl: DeclId) -> Vec<RefId>;
}

pub trait InheritorSearch {
    /// Classes listing `class` as a direct supertype.
    fn direct_inheritors(&self, class: DeclId) -> Vec<DeclId>;
}

pub trait ImportResolver {
    /// What an import of `fq_name` resolves to from a file of `module`,
    /// analysed for that module's platform.
    fn resolve_import(&self, fq_name: &FqName, module: ModuleId) -> Vec<DeclId>;
}

/// Services backed directly by a `Project`'s arenas and reverse indexes.
pub struct ProjectSearch<'a> {
    project: &'a Project,
}

impl<'a> ProjectSearch<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }
}

impl UsageSearch for ProjectSearch<'_> {
    fn references_to(&self, decl: DeclId) -> Vec<RefId> {
        self.project.references_to(decl).to_vec()
    }
}

impl InheritorSearch for ProjectSearch<'_> {
    fn direct_inheritors(&self, class: DeclId) -> Vec<DeclId> {
        self.project.direct_inheritors(class).to_vec()
    }
}

impl ImportResolver for ProjectSearch<'_> {
    fn resolve_import(&self, fq_name: &FqName, module: ModuleId) -> Vec<DeclId> {
        let scope = self.project.platform_aware_scope(module);
        let mut result = Vec::new();
        for decl in self.project.decl_ids() {
            let Some(root) = self.project.root_of_decl(decl) else {
                continue;
            };
            if !scope.contains(root) {
                continue;
            }
            if self.project.importable_decl(decl) != decl {
                continue;
            }
            if self.project.importable_fq_name(decl).as_ref() == Some(fq_name) {
                result.push(decl);
            }
        }
        tracing::trace!(%fq_name, found = result.len(), "resolved import");
        result
    }
}
