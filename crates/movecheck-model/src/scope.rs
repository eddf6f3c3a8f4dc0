//! Module search scopes.
//!
//! A module sees its own sources (production and test), the sources of its
//! transitive dependencies, and the libraries and SDKs attached anywhere in
//! that closure. Test sources of a module are visible only from test code of
//! the same module.

use crate::ids::{FileId, LibraryId, ModuleId, SdkId};
use crate::module::{SdkKind, SourceRoot};
use crate::project::Project;
use rustc_hash::FxHashSet;

/// Set of source roots a module can resolve against.
#[derive(Clone, Debug, Default)]
pub struct ModuleScope {
    modules: FxHashSet<ModuleId>,
    libraries: FxHashSet<LibraryId>,
    sdks: FxHashSet<SdkId>,
}

impl ModuleScope {
    pub fn contains(&self, root: SourceRoot) -> bool {
        match root {
            SourceRoot::Module { module, .. } => self.modules.contains(&module),
            SourceRoot::Library(library) => self.libraries.contains(&library),
            SourceRoot::Sdk(sdk) => self.sdks.contains(&sdk),
        }
    }

    pub fn contains_module(&self, module: ModuleId) -> bool {
        self.modules.contains(&module)
    }
}

impl Project {
    /// `module` and every module it transitively depends on.
    pub fn dependency_closure(&self, module: ModuleId) -> FxHashSet<ModuleId> {
        let mut visited = FxHashSet::default();
        let mut worklist = vec![module];
        while let Some(current) = worklist.pop() {
            if visited.insert(current) {
                worklist.extend(self.module(current).dependencies.iter().copied());
            }
        }
        visited
    }

    /// Module content plus dependencies, libraries and SDKs.
    pub fn module_scope(&self, module: ModuleId) -> ModuleScope {
        let mut scope = ModuleScope::default();
        for member in self.dependency_closure(module) {
            let data = self.module(member);
            scope.libraries.extend(data.libraries.iter().copied());
            scope.sdks.extend(data.sdks.iter().copied());
            scope.modules.insert(member);
        }
        scope
    }

    /// Like [`Project::module_scope`], with JDK content removed for non-JVM modules.
    pub fn platform_aware_scope(&self, module: ModuleId) -> ModuleScope {
        let mut scope = self.module_scope(module);
        if self.module(module).platform.is_jvm() {
            return scope;
        }
        scope
            .sdks
            .retain(|&sdk| self.sdk(sdk).kind != SdkKind::Jdk);
        scope
    }

    /// Whether code in `file` can see the content of `target_module`
    /// (its test sources when `target_is_test`).
    pub fn file_sees_module_content(
        &self,
        file: FileId,
        target_module: ModuleId,
        target_is_test: bool,
    ) -> bool {
        let root = self.root_of_file(file);
        let Some(usage_module) = root.module() else {
            return false;
        };
        if usage_module == target_module {
            return !target_is_test || root.is_test();
        }
        !target_is_test && self.dependency_closure(usage_module).contains(&target_module)
    }

    /// Whether `module` provides actual declarations for `common`.
    pub fn implements_module(&self, module: ModuleId, common: ModuleId) -> bool {
        self.module(module).implemented_modules.contains(&common)
    }
}
