//! Shared state of one checker pass.

use crate::render::{RenderStyle, Renderer};
use movecheck_common::limits::MAX_CONTAINER_CHAIN_LENGTH;
use movecheck_model::{
    Container, DeclId, Element, ImportResolver, InheritorSearch, LanguageSettings, ModuleId,
    MoveTarget, PackageFragment, Project, TargetLocation, UsageSearch,
};
use rustc_hash::FxHashSet;

#[derive(Clone, Debug, Default)]
pub struct CheckerOptions {
    pub language: LanguageSettings,
    pub render_style: RenderStyle,
}

/// Whole-project queries the checker delegates to its host.
#[derive(Copy, Clone)]
pub struct Services<'a> {
    pub usages: &'a dyn UsageSearch,
    pub inheritors: &'a dyn InheritorSearch,
    pub imports: &'a dyn ImportResolver,
}

impl<'a> Services<'a> {
    pub fn new(
        usages: &'a dyn UsageSearch,
        inheritors: &'a dyn InheritorSearch,
        imports: &'a dyn ImportResolver,
    ) -> Self {
        Self {
            usages,
            inheritors,
            imports,
        }
    }

    /// All three services backed by one implementation.
    pub fn uniform<S>(search: &'a S) -> Self
    where
        S: UsageSearch + InheritorSearch + ImportResolver,
    {
        Self::new(search, search, search)
    }
}

pub struct CheckerContext<'a> {
    pub project: &'a Project,
    pub services: Services<'a>,
    pub options: CheckerOptions,
    pub target: MoveTarget,
    /// Top-level declarations being moved.
    pub elements_to_move: Vec<DeclId>,
    /// Moved declarations whose bodies are not inspected.
    pub do_not_go_in: FxHashSet<DeclId>,
    /// Everything moving in the same refactoring; defaults to `elements_to_move`.
    pub all_elements_to_move: Vec<Element>,
    pub render: Renderer<'a>,
}

impl<'a> CheckerContext<'a> {
    pub fn new(
        project: &'a Project,
        services: Services<'a>,
        elements_to_move: Vec<DeclId>,
        target: MoveTarget,
        options: CheckerOptions,
    ) -> Self {
        let all_elements_to_move = elements_to_move.iter().copied().map(Element::Decl).collect();
        let render = Renderer::new(project, options.render_style);
        Self {
            project,
            services,
            options,
            target,
            elements_to_move,
            do_not_go_in: FxHashSet::default(),
            all_elements_to_move,
            render,
        }
    }

    /// Whether `element` lies inside (or is) anything being moved.
    pub fn is_to_be_moved(&self, element: Element) -> bool {
        self.all_elements_to_move
            .iter()
            .any(|&root| self.project.is_ancestor(root, element))
    }

    /// Moved declarations whose bodies are inspected.
    pub fn walked_declarations(&self) -> impl Iterator<Item = DeclId> + '_ {
        self.elements_to_move
            .iter()
            .copied()
            .filter(|decl| !self.do_not_go_in.contains(decl))
    }

    pub fn target_location(&self) -> Option<TargetLocation> {
        self.target.target_file_or_dir(self.project)
    }

    pub fn target_module(&self) -> Option<ModuleId> {
        self.target.target_module(self.project)
    }

    /// The container moved declarations will land in.
    ///
    /// New files are represented by a package fragment without a file, so
    /// nothing is ever "in the same file" as them.
    pub fn target_container(&self) -> Option<Container> {
        match &self.target {
            MoveTarget::ExistingDecl(decl) => Some(Container::Decl(*decl)),
            MoveTarget::ExistingFile(file) => {
                Some(Container::Package(self.project.fragment_of_file(*file)))
            }
            MoveTarget::Directory { directory, package }
            | MoveTarget::DeferredFile {
                directory, package, ..
            } => {
                let module = self.project.directory(*directory).root.module()?;
                Some(Container::Package(PackageFragment {
                    module: Some(module),
                    fq_name: package.clone(),
                    file: None,
                }))
            }
        }
    }

    /// Container of `decl` once the move is done: the target container for
    /// declarations explicitly in the move set, the real one otherwise.
    pub fn target_aware_container(&self, decl: DeclId, target_container: &Container) -> Container {
        if self.all_elements_to_move.contains(&Element::Decl(decl)) {
            target_container.clone()
        } else {
            self.project.container(decl)
        }
    }

    /// Innermost class-like declaration strictly containing `decl` after the move.
    pub fn target_aware_containing_class(
        &self,
        decl: DeclId,
        target_container: &Container,
    ) -> Option<DeclId> {
        let mut current = self.target_aware_container(decl, target_container);
        for _ in 0..MAX_CONTAINER_CHAIN_LENGTH {
            let Container::Decl(owner) = current else {
                return None;
            };
            if self.project.decl(owner).kind.is_class_like() {
                return Some(owner);
            }
            current = self.target_aware_container(owner, target_container);
        }
        None
    }
}
