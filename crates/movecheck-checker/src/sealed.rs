//! Sealed hierarchy conflicts.
//!
//! Under the strict rule a sealed class and all its inheritors share one
//! file, so the move must carry the whole hierarchy. Under the relaxed rule
//! (inheritors anywhere in the same package and module) the hierarchy
//! must still end up co-located: after the move at least one other member
//! has to live at the destination, and members left at the source are
//! worth a warning.

use crate::checker::MoveConflictChecker;
use crate::context::CheckerContext;
use crate::report::ConflictReport;
use movecheck_common::limits::MAX_SEALED_HIERARCHY_MEMBERS;
use movecheck_common::{DiagnosticMessage, capitalize, diagnostic_messages};
use movecheck_model::{DeclId, DirId, Element, FqName, Language, ModuleId, MoveTarget};
use rustc_hash::FxHashSet;

impl MoveConflictChecker<'_> {
    pub(crate) fn check_sealed_class_move(&self, report: &mut ConflictReport) {
        if self.ctx.options.language.sealed_inheritors_in_same_package {
            self.check_sealed_hierarchies(report);
        } else {
            self.check_sealed_class_files(report);
        }
    }

    // =========================================================================
    // Strict mode: the hierarchy lives in one file
    // =========================================================================

    fn check_sealed_class_files(&self, report: &mut ConflictReport) {
        let project = self.ctx.project;
        let mut visited: FxHashSet<DeclId> = FxHashSet::default();

        for &element in &self.ctx.elements_to_move {
            if !visited.insert(element) {
                continue;
            }
            let decl = project.decl(element);
            if !decl.kind.is_class_like() {
                continue;
            }
            let root = if decl.is_sealed() {
                element
            } else {
                match project.superclass_not_any(element) {
                    Some(parent) if project.decl(parent).is_sealed() => parent,
                    _ => continue,
                }
            };

            let subclasses = self.sealed_subclasses(root);
            if subclasses.is_empty() {
                continue;
            }
            visited.insert(root);
            visited.extend(subclasses.iter().copied());

            if self.ctx.is_to_be_moved(Element::Decl(root))
                && subclasses
                    .iter()
                    .all(|&sub| self.ctx.is_to_be_moved(Element::Decl(sub)))
            {
                continue;
            }

            let root_name = project.decl(root).name.as_str();
            if element == root {
                report.push(
                    Element::Decl(element),
                    &diagnostic_messages::SEALED_CLASS_MUST_MOVE_WITH_SUBCLASSES,
                    &[root_name],
                );
            } else {
                report.push(
                    Element::Decl(element),
                    &diagnostic_messages::SEALED_MEMBER_MUST_MOVE_WITH_PARENT,
                    &[&capitalize(decl.kind.describe()), &decl.name, root_name],
                );
            }
        }
    }

    /// Inheritors of `root`, descending through sealed inheritors.
    fn sealed_subclasses(&self, root: DeclId) -> Vec<DeclId> {
        let project = self.ctx.project;
        let mut result = Vec::new();
        let mut seen: FxHashSet<DeclId> = FxHashSet::default();
        let mut worklist = vec![root];
        while let Some(current) = worklist.pop() {
            for sub in self.ctx.services.inheritors.direct_inheritors(current) {
                if sub == root || !seen.insert(sub) {
                    continue;
                }
                result.push(sub);
                if project.decl(sub).is_sealed() {
                    worklist.push(sub);
                }
            }
        }
        result
    }

    // =========================================================================
    // Relaxed mode: the hierarchy lives in one package
    // =========================================================================

    fn check_sealed_hierarchies(&self, report: &mut ConflictReport) {
        let mut checker = SealedHierarchyChecker::new(&self.ctx);
        for &element in &self.ctx.elements_to_move {
            if !self.ctx.project.decl(element).kind.is_class_like() {
                continue;
            }
            if let Some((message, args)) = checker.report_if_move_is_destructive(element) {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                report.push(Element::Decl(element), message, &args);
            }
        }
    }
}

/// Walks sealed hierarchies, remembering every member already seen so each
/// hierarchy is reported at most once per pass.
struct SealedHierarchyChecker<'c, 'a> {
    ctx: &'c CheckerContext<'a>,
    visited: FxHashSet<DeclId>,
}

/// Where a class lives: (module, package, directory).
type Residence = (ModuleId, FqName, Option<DirId>);

impl<'c, 'a> SealedHierarchyChecker<'c, 'a> {
    fn new(ctx: &'c CheckerContext<'a>) -> Self {
        Self {
            ctx,
            visited: FxHashSet::default(),
        }
    }

    fn report_if_move_is_destructive(
        &mut self,
        class: DeclId,
    ) -> Option<(&'static DiagnosticMessage, Vec<String>)> {
        let project = self.ctx.project;
        if self.visited.contains(&class) {
            return None;
        }
        let decl = project.decl(class);
        let parents = self.direct_sealed_parents(class);
        if !decl.is_sealed() && parents.is_empty() {
            return None;
        }
        if decl.is_sealed() && parents.is_empty() && self.subclasses(class).is_empty() {
            return None;
        }

        let mut others = self.hierarchy_members(class);
        others.retain(|&member| member != class);
        assert!(
            !others.is_empty(),
            "sealed hierarchy of {} has no other members",
            decl.name
        );
        if others
            .iter()
            .all(|&member| self.ctx.is_to_be_moved(Element::Decl(member)))
        {
            return None;
        }

        let target_module = self.ctx.target_module()?;
        let target_package = self.target_package()?;
        let target_dir = self
            .ctx
            .target_location()
            .map(|location| location.directory(project));
        let target = (target_module, target_package, target_dir);

        if !others.iter().any(|&member| self.resides_in(member, &target)) {
            let package_name = self
                .ctx
                .target
                .target_container_fq_name(project)
                .filter(|fq| !fq.is_root())
                .map_or_else(|| "default".to_string(), |fq| fq.as_str().to_string());
            let members: Vec<String> = std::iter::once(class)
                .chain(others.iter().copied())
                .map(|member| project.fq_name(member).as_str().to_string())
                .collect();
            return Some((
                &diagnostic_messages::SEALED_HIERARCHY_NONE_IN_TARGET,
                vec![
                    decl.name.clone(),
                    package_name,
                    project.module(target_module).name.clone(),
                    members.join(", "),
                ],
            ));
        }

        let source = self.residence(class)?;
        let remaining: Vec<String> = others
            .iter()
            .copied()
            .filter(|&member| {
                self.resides_in(member, &source)
                    && !self.ctx.is_to_be_moved(Element::Decl(member))
            })
            .map(|member| project.fq_name(member).as_str().to_string())
            .collect();
        let (target_module, target_package, _) = &target;
        let (source_module, source_package, _) = &source;
        if (target_package != source_package || target_module != source_module)
            && !remaining.is_empty()
        {
            let package_name = if source_package.is_root() {
                "default".to_string()
            } else {
                source_package.as_str().to_string()
            };
            return Some((
                &diagnostic_messages::SEALED_HIERARCHY_STILL_IN_SOURCE,
                vec![
                    decl.name.clone(),
                    package_name,
                    project.module(*source_module).name.clone(),
                    remaining.join(", "),
                ],
            ));
        }
        None
    }

    /// Package the moved classes will belong to, as it exists in the target module.
    fn target_package(&self) -> Option<FqName> {
        let project = self.ctx.project;
        match &self.ctx.target {
            MoveTarget::Directory { directory, .. } | MoveTarget::DeferredFile { directory, .. } => {
                Some(project.directory(*directory).package.clone())
            }
            MoveTarget::ExistingDecl(_) | MoveTarget::ExistingFile(_) => {
                let fq_name = self.ctx.target.target_container_fq_name(project)?;
                project.find_package(&fq_name, self.ctx.target_module()?)
            }
        }
    }

    fn residence(&self, class: DeclId) -> Option<Residence> {
        let project = self.ctx.project;
        let module = project.module_of_decl(class)?;
        let package = project.find_package(project.package_of_decl(class)?, module)?;
        let directory = project.file_of_decl(class).map(|file| project.file(file).directory);
        Some((module, package, directory))
    }

    fn resides_in(&self, class: DeclId, place: &Residence) -> bool {
        self.residence(class).as_ref() == Some(place)
    }

    /// Sealed superclass and sealed super-interfaces.
    fn direct_sealed_parents(&self, class: DeclId) -> Vec<DeclId> {
        let project = self.ctx.project;
        let superclass = project
            .superclass_not_any(class)
            .filter(|&parent| project.decl(parent).is_sealed());
        superclass
            .into_iter()
            .chain(
                project
                    .super_interfaces(class)
                    .into_iter()
                    .filter(|&parent| project.decl(parent).is_sealed()),
            )
            .collect()
    }

    /// Direct inheritors, sorted by simple name.
    fn subclasses(&self, class: DeclId) -> Vec<DeclId> {
        let project = self.ctx.project;
        let mut result = self.ctx.services.inheritors.direct_inheritors(class);
        result.sort_by(|a, b| {
            project
                .decl(*a)
                .name
                .cmp(&project.decl(*b).name)
                .then(a.cmp(b))
        });
        result.dedup();
        result
    }

    /// Members of the sealed hierarchy containing `class`, in pre-order:
    /// each node, then its sealed parents, then (for sealed nodes) its
    /// subclasses. Nodes seen earlier in this pass are skipped.
    fn hierarchy_members(&mut self, class: DeclId) -> Vec<DeclId> {
        let project = self.ctx.project;
        let mut members = Vec::new();
        let mut stack = vec![class];
        while let Some(current) = stack.pop() {
            if members.len() >= MAX_SEALED_HIERARCHY_MEMBERS {
                tracing::warn!(class = %project.fq_name(class), "sealed hierarchy too large");
                break;
            }
            if !self.visited.insert(current) {
                continue;
            }
            let parents = self.direct_sealed_parents(current);
            if project.decl(current).is_sealed() {
                members.push(current);
                stack.extend(self.subclasses(current).into_iter().rev());
                stack.extend(parents.into_iter().rev());
            } else if !parents.is_empty() {
                members.push(current);
                stack.extend(parents.into_iter().rev());
            }
        }
        members.retain(|&member| project.decl(member).language == Language::Source);
        members
    }
}
