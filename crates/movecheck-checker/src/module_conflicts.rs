//! Module boundary conflicts.
//!
//! Two directions:
//! - usages outside the move that will no longer see the target module
//! - references inside moved code to declarations the target module cannot see

use crate::checker::MoveConflictChecker;
use crate::render::render_for_comparison;
use crate::report::ConflictReport;
use movecheck_common::diagnostic_messages;
use movecheck_model::{
    DeclFlags, DeclId, DeclKind, Element, ModuleId, ModuleScope, RefId, UsageSet,
};
use rustc_hash::FxHashSet;

impl MoveConflictChecker<'_> {
    // =========================================================================
    // Usages of moved declarations
    // =========================================================================

    /// Report external usages whose code cannot see the target module.
    ///
    /// Usages of a declaration reported here are dropped from
    /// `external_usages`: its accessibility is already known to break.
    pub(crate) fn check_module_conflicts_in_usages(
        &self,
        external_usages: &mut UsageSet,
        report: &mut ConflictReport,
    ) {
        let mut new_conflicts = ConflictReport::new();
        self.collect_module_conflicts_in_usages(external_usages, &mut new_conflicts);
        if new_conflicts.is_empty() {
            return;
        }

        let reported: FxHashSet<DeclId> =
            new_conflicts.elements().filter_map(Element::as_decl).collect();
        let before = external_usages.len();
        external_usages.retain(|usage| !reported.contains(&usage.referenced));
        tracing::debug!(
            conflicts = new_conflicts.len(),
            pruned = before - external_usages.len(),
            "module conflicts in usages"
        );
        report.extend(new_conflicts);
    }

    fn collect_module_conflicts_in_usages(
        &self,
        external_usages: &UsageSet,
        report: &mut ConflictReport,
    ) {
        let project = self.ctx.project;
        let Some(location) = self.ctx.target_location() else {
            return;
        };
        let Some(target_module) = location.module(project) else {
            return;
        };
        let target_is_test = location.is_test(project);

        for usage in external_usages {
            let reference = project.reference(usage.reference);
            if reference.is_in_import() {
                continue;
            }
            if self.ctx.is_to_be_moved(Element::Reference(usage.reference)) {
                continue;
            }
            if project.file_sees_module_content(reference.file, target_module, target_is_test) {
                continue;
            }
            let Some(usage_module) = project.module_of_file(reference.file) else {
                continue;
            };

            let message = if usage_module == target_module && target_is_test {
                &diagnostic_messages::REFERENCED_NOT_ACCESSIBLE_FROM_PRODUCTION_OF_MODULE
            } else {
                &diagnostic_messages::REFERENCED_NOT_ACCESSIBLE_FROM_MODULE
            };
            let render = &self.ctx.render;
            report.push(
                Element::Decl(usage.referenced),
                message,
                &[
                    &render.decl(usage.referenced),
                    &render.usage_context(usage.reference),
                    &render.module(usage_module),
                ],
            );
        }
    }

    // =========================================================================
    // References inside moved declarations
    // =========================================================================

    /// Report references in moved code to declarations outside the target
    /// module's scope. The offending references are dropped from
    /// `internal_usages`.
    pub(crate) fn check_module_conflicts_in_declarations(
        &self,
        internal_usages: &mut UsageSet,
        report: &mut ConflictReport,
    ) {
        let project = self.ctx.project;
        let Some(target_module) = self.ctx.target_module() else {
            return;
        };
        let scope = project.platform_aware_scope(target_module);
        let mut references_to_skip: FxHashSet<RefId> = FxHashSet::default();

        for decl in self.ctx.walked_declarations() {
            if project.module_of_decl(decl) == Some(target_module) {
                continue;
            }
            for reference_id in project.references_within(decl) {
                let reference = project.reference(reference_id);
                let Some(target) = reference.target else {
                    continue;
                };
                if project.decl(target).is_builtin() {
                    continue;
                }
                if self.ctx.is_to_be_moved(Element::Decl(target)) {
                    continue;
                }
                if self.is_in_target_scope(target, target, target_module, &scope) {
                    continue;
                }
                if project.decl(target).kind == DeclKind::TypeParameter {
                    continue;
                }
                if project
                    .deepest_overridden(target)
                    .into_iter()
                    .any(|sup| self.is_in_target_scope(sup, target, target_module, &scope))
                {
                    continue;
                }
                let Some(owner) = reference.owner else {
                    continue;
                };

                let render = &self.ctx.render;
                report.push(
                    Element::Decl(target),
                    &diagnostic_messages::REFERENCED_NOT_ACCESSIBLE_IN_MODULE,
                    &[
                        &render.decl(target),
                        &render.decl(owner),
                        &render.module(target_module),
                    ],
                );
                references_to_skip.insert(reference_id);
            }
        }

        if !references_to_skip.is_empty() {
            tracing::debug!(
                references = references_to_skip.len(),
                "module conflicts in moved declarations"
            );
            internal_usages.retain(|usage| !references_to_skip.contains(&usage.reference));
        }
    }

    /// Whether `element` can be seen from the target module.
    ///
    /// Project declarations must lie in the module's scope. Library
    /// declarations are also accepted when importing `descriptor`'s name from
    /// the target module resolves to an equivalent declaration (the same
    /// symbol compiled for another platform).
    fn is_in_target_scope(
        &self,
        element: DeclId,
        descriptor: DeclId,
        target_module: ModuleId,
        scope: &ModuleScope,
    ) -> bool {
        let project = self.ctx.project;
        if project
            .root_of_decl(element)
            .is_some_and(|root| scope.contains(root))
        {
            return true;
        }
        if project.is_in_project(element) {
            return false;
        }
        let Some(fq_name) = project.importable_fq_name(descriptor) else {
            return true;
        };
        let importable = project.importable_decl(descriptor);
        let candidates = self.ctx.services.imports.resolve_import(&fq_name, target_module);

        if candidates.iter().any(|&c| {
            let decl = project.decl(c);
            decl.is_expect() && decl.flags.contains(DeclFlags::OPTIONAL_EXPECTATION)
        }) {
            return false;
        }

        if project.decl(importable).kind == DeclKind::TypeAlias
            && candidates.iter().any(|&c| {
                let decl = project.decl(c);
                decl.kind.is_class_like()
                    && decl.is_expect()
                    && project.importable_fq_name(c) == project.importable_fq_name(importable)
            })
        {
            return true;
        }

        let rendered_importable = render_for_comparison(project, importable);
        let rendered_target = render_for_comparison(project, descriptor);
        candidates.iter().any(|&candidate| {
            if render_for_comparison(project, candidate) != rendered_importable {
                return false;
            }
            if importable == descriptor {
                return true;
            }
            project.decl(descriptor).kind == DeclKind::Constructor
                && project.decl(candidate).kind.is_class_like()
                && project
                    .constructors(candidate)
                    .into_iter()
                    .any(|ctor| render_for_comparison(project, ctor) == rendered_target)
        })
    }
}
