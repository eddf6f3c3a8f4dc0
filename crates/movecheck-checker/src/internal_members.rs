//! Internal members used from outside the target module.

use crate::checker::MoveConflictChecker;
use crate::report::ConflictReport;
use indexmap::IndexSet;
use movecheck_common::diagnostic_messages;
use movecheck_model::{DeclId, Element, Project, Visibility};

impl MoveConflictChecker<'_> {
    /// Report references to internal members of moved classes from modules
    /// that neither are nor implement the target module.
    pub(crate) fn check_internal_member_usages(&self, report: &mut ConflictReport) {
        let project = self.ctx.project;
        let Some(target_module) = self.ctx.target_module() else {
            return;
        };

        let mut members = IndexSet::new();
        for &decl in &self.ctx.elements_to_move {
            if project.decl(decl).kind.is_class_like() {
                collect_internal_members(project, decl, &mut members);
            }
        }
        tracing::trace!(count = members.len(), "internal members of moved classes");

        for member in members {
            for reference_id in self.ctx.services.usages.references_to(member) {
                let reference = project.reference(reference_id);
                let Some(usage_module) = project.module_of_file(reference.file) else {
                    continue;
                };
                if usage_module == target_module
                    || project.implements_module(usage_module, target_module)
                    || self.ctx.is_to_be_moved(Element::Reference(reference_id))
                {
                    continue;
                }
                let render = &self.ctx.render;
                report.push(
                    Element::Reference(reference_id),
                    &diagnostic_messages::USES_INTERNAL_INACCESSIBLE_AFTER_MOVE,
                    &[&render.usage_context(reference_id), &render.decl(member)],
                );
            }
        }
    }
}

/// Internal members of `class`, then those of its nested classes.
fn collect_internal_members(project: &Project, class: DeclId, out: &mut IndexSet<DeclId>) {
    let members = &project.decl(class).members;
    out.extend(
        members
            .iter()
            .copied()
            .filter(|&m| project.decl(m).visibility == Visibility::Internal),
    );
    for &member in members {
        if project.decl(member).kind.is_class_like() {
            collect_internal_members(project, member, out);
        }
    }
}
