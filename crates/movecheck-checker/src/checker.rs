//! The checker pipeline.

use crate::context::{CheckerContext, CheckerOptions, Services};
use crate::report::ConflictReport;
use movecheck_model::{DeclId, Element, FileId, MoveTarget, Project, Usage, UsageSet};

/// Runs every conflict detector for one move.
///
/// Each detector lives in its own module as an `impl MoveConflictChecker`
/// block; this file wires them together in their required order.
pub struct MoveConflictChecker<'a> {
    pub(crate) ctx: CheckerContext<'a>,
}

impl<'a> MoveConflictChecker<'a> {
    pub fn new(
        project: &'a Project,
        services: Services<'a>,
        elements_to_move: Vec<DeclId>,
        target: MoveTarget,
        options: CheckerOptions,
    ) -> Self {
        Self {
            ctx: CheckerContext::new(project, services, elements_to_move, target, options),
        }
    }

    /// Declarations that move but whose bodies are not inspected.
    pub fn with_do_not_go_in(mut self, decls: impl IntoIterator<Item = DeclId>) -> Self {
        self.ctx.do_not_go_in.extend(decls);
        self
    }

    /// Everything moving in the same refactoring, when more than
    /// `elements_to_move` (e.g. whole files moved alongside).
    pub fn with_all_elements_to_move(mut self, elements: Vec<Element>) -> Self {
        self.ctx.all_elements_to_move = elements;
        self
    }

    pub fn context(&self) -> &CheckerContext<'a> {
        &self.ctx
    }

    /// Run all detectors, pruning explained usages and appending to `report`.
    ///
    /// Order matters: later detectors only see usages earlier ones left.
    pub fn check_all_conflicts(
        &self,
        external_usages: &mut UsageSet,
        internal_usages: &mut UsageSet,
        report: &mut ConflictReport,
    ) {
        let _span = tracing::debug_span!(
            "check_all_conflicts",
            elements = self.ctx.elements_to_move.len(),
            external = external_usages.len(),
            internal = internal_usages.len(),
        )
        .entered();

        self.check_module_conflicts_in_usages(external_usages, report);
        self.check_module_conflicts_in_declarations(internal_usages, report);
        self.check_visibility_in_usages(external_usages, report);
        self.check_visibility_in_declarations(report);
        self.check_internal_member_usages(report);
        self.check_sealed_class_move(report);
        self.check_name_clashes(report);

        tracing::debug!(conflicts = report.len(), "conflict check finished");
    }
}

/// Split usages into (internal, external) sets.
pub fn partition_usages(usages: &[Usage]) -> (UsageSet, UsageSet) {
    let mut internal = UsageSet::default();
    let mut external = UsageSet::default();
    for &usage in usages {
        if usage.is_internal {
            internal.insert(usage);
        } else {
            external.insert(usage);
        }
    }
    (internal, external)
}

/// Check a whole file being moved.
///
/// The file's top-level declarations become the elements to move. When the
/// checker pruned any usage, `on_usage_update` receives the survivors
/// (external first, then internal).
pub fn analyze_conflicts_in_file(
    project: &Project,
    services: Services<'_>,
    file: FileId,
    usages: &[Usage],
    target: MoveTarget,
    all_elements_to_move: Vec<Element>,
    options: CheckerOptions,
    report: &mut ConflictReport,
    on_usage_update: impl FnOnce(Vec<Usage>),
) {
    let elements = project.file(file).declarations.clone();
    if elements.is_empty() {
        return;
    }

    let (mut internal, mut external) = partition_usages(usages);
    let (internal_before, external_before) = (internal.len(), external.len());

    MoveConflictChecker::new(project, services, elements, target, options)
        .with_all_elements_to_move(all_elements_to_move)
        .check_all_conflicts(&mut external, &mut internal, report);

    if external.len() != external_before || internal.len() != internal_before {
        tracing::debug!(
            external = external.len(),
            internal = internal.len(),
            "usages pruned by conflict check"
        );
        on_usage_update(external.into_iter().chain(internal).collect());
    }
}
