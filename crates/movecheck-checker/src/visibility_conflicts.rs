//! Visibility conflicts caused by relocation.

use crate::checker::MoveConflictChecker;
use crate::predicted::PredictedDecl;
use crate::report::ConflictReport;
use crate::visibility::is_visible;
use movecheck_common::diagnostic_messages;
use movecheck_common::limits::MAX_CONTAINER_CHAIN_LENGTH;
use movecheck_model::{
    Container, DeclId, DeclKind, Element, MoveTarget, Parent, Project, RefId, UsageSet,
    Visibility,
};
use rustc_hash::{FxHashMap, FxHashSet};

impl MoveConflictChecker<'_> {
    // =========================================================================
    // Usages of moved declarations
    // =========================================================================

    /// Report external usages that can see a moved declaration today but
    /// will not see it at its new location.
    pub(crate) fn check_visibility_in_usages(
        &self,
        external_usages: &UsageSet,
        report: &mut ConflictReport,
    ) {
        let project = self.ctx.project;
        let target_container = self.ctx.target_container();
        let target_is_public = self.target_is_public_scope();
        let mut checked: FxHashMap<DeclId, FxHashSet<Element>> = FxHashMap::default();

        for usage in external_usages {
            let reference = project.reference(usage.reference);
            if reference.is_non_code() {
                continue;
            }
            if self.ctx.is_to_be_moved(Element::Reference(usage.reference)) {
                continue;
            }
            let referenced = usage.referenced;
            let referenced_decl = project.decl(referenced);
            if referenced_decl.is_host() {
                continue;
            }
            if referenced_decl.has_visibility()
                && referenced_decl.visibility == Visibility::Public
                && target_is_public
            {
                continue;
            }

            let context = match reference.owner {
                Some(owner) => Element::Decl(owner),
                None => Element::File(reference.file),
            };
            if !checked.entry(referenced).or_default().insert(context) {
                continue;
            }

            let Some(target_container) = target_container.clone() else {
                continue;
            };
            let Element::Decl(referencing) = context else {
                continue;
            };

            let actual_visibility = if project.decl(referencing).is_host() {
                host_view_visibility(project, referenced)
            } else {
                None
            };
            let original = PredictedDecl::original(referenced).with_visibility(actual_visibility);
            let Some(predicted) =
                PredictedDecl::moved_to(project, referenced, target_container, actual_visibility)
            else {
                continue;
            };

            let from = Container::Decl(referencing);
            if is_visible(project, &original, &from) && !is_visible(project, &predicted, &from) {
                let render = &self.ctx.render;
                report.push(
                    Element::Reference(usage.reference),
                    &diagnostic_messages::USES_DECLARATION_INACCESSIBLE_AFTER_MOVE,
                    &[&render.decl(referencing), &render.decl(referenced)],
                );
            }
        }
    }

    /// Public declarations stay reachable when moved into an existing file,
    /// or into a declaration whose enclosing classes are all public.
    fn target_is_public_scope(&self) -> bool {
        let project = self.ctx.project;
        match &self.ctx.target {
            MoveTarget::ExistingFile(_) => true,
            MoveTarget::ExistingDecl(decl) => std::iter::once(*decl)
                .chain(project.containers(*decl).iter().filter_map(Container::as_decl))
                .filter(|&d| project.decl(d).kind.is_class_like())
                .all(|d| project.decl(d).visibility == Visibility::Public),
            MoveTarget::Directory { .. } | MoveTarget::DeferredFile { .. } => false,
        }
    }

    // =========================================================================
    // References inside moved declarations
    // =========================================================================

    /// Report references in moved code to declarations it will no longer see.
    pub(crate) fn check_visibility_in_declarations(&self, report: &mut ConflictReport) {
        let project = self.ctx.project;
        let Some(target_container) = self.ctx.target_container() else {
            return;
        };

        for decl in self.ctx.walked_declarations() {
            for reference_id in project.references_within(decl) {
                let Some(target) = project.reference(reference_id).target else {
                    continue;
                };
                if self.ctx.is_to_be_moved(Element::Decl(target)) {
                    continue;
                }
                let target_decl = project.decl(target);
                if !target_decl.has_visibility() {
                    continue;
                }

                let mut visible = self.is_visible_from(target, reference_id, &target_container);
                if visible
                    && target_decl.kind == DeclKind::Constructor
                    && let Parent::Decl(class) = target_decl.parent
                {
                    visible = self.is_visible_from(class, reference_id, &target_container);
                }
                if !visible {
                    let render = &self.ctx.render;
                    report.push(
                        Element::Reference(reference_id),
                        &diagnostic_messages::USES_DECLARATION_INACCESSIBLE_AFTER_MOVE,
                        &[&render.decl(decl), &render.decl(target)],
                    );
                }
            }
        }
    }

    /// Whether `what`, referenced by `reference` in moved code, stays visible.
    ///
    /// References that are already broken today are not blamed on the move.
    fn is_visible_from(&self, what: DeclId, reference: RefId, target_container: &Container) -> bool {
        let project = self.ctx.project;
        let visibility = project.decl(what).visibility;
        if visibility.normalize() == Visibility::Public {
            return true;
        }
        let reference = project.reference(reference);
        let Some(mut referrer) = reference.owner else {
            return true;
        };
        // A supertype call is resolved from the primary constructor.
        if project.decl(referrer).kind.is_class_like()
            && reference.is_in_supertype_list()
            && let Some(ctor) = project.primary_constructor(referrer)
        {
            referrer = ctor;
        }

        let original = PredictedDecl::original(what);
        if !is_visible(project, &original, &Container::Decl(referrer)) {
            return true;
        }
        if visibility.normalize() == Visibility::Protected {
            return self.is_protected_visible_after_move(what, referrer, target_container);
        }
        is_visible(project, &original, target_container)
    }

    /// Protected visibility, with containers of moved declarations replaced
    /// by the target container.
    fn is_protected_visible_after_move(
        &self,
        what: DeclId,
        referrer: DeclId,
        target_container: &Container,
    ) -> bool {
        let project = self.ctx.project;
        let given_class = self.ctx.target_aware_containing_class(what, target_container);
        let companion_owner = given_class
            .filter(|&class| project.decl(class).is_companion())
            .and_then(|class| self.ctx.target_aware_containing_class(class, target_container));

        let mut current = referrer;
        for _ in 0..MAX_CONTAINER_CHAIN_LENGTH {
            let Some(referrer_class) = self
                .ctx
                .target_aware_containing_class(current, target_container)
            else {
                return false;
            };
            if companion_owner.is_some_and(|owner| project.is_subclass_of(referrer_class, owner)) {
                return true;
            }
            let Some(given_class) = given_class else {
                return false;
            };
            if project.is_subclass_of(referrer_class, given_class) {
                return true;
            }
            match self.ctx.target_aware_container(current, target_container) {
                Container::Decl(next) => current = next,
                Container::Package(_) => return false,
            }
        }
        false
    }
}

/// Visibility of a source declaration as seen from host-language code.
///
/// Private top-level classes are package-private there; protected members
/// are also visible to the whole package.
fn host_view_visibility(project: &Project, decl: DeclId) -> Option<Visibility> {
    let data = project.decl(decl);
    match data.visibility {
        Visibility::Private
            if data.kind.is_class_like() && matches!(data.parent, Parent::File(_)) =>
        {
            Some(Visibility::Package)
        }
        Visibility::Protected => Some(Visibility::ProtectedAndPackage),
        _ => None,
    }
}
