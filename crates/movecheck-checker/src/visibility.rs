//! Visibility rules.
//!
//! `is_visible` answers whether code inside a container may refer to a
//! (possibly relocated) declaration, ignoring dispatch receivers. The rules
//! follow the source language's lattice, plus the two host-language
//! visibilities (`Package`, `ProtectedAndPackage`) that appear when a
//! declaration is viewed from host code.

use crate::predicted::PredictedDecl;
use movecheck_common::limits::MAX_CONTAINER_CHAIN_LENGTH;
use movecheck_model::{Container, DeclId, FileId, FqName, ModuleId, Parent, Project, Visibility};

/// Whether `what` is visible from code in `from`.
///
/// Constructors additionally require their class to be visible.
pub fn is_visible(project: &Project, what: &PredictedDecl, from: &Container) -> bool {
    if !project.decl(what.decl()).has_visibility() {
        return true;
    }
    if !is_visible_ignoring_receiver(project, what, from) {
        return false;
    }
    if what.is_constructor(project)
        && !what.is_relocated()
        && let Parent::Decl(class) = project.decl(what.decl()).parent
    {
        return is_visible_ignoring_receiver(project, &PredictedDecl::original(class), from);
    }
    true
}

pub fn is_visible_ignoring_receiver(
    project: &Project,
    what: &PredictedDecl,
    from: &Container,
) -> bool {
    match what.visibility(project) {
        Visibility::Public => true,
        Visibility::Private => is_private_visible(project, what, from),
        Visibility::Internal => is_internal_visible(project, what, from),
        Visibility::Protected => is_protected_visible(project, what, from),
        Visibility::Package => is_package_visible(project, what, from),
        Visibility::ProtectedAndPackage => {
            is_package_visible(project, what, from) || is_protected_visible(project, what, from)
        }
    }
}

// =============================================================================
// Per-visibility rules
// =============================================================================

fn is_private_visible(project: &Project, what: &PredictedDecl, from: &Container) -> bool {
    match what.container(project) {
        Container::Decl(owner) => {
            // Private members of a companion are visible in its owner class.
            let chain = decl_chain(project, &Container::Decl(owner));
            let scope = chain
                .iter()
                .copied()
                .find(|&d| {
                    let decl = project.decl(d);
                    decl.kind.is_class_like() && !decl.is_companion()
                })
                .unwrap_or(owner);
            decl_chain(project, from).contains(&scope)
        }
        Container::Package(_) => match (what.file(project), file_of_container(project, from)) {
            (Some(what_file), Some(from_file)) => what_file == from_file,
            _ => false,
        },
    }
}

fn is_internal_visible(project: &Project, what: &PredictedDecl, from: &Container) -> bool {
    match (module_of_container(project, from), what.module(project)) {
        (Some(from_module), Some(what_module)) => {
            from_module == what_module || project.implements_module(from_module, what_module)
        }
        _ => false,
    }
}

fn is_protected_visible(project: &Project, what: &PredictedDecl, from: &Container) -> bool {
    let Some(given) = what.containing_class(project) else {
        return false;
    };
    let companion_owner = if project.decl(given).is_companion() {
        project.containing_class(given)
    } else {
        None
    };
    decl_chain(project, from)
        .into_iter()
        .filter(|&d| project.decl(d).kind.is_class_like())
        .any(|from_class| {
            project.is_subclass_of(from_class, given)
                || companion_owner.is_some_and(|owner| project.is_subclass_of(from_class, owner))
        })
}

fn is_package_visible(project: &Project, what: &PredictedDecl, from: &Container) -> bool {
    match (what.package(project), package_of_container(project, from)) {
        (Some(what_package), Some(from_package)) => what_package == from_package,
        _ => false,
    }
}

// =============================================================================
// Container helpers
// =============================================================================

/// `from` itself (when a declaration) followed by its declaration containers.
fn decl_chain(project: &Project, from: &Container) -> Vec<DeclId> {
    let Container::Decl(start) = from else {
        return Vec::new();
    };
    let mut chain = vec![*start];
    chain.extend(
        project
            .containers(*start)
            .iter()
            .filter_map(Container::as_decl)
            .take(MAX_CONTAINER_CHAIN_LENGTH),
    );
    chain
}

fn file_of_container(project: &Project, container: &Container) -> Option<FileId> {
    match container {
        Container::Decl(decl) => project.file_of_decl(*decl),
        Container::Package(fragment) => fragment.file,
    }
}

fn module_of_container(project: &Project, container: &Container) -> Option<ModuleId> {
    match container {
        Container::Decl(decl) => project.module_of_decl(*decl),
        Container::Package(fragment) => fragment.module,
    }
}

fn package_of_container(project: &Project, container: &Container) -> Option<FqName> {
    match container {
        Container::Decl(decl) => project.package_of_decl(*decl).cloned(),
        Container::Package(fragment) => Some(fragment.fq_name.clone()),
    }
}

#[cfg(test)]
#[path = "tests/visibility_tests.rs"]
mod visibility_tests;
