//! Name clashes at the destination.
//!
//! Walking outwards from the target container, every scope the moved
//! declaration will live in is searched for an equivalent declaration: same
//! name, and for functions, pairwise equivalent parameter types.

use crate::checker::MoveConflictChecker;
use crate::report::ConflictReport;
use movecheck_common::diagnostic_messages;
use movecheck_common::limits::{MAX_CONTAINER_CHAIN_LENGTH, MAX_TYPE_EQUIVALENCE_DEPTH};
use movecheck_model::{
    Container, DeclId, DeclKind, Element, PackageFragment, Project, TypeData, TypeId,
    TypeInterner,
};
use rustc_hash::FxHashSet;
use smallvec::{SmallVec, smallvec};

impl MoveConflictChecker<'_> {
    pub(crate) fn check_name_clashes(&self, report: &mut ConflictReport) {
        let Some(target_container) = self.ctx.target_container() else {
            return;
        };
        for decl in self.ctx.walked_declarations() {
            for (conflicting, scope) in self.find_clashes(decl, &target_container) {
                let render = &self.ctx.render;
                report.push(
                    Element::Decl(decl),
                    &diagnostic_messages::DECLARATIONS_CLASH,
                    &[
                        &render.decl(decl),
                        &render.decl(conflicting),
                        &render.container(&scope),
                    ],
                );
            }
        }
    }

    /// Declarations equivalent to `decl` in the scopes it will land in,
    /// with the scope each was found in.
    fn find_clashes(&self, decl: DeclId, target_container: &Container) -> Vec<(DeclId, Container)> {
        let project = self.ctx.project;
        let own_container_fq = project.container_fq_name(&project.container(decl));
        let clashes_with = |candidate: DeclId| {
            candidate != decl && declarations_equivalent(project, decl, candidate)
        };

        let mut result = Vec::new();
        let mut seen: FxHashSet<DeclId> = FxHashSet::default();
        let mut current = target_container.clone();
        for _ in 0..MAX_CONTAINER_CHAIN_LENGTH {
            match current {
                Container::Package(fragment) => {
                    // Moving within its own package never clashes.
                    if own_container_fq == fragment.fq_name {
                        break;
                    }
                    let scope = Container::Package(PackageFragment {
                        module: fragment.module,
                        fq_name: fragment.fq_name.clone(),
                        file: None,
                    });
                    for member in project.package_members(&fragment.fq_name, fragment.module) {
                        if clashes_with(member) {
                            result.push((member, scope.clone()));
                        }
                    }
                    break;
                }
                Container::Decl(owner) => {
                    // A class moved into itself points back at the target.
                    if !seen.insert(owner) {
                        break;
                    }
                    if project.decl(owner).kind.is_class_like()
                        && own_container_fq != project.fq_name(owner)
                    {
                        for member in project.class_member_scope(owner) {
                            if clashes_with(member) {
                                result.push((member, Container::Decl(owner)));
                            }
                        }
                    }
                    current = self.ctx.target_aware_container(owner, target_container);
                }
            }
        }
        result
    }
}

/// Whether two declarations would clash in one scope.
///
/// Functions clash with functions of the same name whose parameters are
/// pairwise equivalent over their common prefix. Everything else clashes on
/// name alone, but never with a function. Symmetric in its arguments.
pub fn declarations_equivalent(project: &Project, a: DeclId, b: DeclId) -> bool {
    let (a, b) = (project.decl(a), project.decl(b));
    if a.name != b.name {
        return false;
    }
    match (is_function_like(a.kind), is_function_like(b.kind)) {
        (true, true) => a
            .params
            .iter()
            .zip(&b.params)
            .all(|(pa, pb)| types_equivalent(project, pa.ty, pb.ty, 0)),
        (false, false) => true,
        _ => false,
    }
}

fn is_function_like(kind: DeclKind) -> bool {
    matches!(kind, DeclKind::Function | DeclKind::Constructor)
}

/// Loose structural type equivalence.
///
/// `Any` matches `Any?`; types with exactly one supertype each are compared
/// through those supertypes; generic types match on their classifier's
/// name. Anything else needs identical types.
fn types_equivalent(project: &Project, a: TypeId, b: TypeId, depth: u32) -> bool {
    if a == b {
        return true;
    }
    if depth > MAX_TYPE_EQUIVALENCE_DEPTH {
        return false;
    }
    let (ta, tb) = (project.types.get(a), project.types.get(b));
    if ta.is_any_or_nullable_any() && tb.is_any_or_nullable_any() {
        return true;
    }

    let (sa, sb) = (supertypes_with_any(project, a), supertypes_with_any(project, b));
    if let ([sa], [sb]) = (sa.as_slice(), sb.as_slice()) {
        return types_equivalent(project, *sa, *sb, depth + 1);
    }

    if !ta.arguments().is_empty() && !tb.arguments().is_empty() {
        let name = |data: &TypeData| data.classifier().map(|c| project.decl(c).name.as_str());
        return name(ta) == name(tb);
    }
    false
}

/// Declared supertypes of a type's classifier, plus `Any` unless one of them
/// is a class. `Any?` for an unbounded type parameter, nothing for `Any`
/// itself.
fn supertypes_with_any(project: &Project, ty: TypeId) -> SmallVec<[TypeId; 2]> {
    match project.types.get(ty) {
        TypeData::Any { .. } => SmallVec::new(),
        TypeData::Class { class, .. } => {
            let mut supertypes: SmallVec<[TypeId; 2]> =
                project.decl(*class).supertypes.iter().copied().collect();
            let has_superclass = supertypes.iter().any(|&supertype| {
                project
                    .types
                    .get(supertype)
                    .classifier()
                    .is_some_and(|decl| project.decl(decl).kind == DeclKind::Class)
            });
            if !has_superclass {
                supertypes.push(TypeInterner::ANY);
            }
            supertypes
        }
        TypeData::Param { param, .. } => {
            let bounds = &project.decl(*param).bounds;
            if bounds.is_empty() {
                smallvec![TypeInterner::NULLABLE_ANY]
            } else {
                bounds.iter().copied().collect()
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/name_clash_equivalence_tests.rs"]
mod name_clash_equivalence_tests;
