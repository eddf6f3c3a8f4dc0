//! Usages of moved declarations.

use crate::element::Element;
use crate::ids::{DeclId, RefId};
use crate::project::Project;
use crate::search::UsageSearch;
use indexmap::IndexSet;

/// A reference to a declaration being moved.
///
/// Internal usages lie inside the moved code; external ones outside it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Usage {
    pub reference: RefId,
    pub referenced: DeclId,
    pub is_internal: bool,
}

/// Insertion-ordered usage set; checkers prune it in place.
pub type UsageSet = IndexSet<Usage>;

/// Collect usages of every declaration inside `elements_to_move`.
pub fn collect_usages(
    project: &Project,
    search: &dyn UsageSearch,
    elements_to_move: &[Element],
) -> Vec<Usage> {
    let is_moved = |element: Element| {
        elements_to_move
            .iter()
            .any(|&root| project.is_ancestor(root, element))
    };

    let mut declarations = Vec::new();
    for &element in elements_to_move {
        match element {
            Element::Decl(decl) => declarations.push(decl),
            Element::File(file) => {
                declarations.extend(project.file(file).declarations.iter().copied())
            }
            Element::Reference(_) => {}
        }
    }
    let mut worklist = declarations.clone();
    while let Some(decl) = worklist.pop() {
        for &member in &project.decl(decl).members {
            declarations.push(member);
            worklist.push(member);
        }
    }

    let mut usages = Vec::new();
    for decl in declarations {
        for reference in search.references_to(decl) {
            usages.push(Usage {
                reference,
                referenced: decl,
                is_internal: is_moved(Element::Reference(reference)),
            });
        }
    }
    tracing::debug!(count = usages.len(), "collected usages of moved declarations");
    usages
}
