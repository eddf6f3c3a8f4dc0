//! Element identity used for conflict keys and move sets.

use crate::ids::{DeclId, FileId, RefId};
use serde::Serialize;

/// A physical element of the project: a declaration, a reference, or a file.
///
/// Conflicts are keyed on elements and move sets are lists of elements;
/// "is to be moved" is ancestor containment between elements.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Element {
    Decl(DeclId),
    Reference(RefId),
    File(FileId),
}

impl Element {
    pub fn as_decl(self) -> Option<DeclId> {
        match self {
            Element::Decl(id) => Some(id),
            Element::Reference(_) | Element::File(_) => None,
        }
    }
}

impl From<DeclId> for Element {
    fn from(value: DeclId) -> Self {
        Element::Decl(value)
    }
}

impl From<RefId> for Element {
    fn from(value: RefId) -> Self {
        Element::Reference(value)
    }
}

impl From<FileId> for Element {
    fn from(value: FileId) -> Self {
        Element::File(value)
    }
}
