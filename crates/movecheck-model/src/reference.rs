//! Reference occurrences.

use crate::ids::{DeclId, FileId};
use bitflags::bitflags;

bitflags! {
    /// Syntactic position of a reference.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RefFlags: u8 {
        /// Inside an import directive.
        const IN_IMPORT = 1 << 0;
        /// The type reference of a supertype list entry (`class B : A()`).
        const IN_SUPERTYPE_LIST = 1 << 1;
        /// Found in a comment or string literal rather than in code.
        const NON_CODE = 1 << 2;
    }
}

/// A located reference to a declaration.
#[derive(Clone, Debug)]
pub struct Reference {
    pub file: FileId,
    /// Innermost named declaration lexically containing the reference.
    pub owner: Option<DeclId>,
    /// Resolved target, if resolution succeeded.
    pub target: Option<DeclId>,
    /// Referenced name as written.
    pub text: String,
    pub offset: u32,
    pub flags: RefFlags,
}

impl Reference {
    pub fn is_in_import(&self) -> bool {
        self.flags.contains(RefFlags::IN_IMPORT)
    }

    pub fn is_in_supertype_list(&self) -> bool {
        self.flags.contains(RefFlags::IN_SUPERTYPE_LIST)
    }

    pub fn is_non_code(&self) -> bool {
        self.flags.contains(RefFlags::NON_CODE)
    }
}
