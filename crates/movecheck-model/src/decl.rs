//! Declarations.

use crate::ids::{DeclId, FileId, ModuleId, TypeId};
use crate::names::FqName;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// =============================================================================
// Declaration Attributes
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclKind {
    Class,
    Interface,
    Object,
    Function,
    Property,
    Constructor,
    TypeAlias,
    TypeParameter,
}

impl DeclKind {
    /// Class, interface or object: anything with a member scope.
    pub const fn is_class_like(self) -> bool {
        matches!(self, DeclKind::Class | DeclKind::Interface | DeclKind::Object)
    }

    /// Functions, properties and constructors.
    pub const fn is_callable(self) -> bool {
        matches!(
            self,
            DeclKind::Function | DeclKind::Property | DeclKind::Constructor
        )
    }

    /// Lower-case word used when describing the declaration to the user.
    pub const fn describe(self) -> &'static str {
        match self {
            DeclKind::Class => "class",
            DeclKind::Interface => "interface",
            DeclKind::Object => "object",
            DeclKind::Function => "function",
            DeclKind::Property => "property",
            DeclKind::Constructor => "constructor",
            DeclKind::TypeAlias => "type alias",
            DeclKind::TypeParameter => "type parameter",
        }
    }
}

/// Declared visibility.
///
/// `Package` and `ProtectedAndPackage` only arise for host-language
/// declarations, or when a source declaration is viewed from host code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    Public,
    Internal,
    Protected,
    Private,
    Package,
    ProtectedAndPackage,
}

impl Visibility {
    /// Map host-language visibilities onto the source language's lattice.
    pub const fn normalize(self) -> Visibility {
        match self {
            Visibility::Package | Visibility::ProtectedAndPackage => Visibility::Protected,
            other => other,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Modality {
    #[default]
    Final,
    Open,
    Abstract,
    Sealed,
}

/// Which language a declaration was written in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Language {
    /// The language being refactored.
    #[default]
    Source,
    /// The host language sharing the project (callers with their own
    /// visibility model).
    Host,
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DeclFlags: u16 {
        const COMPANION = 1 << 0;
        const EXPECT = 1 << 1;
        const ACTUAL = 1 << 2;
        /// Expect declaration annotated as an optional expectation.
        const OPTIONAL_EXPECTATION = 1 << 3;
        /// Provided by the language runtime rather than by any source root.
        const BUILTIN = 1 << 4;
        const PRIMARY_CONSTRUCTOR = 1 << 5;
    }
}

// =============================================================================
// Containers
// =============================================================================

/// Physical parent of a declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Parent {
    File(FileId),
    Decl(DeclId),
}

impl From<FileId> for Parent {
    fn from(value: FileId) -> Self {
        Parent::File(value)
    }
}

impl From<DeclId> for Parent {
    fn from(value: DeclId) -> Self {
        Parent::Decl(value)
    }
}

/// A package as seen from one module.
///
/// `file` is the source file the fragment stands for; a fragment created for
/// a directory target has none, so file-private visibility never matches it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PackageFragment {
    pub module: Option<ModuleId>,
    pub fq_name: FqName,
    pub file: Option<FileId>,
}

/// Semantic container of a declaration: its owning declaration or package.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    Decl(DeclId),
    Package(PackageFragment),
}

impl Container {
    pub fn as_decl(&self) -> Option<DeclId> {
        match self {
            Container::Decl(id) => Some(*id),
            Container::Package(_) => None,
        }
    }

    pub fn is_package(&self) -> bool {
        matches!(self, Container::Package(_))
    }
}

// =============================================================================
// Declaration
// =============================================================================

#[derive(Clone, Debug)]
pub struct ValueParam {
    pub name: String,
    pub ty: TypeId,
}

#[derive(Clone, Debug)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclKind,
    pub visibility: Visibility,
    pub modality: Modality,
    pub language: Language,
    pub flags: DeclFlags,
    pub parent: Parent,
    /// Declared supertypes, superclass first.
    pub supertypes: SmallVec<[TypeId; 2]>,
    /// Members this declaration directly overrides.
    pub overrides: SmallVec<[DeclId; 1]>,
    pub params: Vec<ValueParam>,
    /// Property type or type alias expansion.
    pub ty: Option<TypeId>,
    /// Upper bounds of a type parameter.
    pub bounds: SmallVec<[TypeId; 1]>,
    /// Lexically nested declarations in source order.
    pub members: Vec<DeclId>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, kind: DeclKind, parent: Parent) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility: Visibility::Public,
            modality: Modality::Final,
            language: Language::Source,
            flags: DeclFlags::empty(),
            parent,
            supertypes: SmallVec::new(),
            overrides: SmallVec::new(),
            params: Vec::new(),
            ty: None,
            bounds: SmallVec::new(),
            members: Vec::new(),
        }
    }

    /// Whether visibility rules apply at all. Type parameters are always
    /// visible where they are in scope.
    pub fn has_visibility(&self) -> bool {
        self.kind != DeclKind::TypeParameter
    }

    pub fn is_sealed(&self) -> bool {
        self.modality == Modality::Sealed
    }

    pub fn is_companion(&self) -> bool {
        self.flags.contains(DeclFlags::COMPANION)
    }

    pub fn is_expect(&self) -> bool {
        self.flags.contains(DeclFlags::EXPECT)
    }

    pub fn is_builtin(&self) -> bool {
        self.flags.contains(DeclFlags::BUILTIN)
    }

    pub fn is_host(&self) -> bool {
        self.language == Language::Host
    }
}
