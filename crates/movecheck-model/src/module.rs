//! Modules, order entries, source roots, directories and files.

use crate::ids::{DeclId, DirId, LibraryId, ModuleId, SdkId};
use crate::names::FqName;
use serde::{Deserialize, Serialize};

/// Target platform of a module or library.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Jvm,
    Js,
    Native,
    /// Multiplatform common code.
    Common,
}

impl Platform {
    pub const fn is_jvm(self) -> bool {
        matches!(self, Platform::Jvm)
    }
}

/// Kind of SDK order entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdkKind {
    /// A Java SDK. Filtered out of the search scope of non-JVM modules.
    Jdk,
    Other,
}

#[derive(Clone, Debug)]
pub struct Sdk {
    pub name: String,
    pub kind: SdkKind,
}

#[derive(Clone, Debug)]
pub struct Library {
    pub name: String,
    pub platform: Platform,
}

#[derive(Clone, Debug)]
pub struct Module {
    pub name: String,
    pub platform: Platform,
    /// Direct module dependencies.
    pub dependencies: Vec<ModuleId>,
    pub libraries: Vec<LibraryId>,
    pub sdks: Vec<SdkId>,
    /// Common modules this module provides actual declarations for.
    pub implemented_modules: Vec<ModuleId>,
}

/// Where a directory's content comes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceRoot {
    Module { module: ModuleId, test: bool },
    Library(LibraryId),
    Sdk(SdkId),
}

impl SourceRoot {
    pub fn module(self) -> Option<ModuleId> {
        match self {
            SourceRoot::Module { module, .. } => Some(module),
            SourceRoot::Library(_) | SourceRoot::Sdk(_) => None,
        }
    }

    pub fn is_test(self) -> bool {
        matches!(self, SourceRoot::Module { test: true, .. })
    }

    /// Project content, as opposed to libraries and SDKs.
    pub fn is_project(self) -> bool {
        matches!(self, SourceRoot::Module { .. })
    }
}

#[derive(Clone, Debug)]
pub struct Directory {
    pub path: String,
    pub root: SourceRoot,
    /// Package implied by the directory's position under its source root.
    pub package: FqName,
}

#[derive(Clone, Debug)]
pub struct SourceFile {
    pub name: String,
    pub directory: DirId,
    /// Package declared by the file's package directive.
    pub package: FqName,
    /// Top-level declarations in source order.
    pub declarations: Vec<DeclId>,
}
