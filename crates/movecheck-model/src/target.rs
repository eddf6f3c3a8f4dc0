//! Move targets.

use crate::element::Element;
use crate::ids::{DeclId, DirId, FileId, ModuleId};
use crate::names::FqName;
use crate::project::Project;

/// Destination of a move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveTarget {
    /// Into an existing declaration, which becomes the new container.
    ExistingDecl(DeclId),
    /// Into an existing file.
    ExistingFile(FileId),
    /// Into a new file of a directory, under `package`.
    Directory { directory: DirId, package: FqName },
    /// Into a file that will be created on commit.
    DeferredFile {
        directory: DirId,
        package: FqName,
        file_name: String,
    },
}

/// The file or directory backing a move target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TargetLocation {
    File(FileId),
    Directory(DirId),
}

impl TargetLocation {
    pub fn module(self, project: &Project) -> Option<ModuleId> {
        match self {
            TargetLocation::File(file) => project.module_of_file(file),
            TargetLocation::Directory(dir) => project.directory(dir).root.module(),
        }
    }

    pub fn is_test(self, project: &Project) -> bool {
        match self {
            TargetLocation::File(file) => project.is_test_file(file),
            TargetLocation::Directory(dir) => project.directory(dir).root.is_test(),
        }
    }

    /// The location itself when it is a directory, else the file's directory.
    pub fn directory(self, project: &Project) -> DirId {
        match self {
            TargetLocation::File(file) => project.file(file).directory,
            TargetLocation::Directory(dir) => dir,
        }
    }
}

impl MoveTarget {
    pub fn target_element(&self) -> Option<Element> {
        match self {
            MoveTarget::ExistingDecl(decl) => Some(Element::Decl(*decl)),
            MoveTarget::ExistingFile(file) => Some(Element::File(*file)),
            MoveTarget::Directory { .. } | MoveTarget::DeferredFile { .. } => None,
        }
    }

    pub fn target_file_or_dir(&self, project: &Project) -> Option<TargetLocation> {
        match self {
            MoveTarget::ExistingDecl(decl) => project.file_of_decl(*decl).map(TargetLocation::File),
            MoveTarget::ExistingFile(file) => Some(TargetLocation::File(*file)),
            MoveTarget::Directory { directory, .. } | MoveTarget::DeferredFile { directory, .. } => {
                Some(TargetLocation::Directory(*directory))
            }
        }
    }

    pub fn target_module(&self, project: &Project) -> Option<ModuleId> {
        self.target_file_or_dir(project)?.module(project)
    }

    /// Package the moved declarations will belong to.
    pub fn target_container_fq_name(&self, project: &Project) -> Option<FqName> {
        match self {
            MoveTarget::ExistingDecl(decl) => project.package_of_decl(*decl).cloned(),
            MoveTarget::ExistingFile(file) => Some(project.package_of_file(*file).clone()),
            MoveTarget::Directory { package, .. } | MoveTarget::DeferredFile { package, .. } => {
                Some(package.clone())
            }
        }
    }
}
