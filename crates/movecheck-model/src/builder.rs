//! Programmatic construction of a `Project`.
//!
//! Used by the manifest loader and by tests:
//!
//! ```
//! use movecheck_model::{Platform, ProjectBuilder};
//!
//! let mut b = ProjectBuilder::new();
//! let app = b.module("app", Platform::Jvm);
//! let dir = b.source_dir(app, "app/src/a", "a");
//! let file = b.file(dir, "A.kt");
//! let class_a = b.class(file, "A").build();
//! let f = b.function(class_a, "f").build();
//! let project = b.finish();
//! assert_eq!(project.fq_name(f).as_str(), "a.A.f");
//! ```

use crate::decl::{
    DeclFlags, DeclKind, Declaration, Language, Modality, Parent, ValueParam, Visibility,
};
use crate::ids::{DeclId, DirId, FileId, LibraryId, ModuleId, RefId, SdkId, TypeId};
use crate::module::{Directory, Library, Module, Platform, Sdk, SdkKind, SourceFile, SourceRoot};
use crate::names::FqName;
use crate::project::Project;
use crate::reference::{RefFlags, Reference};
use crate::types::{TypeArg, TypeData, TypeInterner};

#[derive(Default)]
pub struct ProjectBuilder {
    project: Project,
    next_offset: u32,
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Modules and roots
    // -------------------------------------------------------------------------

    pub fn sdk(&mut self, name: &str, kind: SdkKind) -> SdkId {
        self.project.sdks.push(Sdk {
            name: name.to_string(),
            kind,
        });
        SdkId(self.project.sdks.len() as u32 - 1)
    }

    pub fn library(&mut self, name: &str, platform: Platform) -> LibraryId {
        self.project.libraries.push(Library {
            name: name.to_string(),
            platform,
        });
        LibraryId(self.project.libraries.len() as u32 - 1)
    }

    pub fn module(&mut self, name: &str, platform: Platform) -> ModuleId {
        self.project.modules.push(Module {
            name: name.to_string(),
            platform,
            dependencies: Vec::new(),
            libraries: Vec::new(),
            sdks: Vec::new(),
            implemented_modules: Vec::new(),
        });
        ModuleId(self.project.modules.len() as u32 - 1)
    }

    pub fn add_dependency(&mut self, module: ModuleId, dependency: ModuleId) {
        let deps = &mut self.project.modules[module.index()].dependencies;
        if !deps.contains(&dependency) {
            deps.push(dependency);
        }
    }

    pub fn add_library(&mut self, module: ModuleId, library: LibraryId) {
        self.project.modules[module.index()].libraries.push(library);
    }

    pub fn add_sdk(&mut self, module: ModuleId, sdk: SdkId) {
        self.project.modules[module.index()].sdks.push(sdk);
    }

    /// Declare that `module` provides actuals for the common module `common`.
    pub fn add_implemented_module(&mut self, module: ModuleId, common: ModuleId) {
        self.project.modules[module.index()]
            .implemented_modules
            .push(common);
    }

    pub fn directory(&mut self, path: &str, root: SourceRoot, package: &str) -> DirId {
        self.project.directories.push(Directory {
            path: path.to_string(),
            root,
            package: FqName::new(package),
        });
        DirId(self.project.directories.len() as u32 - 1)
    }

    pub fn source_dir(&mut self, module: ModuleId, path: &str, package: &str) -> DirId {
        self.directory(path, SourceRoot::Module { module, test: false }, package)
    }

    pub fn test_dir(&mut self, module: ModuleId, path: &str, package: &str) -> DirId {
        self.directory(path, SourceRoot::Module { module, test: true }, package)
    }

    /// A file declaring its directory's package.
    pub fn file(&mut self, directory: DirId, name: &str) -> FileId {
        let package = self.project.directories[directory.index()].package.clone();
        self.file_with_package(directory, name, package)
    }

    pub fn file_with_package(&mut self, directory: DirId, name: &str, package: FqName) -> FileId {
        self.project.files.push(SourceFile {
            name: name.to_string(),
            directory,
            package,
            declarations: Vec::new(),
        });
        FileId(self.project.files.len() as u32 - 1)
    }

    // -------------------------------------------------------------------------
    // Declarations
    // -------------------------------------------------------------------------

    pub fn decl(&mut self, parent: impl Into<Parent>, kind: DeclKind, name: &str) -> DeclBuilder<'_> {
        DeclBuilder {
            decl: Declaration::new(name, kind, parent.into()),
            builder: self,
        }
    }

    pub fn class(&mut self, parent: impl Into<Parent>, name: &str) -> DeclBuilder<'_> {
        self.decl(parent, DeclKind::Class, name)
    }

    pub fn interface(&mut self, parent: impl Into<Parent>, name: &str) -> DeclBuilder<'_> {
        self.decl(parent, DeclKind::Interface, name)
    }

    pub fn object(&mut self, parent: impl Into<Parent>, name: &str) -> DeclBuilder<'_> {
        self.decl(parent, DeclKind::Object, name)
    }

    pub fn function(&mut self, parent: impl Into<Parent>, name: &str) -> DeclBuilder<'_> {
        self.decl(parent, DeclKind::Function, name)
    }

    pub fn property(&mut self, parent: impl Into<Parent>, name: &str) -> DeclBuilder<'_> {
        self.decl(parent, DeclKind::Property, name)
    }

    pub fn type_alias(&mut self, parent: impl Into<Parent>, name: &str) -> DeclBuilder<'_> {
        self.decl(parent, DeclKind::TypeAlias, name)
    }

    pub fn type_parameter(&mut self, parent: DeclId, name: &str) -> DeclBuilder<'_> {
        self.decl(parent, DeclKind::TypeParameter, name)
    }

    /// The primary constructor of `class`.
    pub fn primary_constructor(&mut self, class: DeclId) -> DeclBuilder<'_> {
        let name = self.project.decls[class.index()].name.clone();
        let mut builder = self.decl(class, DeclKind::Constructor, &name);
        builder.decl.flags |= DeclFlags::PRIMARY_CONSTRUCTOR;
        builder
    }

    pub fn constructor(&mut self, class: DeclId) -> DeclBuilder<'_> {
        let name = self.project.decls[class.index()].name.clone();
        self.decl(class, DeclKind::Constructor, &name)
    }

    /// Add a supertype after the fact, for hierarchies declared out of order.
    pub fn add_supertype(&mut self, decl: DeclId, supertype: TypeId) {
        self.project.decls[decl.index()].supertypes.push(supertype);
    }

    pub fn add_override(&mut self, decl: DeclId, overridden: DeclId) {
        self.project.decls[decl.index()].overrides.push(overridden);
    }

    pub fn add_param(&mut self, decl: DeclId, name: &str, ty: TypeId) {
        self.project.decls[decl.index()].params.push(ValueParam {
            name: name.to_string(),
            ty,
        });
    }

    pub fn add_bound(&mut self, decl: DeclId, bound: TypeId) {
        self.project.decls[decl.index()].bounds.push(bound);
    }

    pub fn set_type(&mut self, decl: DeclId, ty: TypeId) {
        self.project.decls[decl.index()].ty = Some(ty);
    }

    /// The project under construction; reverse indexes are not built yet.
    pub fn project(&self) -> &Project {
        &self.project
    }

    // -------------------------------------------------------------------------
    // Types
    // -------------------------------------------------------------------------

    pub fn types(&mut self) -> &mut TypeInterner {
        &mut self.project.types
    }

    pub fn any_type(&self) -> TypeId {
        TypeInterner::ANY
    }

    pub fn nullable_any_type(&self) -> TypeId {
        TypeInterner::NULLABLE_ANY
    }

    pub fn class_type(&mut self, class: DeclId) -> TypeId {
        self.project.types.class_type(class)
    }

    pub fn param_type(&mut self, param: DeclId) -> TypeId {
        self.project.types.param_type(param)
    }

    pub fn generic_type(&mut self, class: DeclId, args: Vec<TypeArg>) -> TypeId {
        self.project.types.intern(TypeData::Class {
            class,
            args,
            nullable: false,
        })
    }

    pub fn nullable(&mut self, ty: TypeId) -> TypeId {
        self.project.types.nullable(ty)
    }

    // -------------------------------------------------------------------------
    // References
    // -------------------------------------------------------------------------

    /// A code reference from inside `owner` to `target`.
    pub fn reference(&mut self, owner: DeclId, target: DeclId) -> RefId {
        self.reference_with_flags(owner, target, RefFlags::empty())
    }

    pub fn reference_with_flags(&mut self, owner: DeclId, target: DeclId, flags: RefFlags) -> RefId {
        let file = self.file_of(owner);
        self.add_reference(file, Some(owner), Some(target), flags)
    }

    /// A reference at file level, outside any declaration (e.g. an import).
    pub fn file_reference(&mut self, file: FileId, target: Option<DeclId>, flags: RefFlags) -> RefId {
        self.add_reference(file, None, target, flags)
    }

    /// A reference inside `owner` that resolves to nothing.
    pub fn unresolved_reference(&mut self, owner: DeclId, text: &str) -> RefId {
        let file = self.file_of(owner);
        let id = self.add_reference(file, Some(owner), None, RefFlags::empty());
        self.project.references[id.index()].text = text.to_string();
        id
    }

    pub fn add_reference(
        &mut self,
        file: FileId,
        owner: Option<DeclId>,
        target: Option<DeclId>,
        flags: RefFlags,
    ) -> RefId {
        let text = target
            .map(|t| self.project.decls[t.index()].name.clone())
            .unwrap_or_default();
        self.next_offset += 1;
        self.project.references.push(Reference {
            file,
            owner,
            target,
            text,
            offset: self.next_offset,
            flags,
        });
        RefId(self.project.references.len() as u32 - 1)
    }

    pub fn file_of(&self, decl: DeclId) -> FileId {
        let mut current = decl;
        loop {
            match self.project.decls[current.index()].parent {
                Parent::File(file) => return file,
                Parent::Decl(parent) => current = parent,
            }
        }
    }

    pub fn finish(mut self) -> Project {
        self.project.index();
        self.project
    }
}

/// Fluent builder for one declaration; `build` adds it to its parent.
pub struct DeclBuilder<'a> {
    builder: &'a mut ProjectBuilder,
    decl: Declaration,
}

impl DeclBuilder<'_> {
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.decl.visibility = visibility;
        self
    }

    pub fn private(self) -> Self {
        self.visibility(Visibility::Private)
    }

    pub fn protected(self) -> Self {
        self.visibility(Visibility::Protected)
    }

    pub fn internal(self) -> Self {
        self.visibility(Visibility::Internal)
    }

    pub fn modality(mut self, modality: Modality) -> Self {
        self.decl.modality = modality;
        self
    }

    pub fn sealed(self) -> Self {
        self.modality(Modality::Sealed)
    }

    pub fn open(self) -> Self {
        self.modality(Modality::Open)
    }

    /// Written in the host language.
    pub fn host(mut self) -> Self {
        self.decl.language = Language::Host;
        self
    }

    pub fn flags(mut self, flags: DeclFlags) -> Self {
        self.decl.flags |= flags;
        self
    }

    pub fn companion(self) -> Self {
        self.flags(DeclFlags::COMPANION)
    }

    pub fn supertype(mut self, ty: TypeId) -> Self {
        self.decl.supertypes.push(ty);
        self
    }

    /// Add `class` (non-generic) as a supertype.
    pub fn extends(self, class: DeclId) -> Self {
        let ty = self.builder.project.types.class_type(class);
        self.supertype(ty)
    }

    pub fn overrides(mut self, member: DeclId) -> Self {
        self.decl.overrides.push(member);
        self
    }

    pub fn param(mut self, name: &str, ty: TypeId) -> Self {
        self.decl.params.push(ValueParam {
            name: name.to_string(),
            ty,
        });
        self
    }

    pub fn ty(mut self, ty: TypeId) -> Self {
        self.decl.ty = Some(ty);
        self
    }

    pub fn bound(mut self, ty: TypeId) -> Self {
        self.decl.bounds.push(ty);
        self
    }

    pub fn build(self) -> DeclId {
        let project = &mut self.builder.project;
        let id = DeclId(project.decls.len() as u32);
        match self.decl.parent {
            Parent::File(file) => project.files[file.index()].declarations.push(id),
            Parent::Decl(parent) => project.decls[parent.index()].members.push(id),
        }
        project.decls.push(self.decl);
        id
    }
}
