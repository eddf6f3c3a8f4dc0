//! The frozen semantic model of a project.
//!
//! `Project` owns flat arenas for every entity and answers the structural
//! queries the checkers need: physical ancestry, semantic containers,
//! qualified names, supertypes and package membership. It never changes
//! while a check runs.

use crate::decl::{Container, DeclFlags, DeclKind, Declaration, PackageFragment, Parent, Visibility};
use crate::element::Element;
use crate::ids::{DeclId, DirId, FileId, LibraryId, ModuleId, RefId, SdkId};
use crate::module::{Directory, Library, Module, Sdk, SourceFile, SourceRoot};
use crate::names::FqName;
use crate::reference::Reference;
use crate::types::{TypeData, TypeInterner};
use movecheck_common::limits::MAX_CONTAINER_CHAIN_LENGTH;
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Clone, Debug, Default)]
pub struct Project {
    pub(crate) modules: Vec<Module>,
    pub(crate) libraries: Vec<Library>,
    pub(crate) sdks: Vec<Sdk>,
    pub(crate) directories: Vec<Directory>,
    pub(crate) files: Vec<SourceFile>,
    pub(crate) decls: Vec<Declaration>,
    pub(crate) references: Vec<Reference>,
    pub types: TypeInterner,
    /// Reverse index: declaration -> references resolving to it.
    pub(crate) references_by_target: FxHashMap<DeclId, Vec<RefId>>,
    /// Reverse index: class -> classes listing it as a direct supertype.
    pub(crate) inheritors: FxHashMap<DeclId, Vec<DeclId>>,
}

impl Project {
    /// Build the reverse indexes. Called once by the builder.
    pub(crate) fn index(&mut self) {
        self.references_by_target.clear();
        for (i, reference) in self.references.iter().enumerate() {
            if let Some(target) = reference.target {
                self.references_by_target
                    .entry(target)
                    .or_default()
                    .push(RefId(i as u32));
            }
        }

        self.inheritors.clear();
        for i in 0..self.decls.len() {
            let id = DeclId(i as u32);
            for parent in self.supertype_decls(id) {
                let entry = self.inheritors.entry(parent).or_default();
                if !entry.contains(&id) {
                    entry.push(id);
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Arena access
    // -------------------------------------------------------------------------

    pub fn decl(&self, id: DeclId) -> &Declaration {
        &self.decls[id.index()]
    }

    pub fn reference(&self, id: RefId) -> &Reference {
        &self.references[id.index()]
    }

    pub fn file(&self, id: FileId) -> &SourceFile {
        &self.files[id.index()]
    }

    pub fn directory(&self, id: DirId) -> &Directory {
        &self.directories[id.index()]
    }

    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    pub fn library(&self, id: LibraryId) -> &Library {
        &self.libraries[id.index()]
    }

    pub fn sdk(&self, id: SdkId) -> &Sdk {
        &self.sdks[id.index()]
    }

    pub fn decl_ids(&self) -> impl Iterator<Item = DeclId> + '_ {
        (0..self.decls.len() as u32).map(DeclId)
    }

    pub fn reference_ids(&self) -> impl Iterator<Item = RefId> + '_ {
        (0..self.references.len() as u32).map(RefId)
    }

    pub fn file_ids(&self) -> impl Iterator<Item = FileId> + '_ {
        (0..self.files.len() as u32).map(FileId)
    }

    pub fn directory_ids(&self) -> impl Iterator<Item = DirId> + '_ {
        (0..self.directories.len() as u32).map(DirId)
    }

    pub fn module_ids(&self) -> impl Iterator<Item = ModuleId> + '_ {
        (0..self.modules.len() as u32).map(ModuleId)
    }

    pub fn module_by_name(&self, name: &str) -> Option<ModuleId> {
        self.module_ids().find(|&id| self.module(id).name == name)
    }

    /// First declaration whose qualified name is `fq_name`.
    pub fn find_decl(&self, fq_name: &str) -> Option<DeclId> {
        self.decl_ids().find(|&id| self.fq_name(id).as_str() == fq_name)
    }

    pub fn file_path(&self, id: FileId) -> String {
        let file = self.file(id);
        let dir = self.directory(file.directory);
        if dir.path.is_empty() {
            file.name.clone()
        } else {
            format!("{}/{}", dir.path.trim_end_matches('/'), file.name)
        }
    }

    // -------------------------------------------------------------------------
    // Physical structure
    // -------------------------------------------------------------------------

    pub fn file_of_decl(&self, id: DeclId) -> Option<FileId> {
        let mut current = id;
        for _ in 0..MAX_CONTAINER_CHAIN_LENGTH {
            match self.decl(current).parent {
                Parent::File(file) => return Some(file),
                Parent::Decl(parent) => current = parent,
            }
        }
        None
    }

    pub fn file_of_element(&self, element: Element) -> Option<FileId> {
        match element {
            Element::Decl(id) => self.file_of_decl(id),
            Element::Reference(id) => Some(self.reference(id).file),
            Element::File(id) => Some(id),
        }
    }

    pub fn parent_element(&self, element: Element) -> Option<Element> {
        match element {
            Element::Decl(id) => Some(match self.decl(id).parent {
                Parent::File(file) => Element::File(file),
                Parent::Decl(parent) => Element::Decl(parent),
            }),
            Element::Reference(id) => {
                let reference = self.reference(id);
                Some(match reference.owner {
                    Some(owner) => Element::Decl(owner),
                    None => Element::File(reference.file),
                })
            }
            Element::File(_) => None,
        }
    }

    /// Non-strict physical containment: `element` is `ancestor` or lies inside it.
    pub fn is_ancestor(&self, ancestor: Element, element: Element) -> bool {
        let mut current = Some(element);
        let mut steps = 0;
        while let Some(e) = current {
            if e == ancestor {
                return true;
            }
            steps += 1;
            if steps > MAX_CONTAINER_CHAIN_LENGTH {
                return false;
            }
            current = self.parent_element(e);
        }
        false
    }

    /// All references lexically inside `id`, including nested declarations.
    pub fn references_within(&self, id: DeclId) -> Vec<RefId> {
        let scope = Element::Decl(id);
        self.reference_ids()
            .filter(|&r| self.is_ancestor(scope, Element::Reference(r)))
            .collect()
    }

    pub fn references_to(&self, id: DeclId) -> &[RefId] {
        self.references_by_target
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // -------------------------------------------------------------------------
    // Source roots and modules
    // -------------------------------------------------------------------------

    pub fn root_of_file(&self, id: FileId) -> SourceRoot {
        self.directory(self.file(id).directory).root
    }

    pub fn root_of_decl(&self, id: DeclId) -> Option<SourceRoot> {
        self.file_of_decl(id).map(|file| self.root_of_file(file))
    }

    pub fn module_of_file(&self, id: FileId) -> Option<ModuleId> {
        self.root_of_file(id).module()
    }

    pub fn module_of_decl(&self, id: DeclId) -> Option<ModuleId> {
        self.root_of_decl(id).and_then(SourceRoot::module)
    }

    pub fn module_of_element(&self, element: Element) -> Option<ModuleId> {
        self.file_of_element(element)
            .and_then(|file| self.module_of_file(file))
    }

    pub fn is_test_file(&self, id: FileId) -> bool {
        self.root_of_file(id).is_test()
    }

    /// Whether the declaration belongs to project sources (not a library or SDK).
    pub fn is_in_project(&self, id: DeclId) -> bool {
        self.root_of_decl(id).is_some_and(SourceRoot::is_project)
    }

    // -------------------------------------------------------------------------
    // Semantic containers and names
    // -------------------------------------------------------------------------

    pub fn package_of_file(&self, id: FileId) -> &FqName {
        &self.file(id).package
    }

    pub fn package_of_decl(&self, id: DeclId) -> Option<&FqName> {
        self.file_of_decl(id).map(|file| self.package_of_file(file))
    }

    /// The package fragment a file contributes to its module.
    pub fn fragment_of_file(&self, id: FileId) -> PackageFragment {
        PackageFragment {
            module: self.module_of_file(id),
            fq_name: self.package_of_file(id).clone(),
            file: Some(id),
        }
    }

    pub fn container(&self, id: DeclId) -> Container {
        match self.decl(id).parent {
            Parent::Decl(parent) => Container::Decl(parent),
            Parent::File(file) => Container::Package(self.fragment_of_file(file)),
        }
    }

    /// Semantic containers of `id`, innermost first, ending with its package.
    pub fn containers(&self, id: DeclId) -> Vec<Container> {
        let mut result = Vec::new();
        let mut current = self.container(id);
        loop {
            let next = current.as_decl().map(|decl| self.container(decl));
            result.push(current);
            match next {
                Some(next) if result.len() < MAX_CONTAINER_CHAIN_LENGTH => current = next,
                _ => break,
            }
        }
        result
    }

    /// Innermost class-like declaration strictly containing `id`.
    pub fn containing_class(&self, id: DeclId) -> Option<DeclId> {
        self.containers(id)
            .into_iter()
            .filter_map(|c| c.as_decl())
            .find(|&decl| self.decl(decl).kind.is_class_like())
    }

    pub fn fq_name(&self, id: DeclId) -> FqName {
        let mut names = vec![self.decl(id).name.as_str()];
        let mut package = FqName::ROOT;
        for container in self.containers(id) {
            match container {
                Container::Decl(decl) => names.push(self.decl(decl).name.as_str()),
                Container::Package(fragment) => package = fragment.fq_name,
            }
        }
        names
            .into_iter()
            .rev()
            .fold(package, |fq, name| fq.child(name))
    }

    pub fn container_fq_name(&self, container: &Container) -> FqName {
        match container {
            Container::Decl(decl) => self.fq_name(*decl),
            Container::Package(fragment) => fragment.fq_name.clone(),
        }
    }

    /// The declaration an import directive would name for `id`.
    pub fn importable_decl(&self, id: DeclId) -> DeclId {
        match self.decl(id).kind {
            DeclKind::Constructor => match self.decl(id).parent {
                Parent::Decl(class) => class,
                Parent::File(_) => id,
            },
            _ => id,
        }
    }

    /// Qualified name usable in an import directive, if the declaration can be imported.
    pub fn importable_fq_name(&self, id: DeclId) -> Option<FqName> {
        let importable = self.importable_decl(id);
        let decl = self.decl(importable);
        if decl.kind == DeclKind::TypeParameter {
            return None;
        }
        let importable_here = match self.container(importable) {
            Container::Package(_) => true,
            Container::Decl(owner) => {
                decl.kind.is_class_like()
                    || decl.kind == DeclKind::TypeAlias
                    || self.decl(owner).kind == DeclKind::Object
            }
        };
        importable_here.then(|| self.fq_name(importable))
    }

    // -------------------------------------------------------------------------
    // Class hierarchy
    // -------------------------------------------------------------------------

    /// Classifier declarations of the declared supertypes, superclass first.
    pub fn supertype_decls(&self, id: DeclId) -> Vec<DeclId> {
        self.decl(id)
            .supertypes
            .iter()
            .filter_map(|&ty| match self.types.get(ty) {
                TypeData::Class { class, .. } => Some(*class),
                TypeData::Any { .. } | TypeData::Param { .. } => None,
            })
            .collect()
    }

    pub fn superclass_not_any(&self, id: DeclId) -> Option<DeclId> {
        self.supertype_decls(id)
            .into_iter()
            .find(|&parent| self.decl(parent).kind == DeclKind::Class)
    }

    pub fn super_interfaces(&self, id: DeclId) -> Vec<DeclId> {
        self.supertype_decls(id)
            .into_iter()
            .filter(|&parent| self.decl(parent).kind == DeclKind::Interface)
            .collect()
    }

    /// Non-strict subclass test through all supertype links.
    pub fn is_subclass_of(&self, sub: DeclId, sup: DeclId) -> bool {
        let mut visited = FxHashSet::default();
        let mut worklist = vec![sub];
        while let Some(current) = worklist.pop() {
            if current == sup {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            worklist.extend(self.supertype_decls(current));
        }
        false
    }

    pub fn direct_inheritors(&self, id: DeclId) -> &[DeclId] {
        self.inheritors.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn constructors(&self, class: DeclId) -> Vec<DeclId> {
        self.decl(class)
            .members
            .iter()
            .copied()
            .filter(|&m| self.decl(m).kind == DeclKind::Constructor)
            .collect()
    }

    pub fn primary_constructor(&self, class: DeclId) -> Option<DeclId> {
        self.constructors(class).into_iter().find(|&c| {
            self.decl(c).flags.contains(DeclFlags::PRIMARY_CONSTRUCTOR)
        })
    }

    /// Roots of the override chains above `id`; empty when it overrides nothing.
    pub fn deepest_overridden(&self, id: DeclId) -> Vec<DeclId> {
        let mut result = Vec::new();
        let mut visited = FxHashSet::default();
        let mut worklist: Vec<DeclId> = self.decl(id).overrides.iter().copied().collect();
        while let Some(current) = worklist.pop() {
            if !visited.insert(current) {
                continue;
            }
            let overrides = &self.decl(current).overrides;
            if overrides.is_empty() {
                if !result.contains(&current) {
                    result.push(current);
                }
            } else {
                worklist.extend(overrides.iter().copied());
            }
        }
        result
    }

    /// Own members plus non-private members inherited from supertypes.
    pub fn class_member_scope(&self, class: DeclId) -> Vec<DeclId> {
        let mut result = Vec::new();
        let mut visited = FxHashSet::default();
        let mut worklist = vec![(class, true)];
        while let Some((current, own)) = worklist.pop() {
            if !visited.insert(current) {
                continue;
            }
            for &member in &self.decl(current).members {
                let decl = self.decl(member);
                if decl.kind == DeclKind::Constructor {
                    continue;
                }
                if !own && decl.visibility == Visibility::Private {
                    continue;
                }
                result.push(member);
            }
            for parent in self.supertype_decls(current).into_iter().rev() {
                worklist.push((parent, false));
            }
        }
        result
    }

    // -------------------------------------------------------------------------
    // Packages
    // -------------------------------------------------------------------------

    /// The package `fq_name` as visible in `module`'s own sources, if it exists there.
    pub fn find_package(&self, fq_name: &FqName, module: ModuleId) -> Option<FqName> {
        let in_module = |root: SourceRoot| root.module() == Some(module);
        let by_directory = self
            .directories
            .iter()
            .any(|dir| in_module(dir.root) && dir.package == *fq_name);
        let by_file = self
            .file_ids()
            .any(|file| in_module(self.root_of_file(file)) && self.package_of_file(file) == fq_name);
        (by_directory || by_file).then(|| fq_name.clone())
    }

    /// Top-level declarations of package `fq_name` visible from `module`.
    ///
    /// Without a module (library fragments) every file of the package counts.
    pub fn package_members(&self, fq_name: &FqName, module: Option<ModuleId>) -> Vec<DeclId> {
        let scope = module.map(|m| self.module_scope(m));
        self.file_ids()
            .filter(|&file| self.package_of_file(file) == fq_name)
            .filter(|&file| {
                scope
                    .as_ref()
                    .is_none_or(|scope| scope.contains(self.root_of_file(file)))
            })
            .flat_map(|file| self.file(file).declarations.iter().copied())
            .collect()
    }
}
