//! Declarations viewed as they would be after the move.

use movecheck_model::{
    Container, DeclId, DeclKind, FileId, FqName, ModuleId, Project, Visibility,
};

/// A declaration with an optional visibility and container override.
///
/// Identity stays the original declaration's; only the overridden
/// properties differ. Everything derived from the container (file, module,
/// package, containing class) follows the override.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictedDecl {
    decl: DeclId,
    visibility: Option<Visibility>,
    container: Option<Container>,
}

impl PredictedDecl {
    /// The declaration as it is today.
    pub fn original(decl: DeclId) -> Self {
        Self {
            decl,
            visibility: None,
            container: None,
        }
    }

    pub fn with_visibility(mut self, visibility: Option<Visibility>) -> Self {
        if visibility.is_some() {
            self.visibility = visibility;
        }
        self
    }

    /// The declaration moved into `container`.
    ///
    /// `visibility` overrides the declared one when given. A protected
    /// declaration landing directly in a package has no class to be protected
    /// in and becomes public. Returns `None` for declarations that cannot be
    /// relocated on their own (type aliases, type parameters).
    pub fn moved_to(
        project: &Project,
        decl: DeclId,
        container: Container,
        visibility: Option<Visibility>,
    ) -> Option<Self> {
        let data = project.decl(decl);
        if !data.kind.is_class_like() && !data.kind.is_callable() {
            return None;
        }
        let mut visibility = visibility.unwrap_or(data.visibility);
        if visibility == Visibility::Protected && container.is_package() {
            visibility = Visibility::Public;
        }
        Some(Self {
            decl,
            visibility: Some(visibility),
            container: Some(container),
        })
    }

    pub fn decl(&self) -> DeclId {
        self.decl
    }

    pub fn is_relocated(&self) -> bool {
        self.container.is_some()
    }

    pub fn visibility(&self, project: &Project) -> Visibility {
        self.visibility
            .unwrap_or_else(|| project.decl(self.decl).visibility)
    }

    pub fn container(&self, project: &Project) -> Container {
        self.container
            .clone()
            .unwrap_or_else(|| project.container(self.decl))
    }

    pub fn file(&self, project: &Project) -> Option<FileId> {
        match &self.container {
            None => project.file_of_decl(self.decl),
            Some(Container::Decl(owner)) => project.file_of_decl(*owner),
            Some(Container::Package(fragment)) => fragment.file,
        }
    }

    pub fn module(&self, project: &Project) -> Option<ModuleId> {
        match &self.container {
            None => project.module_of_decl(self.decl),
            Some(Container::Decl(owner)) => project.module_of_decl(*owner),
            Some(Container::Package(fragment)) => fragment.module,
        }
    }

    pub fn package(&self, project: &Project) -> Option<FqName> {
        match &self.container {
            None => project.package_of_decl(self.decl).cloned(),
            Some(Container::Decl(owner)) => project.package_of_decl(*owner).cloned(),
            Some(Container::Package(fragment)) => Some(fragment.fq_name.clone()),
        }
    }

    /// Innermost class-like declaration containing this one.
    pub fn containing_class(&self, project: &Project) -> Option<DeclId> {
        match self.container(project) {
            Container::Package(_) => None,
            Container::Decl(owner) if project.decl(owner).kind.is_class_like() => Some(owner),
            Container::Decl(owner) => project.containing_class(owner),
        }
    }

    pub fn is_constructor(&self, project: &Project) -> bool {
        project.decl(self.decl).kind == DeclKind::Constructor
    }
}
