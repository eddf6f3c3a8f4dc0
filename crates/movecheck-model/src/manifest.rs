//! JSON project manifests (`movecheck.json`).
//!
//! A manifest describes a whole project: SDKs, libraries, modules, source
//! directories, files with nested declarations, and references between
//! declarations. Declarations are addressed by qualified name (`a.A.f`) or
//! by an explicit `id` when qualified names are ambiguous (overloads).
//!
//! Type references use a small grammar:
//!
//! ```text
//! type  := name args? '?'?
//! args  := '<' arg (',' arg)* '>'
//! arg   := '*' | ('out' | 'in')? type
//! ```
//!
//! where `name` is `Any`, the name of a type parameter in lexical scope, or a
//! declaration key.

use crate::builder::ProjectBuilder;
use crate::decl::{DeclFlags, DeclKind, Language, Modality, Parent, Visibility};
use crate::element::Element;
use crate::ids::{DeclId, DirId, FileId, LibraryId, ModuleId, SdkId, TypeId};
use crate::module::{Platform, SdkKind, SourceRoot};
use crate::names::FqName;
use crate::project::Project;
use crate::reference::RefFlags;
use crate::target::MoveTarget;
use crate::types::{TypeArg, TypeData, TypeInterner, Variance};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Errors
// =============================================================================

/// A manifest that parses as JSON but does not describe a consistent project.
#[derive(Debug)]
pub enum ManifestError {
    Json(serde_json::Error),
    UnknownModule(String),
    UnknownLibrary(String),
    UnknownSdk(String),
    UnknownDirectory(String),
    UnknownFile(String),
    UnknownDeclaration(String),
    /// A directory must belong to exactly one module, library or SDK.
    AmbiguousRoot(String),
    InvalidType { text: String, reason: String },
    /// A member nested under a declaration that cannot own it.
    InvalidParent(String),
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Json(err) => write!(f, "invalid manifest JSON: {err}"),
            ManifestError::UnknownModule(name) => write!(f, "unknown module '{name}'"),
            ManifestError::UnknownLibrary(name) => write!(f, "unknown library '{name}'"),
            ManifestError::UnknownSdk(name) => write!(f, "unknown SDK '{name}'"),
            ManifestError::UnknownDirectory(path) => write!(f, "unknown directory '{path}'"),
            ManifestError::UnknownFile(path) => write!(f, "unknown file '{path}'"),
            ManifestError::UnknownDeclaration(key) => write!(f, "unknown declaration '{key}'"),
            ManifestError::AmbiguousRoot(path) => write!(
                f,
                "directory '{path}' must name exactly one of module, library or sdk"
            ),
            ManifestError::InvalidType { text, reason } => {
                write!(f, "invalid type '{text}': {reason}")
            }
            ManifestError::InvalidParent(key) => {
                write!(f, "declaration '{key}' cannot contain members of this kind")
            }
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManifestError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ManifestError {
    fn from(value: serde_json::Error) -> Self {
        ManifestError::Json(value)
    }
}

// =============================================================================
// Manifest Schema
// =============================================================================

/// Language feature switches that change checker behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSettings {
    /// Sealed inheritors may live in other files of the same package and module.
    #[serde(default = "default_true")]
    pub sealed_inheritors_in_same_package: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            sealed_inheritors_in_same_package: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectManifest {
    #[serde(default)]
    pub settings: LanguageSettings,
    #[serde(default)]
    pub sdks: Vec<SdkSpec>,
    #[serde(default)]
    pub libraries: Vec<LibrarySpec>,
    #[serde(default)]
    pub modules: Vec<ModuleSpec>,
    #[serde(default)]
    pub directories: Vec<DirectorySpec>,
    #[serde(default)]
    pub files: Vec<FileSpec>,
    #[serde(default)]
    pub references: Vec<ReferenceSpec>,
    #[serde(default, rename = "move", skip_serializing_if = "Option::is_none")]
    pub move_request: Option<MoveRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkSpec {
    pub name: String,
    pub kind: SdkKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySpec {
    pub name: String,
    pub platform: Platform,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSpec {
    pub name: String,
    pub platform: Platform,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub libraries: Vec<String>,
    #[serde(default)]
    pub sdks: Vec<String>,
    /// Common modules this module provides actuals for.
    #[serde(default)]
    pub implements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySpec {
    pub path: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub test: bool,
    #[serde(default)]
    pub library: Option<String>,
    #[serde(default)]
    pub sdk: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSpec {
    pub directory: String,
    pub name: String,
    /// Defaults to the directory's package.
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub declarations: Vec<DeclSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclSpec {
    #[serde(default)]
    pub id: Option<String>,
    pub kind: DeclKind,
    /// Constructors default to the name of their class.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub modality: Option<Modality>,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub companion: bool,
    #[serde(default)]
    pub expect: bool,
    #[serde(default)]
    pub actual: bool,
    #[serde(default)]
    pub optional_expectation: bool,
    #[serde(default)]
    pub builtin: bool,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default)]
    pub overrides: Vec<String>,
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
    #[serde(default)]
    pub bounds: Vec<String>,
    #[serde(default)]
    pub members: Vec<DeclSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceSpec {
    /// Declaration containing the reference.
    #[serde(default)]
    pub from: Option<String>,
    /// File containing a file-level reference (imports) when `from` is absent.
    #[serde(default)]
    pub file: Option<String>,
    /// Resolved target; absent for unresolved references.
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub in_import: bool,
    #[serde(default)]
    pub in_supertype_list: bool,
    #[serde(default)]
    pub non_code: bool,
}

/// A move to check: what moves and where it goes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    #[serde(default)]
    pub declarations: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
    pub target: TargetSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetSpec {
    ExistingDecl(String),
    ExistingFile(String),
    Directory {
        path: String,
        #[serde(default)]
        package: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    DeferredFile {
        directory: String,
        #[serde(default)]
        package: Option<String>,
        file_name: String,
    },
}

// =============================================================================
// Loading
// =============================================================================

impl ProjectManifest {
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn build_project(&self) -> Result<Project, ManifestError> {
        ManifestLoader::default().load(self)
    }
}

#[derive(Default)]
struct ManifestLoader {
    builder: ProjectBuilder,
    sdks: FxHashMap<String, SdkId>,
    libraries: FxHashMap<String, LibraryId>,
    modules: FxHashMap<String, ModuleId>,
    directories: FxHashMap<String, DirId>,
    /// Explicit `id`s and qualified names; the first declaration wins.
    decls: FxHashMap<String, DeclId>,
    /// Declarations awaiting type and override resolution.
    pending: Vec<(DeclId, DeclSpec)>,
}

impl ManifestLoader {
    fn load(mut self, manifest: &ProjectManifest) -> Result<Project, ManifestError> {
        for sdk in &manifest.sdks {
            let id = self.builder.sdk(&sdk.name, sdk.kind);
            self.sdks.insert(sdk.name.clone(), id);
        }
        for library in &manifest.libraries {
            let id = self.builder.library(&library.name, library.platform);
            self.libraries.insert(library.name.clone(), id);
        }
        for module in &manifest.modules {
            let id = self.builder.module(&module.name, module.platform);
            self.modules.insert(module.name.clone(), id);
        }
        for spec in &manifest.modules {
            let module = self.module(&spec.name)?;
            for dep in &spec.dependencies {
                let dep = self.module(dep)?;
                self.builder.add_dependency(module, dep);
            }
            for library in &spec.libraries {
                let library = lookup(&self.libraries, library, ManifestError::UnknownLibrary)?;
                self.builder.add_library(module, library);
            }
            for sdk in &spec.sdks {
                let sdk = lookup(&self.sdks, sdk, ManifestError::UnknownSdk)?;
                self.builder.add_sdk(module, sdk);
            }
            for common in &spec.implements {
                let common = self.module(common)?;
                self.builder.add_implemented_module(module, common);
            }
        }
        for dir in &manifest.directories {
            let root = self.root_of(dir)?;
            let id = self.builder.directory(&dir.path, root, &dir.package);
            self.directories.insert(dir.path.clone(), id);
        }

        for file in &manifest.files {
            let dir = lookup(&self.directories, &file.directory, ManifestError::UnknownDirectory)?;
            let file_id = match &file.package {
                Some(package) => {
                    self.builder
                        .file_with_package(dir, &file.name, FqName::new(package.as_str()))
                }
                None => self.builder.file(dir, &file.name),
            };
            for decl in &file.declarations {
                self.add_decl(Parent::File(file_id), decl)?;
            }
        }

        for (decl, spec) in std::mem::take(&mut self.pending) {
            self.resolve_signature(decl, &spec)?;
        }

        for reference in &manifest.references {
            self.add_reference(reference)?;
        }

        tracing::debug!(
            modules = manifest.modules.len(),
            files = manifest.files.len(),
            references = manifest.references.len(),
            "loaded project manifest"
        );
        Ok(self.builder.finish())
    }

    fn module(&self, name: &str) -> Result<ModuleId, ManifestError> {
        lookup(&self.modules, name, ManifestError::UnknownModule)
    }

    fn root_of(&self, dir: &DirectorySpec) -> Result<SourceRoot, ManifestError> {
        match (&dir.module, &dir.library, &dir.sdk) {
            (Some(module), None, None) => Ok(SourceRoot::Module {
                module: self.module(module)?,
                test: dir.test,
            }),
            (None, Some(library), None) => Ok(SourceRoot::Library(lookup(
                &self.libraries,
                library,
                ManifestError::UnknownLibrary,
            )?)),
            (None, None, Some(sdk)) => Ok(SourceRoot::Sdk(lookup(
                &self.sdks,
                sdk,
                ManifestError::UnknownSdk,
            )?)),
            _ => Err(ManifestError::AmbiguousRoot(dir.path.clone())),
        }
    }

    fn add_decl(&mut self, parent: Parent, spec: &DeclSpec) -> Result<DeclId, ManifestError> {
        if let Parent::Decl(owner) = parent {
            let owner_kind = self.builder.project().decl(owner).kind;
            let allowed = owner_kind.is_class_like()
                || spec.kind == DeclKind::TypeParameter
                || owner_kind.is_callable();
            if !allowed {
                return Err(ManifestError::InvalidParent(spec.name.clone()));
            }
        }

        let name = match (spec.kind, parent) {
            (DeclKind::Constructor, Parent::Decl(class)) if spec.name.is_empty() => {
                self.builder.project().decl(class).name.clone()
            }
            _ => spec.name.clone(),
        };

        let mut flags = DeclFlags::empty();
        flags.set(DeclFlags::COMPANION, spec.companion);
        flags.set(DeclFlags::EXPECT, spec.expect);
        flags.set(DeclFlags::ACTUAL, spec.actual);
        flags.set(DeclFlags::OPTIONAL_EXPECTATION, spec.optional_expectation);
        flags.set(DeclFlags::BUILTIN, spec.builtin);
        flags.set(DeclFlags::PRIMARY_CONSTRUCTOR, spec.primary);

        let mut builder = self.builder.decl(parent, spec.kind, &name).flags(flags);
        if let Some(visibility) = spec.visibility {
            builder = builder.visibility(visibility);
        }
        if let Some(modality) = spec.modality {
            builder = builder.modality(modality);
        }
        if spec.language == Some(Language::Host) {
            builder = builder.host();
        }
        let id = builder.build();

        let fq_name = self.builder.project().fq_name(id);
        self.decls.entry(fq_name.to_string()).or_insert(id);
        if let Some(key) = &spec.id {
            self.decls.insert(key.clone(), id);
        }

        for member in &spec.members {
            self.add_decl(Parent::Decl(id), member)?;
        }
        self.pending.push((id, spec.clone()));
        Ok(id)
    }

    fn resolve_signature(&mut self, decl: DeclId, spec: &DeclSpec) -> Result<(), ManifestError> {
        for text in &spec.supertypes {
            let ty = self.resolve_type(decl, text)?;
            self.builder.add_supertype(decl, ty);
        }
        for key in &spec.overrides {
            let overridden = self.decl(key)?;
            self.builder.add_override(decl, overridden);
        }
        for param in &spec.params {
            let ty = self.resolve_type(decl, &param.ty)?;
            self.builder.add_param(decl, &param.name, ty);
        }
        if let Some(text) = &spec.ty {
            let ty = self.resolve_type(decl, text)?;
            self.builder.set_type(decl, ty);
        }
        for text in &spec.bounds {
            let ty = self.resolve_type(decl, text)?;
            self.builder.add_bound(decl, ty);
        }
        Ok(())
    }

    fn add_reference(&mut self, spec: &ReferenceSpec) -> Result<(), ManifestError> {
        let mut flags = RefFlags::empty();
        flags.set(RefFlags::IN_IMPORT, spec.in_import);
        flags.set(RefFlags::IN_SUPERTYPE_LIST, spec.in_supertype_list);
        flags.set(RefFlags::NON_CODE, spec.non_code);

        let target = spec.to.as_deref().map(|key| self.decl(key)).transpose()?;
        match (&spec.from, target) {
            (Some(from), Some(target)) => {
                let owner = self.decl(from)?;
                self.builder.reference_with_flags(owner, target, flags);
            }
            (Some(from), None) => {
                let owner = self.decl(from)?;
                self.builder.unresolved_reference(owner, "");
            }
            (None, target) => {
                let path = spec.file.as_deref().unwrap_or_default();
                let file = find_file(self.builder.project(), path)?;
                self.builder.file_reference(file, target, flags);
            }
        }
        Ok(())
    }

    fn decl(&self, key: &str) -> Result<DeclId, ManifestError> {
        lookup(&self.decls, key, ManifestError::UnknownDeclaration)
    }

    // -------------------------------------------------------------------------
    // Type references
    // -------------------------------------------------------------------------

    fn resolve_type(&mut self, context: DeclId, text: &str) -> Result<TypeId, ManifestError> {
        let parsed = TypeRefParser::new(text)
            .parse()
            .map_err(|reason| ManifestError::InvalidType {
                text: text.to_string(),
                reason,
            })?;
        self.intern_type(context, text, &parsed)
    }

    fn intern_type(
        &mut self,
        context: DeclId,
        text: &str,
        parsed: &ParsedType,
    ) -> Result<TypeId, ManifestError> {
        if parsed.name == "Any" && parsed.args.is_empty() {
            return Ok(if parsed.nullable {
                TypeInterner::NULLABLE_ANY
            } else {
                TypeInterner::ANY
            });
        }

        if parsed.args.is_empty()
            && let Some(param) = self.type_parameter_in_scope(context, &parsed.name)
        {
            let ty = self.builder.param_type(param);
            return Ok(if parsed.nullable {
                self.builder.nullable(ty)
            } else {
                ty
            });
        }

        let class = self
            .decls
            .get(&parsed.name)
            .copied()
            .ok_or_else(|| ManifestError::InvalidType {
                text: text.to_string(),
                reason: format!("unknown classifier '{}'", parsed.name),
            })?;
        let mut args = Vec::with_capacity(parsed.args.len());
        for arg in &parsed.args {
            args.push(match arg {
                ParsedArg::Star => TypeArg::Star,
                ParsedArg::Type(variance, inner) => TypeArg::Type {
                    variance: *variance,
                    ty: self.intern_type(context, text, inner)?,
                },
            });
        }
        Ok(self.builder.types().intern(TypeData::Class {
            class,
            args,
            nullable: parsed.nullable,
        }))
    }

    /// Type parameter named `name` declared on `context` or a lexical container.
    fn type_parameter_in_scope(&self, context: DeclId, name: &str) -> Option<DeclId> {
        let project = self.builder.project();
        let mut current = Some(context);
        while let Some(decl) = current {
            let found = project.decl(decl).members.iter().copied().find(|&m| {
                let member = project.decl(m);
                member.kind == DeclKind::TypeParameter && member.name == name
            });
            if found.is_some() {
                return found;
            }
            current = match project.decl(decl).parent {
                Parent::Decl(parent) => Some(parent),
                Parent::File(_) => None,
            };
        }
        None
    }
}

fn lookup<T: Copy>(
    map: &FxHashMap<String, T>,
    key: &str,
    error: impl FnOnce(String) -> ManifestError,
) -> Result<T, ManifestError> {
    map.get(key).copied().ok_or_else(|| error(key.to_string()))
}

fn find_file(project: &Project, path: &str) -> Result<FileId, ManifestError> {
    project
        .file_ids()
        .find(|&file| project.file_path(file) == path)
        .ok_or_else(|| ManifestError::UnknownFile(path.to_string()))
}

fn find_directory(project: &Project, path: &str) -> Result<DirId, ManifestError> {
    project
        .directory_ids()
        .find(|&dir| project.directory(dir).path == path)
        .ok_or_else(|| ManifestError::UnknownDirectory(path.to_string()))
}

fn find_decl(project: &Project, key: &str) -> Result<DeclId, ManifestError> {
    project
        .find_decl(key)
        .ok_or_else(|| ManifestError::UnknownDeclaration(key.to_string()))
}

// =============================================================================
// Move Requests
// =============================================================================

impl MoveRequest {
    /// Resolve names against a loaded project.
    pub fn resolve(&self, project: &Project) -> Result<(Vec<Element>, MoveTarget), ManifestError> {
        let mut elements = Vec::new();
        for key in &self.declarations {
            elements.push(Element::Decl(find_decl(project, key)?));
        }
        for path in &self.files {
            elements.push(Element::File(find_file(project, path)?));
        }

        let target = match &self.target {
            TargetSpec::ExistingDecl(key) => MoveTarget::ExistingDecl(find_decl(project, key)?),
            TargetSpec::ExistingFile(path) => MoveTarget::ExistingFile(find_file(project, path)?),
            TargetSpec::Directory { path, package } => {
                let directory = find_directory(project, path)?;
                MoveTarget::Directory {
                    directory,
                    package: package_or_default(project, directory, package.as_deref()),
                }
            }
            TargetSpec::DeferredFile {
                directory,
                package,
                file_name,
            } => {
                let directory = find_directory(project, directory)?;
                MoveTarget::DeferredFile {
                    directory,
                    package: package_or_default(project, directory, package.as_deref()),
                    file_name: file_name.clone(),
                }
            }
        };
        Ok((elements, target))
    }
}

fn package_or_default(project: &Project, directory: DirId, package: Option<&str>) -> FqName {
    match package {
        Some(package) => FqName::new(package),
        None => project.directory(directory).package.clone(),
    }
}

// =============================================================================
// Type Reference Parser
// =============================================================================

#[derive(Debug, PartialEq)]
struct ParsedType {
    name: String,
    args: Vec<ParsedArg>,
    nullable: bool,
}

#[derive(Debug, PartialEq)]
enum ParsedArg {
    Star,
    Type(Variance, ParsedType),
}

struct TypeRefParser<'s> {
    text: &'s str,
    pos: usize,
}

impl<'s> TypeRefParser<'s> {
    fn new(text: &'s str) -> Self {
        Self { text, pos: 0 }
    }

    fn parse(mut self) -> Result<ParsedType, String> {
        let ty = self.parse_type()?;
        self.skip_whitespace();
        if self.pos != self.text.len() {
            return Err(format!("unexpected input at offset {}", self.pos));
        }
        Ok(ty)
    }

    fn parse_type(&mut self) -> Result<ParsedType, String> {
        self.skip_whitespace();
        let name = self.parse_name()?;
        let mut args = Vec::new();
        if self.eat('<') {
            loop {
                args.push(self.parse_arg()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(format!("expected ',' or '>' at offset {}", self.pos));
            }
        }
        let nullable = self.eat('?');
        Ok(ParsedType {
            name,
            args,
            nullable,
        })
    }

    fn parse_arg(&mut self) -> Result<ParsedArg, String> {
        if self.eat('*') {
            return Ok(ParsedArg::Star);
        }
        self.skip_whitespace();
        let rest = &self.text[self.pos..];
        let variance = if rest.starts_with("out ") {
            self.pos += 4;
            Variance::Out
        } else if rest.starts_with("in ") {
            self.pos += 3;
            Variance::In
        } else {
            Variance::Invariant
        };
        Ok(ParsedArg::Type(variance, self.parse_type()?))
    }

    fn parse_name(&mut self) -> Result<String, String> {
        let start = self.pos;
        while let Some(ch) = self.text[self.pos..].chars().next() {
            if ch.is_alphanumeric() || ch == '_' || ch == '.' || ch == '$' || ch == '#' {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(format!("expected a type name at offset {start}"));
        }
        Ok(self.text[start..self.pos].to_string())
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.text[self.pos..].starts_with(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.text[self.pos..].chars().next() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }
}

#[cfg(test)]
#[path = "tests/type_ref_tests.rs"]
mod type_ref_tests;
