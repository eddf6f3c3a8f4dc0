//! Human-readable descriptions of declarations, scopes and types.
//!
//! Conflict messages name declarations as `<kind> <name>`, with the name
//! emphasized (bold code in HTML output). Callables carry their parameter
//! types so overloads stay distinguishable.

use movecheck_model::{
    Container, DeclId, DeclKind, Element, FileId, ModuleId, Project, RefId, TypeArg, TypeData,
    TypeId, Variance,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RenderStyle {
    #[default]
    Plain,
    Html,
}

pub struct Renderer<'a> {
    project: &'a Project,
    style: RenderStyle,
}

impl<'a> Renderer<'a> {
    pub fn new(project: &'a Project, style: RenderStyle) -> Self {
        Self { project, style }
    }

    pub fn emphasize(&self, text: &str) -> String {
        match self.style {
            RenderStyle::Plain => text.to_string(),
            RenderStyle::Html => format!("<b><code>{}</code></b>", escape_html(text)),
        }
    }

    /// `function foo(Int)`, `class Bar`, ...
    pub fn decl(&self, id: DeclId) -> String {
        let kind = self.project.decl(id).kind.describe();
        format!("{kind} {}", self.emphasize(&self.signature(id)))
    }

    pub fn file(&self, id: FileId) -> String {
        format!("file {}", self.emphasize(&self.project.file(id).name))
    }

    pub fn element(&self, element: Element) -> String {
        match element {
            Element::Decl(id) => self.decl(id),
            Element::File(id) => self.file(id),
            Element::Reference(id) => self.usage_context(id),
        }
    }

    /// The declaration containing a reference, or its file for top-level code.
    pub fn usage_context(&self, reference: RefId) -> String {
        let reference = self.project.reference(reference);
        match reference.owner {
            Some(owner) => self.decl(owner),
            None => self.file(reference.file),
        }
    }

    pub fn container(&self, container: &Container) -> String {
        match container {
            Container::Decl(id) => self.decl(*id),
            Container::Package(fragment) => {
                let name = if fragment.fq_name.is_root() {
                    "<root>"
                } else {
                    fragment.fq_name.as_str()
                };
                format!("package {}", self.emphasize(name))
            }
        }
    }

    pub fn module(&self, id: ModuleId) -> String {
        self.emphasize(&self.project.module(id).name)
    }

    /// Short name, with parameter types for functions and constructors.
    pub fn signature(&self, id: DeclId) -> String {
        let decl = self.project.decl(id);
        match decl.kind {
            DeclKind::Function | DeclKind::Constructor => {
                let params: Vec<String> = decl
                    .params
                    .iter()
                    .map(|p| render_type(self.project, p.ty, false))
                    .collect();
                format!("{}({})", decl.name, params.join(", "))
            }
            _ => decl.name.clone(),
        }
    }
}

/// Fully qualified rendering used to match declarations across modules:
/// kind, qualified name, qualified parameter types and the declared type.
/// Parameter names are ignored.
pub fn render_for_comparison(project: &Project, id: DeclId) -> String {
    let decl = project.decl(id);
    let mut out = format!("{} {}", decl.kind.describe(), project.fq_name(id));
    if matches!(decl.kind, DeclKind::Function | DeclKind::Constructor) {
        let params: Vec<String> = decl
            .params
            .iter()
            .map(|p| render_type(project, p.ty, true))
            .collect();
        out.push('(');
        out.push_str(&params.join(", "));
        out.push(')');
    }
    if let Some(ty) = decl.ty {
        out.push_str(": ");
        out.push_str(&render_type(project, ty, true));
    }
    out
}

pub fn render_type(project: &Project, ty: TypeId, qualified: bool) -> String {
    let data = project.types.get(ty);
    let mut out = match data {
        TypeData::Any { .. } => "Any".to_string(),
        TypeData::Param { param, .. } => project.decl(*param).name.clone(),
        TypeData::Class { class, args, .. } => {
            let mut name = if qualified {
                project.fq_name(*class).as_str().to_string()
            } else {
                project.decl(*class).name.clone()
            };
            if !args.is_empty() {
                let args: Vec<String> = args
                    .iter()
                    .map(|arg| match arg {
                        TypeArg::Star => "*".to_string(),
                        TypeArg::Type { variance, ty } => {
                            let inner = render_type(project, *ty, qualified);
                            match variance {
                                Variance::Invariant => inner,
                                Variance::Out => format!("out {inner}"),
                                Variance::In => format!("in {inner}"),
                            }
                        }
                    })
                    .collect();
                name.push('<');
                name.push_str(&args.join(", "));
                name.push('>');
            }
            name
        }
    };
    if data.is_nullable() {
        out.push('?');
    }
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod render_tests;
