use colored::Colorize;
use serde::Serialize;

use crate::cli::driver::CheckResult;
use movecheck_checker::{Conflict, ConflictReport, RenderStyle, Renderer};
use movecheck_common::DiagnosticCategory;
use movecheck_model::{Element, Project};

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// One line per conflict, followed by a summary line.
    pub fn render(&self, project: &Project, report: &ConflictReport) -> String {
        let renderer = Renderer::new(project, RenderStyle::Plain);
        let mut out = String::new();
        for (element, conflicts) in report.iter() {
            let location = self.format_location(project, &renderer, element);
            for conflict in conflicts {
                out.push_str(&location);
                out.push_str(" - ");
                out.push_str(&self.format_category(conflict.category));
                out.push(' ');
                out.push_str(&self.format_code(conflict.code));
                out.push_str(": ");
                out.push_str(&conflict.message);
                out.push('\n');
            }
        }
        if !report.is_empty() {
            out.push('\n');
        }
        out.push_str(&self.format_summary(report));
        out
    }

    /// Machine-readable report.
    pub fn render_json(
        &self,
        project: &Project,
        result: &CheckResult,
        pretty: bool,
    ) -> serde_json::Result<String> {
        let renderer = Renderer::new(project, RenderStyle::Plain);
        let conflicts = result
            .report
            .iter()
            .flat_map(|(element, conflicts)| {
                let file = project
                    .file_of_element(element)
                    .map(|file| project.file_path(file));
                let description = renderer.element(element);
                conflicts.iter().map(move |conflict| JsonConflict {
                    element,
                    file: file.clone(),
                    description: description.clone(),
                    conflict,
                })
            })
            .collect();

        let json = JsonReport {
            conflicts,
            errors: count_category(&result.report, DiagnosticCategory::Error),
            warnings: count_category(&result.report, DiagnosticCategory::Warning),
            usages: JsonUsages {
                found: result.usages_found,
                remaining: result.usages_remaining.len(),
            },
        };
        if pretty {
            serde_json::to_string_pretty(&json)
        } else {
            serde_json::to_string(&json)
        }
    }

    fn format_location(
        &self,
        project: &Project,
        renderer: &Renderer<'_>,
        element: Element,
    ) -> String {
        let description = renderer.element(element);
        let location = match project.file_of_element(element) {
            Some(file) if !matches!(element, Element::File(_)) => {
                format!("{}: {}", project.file_path(file), description)
            }
            _ => description,
        };
        if self.color {
            location.cyan().to_string()
        } else {
            location
        }
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("MC{}", code);
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }

    fn format_summary(&self, report: &ConflictReport) -> String {
        let summary = match report.len() {
            0 => return "No conflicts found.\n".to_string(),
            1 => "Found 1 conflict.".to_string(),
            count => format!("Found {} conflicts.", count),
        };
        if self.color {
            format!("{}\n", summary.bold())
        } else {
            format!("{}\n", summary)
        }
    }
}

fn count_category(report: &ConflictReport, category: DiagnosticCategory) -> usize {
    report
        .conflicts()
        .filter(|conflict| conflict.category == category)
        .count()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    conflicts: Vec<JsonConflict<'a>>,
    errors: usize,
    warnings: usize,
    usages: JsonUsages,
}

#[derive(Serialize)]
struct JsonConflict<'a> {
    element: Element,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    description: String,
    #[serde(flatten)]
    conflict: &'a Conflict,
}

#[derive(Serialize)]
struct JsonUsages {
    found: usize,
    remaining: usize,
}
