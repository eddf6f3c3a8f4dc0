use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::args::CliArgs;
use crate::cli::config::{
    load_manifest, resolve_checker_options, resolve_manifest_path, resolve_move_request,
};
use movecheck_checker::{
    CheckerOptions, ConflictReport, MoveConflictChecker, Services, analyze_conflicts_in_file,
    partition_usages,
};
use movecheck_model::{
    DeclId, Element, FileId, MoveRequest, Project, ProjectSearch, Usage, collect_usages,
};

/// Conflicts found for one move, plus usage bookkeeping.
#[derive(Debug)]
pub struct CheckResult {
    pub report: ConflictReport,
    /// Usages of moved declarations before any checker pruned them.
    pub usages_found: usize,
    /// Usages left for the refactoring to retarget.
    pub usages_remaining: Vec<Usage>,
}

/// A finished run: the loaded project and what the checker reported.
#[derive(Debug)]
pub struct CheckRun {
    pub project: Project,
    pub result: CheckResult,
}

/// Load the manifest named by `args`, resolve the move and check it.
pub fn run(args: &CliArgs, cwd: &Path) -> Result<CheckRun> {
    let manifest_path = resolve_manifest_path(args.project.as_deref(), cwd);
    let manifest = load_manifest(&manifest_path)?;
    tracing::debug!(manifest = %manifest_path.display(), "loaded manifest");

    let request = resolve_move_request(args, &manifest)?;
    let options = resolve_checker_options(args, &manifest);
    let project = manifest
        .build_project()
        .with_context(|| format!("inconsistent manifest: {}", manifest_path.display()))?;

    let result = check_move(&project, &request, options)?;
    Ok(CheckRun { project, result })
}

/// Check one move request against a loaded project.
///
/// Moved declarations go through a single checker pass; each moved file is
/// analyzed on its own with the usages of its declarations.
pub fn check_move(
    project: &Project,
    request: &MoveRequest,
    options: CheckerOptions,
) -> Result<CheckResult> {
    let (elements, target) = request
        .resolve(project)
        .context("failed to resolve move request")?;
    let search = ProjectSearch::new(project);
    let services = Services::uniform(&search);
    let usages = collect_usages(project, &search, &elements);

    let mut decls: Vec<DeclId> = Vec::new();
    let mut files: Vec<FileId> = Vec::new();
    for &element in &elements {
        match element {
            Element::Decl(decl) => decls.push(decl),
            Element::File(file) => files.push(file),
            Element::Reference(_) => {}
        }
    }

    let mut report = ConflictReport::new();
    let mut usages_remaining = Vec::new();

    if !decls.is_empty() {
        let decl_usages: Vec<Usage> = usages
            .iter()
            .copied()
            .filter(|usage| {
                decls.iter().any(|&decl| {
                    project.is_ancestor(Element::Decl(decl), Element::Decl(usage.referenced))
                })
            })
            .collect();
        let (mut internal, mut external) = partition_usages(&decl_usages);
        MoveConflictChecker::new(project, services, decls, target.clone(), options.clone())
            .with_all_elements_to_move(elements.clone())
            .check_all_conflicts(&mut external, &mut internal, &mut report);
        usages_remaining.extend(external);
        usages_remaining.extend(internal);
    }

    for file in files {
        let file_usages: Vec<Usage> = usages
            .iter()
            .copied()
            .filter(|usage| project.file_of_decl(usage.referenced) == Some(file))
            .collect();
        let mut updated = None;
        analyze_conflicts_in_file(
            project,
            services,
            file,
            &file_usages,
            target.clone(),
            elements.clone(),
            options.clone(),
            &mut report,
            |survivors| updated = Some(survivors),
        );
        usages_remaining.extend(updated.unwrap_or(file_usages));
    }

    tracing::debug!(
        conflicts = report.len(),
        usages = usages.len(),
        remaining = usages_remaining.len(),
        "move checked"
    );

    Ok(CheckResult {
        report,
        usages_found: usages.len(),
        usages_remaining,
    })
}
