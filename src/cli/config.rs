use anyhow::{Context, Result, anyhow, bail};
use std::path::{Path, PathBuf};

use crate::cli::args::CliArgs;
use movecheck_checker::{CheckerOptions, RenderStyle};
use movecheck_model::{MoveRequest, ProjectManifest, TargetSpec};

/// File name looked up when `--project` names a directory or is absent.
pub const MANIFEST_FILE_NAME: &str = "movecheck.json";

/// Locate the manifest for `project` relative to `cwd`.
pub fn resolve_manifest_path(project: Option<&Path>, cwd: &Path) -> PathBuf {
    let candidate = match project {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => cwd.join(path),
        None => cwd.to_path_buf(),
    };
    if candidate.is_dir() {
        candidate.join(MANIFEST_FILE_NAME)
    } else {
        candidate
    }
}

pub fn parse_manifest(source: &str) -> Result<ProjectManifest> {
    let manifest = ProjectManifest::from_json(source).context("failed to parse manifest JSON")?;
    Ok(manifest)
}

pub fn load_manifest(path: &Path) -> Result<ProjectManifest> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest: {}", path.display()))?;
    parse_manifest(&source).with_context(|| format!("failed to load manifest: {}", path.display()))
}

/// The move to check: command-line flags win over the manifest's `move`
/// section.
pub fn resolve_move_request(args: &CliArgs, manifest: &ProjectManifest) -> Result<MoveRequest> {
    if !args.has_move_request() {
        return manifest.move_request.clone().ok_or_else(|| {
            anyhow!("no move requested: pass --move or --move-file, or add a \"move\" section")
        });
    }

    let target = if let Some(decl) = &args.to_decl {
        TargetSpec::ExistingDecl(decl.clone())
    } else if let Some(file) = &args.to_file {
        TargetSpec::ExistingFile(file.clone())
    } else if let Some(directory) = &args.to_dir {
        match &args.new_file {
            Some(file_name) => TargetSpec::DeferredFile {
                directory: directory.clone(),
                package: args.package.clone(),
                file_name: file_name.clone(),
            },
            None => TargetSpec::Directory {
                path: directory.clone(),
                package: args.package.clone(),
            },
        }
    } else {
        bail!("a move target is required: pass one of --to-decl, --to-file or --to-dir");
    };

    Ok(MoveRequest {
        declarations: args.move_decls.clone(),
        files: args.move_files.clone(),
        target,
    })
}

/// Checker options from the manifest settings and command-line overrides.
pub fn resolve_checker_options(args: &CliArgs, manifest: &ProjectManifest) -> CheckerOptions {
    let mut language = manifest.settings;
    if args.strict_sealed {
        language.sealed_inheritors_in_same_package = false;
    }
    if args.relaxed_sealed {
        language.sealed_inheritors_in_same_package = true;
    }

    CheckerOptions {
        language,
        render_style: if args.html {
            RenderStyle::Html
        } else {
            RenderStyle::Plain
        },
    }
}
