use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the movecheck binary.
#[derive(Parser, Debug)]
#[command(
    name = "movecheck",
    version,
    about = "Report conflicts a move-declaration refactoring would introduce"
)]
pub struct CliArgs {
    // ==================== Project ====================
    /// Path to movecheck.json or a directory containing it.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    // ==================== Move Request ====================
    /// Declaration to move, by qualified name. Repeatable.
    #[arg(long = "move", value_name = "DECL")]
    pub move_decls: Vec<String>,

    /// File to move, by project path. Repeatable.
    #[arg(long = "move-file", value_name = "PATH")]
    pub move_files: Vec<String>,

    /// Move into an existing declaration.
    #[arg(long = "to-decl", value_name = "DECL", conflicts_with_all = ["to_file", "to_dir"])]
    pub to_decl: Option<String>,

    /// Move into an existing file.
    #[arg(long = "to-file", value_name = "PATH", conflicts_with = "to_dir")]
    pub to_file: Option<String>,

    /// Move into a new file of a source directory.
    #[arg(long = "to-dir", value_name = "PATH")]
    pub to_dir: Option<String>,

    /// Package for a directory target; defaults to the directory's package.
    #[arg(long, requires = "to_dir")]
    pub package: Option<String>,

    /// Name of the file a directory move will create.
    #[arg(long = "new-file", value_name = "NAME", requires = "to_dir")]
    pub new_file: Option<String>,

    // ==================== Checking ====================
    /// Sealed inheritors must share a file with their parent.
    #[arg(long = "strict-sealed", conflicts_with = "relaxed_sealed")]
    pub strict_sealed: bool,

    /// Sealed inheritors may live anywhere in the parent's package and module.
    #[arg(long = "relaxed-sealed")]
    pub relaxed_sealed: bool,

    // ==================== Output ====================
    /// Output format for the conflict report.
    #[arg(long, value_enum, ignore_case = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Emphasize names in messages with HTML markup.
    #[arg(long)]
    pub html: bool,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Disable colored text output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl CliArgs {
    /// Whether the command line itself names a move.
    pub fn has_move_request(&self) -> bool {
        !self.move_decls.is_empty() || !self.move_files.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
