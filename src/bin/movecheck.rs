use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use movecheck::cli::args::{CliArgs, OutputFormat};
use movecheck::cli::driver;
use movecheck::cli::reporter::Reporter;

/// Exit status codes.
const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFLICTS_FOUND: i32 = 1;

fn main() -> Result<()> {
    // Initialize tracing if MOVECHECK_LOG or RUST_LOG is set (zero cost otherwise).
    // Supports MOVECHECK_LOG_FORMAT=tree|json|text (see src/tracing_config.rs).
    movecheck::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let run = driver::run(&args, &cwd)?;
    let color = !args.no_color && std::io::stdout().is_terminal();
    let reporter = Reporter::new(color);

    match args.format {
        OutputFormat::Text => {
            print!("{}", reporter.render(&run.project, &run.result.report));
        }
        OutputFormat::Json => {
            let json = reporter
                .render_json(&run.project, &run.result, args.pretty)
                .context("failed to serialize conflict report")?;
            println!("{json}");
        }
    }

    let status = if run.result.report.is_empty() {
        EXIT_SUCCESS
    } else {
        EXIT_CONFLICTS_FOUND
    };
    std::process::exit(status);
}
