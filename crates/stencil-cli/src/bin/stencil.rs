#![allow(clippy::print_stderr, clippy::print_stdout)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use stencil_cli::args::CliArgs;
use stencil_cli::driver::{self, render_output};
use stencil_cli::reporter::Reporter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS: i32 = 1;

fn main() -> Result<()> {
    // No-op unless STENCIL_LOG or RUST_LOG is set.
    stencil_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let result = driver::compile(&args, &cwd)?;

    if args.diagnostics_json {
        let json = serde_json::to_string_pretty(&result.diagnostics)
            .context("failed to serialize diagnostics")?;
        eprintln!("{json}");
    } else if !result.diagnostics.is_empty() {
        let color = !args.no_color && std::io::stderr().is_terminal();
        let reporter = Reporter::new(color, args.input.display().to_string());
        eprintln!("{}", reporter.render(&result.diagnostics));
    }

    if result.has_errors() {
        std::process::exit(EXIT_DIAGNOSTICS);
    }

    if let (Some(compiled), None) = (&result.compiled, &result.emitted_file) {
        print!("{}", render_output(compiled));
    }

    std::process::exit(EXIT_SUCCESS);
}
