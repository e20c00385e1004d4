use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the stencil binary.
#[derive(Parser, Debug, Default)]
#[command(
    name = "stencil",
    version,
    about = "Compile parsed template trees to PHP"
)]
pub struct CliArgs {
    /// Template tree produced by the parser, as JSON.
    pub input: PathBuf,

    /// Route every call through the runtime sandbox.
    #[arg(long)]
    pub sandbox: bool,

    /// Expression naming the sandbox policy object in generated code.
    #[arg(long = "sandboxRef", alias = "sandbox-ref")]
    pub sandbox_ref: Option<String>,

    /// Omit `/* line L:C */` markers from generated code.
    #[arg(long = "noLineMarkers", alias = "no-line-markers")]
    pub no_line_markers: bool,

    /// Path to stencil.json. Defaults to `stencil.json` in the working
    /// directory when present.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write generated code to this file instead of stdout.
    #[arg(short = 'o', long)]
    pub out: Option<PathBuf>,

    /// Print diagnostics as JSON.
    #[arg(long = "diagnosticsJson", alias = "diagnostics-json")]
    pub diagnostics_json: bool,

    /// Disable colored diagnostic output.
    #[arg(long = "noColor", alias = "no-color")]
    pub no_color: bool,
}

#[cfg(test)]
#[path = "../tests/args.rs"]
mod tests;
