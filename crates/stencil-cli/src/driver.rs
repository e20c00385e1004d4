use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::args::CliArgs;
use crate::config::{StencilConfig, find_config, load_config, resolve_emit_options};
use stencil_common::Diagnostic;
use stencil_emitter::{CompiledTemplate, Template, compile_template, validate_template};

#[derive(Debug, Default)]
pub struct CompilationResult {
    pub diagnostics: Vec<Diagnostic>,
    /// Generated code; `None` when validation reported errors.
    pub compiled: Option<CompiledTemplate>,
    /// File the code was written to, when `--out` was given.
    pub emitted_file: Option<PathBuf>,
}

impl CompilationResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

pub fn read_template(path: &Path) -> Result<Template> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read template: {}", path.display()))?;
    serde_json::from_str(&source)
        .with_context(|| format!("failed to parse template tree: {}", path.display()))
}

/// Validate and compile the input named by `args`.
///
/// Validation errors stop compilation but are not an `Err`: they are
/// returned in the result for the caller to report.
pub fn compile(args: &CliArgs, cwd: &Path) -> Result<CompilationResult> {
    let config = match find_config(args, cwd) {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(&path)?
        }
        None => StencilConfig::default(),
    };
    let options = resolve_emit_options(&config, args);

    let input = cwd.join(&args.input);
    let template = read_template(&input)?;

    let diagnostics = validate_template(&template, &options);
    let mut result = CompilationResult {
        diagnostics,
        ..CompilationResult::default()
    };
    if result.has_errors() {
        info!(
            errors = result.diagnostics.len(),
            "validation failed, skipping code generation"
        );
        return Ok(result);
    }

    let compiled = compile_template(template, options);
    if let Some(out) = &args.out {
        let out = cwd.join(out);
        std::fs::write(&out, render_output(&compiled))
            .with_context(|| format!("failed to write output: {}", out.display()))?;
        result.emitted_file = Some(out);
    }
    result.compiled = Some(compiled);
    Ok(result)
}

/// Initialization code, then the main body.
pub fn render_output(compiled: &CompiledTemplate) -> String {
    if compiled.initialization.is_empty() {
        return compiled.main.clone();
    }
    format!("{}\n{}", compiled.initialization, compiled.main)
}
