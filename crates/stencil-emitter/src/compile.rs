//! Template compilation entry point.

use serde::Serialize;
use tracing::debug;

use crate::context::{CodeGenContext, EmitOptions};
use crate::nodes::{Node, Template};
use crate::sandbox::SandboxPass;

/// Generated PHP for one template.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CompiledTemplate {
    /// Code that runs once when the template instance is set up.
    pub initialization: String,
    /// Body of the main render method.
    pub main: String,
}

/// Compile a template to PHP.
///
/// With `options.sandbox` set, every call is switched to sandboxed execution
/// before anything is printed. Each statement that produces code ends up on
/// its own line.
///
/// # Panics
///
/// Panics when the tree breaks a lowering precondition (uncompacted argument
/// list, misplaced variadic placeholder). Run
/// [`validate_template`](crate::validate_template) first to report these as
/// diagnostics instead.
#[tracing::instrument(level = "debug", skip_all, fields(statements = template.body.len(), sandbox = options.sandbox))]
pub fn compile_template(mut template: Template, options: EmitOptions) -> CompiledTemplate {
    if options.sandbox {
        SandboxPass::new().run(&mut template);
    }

    let mut ctx = CodeGenContext::new(options);
    for statement in &template.body {
        let code = statement.print(&mut ctx);
        if !code.is_empty() {
            ctx.write(&code);
            ctx.write_line();
        }
    }

    let compiled = CompiledTemplate {
        initialization: ctx.take_initialization(),
        main: ctx.take_output(),
    };
    debug!(
        main_bytes = compiled.main.len(),
        initialization_bytes = compiled.initialization.len(),
        "[compile] template compiled"
    );
    compiled
}

#[cfg(test)]
#[path = "../tests/compile.rs"]
mod tests;
