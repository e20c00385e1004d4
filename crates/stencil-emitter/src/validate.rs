//! Precondition checks for call expressions.
//!
//! Lowering assumes well-formed argument lists and panics otherwise. The
//! parser normally guarantees that; this pass lets a driver report the same
//! problems as diagnostics before anything is printed.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::context::{DEFAULT_SANDBOX_REF, EmitOptions};
use crate::lowering::closure_param_name;
use crate::nodes::{
    ArgumentSlot, CallExpression, CallTarget, ExecutionMode, Expression, Member,
    NameOrExpression, Statement, Template,
};
use stencil_common::Position;
use stencil_common::diagnostics::{Diagnostic, diagnostic_codes};
use stencil_common::limits::MAX_CALL_NESTING_DEPTH;

/// Check every call of a template as `compile_template` would print it
/// with `options`: with `options.sandbox` set, every call is checked as
/// sandboxed.
pub fn validate_template(template: &Template, options: &EmitOptions) -> Vec<Diagnostic> {
    let mut validator = Validator::new(options.sandbox, &options.sandbox_ref);
    for statement in &template.body {
        match statement {
            Statement::Print { expression, .. } | Statement::Do { expression, .. } => {
                validator.visit_expression(expression, 0);
            }
            Statement::Import(_) => {}
        }
    }
    debug!(
        diagnostics = validator.diagnostics.len(),
        "[validate] template checked"
    );
    validator.diagnostics
}

/// Check one call (and the calls nested inside it) as if it ran in `mode`.
///
/// Sandboxed calls are checked against the default sandbox reference.
pub fn validate_call(call: &CallExpression, mode: ExecutionMode) -> Vec<Diagnostic> {
    let mut validator = Validator::new(false, DEFAULT_SANDBOX_REF);
    validator.visit_call(call, mode, 1);
    validator.diagnostics
}

struct Validator<'o> {
    diagnostics: Vec<Diagnostic>,
    depth_reported: bool,
    force_sandbox: bool,
    sandbox_ref: &'o str,
}

impl<'o> Validator<'o> {
    fn new(force_sandbox: bool, sandbox_ref: &'o str) -> Self {
        Self {
            diagnostics: Vec::new(),
            depth_reported: false,
            force_sandbox,
            sandbox_ref,
        }
    }

    fn visit_expression(&mut self, expr: &Expression, depth: u32) {
        match expr {
            Expression::Call { call, mode } => {
                let mode = if self.force_sandbox {
                    ExecutionMode::Sandboxed
                } else {
                    *mode
                };
                self.visit_call(call, mode, depth + 1);
            }
            Expression::PropertyFetch {
                object, property, ..
            } => {
                self.visit_expression(object, depth);
                self.visit_member(property, depth);
            }
            Expression::Variable { .. }
            | Expression::Literal { .. }
            | Expression::ConstantFetch(_)
            | Expression::Raw { .. } => {}
        }
    }

    fn visit_call(&mut self, call: &CallExpression, mode: ExecutionMode, depth: u32) {
        if depth > MAX_CALL_NESTING_DEPTH {
            if !self.depth_reported {
                self.depth_reported = true;
                self.diagnostics.push(Diagnostic::from_code(
                    diagnostic_codes::CALL_NESTING_TOO_DEEP,
                    &[&MAX_CALL_NESTING_DEPTH.to_string()],
                    call.position,
                ));
            }
            return;
        }

        self.check_arguments(call, mode);

        match &call.target {
            CallTarget::Function { callee } => self.visit_name_or_expression(callee, depth),
            CallTarget::Method {
                receiver, member, ..
            } => {
                self.visit_expression(receiver, depth);
                self.visit_member(member, depth);
            }
            CallTarget::StaticMethod { class, member } => {
                self.visit_name_or_expression(class, depth);
                self.visit_member(member, depth);
            }
        }
        for slot in call.args.iter() {
            if let ArgumentSlot::Concrete(arg) = slot {
                self.visit_expression(&arg.value, depth);
            }
        }
    }

    fn visit_name_or_expression(&mut self, node: &NameOrExpression, depth: u32) {
        if let NameOrExpression::Expression(expr) = node {
            self.visit_expression(expr, depth);
        }
    }

    fn visit_member(&mut self, member: &Member, depth: u32) {
        if let Member::Expression(expr) = member {
            self.visit_expression(expr, depth);
        }
    }

    fn check_arguments(&mut self, call: &CallExpression, mode: ExecutionMode) {
        let label = call.label();

        if call.args.has_holes() {
            self.report(diagnostic_codes::ABSENT_ARGUMENT_SLOT, &label, call);
        }

        let mut placeholder_names: FxHashSet<&str> = FxHashSet::default();
        let mut argument_names: FxHashSet<&str> = FxHashSet::default();
        let mut first_is_variadic = false;

        for (index, slot) in call.args.iter().enumerate() {
            match slot {
                ArgumentSlot::Variadic(variadic) if index == 0 => {
                    first_is_variadic = true;
                    if let CallTarget::Method { nullsafe: true, .. } = call.target
                        && mode == ExecutionMode::Direct
                    {
                        self.diagnostics.push(Diagnostic::from_code(
                            diagnostic_codes::NULLSAFE_FIRST_CLASS_CALLABLE,
                            &[&label],
                            variadic.position.or(call.position),
                        ));
                    }
                }
                ArgumentSlot::Variadic(variadic) => {
                    self.diagnostics.push(Diagnostic::from_code(
                        diagnostic_codes::VARIADIC_PLACEHOLDER_NOT_FIRST,
                        &[&label],
                        variadic.position.or(call.position),
                    ));
                }
                ArgumentSlot::Placeholder(placeholder) => {
                    if let Some(name) = &placeholder.name
                        && !placeholder_names.insert(name.name.as_str())
                    {
                        self.diagnostics.push(Diagnostic::from_code(
                            diagnostic_codes::DUPLICATE_PLACEHOLDER_NAME,
                            &[&name.name],
                            placeholder.position.or(call.position),
                        ));
                    }
                }
                ArgumentSlot::Concrete(arg) => {
                    if let Some(name) = &arg.name {
                        argument_names.insert(name.name.as_str());
                        if arg.spread {
                            self.diagnostics.push(Diagnostic::from_code(
                                diagnostic_codes::SPREAD_ARGUMENT_WITH_NAME,
                                &[&name.name],
                                arg.position.or(call.position),
                            ));
                        }
                    }
                }
            }
        }

        if first_is_variadic && call.args.iter().count() > 1 {
            self.report(
                diagnostic_codes::ARGUMENTS_AFTER_VARIADIC_PLACEHOLDER,
                &label,
                call,
            );
        }

        let mut collisions: Vec<&str> = placeholder_names
            .intersection(&argument_names)
            .copied()
            .collect();
        collisions.sort_unstable();
        for name in collisions {
            self.report(
                diagnostic_codes::PLACEHOLDER_NAME_COLLIDES_WITH_ARGUMENT,
                name,
                call,
            );
        }

        if !first_is_variadic {
            self.check_closure_params(call, mode);
        }
    }

    /// The closure synthesized for a partial call declares one parameter per
    /// placeholder. None of them may be `$this` or capture a variable the
    /// call itself reads.
    fn check_closure_params(&mut self, call: &CallExpression, mode: ExecutionMode) {
        let params: Vec<(String, Option<Position>)> = call
            .args
            .iter()
            .filter_map(|slot| match slot {
                ArgumentSlot::Placeholder(placeholder) => Some(placeholder),
                _ => None,
            })
            .enumerate()
            .map(|(ordinal, placeholder)| {
                (
                    closure_param_name(placeholder, ordinal),
                    placeholder.position.or(call.position),
                )
            })
            .collect();
        if params.is_empty() {
            return;
        }

        let mut used: FxHashSet<&str> = FxHashSet::default();
        collect_call_variables(call, &mut used);
        if mode == ExecutionMode::Sandboxed {
            collect_raw_variables(self.sandbox_ref, &mut used);
        }

        let label = call.label();
        for (name, position) in params {
            if name == "this" {
                self.diagnostics.push(Diagnostic::from_code(
                    diagnostic_codes::RESERVED_PLACEHOLDER_NAME,
                    &[&name],
                    position,
                ));
            } else if used.contains(name.as_str()) {
                self.diagnostics.push(Diagnostic::from_code(
                    diagnostic_codes::PLACEHOLDER_SHADOWS_VARIABLE,
                    &[&name, &label],
                    position,
                ));
            }
        }
    }

    fn report(&mut self, code: u32, arg: &str, call: &CallExpression) {
        self.diagnostics
            .push(Diagnostic::from_code(code, &[arg], call.position));
    }
}

/// Variables read anywhere inside `call`: callee, receiver, member
/// expressions and concrete arguments, nested calls included.
fn collect_call_variables<'a>(call: &'a CallExpression, out: &mut FxHashSet<&'a str>) {
    match &call.target {
        CallTarget::Function { callee } => collect_name_or_expression_variables(callee, out),
        CallTarget::Method {
            receiver, member, ..
        } => {
            collect_variables(receiver, out);
            collect_member_variables(member, out);
        }
        CallTarget::StaticMethod { class, member } => {
            collect_name_or_expression_variables(class, out);
            collect_member_variables(member, out);
        }
    }
    for slot in call.args.iter() {
        if let ArgumentSlot::Concrete(arg) = slot {
            collect_variables(&arg.value, out);
        }
    }
}

fn collect_variables<'a>(expr: &'a Expression, out: &mut FxHashSet<&'a str>) {
    match expr {
        Expression::Variable { name, .. } => {
            out.insert(name.as_str());
        }
        Expression::PropertyFetch {
            object, property, ..
        } => {
            collect_variables(object, out);
            collect_member_variables(property, out);
        }
        Expression::Call { call, .. } => collect_call_variables(call, out),
        Expression::Raw { code, .. } => collect_raw_variables(code, out),
        Expression::Literal { .. } | Expression::ConstantFetch(_) => {}
    }
}

fn collect_name_or_expression_variables<'a>(
    node: &'a NameOrExpression,
    out: &mut FxHashSet<&'a str>,
) {
    if let NameOrExpression::Expression(expr) = node {
        collect_variables(expr, out);
    }
}

fn collect_member_variables<'a>(member: &'a Member, out: &mut FxHashSet<&'a str>) {
    if let Member::Expression(expr) = member {
        collect_variables(expr, out);
    }
}

/// `$name` tokens of pre-rendered PHP.
fn collect_raw_variables<'a>(code: &'a str, out: &mut FxHashSet<&'a str>) {
    let mut rest = code;
    while let Some(dollar) = rest.find('$') {
        let tail = &rest[dollar + 1..];
        let len = tail
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(tail.len());
        if len > 0 && !tail.starts_with(|c: char| c.is_ascii_digit()) {
            out.insert(&tail[..len]);
        }
        rest = &tail[len..];
    }
}

#[cfg(test)]
#[path = "../tests/validate.rs"]
mod tests;
