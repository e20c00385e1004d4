//! Sandboxed call lowering.
//!
//! In sandbox mode no call is emitted as PHP call syntax. Every call is
//! handed to the runtime policy object, which decides whether it is allowed:
//!
//! ```php
//! $this->global->sandbox->call('strlen', [$x])
//! $this->global->sandbox->callMethod($obj, 'run', [$x], false)
//! $this->global->sandbox->call(['Foo', 'bar'], [$x])
//! $this->global->sandbox->closure('strlen')
//! (fn($__p0) => $this->global->sandbox->call('strlen', [$__p0]))
//! ```
//!
//! Callee names are always passed as values (`'strlen'`), never as syntax.

use tracing::{debug, trace};

use crate::context::CodeGenContext;
use crate::lowering::CallShape;
use crate::nodes::{
    ArgumentSlot, CallExpression, CallTarget, ExecutionMode, Expression, Member,
    NameOrExpression, Node, Statement, Template,
};

/// Lower `call` through the sandbox policy object.
pub fn lower_sandboxed(ctx: &mut CodeGenContext, call: &CallExpression) -> String {
    let sandbox = ctx.sandbox_ref().to_string();
    let shape = CallShape::of_arguments(&call.args);
    trace!(call = %call.label(), ?shape, "lowering sandboxed call");

    // (mediator method, dispatch target, trailing arguments, closure target)
    let (method, target, suffix, closure_target) = match &call.target {
        CallTarget::Function { callee } => {
            let name = ctx.member_as_string(callee);
            ("call", name.clone(), String::new(), name)
        }
        CallTarget::Method {
            receiver,
            member,
            nullsafe,
        } => {
            let pair = format!("{}, {}", receiver.print(ctx), ctx.member_as_string(member));
            let closure_target = format!("[{pair}]");
            ("callMethod", pair, format!(", {nullsafe}"), closure_target)
        }
        CallTarget::StaticMethod { class, member } => {
            let pair = format!(
                "[{}, {}]",
                ctx.member_as_string(class),
                ctx.member_as_string(member)
            );
            ("call", pair.clone(), String::new(), pair)
        }
    };

    match shape {
        CallShape::Complete => {
            let (args, _) = ctx.arguments_as_array(&call.args);
            format!("{sandbox}->{method}({target}, {args}{suffix})")
        }
        CallShape::FirstClassCallable => format!("{sandbox}->closure({closure_target})"),
        CallShape::Curried => {
            let (args, params) = ctx.arguments_as_array(&call.args);
            format!("(fn({params}) => {sandbox}->{method}({target}, {args}{suffix}))")
        }
    }
}

/// Switches every call of a template to sandboxed execution.
///
/// Calls nested in arguments, receivers and callees are switched too. The
/// nodes are modified in place; nothing is cloned.
#[derive(Debug, Default)]
pub struct SandboxPass {
    rewritten: usize,
}

impl SandboxPass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the pass and return the number of calls switched.
    pub fn run(mut self, template: &mut Template) -> usize {
        for statement in &mut template.body {
            match statement {
                Statement::Print { expression, .. } | Statement::Do { expression, .. } => {
                    self.visit_expression(expression);
                }
                Statement::Import(_) => {}
            }
        }
        debug!(calls = self.rewritten, "[sandbox] switched calls to sandboxed mode");
        self.rewritten
    }

    /// Visit an expression and its children
    pub fn visit_expression(&mut self, expr: &mut Expression) {
        match expr {
            Expression::Call { call, mode } => {
                if *mode != ExecutionMode::Sandboxed {
                    *mode = ExecutionMode::Sandboxed;
                    self.rewritten += 1;
                }
                self.visit_call(call);
            }
            Expression::PropertyFetch {
                object, property, ..
            } => {
                self.visit_expression(object);
                self.visit_member(property);
            }
            Expression::Variable { .. }
            | Expression::Literal { .. }
            | Expression::ConstantFetch(_)
            | Expression::Raw { .. } => {}
        }
    }

    fn visit_call(&mut self, call: &mut CallExpression) {
        match &mut call.target {
            CallTarget::Function { callee } => self.visit_name_or_expression(callee),
            CallTarget::Method {
                receiver, member, ..
            } => {
                self.visit_expression(receiver);
                self.visit_member(member);
            }
            CallTarget::StaticMethod { class, member } => {
                self.visit_name_or_expression(class);
                self.visit_member(member);
            }
        }
        for slot in call.args.iter_mut() {
            if let ArgumentSlot::Concrete(arg) = slot {
                self.visit_expression(&mut arg.value);
            }
        }
    }

    fn visit_name_or_expression(&mut self, node: &mut NameOrExpression) {
        if let NameOrExpression::Expression(expr) = node {
            self.visit_expression(expr);
        }
    }

    fn visit_member(&mut self, member: &mut Member) {
        if let Member::Expression(expr) = member {
            self.visit_expression(expr);
        }
    }
}

#[cfg(test)]
#[path = "../tests/sandbox.rs"]
mod tests;
