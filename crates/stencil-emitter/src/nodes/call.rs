use serde::{Deserialize, Serialize};

use super::{ArgumentSlot, Arguments, Expression, Member, NameOrExpression, Node};
use crate::context::CodeGenContext;
use crate::sandbox::lower_sandboxed;
use stencil_common::Position;

/// How a call is executed by the generated code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Plain PHP call syntax.
    #[default]
    Direct,
    /// Every call goes through the runtime sandbox policy object.
    Sandboxed,
}

/// What is being called.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CallTarget {
    /// `strlen($x)`, `$fn($x)`
    Function { callee: NameOrExpression },
    /// `$obj->run($x)`, `$obj?->run($x)`
    Method {
        receiver: Box<Expression>,
        member: Member,
        #[serde(default)]
        nullsafe: bool,
    },
    /// `Foo::bar($x)`, `$class::bar($x)`
    StaticMethod {
        class: NameOrExpression,
        member: Member,
    },
}

/// A function, method or static-method call.
///
/// A call is *partial* when its argument list contains a placeholder; it
/// then prints as a closure (or first-class callable) instead of a call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallExpression {
    pub target: CallTarget,
    #[serde(default)]
    pub args: Arguments,
    #[serde(default)]
    pub position: Option<Position>,
}

impl CallExpression {
    pub fn function(callee: NameOrExpression, args: Vec<ArgumentSlot>) -> Self {
        Self {
            target: CallTarget::Function { callee },
            args: Arguments::new(args),
            position: None,
        }
    }

    pub fn method(
        receiver: Expression,
        member: Member,
        args: Vec<ArgumentSlot>,
        nullsafe: bool,
    ) -> Self {
        Self {
            target: CallTarget::Method {
                receiver: Box::new(receiver),
                member,
                nullsafe,
            },
            args: Arguments::new(args),
            position: None,
        }
    }

    pub fn static_method(class: NameOrExpression, member: Member, args: Vec<ArgumentSlot>) -> Self {
        Self {
            target: CallTarget::StaticMethod { class, member },
            args: Arguments::new(args),
            position: None,
        }
    }

    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn is_partial(&self) -> bool {
        self.args.is_partial()
    }

    /// Short human-readable form of the call target, used in diagnostics.
    pub fn label(&self) -> String {
        match &self.target {
            CallTarget::Function { callee } => callee.label(),
            CallTarget::Method {
                member, nullsafe, ..
            } => format!("{}{}", if *nullsafe { "?->" } else { "->" }, member.label()),
            CallTarget::StaticMethod { class, member } => {
                format!("{}::{}", class.label(), member.label())
            }
        }
    }

    /// Lower the call with plain call syntax.
    pub fn lower(&self, ctx: &mut CodeGenContext) -> String {
        let callee = match &self.target {
            CallTarget::Function { callee } => ctx.call_expr(callee),
            CallTarget::Method {
                receiver,
                member,
                nullsafe,
            } => {
                let receiver = ctx.dereference_expr(receiver);
                let arrow = if *nullsafe { "?->" } else { "->" };
                format!("{receiver}{arrow}{}", member.print(ctx))
            }
            CallTarget::StaticMethod { class, member } => {
                format!("{}::{}", ctx.call_expr(class), member.print(ctx))
            }
        };
        ctx.lower_call(&callee, &self.args)
    }

    /// Wrap the call for sandboxed lowering. The data is moved, not copied.
    pub fn into_sandboxed(self) -> SandboxedCall {
        SandboxedCall::new(self)
    }
}

impl Node for CallExpression {
    fn print(&self, ctx: &mut CodeGenContext) -> String {
        self.lower(ctx)
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> = Vec::with_capacity(self.args.len() + 2);
        match &self.target {
            CallTarget::Function { callee } => children.push(callee),
            CallTarget::Method {
                receiver, member, ..
            } => {
                children.push(&**receiver);
                children.push(member);
            }
            CallTarget::StaticMethod { class, member } => {
                children.push(class);
                children.push(member);
            }
        }
        for slot in self.args.iter() {
            children.push(slot);
        }
        children
    }

    fn position(&self) -> Option<Position> {
        self.position
    }
}

/// A call routed through the runtime sandbox.
///
/// Owns the base call it decorates; the callee, arguments and position are
/// the base's own data, so edits made through [`base_mut`](Self::base_mut)
/// are what gets lowered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SandboxedCall {
    base: CallExpression,
}

impl SandboxedCall {
    pub const fn new(base: CallExpression) -> Self {
        Self { base }
    }

    pub const fn base(&self) -> &CallExpression {
        &self.base
    }

    pub const fn base_mut(&mut self) -> &mut CallExpression {
        &mut self.base
    }

    pub fn into_base(self) -> CallExpression {
        self.base
    }

    pub fn is_partial(&self) -> bool {
        self.base.is_partial()
    }

    pub fn lower(&self, ctx: &mut CodeGenContext) -> String {
        lower_sandboxed(ctx, &self.base)
    }

    /// Place the call back into an expression tree, keeping sandboxed mode.
    pub fn into_expression(self) -> Expression {
        Expression::Call {
            call: Box::new(self.base),
            mode: ExecutionMode::Sandboxed,
        }
    }
}

impl Node for SandboxedCall {
    fn print(&self, ctx: &mut CodeGenContext) -> String {
        self.lower(ctx)
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.base.children()
    }

    fn position(&self) -> Option<Position> {
        self.base.position
    }
}

#[cfg(test)]
#[path = "../../tests/call_nodes.rs"]
mod tests;
