//! Template tree nodes.
//!
//! The tree is produced by the parser, optionally rewritten by passes and
//! printed exactly once. It is strictly a tree: every node has one owner.

mod arguments;
mod call;
mod expression;
mod names;
mod template;

pub use arguments::{
    ArgumentPlaceholder, ArgumentSlot, Arguments, ConcreteArgument, VariadicPlaceholder,
};
pub use call::{CallExpression, CallTarget, ExecutionMode, SandboxedCall};
pub use expression::{Expression, Literal};
pub use names::{IdentifierNode, Member, NameKind, NameNode, NameOrExpression};
pub use template::{ImportNode, Statement, Template};

use crate::context::CodeGenContext;
use stencil_common::Position;

/// Capability shared by every node of the template tree.
pub trait Node {
    /// Render this node as generated code.
    fn print(&self, ctx: &mut CodeGenContext) -> String;

    /// Direct children, in source order.
    ///
    /// Removed argument slots are never yielded.
    fn children(&self) -> Vec<&dyn Node>;

    fn position(&self) -> Option<Position> {
        None
    }
}
