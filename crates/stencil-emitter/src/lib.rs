//! Call-expression code generation for the stencil template compiler.
//!
//! Templates arrive here as a tree produced by an external parser. This
//! crate owns the call-expression part of that tree and turns it into PHP:
//!
//! 1. **Nodes** (`nodes`): the tree types. Function, method and
//!    static-method calls share one `CallExpression` value whose argument
//!    list may contain placeholders (`?`, `name: ?`, `...`).
//! 2. **Passes**: `SandboxPass` switches every call to sandboxed execution,
//!    `validate` reports malformed call shapes as diagnostics.
//! 3. **Printing** (`context`, `lowering`, `sandbox`): a `CodeGenContext`
//!    is threaded through one compilation and lowers each call either
//!    directly (`strlen($x)`) or through the runtime sandbox
//!    (`$this->global->sandbox->call('strlen', [$x])`).

pub mod compile;
pub mod context;
pub mod lowering;
pub mod nodes;
pub mod sandbox;
pub mod validate;

pub use compile::{CompiledTemplate, compile_template};
pub use context::{CodeGenContext, EmitOptions, FormatArg, MemberRef};
pub use lowering::{CallShape, lower_call_expression};
pub use nodes::{
    ArgumentPlaceholder, ArgumentSlot, Arguments, CallExpression, CallTarget, ConcreteArgument,
    ExecutionMode, Expression, IdentifierNode, ImportNode, Literal, Member, NameKind, NameNode,
    NameOrExpression, Node, SandboxedCall, Statement, Template, VariadicPlaceholder,
};
pub use sandbox::SandboxPass;
pub use validate::{validate_call, validate_template};

pub use stencil_common::Position;
