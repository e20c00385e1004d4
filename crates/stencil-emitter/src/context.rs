//! Code generation context.
//!
//! One `CodeGenContext` is created per compilation pass and threaded by
//! `&mut` through every `Node::print` call. It carries the emit options, the
//! output buffer and the initialization buffer for code that has to run once
//! when a template instance is set up.
//!
//! Call lowering (`lower_call`, `arguments_as_array`) lives in
//! [`crate::lowering`]; sandboxed lowering in [`crate::sandbox`].

use serde::{Deserialize, Serialize};

use crate::nodes::{
    Arguments, Expression, IdentifierNode, Literal, Member, NameNode, NameOrExpression, Node,
};
use stencil_common::Position;
use stencil_common::limits::OUTPUT_BUFFER_CAPACITY;

/// Runtime expression the sandboxed calls are routed through.
pub const DEFAULT_SANDBOX_REF: &str = "$this->global->sandbox";

/// Options controlling code generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmitOptions {
    /// Route every call through the sandbox policy object.
    pub sandbox: bool,
    /// Expression naming the sandbox policy object in generated code.
    pub sandbox_ref: String,
    /// Emit `/* line L:C */` markers where directives ask for them.
    pub line_markers: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            sandbox: false,
            sandbox_ref: DEFAULT_SANDBOX_REF.to_string(),
            line_markers: true,
        }
    }
}

impl EmitOptions {
    pub fn sandboxed() -> Self {
        Self {
            sandbox: true,
            ..Self::default()
        }
    }
}

/// A member or name that the sandbox receives as a value rather than as
/// call syntax.
#[derive(Clone, Copy, Debug)]
pub enum MemberRef<'a> {
    Name(&'a NameNode),
    Identifier(&'a IdentifierNode),
    Expression(&'a Expression),
}

impl<'a> From<&'a NameOrExpression> for MemberRef<'a> {
    fn from(node: &'a NameOrExpression) -> Self {
        match node {
            NameOrExpression::Name(name) => Self::Name(name),
            NameOrExpression::Expression(expr) => Self::Expression(expr),
        }
    }
}

impl<'a> From<&'a Member> for MemberRef<'a> {
    fn from(node: &'a Member) -> Self {
        match node {
            Member::Identifier(ident) => Self::Identifier(ident),
            Member::Expression(expr) => Self::Expression(expr),
        }
    }
}

impl<'a> From<&'a NameNode> for MemberRef<'a> {
    fn from(node: &'a NameNode) -> Self {
        Self::Name(node)
    }
}

impl<'a> From<&'a IdentifierNode> for MemberRef<'a> {
    fn from(node: &'a IdentifierNode) -> Self {
        Self::Identifier(node)
    }
}

/// Argument for one `%` directive of [`CodeGenContext::format`].
#[derive(Clone, Copy)]
pub enum FormatArg<'a> {
    /// `%node`: the printed node.
    Node(&'a dyn Node),
    /// `%raw`: inserted verbatim.
    Raw(&'a str),
    /// `%dump`: a literal in PHP source form.
    Dump(&'a Literal),
    /// `%word`: a bare word becomes a string literal, anything else is code.
    Word(&'a str),
    /// `%line`: position marker, empty without a position.
    Line(Option<Position>),
    /// `%args`: call-site argument list.
    Args(&'a Arguments),
}

impl FormatArg<'_> {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Node(_) => "node",
            Self::Raw(_) => "raw",
            Self::Dump(_) => "dump",
            Self::Word(_) => "word",
            Self::Line(_) => "line",
            Self::Args(_) => "args",
        }
    }
}

#[derive(Debug, Default)]
pub struct CodeGenContext {
    pub options: EmitOptions,
    /// Code produced by the current pass.
    pub output: String,
    /// Code that runs once at template-instance setup.
    pub initialization: String,
}

impl CodeGenContext {
    pub fn new(options: EmitOptions) -> Self {
        Self {
            options,
            output: String::with_capacity(OUTPUT_BUFFER_CAPACITY),
            initialization: String::new(),
        }
    }

    pub fn sandbox_ref(&self) -> &str {
        &self.options.sandbox_ref
    }

    // =========================================================================
    // Buffers
    // =========================================================================

    /// Print `node` and append the result to the output buffer.
    pub fn emit(&mut self, node: &dyn Node) {
        let code = node.print(self);
        self.output.push_str(&code);
    }

    pub fn write(&mut self, code: &str) {
        self.output.push_str(code);
    }

    pub fn write_line(&mut self) {
        self.output.push('\n');
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    pub fn append_initialization(&mut self, code: &str) {
        self.initialization.push_str(code);
        self.initialization.push('\n');
    }

    pub fn take_initialization(&mut self) -> String {
        std::mem::take(&mut self.initialization)
    }

    // =========================================================================
    // Rendering helpers
    // =========================================================================

    /// Single-quoted PHP string literal.
    pub fn encode_string(value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        for c in value.chars() {
            match c {
                '\'' => out.push_str("\\'"),
                '\\' => out.push_str("\\\\"),
                _ => out.push(c),
            }
        }
        out.push('\'');
        out
    }

    /// Render an expression so it can be followed by `(`, `->` or `::`.
    pub fn dereference_expr(&mut self, expr: &Expression) -> String {
        let code = expr.print(self);
        if expr.is_dereferencable() {
            code
        } else {
            format!("({code})")
        }
    }

    /// Callee of a direct call: names as written, expressions dereferenced.
    pub fn call_expr(&mut self, callee: &NameOrExpression) -> String {
        match callee {
            NameOrExpression::Name(name) => name.to_code_string(),
            NameOrExpression::Expression(expr) => self.dereference_expr(expr),
        }
    }

    /// Render a name or member as a value usable for dynamic dispatch:
    /// names and identifiers become string literals, expressions are
    /// printed as they are.
    pub fn member_as_string<'a>(&mut self, member: impl Into<MemberRef<'a>>) -> String {
        match member.into() {
            MemberRef::Name(name) => Self::encode_string(&name.to_code_string()),
            MemberRef::Identifier(ident) => Self::encode_string(&ident.name),
            MemberRef::Expression(expr) => expr.print(self),
        }
    }

    /// Fill a code template.
    ///
    /// Directives: `%node`, `%raw`, `%dump`, `%word`, `%line`, `%args`, and
    /// `%%` for a literal percent sign. An empty `%line` also swallows the
    /// space in front of it.
    ///
    /// # Panics
    ///
    /// Panics on an unknown directive, when a directive gets the wrong kind
    /// of argument, or when the argument count does not match.
    pub fn format(&mut self, template: &str, args: &[FormatArg<'_>]) -> String {
        let mut out = String::with_capacity(template.len() + 32);
        let mut args = args.iter();
        let mut rest = template;

        while let Some(idx) = rest.find('%') {
            out.push_str(&rest[..idx]);
            rest = &rest[idx + 1..];
            if let Some(after) = rest.strip_prefix('%') {
                out.push('%');
                rest = after;
                continue;
            }

            let len = rest.bytes().take_while(u8::is_ascii_lowercase).count();
            let directive = &rest[..len];
            rest = &rest[len..];
            let Some(arg) = args.next() else {
                panic!("format: missing argument for %{directive} in {template:?}");
            };

            match (directive, arg) {
                ("node", FormatArg::Node(node)) => {
                    let code = node.print(self);
                    out.push_str(&code);
                }
                ("raw", FormatArg::Raw(code)) => out.push_str(code),
                ("dump", FormatArg::Dump(value)) => out.push_str(&value.to_php()),
                ("word", FormatArg::Word(word)) => {
                    if is_bare_word(word) {
                        out.push_str(&Self::encode_string(word));
                    } else {
                        out.push_str(word);
                    }
                }
                ("line", FormatArg::Line(position)) => match position {
                    Some(position) if self.options.line_markers => {
                        out.push_str(&position.to_line_marker());
                    }
                    _ => {
                        if out.ends_with(' ') {
                            out.pop();
                        }
                    }
                },
                ("args", FormatArg::Args(arguments)) => {
                    assert!(
                        !arguments.is_partial(),
                        "format: %args cannot render placeholders"
                    );
                    let code = self.render_call_arguments(arguments);
                    out.push_str(&code);
                }
                _ => panic!(
                    "format: %{directive} cannot take a {} argument in {template:?}",
                    arg.kind()
                ),
            }
        }
        out.push_str(rest);

        assert!(
            args.next().is_none(),
            "format: too many arguments for {template:?}"
        );
        out
    }
}

/// Whether a tag argument is a plain word (`file.latte`, `@layout`) rather
/// than PHP code (`$file`, `'quoted'`, `foo()`).
fn is_bare_word(word: &str) -> bool {
    !word.is_empty()
        && !word.starts_with(['$', '\'', '"'])
        && !word.contains("::")
        && word
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | '\\' | '@' | ':'))
}

#[cfg(test)]
#[path = "../tests/context.rs"]
mod tests;
