use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Expression, Node};
use crate::context::CodeGenContext;
use stencil_common::Position;

/// How a name is anchored in the namespace tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameKind {
    /// `Foo\bar`
    #[default]
    Normal,
    /// `\Foo\bar`
    FullyQualified,
    /// `namespace\Foo\bar`
    Relative,
}

/// Function, class or constant name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameNode {
    pub parts: Vec<String>,
    #[serde(default)]
    pub kind: NameKind,
    #[serde(default)]
    pub position: Option<Position>,
}

impl NameNode {
    /// Parse a name written in source form (`strlen`, `\Foo\bar`, `namespace\x`).
    pub fn parse(name: &str) -> Self {
        let (kind, rest) = if let Some(rest) = name.strip_prefix('\\') {
            (NameKind::FullyQualified, rest)
        } else if let Some(rest) = name.strip_prefix("namespace\\") {
            (NameKind::Relative, rest)
        } else {
            (NameKind::Normal, name)
        };
        Self {
            parts: rest.split('\\').map(str::to_string).collect(),
            kind,
            position: None,
        }
    }

    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn to_code_string(&self) -> String {
        let joined = self.parts.join("\\");
        match self.kind {
            NameKind::Normal => joined,
            NameKind::FullyQualified => format!("\\{joined}"),
            NameKind::Relative => format!("namespace\\{joined}"),
        }
    }
}

impl fmt::Display for NameNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_code_string())
    }
}

impl Node for NameNode {
    fn print(&self, _ctx: &mut CodeGenContext) -> String {
        self.to_code_string()
    }

    fn children(&self) -> Vec<&dyn Node> {
        Vec::new()
    }

    fn position(&self) -> Option<Position> {
        self.position
    }
}

/// Bare identifier: method names and named-argument labels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierNode {
    pub name: String,
    #[serde(default)]
    pub position: Option<Position>,
}

impl IdentifierNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: None,
        }
    }
}

impl fmt::Display for IdentifierNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Node for IdentifierNode {
    fn print(&self, _ctx: &mut CodeGenContext) -> String {
        self.name.clone()
    }

    fn children(&self) -> Vec<&dyn Node> {
        Vec::new()
    }

    fn position(&self) -> Option<Position> {
        self.position
    }
}

/// Callee of a function call or class of a static call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NameOrExpression {
    Name(NameNode),
    Expression(Box<Expression>),
}

impl NameOrExpression {
    pub fn name(name: &str) -> Self {
        Self::Name(NameNode::parse(name))
    }

    pub fn expr(expr: Expression) -> Self {
        Self::Expression(Box::new(expr))
    }

    /// Short label for diagnostics; expressions are not printed.
    pub fn label(&self) -> String {
        match self {
            Self::Name(name) => name.to_code_string(),
            Self::Expression(_) => "{expression}".to_string(),
        }
    }
}

impl Node for NameOrExpression {
    fn print(&self, ctx: &mut CodeGenContext) -> String {
        match self {
            Self::Name(name) => name.print(ctx),
            Self::Expression(expr) => expr.print(ctx),
        }
    }

    fn children(&self) -> Vec<&dyn Node> {
        match self {
            Self::Name(name) => vec![name as &dyn Node],
            Self::Expression(expr) => vec![&**expr as &dyn Node],
        }
    }

    fn position(&self) -> Option<Position> {
        match self {
            Self::Name(name) => name.position,
            Self::Expression(expr) => expr.position(),
        }
    }
}

/// Member name of a method or static-method call: `->run` or `->{$m}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Member {
    Identifier(IdentifierNode),
    Expression(Box<Expression>),
}

impl Member {
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Identifier(IdentifierNode::new(name))
    }

    pub fn expr(expr: Expression) -> Self {
        Self::Expression(Box::new(expr))
    }

    pub fn label(&self) -> String {
        match self {
            Self::Identifier(ident) => ident.name.clone(),
            Self::Expression(_) => "{expression}".to_string(),
        }
    }
}

impl Node for Member {
    /// Syntactic member access: the identifier itself, or `{expr}`.
    fn print(&self, ctx: &mut CodeGenContext) -> String {
        match self {
            Self::Identifier(ident) => ident.print(ctx),
            Self::Expression(expr) => format!("{{{}}}", expr.print(ctx)),
        }
    }

    fn children(&self) -> Vec<&dyn Node> {
        match self {
            Self::Identifier(ident) => vec![ident as &dyn Node],
            Self::Expression(expr) => vec![&**expr as &dyn Node],
        }
    }

    fn position(&self) -> Option<Position> {
        match self {
            Self::Identifier(ident) => ident.position,
            Self::Expression(expr) => expr.position(),
        }
    }
}
