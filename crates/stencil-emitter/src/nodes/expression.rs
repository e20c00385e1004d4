use serde::{Deserialize, Serialize};

use super::{CallExpression, ExecutionMode, Member, NameNode, Node};
use crate::context::CodeGenContext;
use crate::lowering::lower_call_expression;
use stencil_common::Position;

/// Scalar literal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Null,
}

impl Literal {
    /// PHP source form of the value, as `var_export` would write it.
    pub fn to_php(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Float(f) if f.is_nan() => "NAN".to_string(),
            Self::Float(f) if f.is_infinite() => {
                let inf = if f.is_sign_negative() { "-INF" } else { "INF" };
                inf.to_string()
            }
            Self::Float(f) => {
                let text = f.to_string();
                if text.contains(['.', 'e', 'E']) {
                    text
                } else {
                    format!("{text}.0")
                }
            }
            Self::String(s) => CodeGenContext::encode_string(s),
            Self::Bool(b) => b.to_string(),
            Self::Null => "null".to_string(),
        }
    }
}

/// The expression subset call arguments, callees and receivers are built
/// from. Everything else reaches this crate pre-rendered as `Raw`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// `$name`
    Variable {
        name: String,
        #[serde(default)]
        position: Option<Position>,
    },
    Literal {
        value: Literal,
        #[serde(default)]
        position: Option<Position>,
    },
    /// `PHP_EOL`, `\Foo\BAR`
    ConstantFetch(NameNode),
    /// `$obj->prop`, `$obj?->prop`, `$obj->{$name}`
    PropertyFetch {
        object: Box<Expression>,
        property: Member,
        #[serde(default)]
        nullsafe: bool,
        #[serde(default)]
        position: Option<Position>,
    },
    /// A function, method or static-method call and how it executes.
    Call {
        call: Box<CallExpression>,
        #[serde(default)]
        mode: ExecutionMode,
    },
    /// Code rendered elsewhere, emitted verbatim.
    Raw {
        code: String,
        #[serde(default)]
        position: Option<Position>,
    },
}

impl Expression {
    pub fn var(name: impl Into<String>) -> Self {
        Self::Variable {
            name: name.into(),
            position: None,
        }
    }

    pub const fn literal(value: Literal) -> Self {
        Self::Literal {
            value,
            position: None,
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::literal(Literal::String(value.into()))
    }

    pub const fn int(value: i64) -> Self {
        Self::literal(Literal::Int(value))
    }

    pub fn raw(code: impl Into<String>) -> Self {
        Self::Raw {
            code: code.into(),
            position: None,
        }
    }

    pub fn property(object: Expression, property: Member, nullsafe: bool) -> Self {
        Self::PropertyFetch {
            object: Box::new(object),
            property,
            nullsafe,
            position: None,
        }
    }

    /// Direct call.
    pub fn call(call: CallExpression) -> Self {
        Self::Call {
            call: Box::new(call),
            mode: ExecutionMode::Direct,
        }
    }

    /// Whether the expression can stand in front of `(`, `->` or `::`
    /// without parentheses.
    pub const fn is_dereferencable(&self) -> bool {
        matches!(
            self,
            Self::Variable { .. }
                | Self::ConstantFetch(_)
                | Self::PropertyFetch { .. }
                | Self::Call { .. }
        )
    }
}

impl Node for Expression {
    fn print(&self, ctx: &mut CodeGenContext) -> String {
        match self {
            Self::Variable { name, .. } => format!("${name}"),
            Self::Literal { value, .. } => value.to_php(),
            Self::ConstantFetch(name) => name.to_code_string(),
            Self::PropertyFetch {
                object,
                property,
                nullsafe,
                ..
            } => {
                let object = ctx.dereference_expr(object);
                let arrow = if *nullsafe { "?->" } else { "->" };
                format!("{object}{arrow}{}", property.print(ctx))
            }
            Self::Call { call, mode } => lower_call_expression(ctx, call, *mode),
            Self::Raw { code, .. } => code.clone(),
        }
    }

    fn children(&self) -> Vec<&dyn Node> {
        match self {
            Self::Variable { .. } | Self::Literal { .. } | Self::Raw { .. } => Vec::new(),
            Self::ConstantFetch(name) => vec![name as &dyn Node],
            Self::PropertyFetch {
                object, property, ..
            } => vec![&**object as &dyn Node, property],
            Self::Call { call, .. } => call.children(),
        }
    }

    fn position(&self) -> Option<Position> {
        match self {
            Self::Variable { position, .. }
            | Self::Literal { position, .. }
            | Self::PropertyFetch { position, .. }
            | Self::Raw { position, .. } => *position,
            Self::ConstantFetch(name) => name.position,
            Self::Call { call, .. } => call.position,
        }
    }
}
