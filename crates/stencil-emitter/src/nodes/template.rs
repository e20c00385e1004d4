use serde::{Deserialize, Serialize};

use super::{Expression, Node};
use crate::context::{CodeGenContext, FormatArg};
use stencil_common::Position;

/// `{import "file"}`
///
/// Inside the template head (`global`), the import runs once while the
/// template instance is set up, so its code goes to the initialization
/// buffer instead of the main body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportNode {
    /// The file argument exactly as written in the tag.
    pub file: String,
    #[serde(default)]
    pub global: bool,
    #[serde(default)]
    pub position: Option<Position>,
}

impl Node for ImportNode {
    fn print(&self, ctx: &mut CodeGenContext) -> String {
        let code = ctx.format(
            "$this->createTemplate(%word, $this->params, \"import\")->render() %line;",
            &[FormatArg::Word(&self.file), FormatArg::Line(self.position)],
        );
        if self.global {
            ctx.append_initialization(&code);
            return String::new();
        }
        code
    }

    fn children(&self) -> Vec<&dyn Node> {
        Vec::new()
    }

    fn position(&self) -> Option<Position> {
        self.position
    }
}

/// Top-level template statement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// `{= expr}`: print the value.
    Print {
        expression: Expression,
        #[serde(default)]
        position: Option<Position>,
    },
    /// `{do expr}`: evaluate for side effects.
    Do {
        expression: Expression,
        #[serde(default)]
        position: Option<Position>,
    },
    Import(ImportNode),
}

impl Node for Statement {
    fn print(&self, ctx: &mut CodeGenContext) -> String {
        match self {
            Self::Print {
                expression,
                position,
            } => ctx.format(
                "echo %node %line;",
                &[FormatArg::Node(expression), FormatArg::Line(*position)],
            ),
            Self::Do {
                expression,
                position,
            } => ctx.format(
                "%node %line;",
                &[FormatArg::Node(expression), FormatArg::Line(*position)],
            ),
            Self::Import(import) => import.print(ctx),
        }
    }

    fn children(&self) -> Vec<&dyn Node> {
        match self {
            Self::Print { expression, .. } | Self::Do { expression, .. } => {
                vec![expression as &dyn Node]
            }
            Self::Import(import) => vec![import as &dyn Node],
        }
    }

    fn position(&self) -> Option<Position> {
        match self {
            Self::Print { position, .. } | Self::Do { position, .. } => *position,
            Self::Import(import) => import.position,
        }
    }
}

/// A parsed template: the unit one compilation pass works on.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub body: Vec<Statement>,
}

impl Template {
    pub const fn new(body: Vec<Statement>) -> Self {
        Self { body }
    }
}
