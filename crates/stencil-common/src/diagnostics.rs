//! Diagnostic types and message lookup.
//!
//! Lowering assumes a well-formed tree and panics when it is not. The
//! validation pass checks those preconditions ahead of time and reports
//! them through the types defined here.

use serde::Serialize;

use crate::position::Position;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const VARIADIC_PLACEHOLDER_NOT_FIRST: u32 = 9001;
    pub const ARGUMENTS_AFTER_VARIADIC_PLACEHOLDER: u32 = 9002;
    pub const DUPLICATE_PLACEHOLDER_NAME: u32 = 9003;
    pub const PLACEHOLDER_NAME_COLLIDES_WITH_ARGUMENT: u32 = 9004;
    pub const SPREAD_ARGUMENT_WITH_NAME: u32 = 9005;
    pub const ABSENT_ARGUMENT_SLOT: u32 = 9006;
    pub const CALL_NESTING_TOO_DEEP: u32 = 9007;
    pub const NULLSAFE_FIRST_CLASS_CALLABLE: u32 = 9008;
    pub const PLACEHOLDER_SHADOWS_VARIABLE: u32 = 9009;
    pub const RESERVED_PLACEHOLDER_NAME: u32 = 9010;
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::VARIADIC_PLACEHOLDER_NOT_FIRST,
        category: DiagnosticCategory::Error,
        message: "Variadic placeholder '...' must be the first argument of '{0}'.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::ARGUMENTS_AFTER_VARIADIC_PLACEHOLDER,
        category: DiagnosticCategory::Error,
        message: "No arguments may follow the variadic placeholder '...' in '{0}'.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::DUPLICATE_PLACEHOLDER_NAME,
        category: DiagnosticCategory::Error,
        message: "Duplicate placeholder name '{0}'.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::PLACEHOLDER_NAME_COLLIDES_WITH_ARGUMENT,
        category: DiagnosticCategory::Error,
        message: "Placeholder name '{0}' is already used by a named argument.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::SPREAD_ARGUMENT_WITH_NAME,
        category: DiagnosticCategory::Error,
        message: "Argument '{0}' cannot be both spread and named.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::ABSENT_ARGUMENT_SLOT,
        category: DiagnosticCategory::Error,
        message: "Argument list of '{0}' has removed slots that were never compacted.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::CALL_NESTING_TOO_DEEP,
        category: DiagnosticCategory::Error,
        message: "Calls are nested more than {0} levels deep.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::NULLSAFE_FIRST_CLASS_CALLABLE,
        category: DiagnosticCategory::Warning,
        message: "Nullsafe method '{0}' cannot be turned into a first-class callable.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::PLACEHOLDER_SHADOWS_VARIABLE,
        category: DiagnosticCategory::Error,
        message: "Closure parameter '${0}' of '{1}' would shadow the variable '${0}' used by the same call.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::RESERVED_PLACEHOLDER_NAME,
        category: DiagnosticCategory::Error,
        message: "'${0}' cannot be used as a placeholder name.",
    },
];

/// A diagnostic attached to a template position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub message_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Diagnostic {
    /// Create a diagnostic from a registered code, filling `{0}`, `{1}`, ...
    ///
    /// Unknown codes produce an error with the raw arguments as text.
    #[must_use]
    pub fn from_code(code: u32, args: &[&str], position: Option<Position>) -> Self {
        match get_diagnostic_message(code) {
            Some(message) => Self {
                category: message.category,
                code,
                message_text: format_message(message.message, args),
                position,
            },
            None => Self::error(args.join(" "), code, position),
        }
    }

    /// Create a new error diagnostic.
    #[must_use]
    pub fn error(message: impl Into<String>, code: u32, position: Option<Position>) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            message_text: message.into(),
            position,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

#[cfg(test)]
#[path = "../tests/diagnostics.rs"]
mod tests;
