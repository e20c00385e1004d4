//! Tracing setup for the `stencil` binary.
//!
//! `STENCIL_LOG` takes `EnvFilter` directives plus shorthands for the
//! compiler stages:
//!
//! | shorthand | enables |
//! |---|---|
//! | `lowering` | per-call lowering spans, direct and sandboxed (`trace`) |
//! | `passes` | sandbox and validation pass summaries, compile span (`debug`) |
//! | `driver` | config discovery and the driver (`debug`) |
//! | a bare level | that level for the stencil crates only |
//!
//! ```bash
//! STENCIL_LOG=lowering STENCIL_LOG_FORMAT=tree stencil page.json
//! STENCIL_LOG=passes,driver stencil --sandbox page.json
//! ```
//!
//! `RUST_LOG` is used verbatim when `STENCIL_LOG` is unset. Without either,
//! nothing is installed. All output goes to stderr; stdout carries the
//! generated PHP.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const STENCIL_CRATES: [&str; 3] = ["stencil_cli", "stencil_emitter", "stencil_common"];

/// Tracing output format, from `STENCIL_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact lines without timestamps.
    Text,
    /// Lowering spans nested the way calls nest in the template.
    Tree,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// `None` for an unrecognised name. An empty value means `Text`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Some(Self::Text),
            "tree" => Some(Self::Tree),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Expand `STENCIL_LOG` shorthands into `EnvFilter` directives. Anything
/// that is not a shorthand passes through unchanged.
pub fn expand_filter(directives: &str) -> String {
    directives
        .split(',')
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .map(expand_directive)
        .collect::<Vec<_>>()
        .join(",")
}

fn expand_directive(directive: &str) -> String {
    match directive {
        "lowering" => "stencil_emitter::lowering=trace,stencil_emitter::sandbox=trace".to_string(),
        "passes" => "stencil_emitter::sandbox=debug,stencil_emitter::validate=debug,\
                     stencil_emitter::compile=debug"
            .to_string(),
        "driver" => "stencil_cli=debug".to_string(),
        level if is_level(level) => STENCIL_CRATES
            .iter()
            .map(|krate| format!("{krate}={}", level.to_ascii_lowercase()))
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

fn is_level(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error" | "off"
    )
}

/// Install the global subscriber when `STENCIL_LOG` or `RUST_LOG` is set.
pub fn init_tracing() {
    let filter = match (std::env::var("STENCIL_LOG"), std::env::var("RUST_LOG")) {
        (Ok(directives), _) => EnvFilter::builder().parse_lossy(expand_filter(&directives)),
        (Err(_), Ok(_)) => EnvFilter::from_default_env(),
        (Err(_), Err(_)) => return,
    };

    let requested = std::env::var("STENCIL_LOG_FORMAT").unwrap_or_default();
    let format = LogFormat::parse(&requested);

    match format.unwrap_or(LogFormat::Text) {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_bracketed_fields(true)
                .with_targets(false);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            let text_layer = fmt::layer()
                .compact()
                .without_time()
                .with_writer(std::io::stderr);

            Registry::default().with(filter).with(text_layer).init();
        }
    }

    if format.is_none() {
        tracing::warn!(format = %requested, "unknown STENCIL_LOG_FORMAT, using text");
    }
}

#[cfg(test)]
#[path = "../tests/tracing_config.rs"]
mod tests;
