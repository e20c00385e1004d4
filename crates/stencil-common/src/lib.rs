//! Common types and utilities for the stencil template compiler.
//!
//! This crate provides foundational types used across all stencil crates:
//! - Source positions (`Position`) attached to IR nodes
//! - Diagnostics reported by precondition checks (`Diagnostic`)
//! - Compiler limits and thresholds

// Position type for line/column source locations
pub mod position;
pub use position::Position;

// Diagnostics shared by the validation pass and the CLI reporter
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Centralized limits and thresholds
pub mod limits;
