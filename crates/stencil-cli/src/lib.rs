//! Command-line driver for the stencil template compiler.
//!
//! Reads a template tree serialized as JSON by the external parser,
//! validates its calls, and writes the generated PHP.

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod tracing_config;
