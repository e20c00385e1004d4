//! Centralized limits and thresholds for the template compiler.
//!
//! Lowering recurses once per nested call (a call inside an argument, a
//! receiver or a callee adds a frame), so deeply nested trees are rejected
//! by the validation pass before they reach the printer.

/// Maximum nesting depth of call expressions inside one expression.
///
/// ```text
/// {= f(g(h(i(j($x)))))}   // depth 5
/// ```
///
/// Trees nested deeper than this are reported as errors by the validation
/// pass rather than lowered.
///
/// Kept well below serde_json's default recursion limit of 128: in the JSON
/// tree format each nested call costs six levels, so a chain of
/// `MAX_CALL_NESTING_DEPTH + 1` calls still deserializes and reaches the
/// validation pass.
pub const MAX_CALL_NESTING_DEPTH: u32 = 16;

/// Initial capacity of the output buffer of a code generation context.
pub const OUTPUT_BUFFER_CAPACITY: usize = 1024;
