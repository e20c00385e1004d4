//! Call lowering.
//!
//! Every call prints in one of three shapes, picked from its argument list
//! alone:
//!
//! | shape | condition | direct output |
//! |---|---|---|
//! | `Complete` | no placeholders | `f($a, $b)` |
//! | `FirstClassCallable` | first slot is `...` | `f(...)` |
//! | `Curried` | any other placeholder | `(fn($__p0) => f($a, $__p0))` |
//!
//! The sandboxed variants of the same shapes live in [`crate::sandbox`].

use tracing::trace;

use crate::context::CodeGenContext;
use crate::nodes::{
    ArgumentPlaceholder, ArgumentSlot, Arguments, CallExpression, ExecutionMode, Node,
};
use crate::sandbox::lower_sandboxed;

/// Lowering shape of a call, decided by its argument slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallShape {
    /// Every slot is a concrete argument: emit the call.
    Complete,
    /// The first slot is a variadic placeholder: emit an uninvoked callable.
    FirstClassCallable,
    /// Some slots are placeholders: emit a closure over the open slots.
    Curried,
}

impl CallShape {
    pub fn of(slots: &[&ArgumentSlot]) -> Self {
        if slots.first().is_some_and(|slot| slot.is_variadic()) {
            Self::FirstClassCallable
        } else if slots.iter().any(|slot| slot.is_placeholder()) {
            Self::Curried
        } else {
            Self::Complete
        }
    }

    /// # Panics
    ///
    /// Panics when the argument list has uncompacted holes.
    pub fn of_arguments(args: &Arguments) -> Self {
        Self::of(&args.expect_compacted())
    }
}

/// Lower a call in the given execution mode.
#[tracing::instrument(level = "trace", skip_all, fields(call = %call.label(), mode = ?mode))]
pub fn lower_call_expression(
    ctx: &mut CodeGenContext,
    call: &CallExpression,
    mode: ExecutionMode,
) -> String {
    match mode {
        ExecutionMode::Direct => call.lower(ctx),
        ExecutionMode::Sandboxed => lower_sandboxed(ctx, call),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ArgumentStyle {
    /// `f(name: $x, ...$xs)`
    Call,
    /// `['name' => $x, ...$xs]`
    Array,
}

impl CodeGenContext {
    /// Lower a call to `callee` (already rendered) with `args`.
    ///
    /// # Panics
    ///
    /// Panics when `args` has uncompacted holes or a variadic placeholder
    /// anywhere but in the first slot.
    pub fn lower_call(&mut self, callee: &str, args: &Arguments) -> String {
        let slots = args.expect_compacted();
        let shape = CallShape::of(&slots);
        trace!(callee, ?shape, slots = slots.len(), "lowering call");

        match shape {
            CallShape::Complete => {
                let (args, _) = self.render_slots(&slots, ArgumentStyle::Call);
                format!("{callee}({args})")
            }
            CallShape::FirstClassCallable => format!("{callee}(...)"),
            CallShape::Curried => {
                let (args, params) = self.render_slots(&slots, ArgumentStyle::Call);
                format!("(fn({params}) => {callee}({args}))")
            }
        }
    }

    /// Render `args` as one PHP array literal.
    ///
    /// Returns the array and the closure parameter list for the
    /// placeholders it references (empty when the call is not partial).
    ///
    /// # Panics
    ///
    /// Panics when `args` has uncompacted holes or contains a variadic
    /// placeholder, which has no array form.
    pub fn arguments_as_array(&mut self, args: &Arguments) -> (String, String) {
        let slots = args.expect_compacted();
        let (items, params) = self.render_slots(&slots, ArgumentStyle::Array);
        (format!("[{items}]"), params)
    }

    /// Call-site argument list of a complete call, without parentheses.
    pub fn render_call_arguments(&mut self, args: &Arguments) -> String {
        let slots = args.expect_compacted();
        self.render_slots(&slots, ArgumentStyle::Call).0
    }

    /// Render slots left to right. Each placeholder gets the next closure
    /// parameter; the parameter list is returned alongside the items.
    fn render_slots(&mut self, slots: &[&ArgumentSlot], style: ArgumentStyle) -> (String, String) {
        let mut items = Vec::with_capacity(slots.len());
        let mut params: Vec<String> = Vec::new();

        for slot in slots {
            let item = match slot {
                ArgumentSlot::Concrete(arg) => {
                    let value = arg.value.print(self);
                    let label = arg.name.as_ref().map(|name| name.name.as_str());
                    render_item(style, label, arg.spread, value)
                }
                ArgumentSlot::Placeholder(placeholder) => {
                    let param = format!("${}", closure_param_name(placeholder, params.len()));
                    let label = placeholder.name.as_ref().map(|name| name.name.as_str());
                    let item = render_item(style, label, false, param.clone());
                    params.push(param);
                    item
                }
                ArgumentSlot::Variadic(_) => {
                    panic!("variadic placeholder '...' is only allowed as the first argument")
                }
            };
            items.push(item);
        }

        (items.join(", "), params.join(", "))
    }
}

/// Parameter the synthesized closure declares for a placeholder, without
/// the `$`: `name` for `name: ?`, otherwise `__p{ordinal}`.
///
/// `ordinal` counts the placeholders before this one, named or not.
pub(crate) fn closure_param_name(placeholder: &ArgumentPlaceholder, ordinal: usize) -> String {
    match &placeholder.name {
        Some(name) => name.name.clone(),
        None => format!("__p{ordinal}"),
    }
}

fn render_item(style: ArgumentStyle, label: Option<&str>, spread: bool, value: String) -> String {
    match (style, label) {
        (ArgumentStyle::Call, Some(label)) => format!("{label}: {value}"),
        (ArgumentStyle::Array, Some(label)) => {
            format!("{} => {value}", CodeGenContext::encode_string(label))
        }
        (_, None) if spread => format!("...{value}"),
        (_, None) => value,
    }
}

#[cfg(test)]
#[path = "../tests/lowering.rs"]
mod tests;
