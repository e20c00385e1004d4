//! Argument slots of a call.
//!
//! A slot is either a concrete argument or a placeholder marker. The order of
//! slots maps onto the callee's parameter order and never changes after
//! construction, except through [`Arguments::remove`] + [`Arguments::compact`].

use serde::{Deserialize, Serialize};

use super::{Expression, IdentifierNode, Node};
use crate::context::CodeGenContext;
use stencil_common::Position;

/// `$x`, `...$xs`, `name: $x`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConcreteArgument {
    pub value: Expression,
    #[serde(default)]
    pub spread: bool,
    #[serde(default)]
    pub name: Option<IdentifierNode>,
    #[serde(default)]
    pub position: Option<Position>,
}

impl ConcreteArgument {
    pub const fn new(value: Expression) -> Self {
        Self {
            value,
            spread: false,
            name: None,
            position: None,
        }
    }

    pub const fn spread(value: Expression) -> Self {
        Self {
            value,
            spread: true,
            name: None,
            position: None,
        }
    }

    pub fn named(name: impl Into<String>, value: Expression) -> Self {
        Self {
            value,
            spread: false,
            name: Some(IdentifierNode::new(name)),
            position: None,
        }
    }
}

impl Node for ConcreteArgument {
    /// Call-site form: `name: $x` or `...$xs`.
    fn print(&self, ctx: &mut CodeGenContext) -> String {
        let value = self.value.print(ctx);
        match (&self.name, self.spread) {
            (Some(name), _) => format!("{name}: {value}"),
            (None, true) => format!("...{value}"),
            (None, false) => value,
        }
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> = Vec::with_capacity(2);
        if let Some(name) = &self.name {
            children.push(name);
        }
        children.push(&self.value);
        children
    }

    fn position(&self) -> Option<Position> {
        self.position
    }
}

/// `?` or `name: ?`: an argument left open for the caller of the
/// synthesized closure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentPlaceholder {
    #[serde(default)]
    pub name: Option<IdentifierNode>,
    #[serde(default)]
    pub position: Option<Position>,
}

impl ArgumentPlaceholder {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(IdentifierNode::new(name)),
            position: None,
        }
    }
}

impl Node for ArgumentPlaceholder {
    fn print(&self, _ctx: &mut CodeGenContext) -> String {
        match &self.name {
            Some(name) => format!("{name}: ?"),
            None => "?".to_string(),
        }
    }

    fn children(&self) -> Vec<&dyn Node> {
        match &self.name {
            Some(name) => vec![name as &dyn Node],
            None => Vec::new(),
        }
    }

    fn position(&self) -> Option<Position> {
        self.position
    }
}

/// `...` in argument position: the call becomes a first-class callable and
/// every argument is supplied later by its caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariadicPlaceholder {
    #[serde(default)]
    pub position: Option<Position>,
}

impl Node for VariadicPlaceholder {
    fn print(&self, _ctx: &mut CodeGenContext) -> String {
        "...".to_string()
    }

    fn children(&self) -> Vec<&dyn Node> {
        Vec::new()
    }

    fn position(&self) -> Option<Position> {
        self.position
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ArgumentSlot {
    Concrete(ConcreteArgument),
    Placeholder(ArgumentPlaceholder),
    Variadic(VariadicPlaceholder),
}

impl ArgumentSlot {
    pub const fn value(value: Expression) -> Self {
        Self::Concrete(ConcreteArgument::new(value))
    }

    pub const fn placeholder() -> Self {
        Self::Placeholder(ArgumentPlaceholder {
            name: None,
            position: None,
        })
    }

    pub fn named_placeholder(name: impl Into<String>) -> Self {
        Self::Placeholder(ArgumentPlaceholder::named(name))
    }

    pub const fn variadic() -> Self {
        Self::Variadic(VariadicPlaceholder { position: None })
    }

    pub const fn is_placeholder(&self) -> bool {
        !matches!(self, Self::Concrete(_))
    }

    pub const fn is_variadic(&self) -> bool {
        matches!(self, Self::Variadic(_))
    }
}

impl Node for ArgumentSlot {
    fn print(&self, ctx: &mut CodeGenContext) -> String {
        match self {
            Self::Concrete(arg) => arg.print(ctx),
            Self::Placeholder(placeholder) => placeholder.print(ctx),
            Self::Variadic(variadic) => variadic.print(ctx),
        }
    }

    fn children(&self) -> Vec<&dyn Node> {
        match self {
            Self::Concrete(arg) => arg.children(),
            Self::Placeholder(placeholder) => placeholder.children(),
            Self::Variadic(_) => Vec::new(),
        }
    }

    fn position(&self) -> Option<Position> {
        match self {
            Self::Concrete(arg) => arg.position,
            Self::Placeholder(placeholder) => placeholder.position,
            Self::Variadic(variadic) => variadic.position,
        }
    }
}

/// Ordered argument slots of one call.
///
/// Rewrite passes may [`remove`](Self::remove) slots while they hold
/// indices into the list; removal leaves a hole so the indices stay valid.
/// The pass must [`compact`](Self::compact) afterwards: printing a list with
/// holes is an invariant violation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arguments {
    slots: Vec<Option<ArgumentSlot>>,
}

impl Arguments {
    pub fn new(slots: Vec<ArgumentSlot>) -> Self {
        Self {
            slots: slots.into_iter().map(Some).collect(),
        }
    }

    /// Number of slots, holes included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Present slots in order.
    pub fn iter(&self) -> impl Iterator<Item = &ArgumentSlot> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ArgumentSlot> {
        self.slots.iter_mut().flatten()
    }

    pub fn get(&self, index: usize) -> Option<&ArgumentSlot> {
        self.slots.get(index)?.as_ref()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ArgumentSlot> {
        self.slots.get_mut(index)?.as_mut()
    }

    pub fn push(&mut self, slot: ArgumentSlot) {
        self.slots.push(Some(slot));
    }

    /// Take the slot out, leaving a hole at `index`.
    pub fn remove(&mut self, index: usize) -> Option<ArgumentSlot> {
        self.slots.get_mut(index)?.take()
    }

    pub fn has_holes(&self) -> bool {
        self.slots.iter().any(Option::is_none)
    }

    /// Drop holes left by [`remove`](Self::remove), keeping slot order.
    pub fn compact(&mut self) {
        self.slots.retain(Option::is_some);
    }

    /// True iff any present slot is a placeholder of either kind.
    pub fn is_partial(&self) -> bool {
        self.iter().any(ArgumentSlot::is_placeholder)
    }

    /// The slots as a dense sequence, for printing.
    ///
    /// # Panics
    ///
    /// Panics when the list still has holes.
    pub fn expect_compacted(&self) -> Vec<&ArgumentSlot> {
        assert!(
            !self.has_holes(),
            "argument list must be compacted before it is printed"
        );
        self.iter().collect()
    }
}

impl From<Vec<ArgumentSlot>> for Arguments {
    fn from(slots: Vec<ArgumentSlot>) -> Self {
        Self::new(slots)
    }
}

impl FromIterator<ArgumentSlot> for Arguments {
    fn from_iter<I: IntoIterator<Item = ArgumentSlot>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().map(Some).collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/arguments.rs"]
mod tests;
