use super::*;
use crate::nodes::{ConcreteArgument, Expression, NameOrExpression};

fn value(name: &str) -> ArgumentSlot {
    ArgumentSlot::value(Expression::var(name))
}

fn args(slots: Vec<ArgumentSlot>) -> Arguments {
    Arguments::new(slots)
}

#[test]
fn test_shape_of() {
    let a = value("a");
    let p = ArgumentSlot::placeholder();
    let v = ArgumentSlot::variadic();

    assert_eq!(CallShape::of(&[]), CallShape::Complete);
    assert_eq!(CallShape::of(&[&a]), CallShape::Complete);
    assert_eq!(CallShape::of(&[&a, &p]), CallShape::Curried);
    assert_eq!(CallShape::of(&[&v]), CallShape::FirstClassCallable);
    // A leading variadic wins over anything after it
    assert_eq!(CallShape::of(&[&v, &a, &p]), CallShape::FirstClassCallable);
    assert_eq!(CallShape::of(&[&a, &v]), CallShape::Curried);
}

#[test]
fn test_complete_call() {
    let mut ctx = CodeGenContext::default();
    assert_eq!(ctx.lower_call("f", &args(vec![])), "f()");
    assert_eq!(
        ctx.lower_call("f", &args(vec![value("a"), value("b")])),
        "f($a, $b)"
    );
}

#[test]
fn test_named_and_spread_arguments() {
    let mut ctx = CodeGenContext::default();
    let list = args(vec![
        ArgumentSlot::Concrete(ConcreteArgument::named("limit", Expression::int(3))),
        ArgumentSlot::Concrete(ConcreteArgument::spread(Expression::var("rest"))),
    ]);
    assert_eq!(ctx.lower_call("f", &list), "f(limit: 3, ...$rest)");
}

#[test]
fn test_first_class_callable() {
    let mut ctx = CodeGenContext::default();
    assert_eq!(
        ctx.lower_call("strlen", &args(vec![ArgumentSlot::variadic()])),
        "strlen(...)"
    );
    assert_eq!(
        ctx.lower_call(
            "$obj->run",
            &args(vec![ArgumentSlot::variadic(), value("ignored")])
        ),
        "$obj->run(...)"
    );
}

#[test]
fn test_curried_single_placeholder() {
    let mut ctx = CodeGenContext::default();
    assert_eq!(
        ctx.lower_call("f", &args(vec![value("a"), ArgumentSlot::placeholder()])),
        "(fn($__p0) => f($a, $__p0))"
    );
}

#[test]
fn test_curried_parameters_follow_slot_order() {
    let mut ctx = CodeGenContext::default();
    let list = args(vec![
        ArgumentSlot::placeholder(),
        value("a"),
        ArgumentSlot::placeholder(),
    ]);
    assert_eq!(
        ctx.lower_call("f", &list),
        "(fn($__p0, $__p1) => f($__p0, $a, $__p1))"
    );
}

#[test]
fn test_curried_named_placeholder() {
    let mut ctx = CodeGenContext::default();
    let list = args(vec![
        ArgumentSlot::named_placeholder("x"),
        ArgumentSlot::placeholder(),
    ]);
    assert_eq!(
        ctx.lower_call("f", &list),
        "(fn($x, $__p1) => f(x: $x, $__p1))"
    );
}

#[test]
#[should_panic(expected = "only allowed as the first argument")]
fn test_variadic_after_first_slot_panics() {
    let mut ctx = CodeGenContext::default();
    let _ = ctx.lower_call("f", &args(vec![value("a"), ArgumentSlot::variadic()]));
}

#[test]
#[should_panic(expected = "compacted")]
fn test_lower_call_with_holes_panics() {
    let mut ctx = CodeGenContext::default();
    let mut list = args(vec![value("a"), value("b")]);
    list.remove(0);
    let _ = ctx.lower_call("f", &list);
}

#[test]
fn test_arguments_as_array() {
    let mut ctx = CodeGenContext::default();
    let list = args(vec![
        value("a"),
        ArgumentSlot::Concrete(ConcreteArgument::named("limit", Expression::int(3))),
        ArgumentSlot::Concrete(ConcreteArgument::spread(Expression::var("rest"))),
    ]);
    let (array, params) = ctx.arguments_as_array(&list);
    assert_eq!(array, "[$a, 'limit' => 3, ...$rest]");
    assert_eq!(params, "");

    let (array, params) = ctx.arguments_as_array(&args(vec![]));
    assert_eq!(array, "[]");
    assert_eq!(params, "");
}

#[test]
fn test_arguments_as_array_with_placeholders() {
    let mut ctx = CodeGenContext::default();
    let list = args(vec![
        ArgumentSlot::placeholder(),
        value("a"),
        ArgumentSlot::named_placeholder("mode"),
    ]);
    let (array, params) = ctx.arguments_as_array(&list);
    assert_eq!(array, "[$__p0, $a, 'mode' => $mode]");
    assert_eq!(params, "$__p0, $mode");
}

#[test]
fn test_lower_call_expression_by_mode() {
    let call = CallExpression::function(NameOrExpression::name("strlen"), vec![value("x")]);
    let mut ctx = CodeGenContext::default();

    assert_eq!(
        lower_call_expression(&mut ctx, &call, ExecutionMode::Direct),
        "strlen($x)"
    );
    assert_eq!(
        lower_call_expression(&mut ctx, &call, ExecutionMode::Sandboxed),
        "$this->global->sandbox->call('strlen', [$x])"
    );
}

#[test]
fn test_lowering_is_repeatable() {
    let call = CallExpression::function(
        NameOrExpression::name("f"),
        vec![ArgumentSlot::placeholder(), value("a")],
    );
    let mut ctx = CodeGenContext::default();
    let first = lower_call_expression(&mut ctx, &call, ExecutionMode::Direct);
    let second = lower_call_expression(&mut ctx, &call, ExecutionMode::Direct);
    assert_eq!(first, second);
    assert!(ctx.output.is_empty());
}

#[test]
fn test_closure_param_names_follow_placeholder_ordinals() {
    let list = args(vec![
        ArgumentSlot::named_placeholder("x"),
        value("a"),
        ArgumentSlot::placeholder(),
    ]);
    let names: Vec<String> = list
        .iter()
        .filter_map(|slot| match slot {
            ArgumentSlot::Placeholder(placeholder) => Some(placeholder),
            _ => None,
        })
        .enumerate()
        .map(|(ordinal, placeholder)| closure_param_name(placeholder, ordinal))
        .collect();
    assert_eq!(names, ["x", "__p1"]);

    let mut ctx = CodeGenContext::default();
    let (_, params) = ctx.arguments_as_array(&list);
    assert_eq!(params, "$x, $__p1");
}

#[test]
fn test_shadowing_placeholder_is_caught_by_validation() {
    use crate::validate::validate_call;
    use stencil_common::diagnostics::diagnostic_codes;

    let call = CallExpression::function(
        NameOrExpression::name("f"),
        vec![
            ArgumentSlot::named_placeholder("x"),
            ArgumentSlot::Concrete(ConcreteArgument::named("y", Expression::var("x"))),
        ],
    );
    // Lowering prints whatever it is given; the parameter captures `$x`.
    let mut ctx = CodeGenContext::default();
    assert_eq!(call.lower(&mut ctx), "(fn($x) => f(x: $x, y: $x))");

    let codes: Vec<u32> = validate_call(&call, ExecutionMode::Direct)
        .iter()
        .map(|d| d.code)
        .collect();
    assert_eq!(codes, [diagnostic_codes::PLACEHOLDER_SHADOWS_VARIABLE]);
}
