use super::*;
use crate::context::EmitOptions;
use crate::nodes::ImportNode;

fn value(name: &str) -> ArgumentSlot {
    ArgumentSlot::value(Expression::var(name))
}

fn function(name: &str, args: Vec<ArgumentSlot>) -> CallExpression {
    CallExpression::function(NameOrExpression::name(name), args)
}

fn method(args: Vec<ArgumentSlot>, nullsafe: bool) -> CallExpression {
    CallExpression::method(Expression::var("obj"), Member::ident("run"), args, nullsafe)
}

fn static_call(args: Vec<ArgumentSlot>) -> CallExpression {
    CallExpression::static_method(NameOrExpression::name("Foo"), Member::ident("bar"), args)
}

fn lower(call: &CallExpression) -> String {
    let mut ctx = CodeGenContext::new(EmitOptions::sandboxed());
    lower_sandboxed(&mut ctx, call)
}

#[test]
fn test_complete_calls() {
    assert_eq!(
        lower(&function("strlen", vec![value("x")])),
        "$this->global->sandbox->call('strlen', [$x])"
    );
    assert_eq!(
        lower(&method(vec![value("x")], false)),
        "$this->global->sandbox->callMethod($obj, 'run', [$x], false)"
    );
    assert_eq!(
        lower(&method(vec![value("x")], true)),
        "$this->global->sandbox->callMethod($obj, 'run', [$x], true)"
    );
    assert_eq!(
        lower(&static_call(vec![ArgumentSlot::value(Expression::int(1))])),
        "$this->global->sandbox->call(['Foo', 'bar'], [1])"
    );
}

#[test]
fn test_qualified_name_is_passed_as_string() {
    assert_eq!(
        lower(&function("\\App\\helper", vec![])),
        r"$this->global->sandbox->call('\\App\\helper', [])"
    );
}

#[test]
fn test_dynamic_callee_and_member() {
    let call = CallExpression::function(
        NameOrExpression::expr(Expression::var("fn")),
        vec![value("x")],
    );
    assert_eq!(lower(&call), "$this->global->sandbox->call($fn, [$x])");

    let call = CallExpression::method(
        Expression::var("obj"),
        Member::expr(Expression::var("m")),
        vec![],
        false,
    );
    assert_eq!(
        lower(&call),
        "$this->global->sandbox->callMethod($obj, $m, [], false)"
    );
}

#[test]
fn test_first_class_callables() {
    assert_eq!(
        lower(&function("strlen", vec![ArgumentSlot::variadic()])),
        "$this->global->sandbox->closure('strlen')"
    );
    assert_eq!(
        lower(&method(vec![ArgumentSlot::variadic()], false)),
        "$this->global->sandbox->closure([$obj, 'run'])"
    );
    assert_eq!(
        lower(&static_call(vec![ArgumentSlot::variadic()])),
        "$this->global->sandbox->closure(['Foo', 'bar'])"
    );
}

#[test]
fn test_curried_calls() {
    assert_eq!(
        lower(&function("strlen", vec![ArgumentSlot::placeholder()])),
        "(fn($__p0) => $this->global->sandbox->call('strlen', [$__p0]))"
    );
    assert_eq!(
        lower(&method(
            vec![value("a"), ArgumentSlot::named_placeholder("limit")],
            true
        )),
        "(fn($limit) => $this->global->sandbox->callMethod($obj, 'run', [$a, 'limit' => $limit], true))"
    );
    assert_eq!(
        lower(&static_call(vec![
            ArgumentSlot::placeholder(),
            ArgumentSlot::placeholder()
        ])),
        "(fn($__p0, $__p1) => $this->global->sandbox->call(['Foo', 'bar'], [$__p0, $__p1]))"
    );
}

#[test]
fn test_custom_sandbox_ref() {
    let options = EmitOptions {
        sandbox_ref: "$policy".to_string(),
        ..EmitOptions::sandboxed()
    };
    let mut ctx = CodeGenContext::new(options);
    assert_eq!(
        lower_sandboxed(&mut ctx, &function("strlen", vec![value("x")])),
        "$policy->call('strlen', [$x])"
    );
}

fn print_statement(expression: Expression) -> Statement {
    Statement::Print {
        expression,
        position: None,
    }
}

#[test]
fn test_pass_switches_nested_calls() {
    let inner = function("trim", vec![value("x")]);
    let outer = function("strlen", vec![ArgumentSlot::value(Expression::call(inner))]);
    let mut template = Template::new(vec![print_statement(Expression::call(outer))]);

    assert_eq!(SandboxPass::new().run(&mut template), 2);

    let Statement::Print { expression, .. } = &template.body[0] else {
        panic!("expected print statement");
    };
    let mut ctx = CodeGenContext::default();
    assert_eq!(
        expression.print(&mut ctx),
        "$this->global->sandbox->call('strlen', [$this->global->sandbox->call('trim', [$x])])"
    );
}

#[test]
fn test_pass_visits_receivers_and_properties() {
    let factory = function("factory", vec![]);
    let receiver = Expression::property(Expression::call(factory), Member::ident("item"), false);
    let call = CallExpression::method(receiver, Member::ident("run"), vec![], false);
    let mut expr = Expression::call(call);

    let mut pass = SandboxPass::new();
    pass.visit_expression(&mut expr);
    assert_eq!(pass.run(&mut Template::default()), 2);

    let mut ctx = CodeGenContext::default();
    assert_eq!(
        expr.print(&mut ctx),
        "$this->global->sandbox->callMethod($this->global->sandbox->call('factory', [])->item, 'run', [], false)"
    );
}

#[test]
fn test_pass_is_idempotent() {
    let mut template = Template::new(vec![
        print_statement(Expression::call(function("strlen", vec![value("x")]))),
        Statement::Import(ImportNode {
            file: "menu.latte".to_string(),
            global: false,
            position: None,
        }),
    ]);

    assert_eq!(SandboxPass::new().run(&mut template), 1);
    let snapshot = template.clone();
    assert_eq!(SandboxPass::new().run(&mut template), 0);
    assert_eq!(template, snapshot);
}
