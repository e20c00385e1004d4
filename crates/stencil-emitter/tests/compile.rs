use super::*;
use crate::nodes::{ArgumentSlot, CallExpression, Expression, ImportNode, NameOrExpression, Statement};
use stencil_common::Position;

fn strlen_x() -> Expression {
    Expression::call(CallExpression::function(
        NameOrExpression::name("strlen"),
        vec![ArgumentSlot::value(Expression::var("x"))],
    ))
}

fn import(file: &str, global: bool) -> Statement {
    Statement::Import(ImportNode {
        file: file.to_string(),
        global,
        position: None,
    })
}

#[test]
fn test_empty_template() {
    let compiled = compile_template(Template::default(), EmitOptions::default());
    assert_eq!(compiled, CompiledTemplate::default());
}

#[test]
fn test_print_and_do_statements() {
    let template = Template::new(vec![
        Statement::Print {
            expression: strlen_x(),
            position: Some(Position::at(1, 2)),
        },
        Statement::Do {
            expression: strlen_x(),
            position: None,
        },
    ]);
    let compiled = compile_template(template, EmitOptions::default());
    assert_eq!(
        compiled.main,
        "echo strlen($x) /* line 1:2 */;\nstrlen($x);\n"
    );
    assert!(compiled.initialization.is_empty());
}

#[test]
fn test_global_import_goes_to_initialization() {
    let template = Template::new(vec![import("head.latte", true), import("$file", false)]);
    let compiled = compile_template(template, EmitOptions::default());

    assert_eq!(
        compiled.initialization,
        "$this->createTemplate('head.latte', $this->params, \"import\")->render();\n"
    );
    assert_eq!(
        compiled.main,
        "$this->createTemplate($file, $this->params, \"import\")->render();\n"
    );
}

#[test]
fn test_sandbox_option_rewrites_calls() {
    let template = Template::new(vec![Statement::Print {
        expression: strlen_x(),
        position: None,
    }]);
    let compiled = compile_template(template, EmitOptions::sandboxed());
    assert_eq!(
        compiled.main,
        "echo $this->global->sandbox->call('strlen', [$x]);\n"
    );
}
