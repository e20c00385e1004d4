//! Whole-template compilation from the JSON tree form.

use stencil_emitter::{EmitOptions, Template, compile_template, validate_template};

const TEMPLATE: &str = r#"{
    "body": [
        {"Import": {"file": "layout.latte", "global": true, "position": {"line": 1, "column": 1}}},
        {"Print": {
            "expression": {"Call": {"call": {
                "target": {"Function": {"callee": {"Name": {"parts": ["strlen"]}}}},
                "args": [{"Concrete": {"value": {"Variable": {"name": "name"}}}}]
            }}},
            "position": {"line": 2, "column": 1}
        }},
        {"Do": {
            "expression": {"Call": {"call": {
                "target": {"Method": {
                    "receiver": {"Variable": {"name": "list"}},
                    "member": {"Identifier": {"name": "map"}},
                    "nullsafe": true
                }},
                "args": [{"Placeholder": {}}]
            }}}
        }}
    ]
}"#;

fn template() -> Template {
    serde_json::from_str(TEMPLATE).unwrap()
}

#[test]
fn compiles_direct() {
    let template = template();
    assert!(validate_template(&template, &EmitOptions::default()).is_empty());

    let compiled = compile_template(template, EmitOptions::default());
    assert_eq!(
        compiled.initialization,
        "$this->createTemplate('layout.latte', $this->params, \"import\")->render() /* line 1:1 */;\n"
    );
    assert_eq!(
        compiled.main,
        "echo strlen($name) /* line 2:1 */;\n(fn($__p0) => $list?->map($__p0));\n"
    );
}

#[test]
fn compiles_sandboxed_without_markers() {
    let options = EmitOptions {
        line_markers: false,
        ..EmitOptions::sandboxed()
    };
    let compiled = compile_template(template(), options);
    assert_eq!(
        compiled.main,
        "echo $this->global->sandbox->call('strlen', [$name]);\n\
         (fn($__p0) => $this->global->sandbox->callMethod($list, 'map', [$__p0], true));\n"
    );
}

#[test]
fn compiled_output_serializes() {
    let compiled = compile_template(Template::default(), EmitOptions::default());
    assert_eq!(
        serde_json::to_string(&compiled).unwrap(),
        r#"{"initialization":"","main":""}"#
    );
}
