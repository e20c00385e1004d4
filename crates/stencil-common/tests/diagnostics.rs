use super::*;

#[test]
fn test_format_message() {
    assert_eq!(
        format_message("'{0}' and '{1}'", &["a", "b"]),
        "'a' and 'b'"
    );
    assert_eq!(format_message("no args", &[]), "no args");
}

#[test]
fn test_from_code_uses_registered_category() {
    let diag = Diagnostic::from_code(
        diagnostic_codes::NULLSAFE_FIRST_CLASS_CALLABLE,
        &["run"],
        Some(Position::at(1, 4)),
    );
    assert_eq!(diag.category, DiagnosticCategory::Warning);
    assert!(!diag.is_error());
    assert_eq!(
        diag.message_text,
        "Nullsafe method 'run' cannot be turned into a first-class callable."
    );
}

#[test]
fn test_from_unknown_code_is_error() {
    let diag = Diagnostic::from_code(1, &["boom"], None);
    assert!(diag.is_error());
    assert_eq!(diag.message_text, "boom");
}

#[test]
fn test_codes_are_unique() {
    for (i, a) in DIAGNOSTIC_MESSAGES.iter().enumerate() {
        for b in &DIAGNOSTIC_MESSAGES[i + 1..] {
            assert_ne!(a.code, b.code);
        }
    }
}

#[test]
fn test_serialize_skips_missing_position() {
    let diag = Diagnostic::error("bad", 9006, None);
    let json = serde_json::to_string(&diag).unwrap();
    assert_eq!(
        json,
        r#"{"category":"Error","code":9006,"message_text":"bad"}"#
    );
}

#[test]
fn test_shadowing_message_names_parameter_and_call() {
    let diag = Diagnostic::from_code(
        diagnostic_codes::PLACEHOLDER_SHADOWS_VARIABLE,
        &["x", "f"],
        None,
    );
    assert_eq!(
        diag.message_text,
        "Closure parameter '$x' of 'f' would shadow the variable '$x' used by the same call."
    );
}
