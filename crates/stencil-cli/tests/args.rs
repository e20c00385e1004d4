use super::*;
use clap::CommandFactory;

#[test]
fn test_command_is_well_formed() {
    CliArgs::command().debug_assert();
}

#[test]
fn test_defaults() {
    let args = CliArgs::try_parse_from(["stencil", "page.json"]).unwrap();
    assert_eq!(args.input, PathBuf::from("page.json"));
    assert!(!args.sandbox);
    assert!(args.sandbox_ref.is_none());
    assert!(args.config.is_none());
    assert!(args.out.is_none());
    assert!(!args.diagnostics_json);
}

#[test]
fn test_camel_case_and_kebab_case_flags() {
    let camel = CliArgs::try_parse_from([
        "stencil",
        "page.json",
        "--sandbox",
        "--sandboxRef",
        "$policy",
        "--noLineMarkers",
        "--diagnosticsJson",
    ])
    .unwrap();
    let kebab = CliArgs::try_parse_from([
        "stencil",
        "page.json",
        "--sandbox",
        "--sandbox-ref",
        "$policy",
        "--no-line-markers",
        "--diagnostics-json",
    ])
    .unwrap();

    for args in [camel, kebab] {
        assert!(args.sandbox);
        assert_eq!(args.sandbox_ref.as_deref(), Some("$policy"));
        assert!(args.no_line_markers);
        assert!(args.diagnostics_json);
    }
}

#[test]
fn test_short_flags() {
    let args =
        CliArgs::try_parse_from(["stencil", "page.json", "-c", "conf.json", "-o", "page.php"])
            .unwrap();
    assert_eq!(args.config, Some(PathBuf::from("conf.json")));
    assert_eq!(args.out, Some(PathBuf::from("page.php")));
}

#[test]
fn test_input_is_required() {
    assert!(CliArgs::try_parse_from(["stencil"]).is_err());
}
