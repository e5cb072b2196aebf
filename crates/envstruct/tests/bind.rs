//! End-to-end binding tests through `#[derive(EnvStruct)]`.
//!
//! Tests that touch the process environment are `#[serial]`.

#![allow(clippy::pedantic)]
#![allow(dead_code)]

use std::collections::HashMap;
use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;

use envstruct::{
    Binder, EnvStruct, Error, HelpFn, Parser, Registry, Sources, ValueError,
};
use serial_test::serial;

fn with_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    unsafe {
        for (k, v) in vars {
            std::env::set_var(*k, *v);
        }
    }

    let result = f();

    unsafe {
        for (k, _) in vars {
            std::env::remove_var(*k);
        }
    }

    result
}

fn cleanup_env(vars: &[&str]) {
    unsafe {
        for k in vars {
            std::env::remove_var(*k);
        }
    }
}

fn binder() -> Binder {
    Binder::default().without_dotenv()
}

// ============================================================================
// Port scenarios
// ============================================================================

#[derive(Debug, EnvStruct)]
struct PortConfig {
    #[env(var = "BIND_TEST_PORT", description = "listen port", parser = "port")]
    port: u16,
}

#[test]
#[serial]
fn test_port_not_found() {
    cleanup_env(&["BIND_TEST_PORT"]);

    let err = binder().bind::<PortConfig>().unwrap_err();

    assert!(matches!(err, Error::Parse { field: "port", .. }));
    assert!(matches!(
        err.cause(),
        Some(Error::NotFound { var, .. }) if var == "BIND_TEST_PORT"
    ));
}

#[test]
#[serial]
fn test_port_zero_rejected() {
    let err = with_env(&[("BIND_TEST_PORT", "0")], || {
        binder().bind::<PortConfig>().unwrap_err()
    });

    assert!(matches!(err.find::<ValueError>(), Some(ValueError::ZeroPort)));
    assert!(err.to_string().contains("port cannot be 0"));
}

#[test]
#[serial]
fn test_port_from_environment() {
    let config = with_env(&[("BIND_TEST_PORT", "8080")], || {
        binder().bind::<PortConfig>().unwrap()
    });

    assert_eq!(config.port, 8080);
}

// ============================================================================
// Defaults and source priority
// ============================================================================

#[derive(Debug, EnvStruct)]
struct NameConfig {
    #[env(var = "BIND_TEST_NAME", description = "x", default = "bar", parser = "string")]
    name: String,
}

#[test]
#[serial]
fn test_default_used_without_override() {
    cleanup_env(&["BIND_TEST_NAME"]);

    let config = binder().bind::<NameConfig>().unwrap();
    assert_eq!(config.name, "bar");
}

#[test]
#[serial]
fn test_environment_beats_default() {
    let config = with_env(&[("BIND_TEST_NAME", "env")], || {
        binder().bind::<NameConfig>().unwrap()
    });

    assert_eq!(config.name, "env");
}

#[test]
#[serial]
fn test_dotenv_file_shadows_environment() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "BIND_TEST_NAME=from-file").unwrap();

    let config = with_env(&[("BIND_TEST_NAME", "from-env")], || {
        Binder::default()
            .with_dotenv_path(file.path())
            .bind::<NameConfig>()
            .unwrap()
    });

    assert_eq!(config.name, "from-file");
}

#[test]
#[serial]
fn test_missing_dotenv_file_is_ignored() {
    cleanup_env(&["BIND_TEST_NAME"]);
    let dir = tempfile::tempdir().unwrap();

    let config = Binder::default()
        .with_dotenv_path(dir.path().join("absent.env"))
        .bind::<NameConfig>()
        .unwrap();

    assert_eq!(config.name, "bar");
}

#[derive(Debug, EnvStruct)]
struct KindDerived {
    #[env(var = "BIND_TEST_KIND", description = "no parser annotation")]
    value: String,
}

#[test]
#[serial]
fn test_string_parser_derived_from_kind() {
    let config = with_env(&[("BIND_TEST_KIND", "derived")], || {
        binder().bind::<KindDerived>().unwrap()
    });

    assert_eq!(config.value, "derived");
}

#[test]
#[serial]
fn test_string_fallback_is_empty() {
    cleanup_env(&["BIND_TEST_KIND"]);

    let config = binder().bind::<KindDerived>().unwrap();
    assert_eq!(config.value, "");
}

// ============================================================================
// Tag errors
// ============================================================================

#[derive(Debug, EnvStruct)]
struct MissingDescription {
    #[env(var = "BIND_TEST_TAG", parser = "string")]
    value: String,
}

#[derive(Debug, EnvStruct)]
struct MissingVar {
    #[env(description = "no key", parser = "string")]
    value: String,
}

#[derive(Debug, EnvStruct)]
struct MissingBoth {
    #[env(parser = "string")]
    value: String,
}

fn missing_tags(err: &Error) -> Vec<&'static str> {
    match err.cause() {
        Some(Error::TagNotSet { tag }) => vec![*tag],
        Some(Error::Multiple { errors }) => errors
            .iter()
            .map(|e| match e {
                Error::TagNotSet { tag } => *tag,
                other => panic!("unexpected {other:?}"),
            })
            .collect(),
        other => panic!("unexpected cause {other:?}"),
    }
}

#[test]
fn test_missing_description() {
    let err = binder().bind::<MissingDescription>().unwrap_err();

    assert!(matches!(err, Error::TagRead { field: "value", .. }));
    assert_eq!(missing_tags(&err), vec!["description"]);
}

#[test]
fn test_missing_var() {
    let err = binder().bind::<MissingVar>().unwrap_err();
    assert_eq!(missing_tags(&err), vec!["var"]);
}

#[test]
fn test_missing_var_and_description_reported_together() {
    let err = binder().bind::<MissingBoth>().unwrap_err();

    assert_eq!(missing_tags(&err), vec!["var", "description"]);
    let message = err.to_string();
    assert!(message.contains("\"var\""));
    assert!(message.contains("\"description\""));
}

#[derive(Debug, EnvStruct)]
struct NoParserForKind {
    #[env(var = "BIND_TEST_NO_KIND", description = "u32 has no derived parser")]
    value: u32,
}

#[test]
fn test_missing_parser_for_kind() {
    let err = binder().bind::<NoParserForKind>().unwrap_err();
    assert_eq!(missing_tags(&err), vec!["parser"]);
}

#[derive(Debug, EnvStruct)]
struct TagErrorBeforeValues {
    #[env(var = "BIND_TEST_ORDER_PORT", description = "unset", parser = "port")]
    port: u16,

    #[env(var = "BIND_TEST_ORDER_NAME", parser = "string")]
    name: String,
}

#[test]
#[serial]
fn test_tag_pass_runs_before_any_lookup() {
    cleanup_env(&["BIND_TEST_ORDER_PORT"]);

    // The port is unset, but the second field's tag error wins.
    let err = binder().bind::<TagErrorBeforeValues>().unwrap_err();
    assert!(matches!(err, Error::TagRead { field: "name", .. }));
}

// ============================================================================
// Registry errors
// ============================================================================

#[derive(Debug, EnvStruct)]
struct UnknownParser {
    #[env(var = "BIND_TEST_UNKNOWN", description = "x", default = "1", parser = "nope")]
    value: String,
}

#[test]
fn test_parser_not_found() {
    let err = binder().bind::<UnknownParser>().unwrap_err();

    assert!(matches!(err, Error::Parse { field: "value", .. }));
    assert!(matches!(
        err.cause(),
        Some(Error::ParserNotFound { name }) if name == "nope"
    ));
}

#[derive(Debug, EnvStruct)]
struct WrongType {
    #[env(var = "BIND_TEST_WRONG", description = "x", default = "80", parser = "port")]
    value: String,
}

#[test]
fn test_mismatched_types() {
    let err = binder().bind::<WrongType>().unwrap_err();

    match err {
        Error::MismatchedTypes {
            field,
            parser_type,
            field_type,
        } => {
            assert_eq!(field, "value");
            assert_eq!(parser_type, "u16");
            assert_eq!(field_type, std::any::type_name::<String>());
        }
        other => panic!("expected MismatchedTypes, got {other:?}"),
    }
}

// ============================================================================
// Help
// ============================================================================

#[derive(Debug, EnvStruct)]
struct WithHelp {
    #[env(var = "BIND_TEST_HELP_PORT", description = "listen port", default = "8080", parser = "port")]
    port: u16,

    #[env(var = "BIND_TEST_HELP_NAME", description = "service name", default = "svc")]
    name: String,

    #[env_help]
    help: HelpFn,

    #[env_help]
    second: HelpFn,

    untouched: u32,
}

#[test]
#[serial]
fn test_help_callback_lists_fields_in_order() {
    cleanup_env(&["BIND_TEST_HELP_PORT", "BIND_TEST_HELP_NAME"]);

    let config = binder().bind::<WithHelp>().unwrap();

    let expected = "Environment:\n\
                    BIND_TEST_HELP_PORT:  [u16]     (default: 8080)  listen port\n\
                    BIND_TEST_HELP_NAME:  [String]  (default: svc)   service name\n";
    assert_eq!(config.help.call(), expected);
}

#[test]
#[serial]
fn test_only_first_help_field_bound() {
    cleanup_env(&["BIND_TEST_HELP_PORT", "BIND_TEST_HELP_NAME"]);

    let config = binder().bind::<WithHelp>().unwrap();

    assert!(config.help.is_bound());
    assert!(!config.second.is_bound());
    assert_eq!(config.second.call(), "");
    assert_eq!(config.untouched, 0);
}

#[derive(Debug, EnvStruct)]
struct UnknownTypeHelp {
    #[env(var = "BIND_TEST_HOSTS", description = "hosts", parser = "hosts")]
    hosts: Vec<String>,
}

#[test]
fn test_describe_without_values() {
    let help = binder().describe::<UnknownTypeHelp>().unwrap();

    assert_eq!(
        help.render(),
        "Environment:\nBIND_TEST_HOSTS:  [UNKNOWN]    hosts\n"
    );
}

#[test]
fn test_describe_reports_tag_errors() {
    let err = envstruct::describe::<MissingBoth>().unwrap_err();
    assert!(matches!(err, Error::TagRead { .. }));
}

// ============================================================================
// Custom parsers and explicit sources
// ============================================================================

struct Hosts;

impl Parser for Hosts {
    type Output = Vec<String>;
    type Error = std::convert::Infallible;

    fn name(&self) -> &str {
        "hosts"
    }

    fn parse(&self, raw: &str) -> Result<Vec<String>, Self::Error> {
        Ok(raw.split(',').map(str::trim).map(String::from).collect())
    }
}

#[test]
fn test_custom_parser_with_explicit_sources() {
    let mut registry = Registry::with_builtins();
    registry.register(Hosts);

    let sources = Sources::from_map(HashMap::from([(
        "BIND_TEST_HOSTS".to_string(),
        "a, b,c".to_string(),
    )]));

    let config: UnknownTypeHelp = Binder::new(registry).bind_with(&sources).unwrap();
    assert_eq!(config.hosts, vec!["a", "b", "c"]);
}

trait Greeter {
    fn greet(&self) -> String;
}

struct English(String);

impl Greeter for English {
    fn greet(&self) -> String {
        format!("hello {}", self.0)
    }
}

struct GreeterParser;

impl Parser for GreeterParser {
    type Output = Box<dyn Greeter>;
    type Error = std::convert::Infallible;

    fn name(&self) -> &str {
        "greeter"
    }

    fn parse(&self, raw: &str) -> Result<Box<dyn Greeter>, Self::Error> {
        Ok(Box::new(English(raw.to_string())))
    }
}

#[derive(EnvStruct)]
struct WithTraitObject {
    #[env(var = "BIND_TEST_GREETER", description = "who to greet", default = "world", parser = "greeter")]
    greeter: Box<dyn Greeter>,
}

#[test]
#[serial]
fn test_trait_object_field() {
    cleanup_env(&["BIND_TEST_GREETER"]);

    let mut registry = Registry::with_builtins();
    registry.register(GreeterParser);

    let config: WithTraitObject = Binder::new(registry).without_dotenv().bind().unwrap();
    assert_eq!(config.greeter.greet(), "hello world");
}

#[derive(EnvStruct)]
struct DisplayPort {
    #[env(var = "BIND_TEST_DISPLAY_PORT", description = "listen port", default = "8080", parser = "port")]
    port: Box<dyn Display>,
}

#[test]
#[serial]
fn test_builtin_parser_fills_trait_object_field() {
    cleanup_env(&["BIND_TEST_DISPLAY_PORT"]);

    let mut registry = Registry::with_builtins();
    registry.register_upcast::<u16, Box<dyn Display>>(|port| Box::new(port));

    let config: DisplayPort = Binder::new(registry).without_dotenv().bind().unwrap();
    assert_eq!(config.port.to_string(), "8080");
}

#[test]
#[serial]
fn test_trait_object_field_without_upcast() {
    cleanup_env(&["BIND_TEST_DISPLAY_PORT"]);

    let err = binder().bind::<DisplayPort>().err().unwrap();
    assert!(matches!(
        err,
        Error::MismatchedTypes {
            field: "port",
            parser_type: "u16",
            ..
        }
    ));
}

// ============================================================================
// Paths
// ============================================================================

#[derive(Debug, EnvStruct)]
struct RootDir {
    #[env(var = "BIND_TEST_ROOT", description = "data directory", default = "", parser = "absFile")]
    root: PathBuf,
}

#[test]
#[serial]
fn test_empty_path_is_current_dir() {
    let cwd = std::env::current_dir().unwrap();

    cleanup_env(&["BIND_TEST_ROOT"]);
    let config = binder().bind::<RootDir>().unwrap();
    assert_eq!(config.root, cwd);

    let config = with_env(&[("BIND_TEST_ROOT", "")], || binder().bind::<RootDir>().unwrap());
    assert_eq!(config.root, cwd);
}

// ============================================================================
// Struct-level dotenv path
// ============================================================================

// Cargo runs integration tests from the package root.
#[derive(Debug, EnvStruct)]
#[env_struct(dotenv = "tests/fixtures/struct.env")]
struct StructDotenv {
    #[env(var = "BIND_TEST_STRUCT_DOTENV", description = "x", default = "fallback")]
    value: String,
}

#[derive(Debug, EnvStruct)]
#[env_struct(dotenv = "tests/fixtures/does-not-exist.env")]
struct MissingStructDotenv {
    #[env(var = "BIND_TEST_STRUCT_DOTENV", description = "x", default = "fallback")]
    value: String,
}

#[test]
#[serial]
fn test_struct_dotenv_attribute() {
    cleanup_env(&["BIND_TEST_STRUCT_DOTENV"]);

    assert_eq!(StructDotenv::dotenv_path(), Some("tests/fixtures/struct.env"));
    assert_eq!(NameConfig::dotenv_path(), None);

    let config: StructDotenv = envstruct::bind().unwrap();
    assert_eq!(config.value, "from-struct-file");
}

#[test]
#[serial]
fn test_struct_dotenv_shadows_environment() {
    let config = with_env(&[("BIND_TEST_STRUCT_DOTENV", "from-env")], || {
        envstruct::bind::<StructDotenv>().unwrap()
    });

    assert_eq!(config.value, "from-struct-file");
}

#[test]
#[serial]
fn test_missing_struct_dotenv_is_ignored() {
    cleanup_env(&["BIND_TEST_STRUCT_DOTENV"]);

    let config: MissingStructDotenv = envstruct::bind().unwrap();
    assert_eq!(config.value, "fallback");
}

#[test]
#[serial]
fn test_binder_path_overrides_struct_attribute() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "BIND_TEST_STRUCT_DOTENV=from-binder").unwrap();
    cleanup_env(&["BIND_TEST_STRUCT_DOTENV"]);

    let config: StructDotenv = envstruct::bind_from(file.path()).unwrap();
    assert_eq!(config.value, "from-binder");
}
