//! End-to-end generation tests.
//!
//! These tests drive the full pipeline on the sample round in
//! `tests/fixtures/sample_round.json`: loading, validation, synthesis,
//! rendering and file output.

use std::fs;
use std::path::{Path, PathBuf};

use rxgen_define::{Annotation, RoundInput};
use rxgen_gen::config::{GeneratorConfig, ReactiveMode};
use rxgen_gen::diagnostics::{CollectingSink, Severity};
use rxgen_gen::input::{load_round, parse_round};
use rxgen_gen::output::{JavaFileSink, MemorySink};
use rxgen_gen::processor::{Processor, RoundOutcome};
use rxgen_gen::render::render_type;
use rxgen_gen::synthetic::SyntheticType;
use tempfile::TempDir;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_round.json")
}

fn sample_round() -> RoundInput {
    load_round(&fixture_path()).expect("sample round should load")
}

fn generate(round: &RoundInput, config: GeneratorConfig) -> (RoundOutcome, CollectingSink) {
    let mut processor = Processor::new(config);
    let mut sink = CollectingSink::new();
    let outcome = processor.process_round(round, &mut sink);
    (outcome, sink)
}

fn find<'a>(types: &'a [SyntheticType], name: &str) -> &'a SyntheticType {
    types
        .iter()
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("{name} was not generated"))
}

fn method_count(ty: &SyntheticType, name: &str) -> usize {
    ty.methods_named(name).count()
}

// ============================================================================
// Successful generation
// ============================================================================

/// The sample round generates one wrapper per parameter builder followed by
/// the two umbrella types.
#[test]
fn sample_round_generates_types_in_order() {
    let (outcome, sink) = generate(&sample_round(), GeneratorConfig::default());

    assert!(!sink.has_errors(), "unexpected errors: {:?}", sink.diagnostics());
    let names: Vec<_> = outcome.types().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "RxHttpPostEncryptFormParam",
            "RxHttpGetEncryptParam",
            "RxHttp",
            "RxHttpExtensions"
        ]
    );
    assert!(outcome.types().iter().all(|t| t.package == "rxhttp.wrapper.param"));
}

/// A wrapper has its delegating constructor plus one method per public,
/// non-static, non-overriding method of the wrapped class.
#[test]
fn wrapper_mirrors_only_eligible_methods() {
    let (outcome, _) = generate(&sample_round(), GeneratorConfig::default());
    let wrapper = find(outcome.types(), "RxHttpPostEncryptFormParam");

    assert_eq!(wrapper.constructors().count(), 1);
    let mirrored: Vec<_> = wrapper.methods().map(|m| m.name.as_str()).collect();
    assert_eq!(mirrored, vec!["setSign", "getSign", "addAll"]);

    let source = render_type(wrapper);
    assert!(source.contains("public class RxHttpPostEncryptFormParam extends RxHttpFormParam {"));
    assert!(source.contains("public RxHttpPostEncryptFormParam setSign(String sign) {"));
    assert!(source.contains("((PostEncryptFormParam) param).setSign(sign);"));
    assert!(source.contains("public void addAll(String... keys) {"));
    assert!(!source.contains("getRequestBody"));
    assert!(!source.contains("encrypt("));
}

/// Each public constructor yields exactly one static factory on `RxHttp`.
#[test]
fn factories_match_public_constructors() {
    let (outcome, _) = generate(&sample_round(), GeneratorConfig::default());
    let umbrella = find(outcome.types(), "RxHttp");

    assert_eq!(method_count(umbrella, "postEncryptForm"), 1);
    assert_eq!(method_count(umbrella, "getEncrypt"), 2);

    let source = render_type(umbrella);
    assert!(source.contains(
        "public static RxHttpPostEncryptFormParam postEncryptForm(String url, Object... formatArgs) {"
    ));
    assert!(source.contains("public static RxHttpGetEncryptParam getEncrypt(int port) {"));
}

/// Converters, clients and domains surface as setters on the umbrella type.
#[test]
fn umbrella_carries_cross_cutting_members() {
    let (outcome, _) = generate(&sample_round(), GeneratorConfig::default());
    let umbrella = find(outcome.types(), "RxHttp");

    assert_eq!(method_count(umbrella, "setFastJsonConverter"), 1);
    assert_eq!(method_count(umbrella, "setSimpleClient"), 1);
    assert_eq!(method_count(umbrella, "setDomainToUpdateIfAbsent"), 1);
    assert_eq!(method_count(umbrella, "addDefaultDomainIfAbsent"), 1);
    assert_eq!(method_count(umbrella, "addDomainIfAbsent"), 1);
    assert_eq!(method_count(umbrella, "format"), 1);

    let source = render_type(umbrella);
    assert!(source.contains("RxHttpManager.fastJsonConverter"));
    assert!(source.contains("Url.baseUrl"));
}

/// Generic parsers get wrapped variants over `List` and each declared
/// wrapper; non-generic parsers get one accessor per public constructor.
#[test]
fn parser_accessors_and_extensions() {
    let (outcome, _) = generate(&sample_round(), GeneratorConfig::default());
    let umbrella = find(outcome.types(), "RxHttp");
    let extensions = find(outcome.types(), "RxHttpExtensions");

    assert_eq!(method_count(umbrella, "asResponse"), 1);
    assert_eq!(method_count(umbrella, "asResponseList"), 1);
    assert_eq!(method_count(umbrella, "asResponsePageList"), 1);
    assert_eq!(method_count(umbrella, "asText"), 2);

    assert_eq!(method_count(extensions, "toResponse"), 1);
    assert_eq!(method_count(extensions, "toText"), 2);
}

/// With reactive integration disabled, `as*` accessors disappear while the
/// suspend-style extensions remain.
#[test]
fn disabled_reactive_mode_keeps_only_extensions() {
    let config = GeneratorConfig::default().with_reactive(ReactiveMode::Disabled);
    let (outcome, sink) = generate(&sample_round(), config);

    assert!(!sink.has_errors());
    let umbrella = find(outcome.types(), "RxHttp");
    assert!(umbrella.methods().all(|m| !m.name.starts_with("as")));
    assert_eq!(method_count(find(outcome.types(), "RxHttpExtensions"), "toText"), 2);
}

/// A custom package moves every generated type.
#[test]
fn custom_package_applies_to_all_types() {
    let config = GeneratorConfig::default()
        .with_package("com.example.http")
        .expect("valid package");
    let (outcome, _) = generate(&sample_round(), config);

    assert_eq!(outcome.types().len(), 4);
    assert!(outcome.types().iter().all(|t| t.package == "com.example.http"));
}

// ============================================================================
// Determinism and output
// ============================================================================

/// Identical input renders byte-identical sources.
#[test]
fn generation_is_deterministic() {
    let render = || {
        let mut processor = Processor::new(GeneratorConfig::default());
        let mut sink = CollectingSink::new();
        let mut emitter = MemorySink::new();
        processor
            .process_and_emit(&sample_round(), &mut sink, &mut emitter)
            .unwrap();
        emitter.render_all()
    };

    let first = render();
    assert_eq!(first.len(), 4);
    assert_eq!(first, render());
}

/// Files land under the package directory and match the rendered source.
#[test]
fn java_file_sink_writes_package_tree() {
    let temp_dir = TempDir::new().unwrap();
    let mut processor = Processor::new(GeneratorConfig::default());
    let mut sink = CollectingSink::new();
    let mut emitter = JavaFileSink::new(temp_dir.path(), false);

    let outcome = processor
        .process_and_emit(&sample_round(), &mut sink, &mut emitter)
        .unwrap();

    let package_dir = temp_dir.path().join("rxhttp/wrapper/param");
    assert_eq!(emitter.written().len(), 4);
    for ty in outcome.types() {
        let path = package_dir.join(format!("{}.java", ty.name));
        assert_eq!(fs::read_to_string(&path).unwrap(), render_type(ty));
    }
}

/// A second pass over the same input rewrites identical files.
#[test]
fn regeneration_produces_identical_files() {
    let temp_dir = TempDir::new().unwrap();
    let run = || {
        let mut processor = Processor::new(GeneratorConfig::default());
        let mut emitter = JavaFileSink::new(temp_dir.path(), false);
        processor
            .process_and_emit(&sample_round(), &mut CollectingSink::new(), &mut emitter)
            .unwrap();
        fs::read_to_string(temp_dir.path().join("rxhttp/wrapper/param/RxHttp.java")).unwrap()
    };

    let first = run();
    assert_eq!(first, run());
}

// ============================================================================
// Rejections
// ============================================================================

/// Two `@DefaultDomain` fields halt the round with a single error and
/// nothing is emitted.
#[test]
fn duplicate_default_domain_emits_nothing() {
    let mut round = sample_round();
    let mut second = round.fields.last().cloned().unwrap();
    second.name = "otherUrl".to_string();
    round.fields.push(second);

    let mut processor = Processor::new(GeneratorConfig::default());
    let mut sink = CollectingSink::new();
    let mut emitter = MemorySink::new();
    let outcome = processor
        .process_and_emit(&round, &mut sink, &mut emitter)
        .unwrap();

    assert_eq!(outcome, RoundOutcome::Aborted);
    assert_eq!(sink.error_count(), 1);
    assert!(emitter.types().is_empty());
}

/// Each broken declaration is reported against its own name with a message
/// describing the broken rule.
#[test]
fn broken_declarations_are_reported() {
    let cases = [
        (
            r#"{"name": "com.example.HiddenParam", "superclass": "rxhttp.wrapper.param.FormParam",
                "annotation": {"kind": "param", "method_name": "hidden"}}"#,
            "com.example.HiddenParam",
            "is not public",
        ),
        (
            r#"{"name": "com.example.PlainParam", "modifiers": ["public"],
                "superclass": "java.lang.Object",
                "annotation": {"kind": "param", "method_name": "plain"}}"#,
            "com.example.PlainParam",
            "rxhttp.wrapper.param.Param",
        ),
        (
            r#"{"name": "com.example.FinalParser", "modifiers": ["public", "final"],
                "type_params": [{"name": "T"}],
                "superclass": "rxhttp.wrapper.parse.AbstractParser<T>",
                "annotation": {"kind": "parser", "name": "Final"}}"#,
            "com.example.FinalParser",
            "cannot be declared final",
        ),
        (
            r#"{"name": "com.example.OpenParser", "modifiers": ["public"],
                "type_params": [{"name": "T"}],
                "superclass": "rxhttp.wrapper.parse.AbstractParser<T>",
                "members": [{"kind": "constructor", "modifiers": ["public"]}],
                "annotation": {"kind": "parser", "name": "Open"}}"#,
            "com.example.OpenParser",
            "no-argument constructor must be declared protected",
        ),
        (
            r#"{"name": "com.example.TokenlessParser", "modifiers": ["public"],
                "type_params": [{"name": "T"}],
                "superclass": "rxhttp.wrapper.parse.AbstractParser<T>",
                "members": [{"kind": "constructor", "modifiers": ["protected"]}],
                "annotation": {"kind": "parser", "name": "Tokenless"}}"#,
            "com.example.TokenlessParser",
            "public TokenlessParser(java.lang.reflect.Type)",
        ),
    ];

    for (json, declaration, fragment) in cases {
        let round = parse_round(&format!(r#"{{"types": [{json}]}}"#), "inline").unwrap();
        let (outcome, sink) = generate(&round, GeneratorConfig::default());

        assert!(outcome.is_aborted(), "{declaration} should abort the round");
        let errors: Vec<_> = sink.errors().collect();
        assert_eq!(errors.len(), 1, "{declaration}: {errors:?}");
        assert_eq!(errors[0].declaration.as_deref(), Some(declaration));
        assert!(
            errors[0].message.contains(fragment),
            "{declaration}: '{}' should mention '{fragment}'",
            errors[0].message
        );
    }
}

/// Field contracts are checked against the declared field type.
#[test]
fn broken_fields_are_reported() {
    let cases = [
        (
            r#"{"owner": "com.example.Config", "name": "client", "modifiers": ["public"],
                "type": "okhttp3.OkHttpClient", "annotation": {"kind": "ok_client"}}"#,
            "is not static",
        ),
        (
            r#"{"owner": "com.example.Config", "name": "client", "modifiers": ["public", "static"],
                "type": "java.lang.String", "annotation": {"kind": "ok_client"}}"#,
            "okhttp3.OkHttpClient",
        ),
        (
            r#"{"owner": "com.example.Config", "name": "converter", "modifiers": ["public", "static"],
                "type": "java.lang.String", "annotation": {"kind": "converter"}}"#,
            "rxhttp.wrapper.callback.IConverter",
        ),
    ];

    for (json, fragment) in cases {
        let round = parse_round(&format!(r#"{{"fields": [{json}]}}"#), "inline").unwrap();
        let (outcome, sink) = generate(&round, GeneratorConfig::default());

        assert!(outcome.is_aborted());
        let errors: Vec<_> = sink.errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(
            errors[0].message.contains(fragment),
            "'{}' should mention '{fragment}'",
            errors[0].message
        );
    }
}

/// A parser without `onParse(okhttp3.Response)` is skipped with a warning
/// while the rest of the round still generates.
#[test]
fn parser_without_on_parse_is_skipped() {
    let mut round = sample_round();
    for decl in &mut round.types {
        if matches!(&decl.annotation, Some(Annotation::Parser { name, .. }) if name == "Text") {
            decl.members.retain(|m| !matches!(m, rxgen_define::Member::Method(_)));
        }
    }

    let (outcome, sink) = generate(&round, GeneratorConfig::default());

    assert!(!sink.has_errors());
    let warnings: Vec<_> = sink
        .diagnostics()
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].declaration.as_deref(),
        Some("com.example.parser.TextParser")
    );

    let umbrella = find(outcome.types(), "RxHttp");
    assert_eq!(method_count(umbrella, "asText"), 0);
    assert_eq!(method_count(umbrella, "asResponse"), 1);
}

/// Two wrapper containers sharing a simple name would generate clashing
/// accessors, so the round is aborted before anything is emitted.
#[test]
fn colliding_wrapper_names_emit_nothing() {
    let mut round = sample_round();
    for decl in &mut round.types {
        if let Some(Annotation::Parser { name, wrappers }) = &mut decl.annotation
            && *name == "Response"
        {
            wrappers.push(rxgen_define::TypeRef::class("com.other.PageList"));
        }
    }

    let mut processor = Processor::new(GeneratorConfig::default());
    let mut sink = CollectingSink::new();
    let mut emitter = MemorySink::new();
    let outcome = processor
        .process_and_emit(&round, &mut sink, &mut emitter)
        .unwrap();

    assert_eq!(outcome, RoundOutcome::Aborted);
    assert_eq!(sink.error_count(), 1);
    assert!(sink.errors().next().unwrap().message.contains("com.other.PageList"));
    assert!(emitter.types().is_empty());
}
