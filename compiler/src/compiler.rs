use log::debug;
use serde::Serialize;

use crate::{
    env::{CollectingMessager, MemoryFiler, ProcessingEnvironment, ProcessorOptions, RoundEnvironment},
    error::IntentionError,
    model::GeneratedFile,
    parser::parse_source,
    processor::IntentionProcessor,
    symbols::SymbolTable,
    tokenizer::tokenize_source,
    traits::Diagnostic,
    types::SourceFile,
};

/// Tokenize and parse one declaration file.
/// Returns `Err(IntentionError::ParseError)` with the offending position.
pub fn parse_declarations(text: &str) -> Result<SourceFile, IntentionError> {
    let tokens = tokenize_source(text)?;
    parse_source(&tokens)
}

/// What one in-memory round produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompileOutcome {
    pub files:       Vec<GeneratedFile>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutcome {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn file(&self, name: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.name == name)
    }
}

/// Runs one processing round over already parsed declarations.
///
/// `compiled` names types from earlier compilations, which resolve directly
/// instead of through the same-round fallback.
pub fn compile_round<I, S>(files: Vec<SourceFile>, compiled: I, options: ProcessorOptions) -> Result<CompileOutcome, IntentionError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let symbols = SymbolTable::new(&files).with_compiled(compiled);
    let filer = MemoryFiler::new();
    let messager = CollectingMessager::new();

    let processor = IntentionProcessor::new();
    processor.init(ProcessingEnvironment::new(symbols, filer.clone(), messager.clone()).with_options(options))?;
    processor.process(&RoundEnvironment::new(files))?;

    let outcome = CompileOutcome {
        files:       filer.files(),
        diagnostics: messager.diagnostics(),
    };
    debug!(
        "round produced {} file(s), {} diagnostic(s)",
        outcome.files.len(),
        outcome.diagnostics.len()
    );
    Ok(outcome)
}

/// Parses every text and runs them through one round with default options.
pub fn compile_sources(texts: &[&str]) -> Result<CompileOutcome, IntentionError> {
    let files = texts
        .iter()
        .map(|text| parse_declarations(text))
        .collect::<Result<Vec<_>, _>>()?;
    compile_round(files, Vec::<String>::new(), ProcessorOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ERROR_NOT_INTERFACE, ERROR_NULL_CONTEXT, ERROR_PARAMETER_KEY};

    const ROUTES: &str = r#"
        package app;

        class Target;

        @Intention(Target)
        interface R {
            fn build(ctx: Context, @Extra("k1") name: String = "d", @Extra("k2") count: Int?) -> Request;
        }
    "#;

    #[test]
    fn generates_util_for_router() {
        let outcome = compile_sources(&[ROUTES]).unwrap();
        assert!(!outcome.has_errors());
        assert_eq!(outcome.files.len(), 1);

        let file = outcome.file("RUtil").unwrap();
        assert_eq!(file.package, "app");
        assert!(file.source.contains("impl R for RUtil {"));
        assert_eq!(file.source.matches("        count: Option<i32>,").count(), 2);
        assert!(!file.source.contains("Int>"));

        let expected_body = r#"        let mut request = Request::new(ctx, Destination::new("app", "Target"));
        request.put_extra("k1", name);
        if let Some(count) = count {
            request.put_extra("k2", count);
        }
        request
    }"#;
        assert!(file.source.contains(expected_body), "{}", file.source);
    }

    #[test]
    fn missing_context_is_reported_alongside_unbound_parameters() {
        let outcome = compile_sources(&[
            "package app; class T; @Intention(T) interface R { fn go(a: i32, b: i32) -> Request; }",
        ])
        .unwrap();

        let messages: Vec<&str> = outcome.diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec![ERROR_PARAMETER_KEY, ERROR_PARAMETER_KEY, ERROR_NULL_CONTEXT]);
        assert!(outcome.files.is_empty());

        let symbols: Vec<&str> = outcome
            .diagnostics
            .iter()
            .map(|d| d.location.as_ref().unwrap().symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["app::R::go(a)", "app::R::go(b)", "app::R::go"]);
    }

    #[test]
    fn other_return_types_are_rejected() {
        let outcome = compile_sources(&[
            "class T; @Intention(T) interface R { fn go(ctx: Context) -> Foo; fn stay(ctx: Context); }",
        ])
        .unwrap();
        let messages: Vec<&str> = outcome.diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "routing method must return Request, found Foo",
                "routing method must return Request, found ()",
            ]
        );
        assert!(outcome.files.is_empty());
    }

    #[test]
    fn non_interface_stops_the_round() {
        let outcome = compile_sources(&[
            r#"
            package app;
            class Target;
            @Intention(Target) class Broken;
            @Intention(Target) interface Fine { fn go(ctx: Context) -> Request; }
            "#,
        ])
        .unwrap();

        assert!(outcome.files.is_empty());
        assert_eq!(outcome.diagnostics.len(), 1);
        let diagnostic = &outcome.diagnostics[0];
        assert_eq!(diagnostic.message, ERROR_NOT_INTERFACE);
        assert_eq!(diagnostic.location.as_ref().unwrap().symbol, "app::Broken");
    }

    #[test]
    fn keep_going_reports_every_failure() {
        let file = parse_declarations(
            r#"
            package app;
            class Target;
            @Intention(Target) interface NoContext { fn go(@Extra("a") a: i32) -> Request; }
            @Intention(Target) interface NoKey { fn go(ctx: Context, a: i32) -> Request; }
            @Intention(Target) interface Fine { fn go(ctx: Context) -> Request; }
            "#,
        )
        .unwrap();
        let outcome = compile_round(
            vec![file],
            Vec::<String>::new(),
            ProcessorOptions { keep_going: true },
        )
        .unwrap();

        let messages: Vec<&str> = outcome.diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec![ERROR_NULL_CONTEXT, ERROR_PARAMETER_KEY]);
        assert_eq!(outcome.files.len(), 1);
        assert!(outcome.file("FineUtil").is_some());

        let key_location = outcome.diagnostics[1].location.as_ref().unwrap();
        assert_eq!(key_location.symbol, "app::NoKey::go(a)");
    }

    #[test]
    fn nullable_context_is_not_a_context() {
        let outcome = compile_sources(&[
            "class T; @Intention(T) interface R { fn go(ctx: Context?) -> Request; }",
        ])
        .unwrap();
        let messages: Vec<&str> = outcome.diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec![ERROR_PARAMETER_KEY, ERROR_NULL_CONTEXT]);
    }

    #[test]
    fn compiled_destination_keeps_its_package() {
        let file = parse_declarations(
            "package app; use lib::Legacy; @Intention(Legacy) interface R { fn go(ctx: Context) -> Request; }",
        )
        .unwrap();
        let outcome = compile_round(vec![file], ["lib::Legacy"], ProcessorOptions::default()).unwrap();
        assert!(outcome.file("RUtil").unwrap().source.contains("Destination::new(\"lib\", \"Legacy\")"));
    }

    #[test]
    fn unknown_destination_is_an_internal_fault() {
        let outcome = compile_sources(&["@Intention(Nowhere) interface R {}"]).unwrap();
        assert!(outcome.files.is_empty());
        assert_eq!(outcome.diagnostics[0].message, "Cannot resolve type Nowhere");
    }

    #[test]
    fn parse_errors_surface_before_processing() {
        assert!(matches!(
            compile_sources(&["interface {"]),
            Err(IntentionError::ParseError { .. })
        ));
    }
}
