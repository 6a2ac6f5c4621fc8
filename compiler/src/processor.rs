use std::sync::OnceLock;

use log::{debug, warn};

use crate::{
    env::{ProcessingEnvironment, RoundEnvironment},
    error::IntentionError,
    gen_rust::generate_router,
    model::RouterDeclaration,
    resolver::{resolve_destination, INTENTION},
    traits::{Diagnostic, Location},
    types::Element,
    verifier::{classify_method, verify_interface},
};

/// Turns every `@Intention` interface of a round into a `<Name>Util`
/// implementation.
///
/// The host calls [`init`](IntentionProcessor::init) exactly once, then
/// [`process`](IntentionProcessor::process) once per round.
#[derive(Default)]
pub struct IntentionProcessor {
    env: OnceLock<ProcessingEnvironment>,
}

impl IntentionProcessor {
    pub fn new() -> IntentionProcessor {
        IntentionProcessor { env: OnceLock::new() }
    }

    pub fn init(&self, env: ProcessingEnvironment) -> Result<(), IntentionError> {
        self.env
            .set(env)
            .map_err(|_| IntentionError::AlreadyInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.env.get().is_some()
    }

    pub fn supported_annotation_types(&self) -> &'static [&'static str] {
        &[INTENTION]
    }

    /// Processes one round. Failures are reported through the messager; the
    /// returned flag claims the marker annotation.
    pub fn process(&self, round: &RoundEnvironment) -> Result<bool, IntentionError> {
        let env = self.env.get().ok_or(IntentionError::NotInitialized)?;

        for element in round.router_candidates() {
            debug!("processing {}", element.qualified_name());
            if let Err(errors) = self.process_element(env, element) {
                for err in &errors {
                    report(env, element, err);
                }
                if !env.options.keep_going {
                    break;
                }
            }
        }
        Ok(true)
    }

    fn process_element(&self, env: &ProcessingEnvironment, element: &Element) -> Result<(), Vec<IntentionError>> {
        let decl = parse_router(env, element)?;
        let file = generate_router(&decl);
        env.filer.create_source(&file).map_err(|err| vec![err])
    }
}

/// Validates `element` and builds its router model; all or nothing. Every
/// method is checked, so the error list covers the whole interface.
pub fn parse_router(env: &ProcessingEnvironment, element: &Element) -> Result<RouterDeclaration, Vec<IntentionError>> {
    verify_interface(element).map_err(|err| vec![err])?;

    let package = env.elements.package_of(element);
    let destination = resolve_destination(env.elements.as_ref(), element).map_err(|err| vec![err])?;

    let mut methods = Vec::with_capacity(element.methods.len());
    let mut errors = Vec::new();
    for method in &element.methods {
        match classify_method(method) {
            Ok(routed) => methods.push(routed),
            Err(found) => errors.extend(found),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(RouterDeclaration {
        name: element.name.clone(),
        package,
        imports: element.imports.clone(),
        destination,
        methods,
    })
}

/// Binds the diagnostic for `err` to the narrowest symbol it concerns.
fn report(env: &ProcessingEnvironment, element: &Element, err: &IntentionError) {
    let location = match err {
        IntentionError::MissingContext { method } | IntentionError::WrongReturnType { method, .. } => element
            .methods
            .iter()
            .find(|m| &m.name == method)
            .map(|m| Location {
                symbol: format!("{}::{}", element.qualified_name(), m.name),
                line:   m.line,
                column: m.column,
            }),
        IntentionError::MissingExtraBinding { method, parameter } => element
            .methods
            .iter()
            .find(|m| &m.name == method)
            .and_then(|m| m.params.iter().find(|p| &p.name == parameter))
            .map(|p| Location {
                symbol: format!("{}::{}({})", element.qualified_name(), method, p.name),
                line:   p.line,
                column: p.column,
            }),
        _ => None,
    };
    let location = location.or_else(|| {
        Some(Location {
            symbol: element.qualified_name(),
            line:   element.line,
            column: element.column,
        })
    });

    if !err.is_validation() {
        warn!("internal fault while processing {}: {}", element.name, err);
    }
    env.messager.print_message(Diagnostic::error(err.to_string(), location));
}
