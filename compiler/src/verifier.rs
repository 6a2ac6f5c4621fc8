use log::trace;

use crate::{
    error::IntentionError,
    model::{ExtraBinding, ExtraKind, Role, RouteMethod, RouteParameter},
    types::{Element, ElementKind, Method, Param, TypeName},
};

/// Spellings of the platform context type.
pub const CONTEXT_TYPES: [&str; 2] = ["Context", "intention::Context"];

/// Spellings of the request type a routing method returns.
pub const REQUEST_TYPES: [&str; 2] = ["Request", "intention::Request"];

/// Boxed and primitive spellings of value types and the Rust types they are
/// emitted as.
pub const BOXED_TYPES: [(&str, &str); 11] = [
    ("String",    "String"),
    ("Byte",      "i8"),
    ("Character", "char"),
    ("Char",      "char"),
    ("Int",       "i32"),
    ("Short",     "i16"),
    ("Integer",   "i32"),
    ("Long",      "i64"),
    ("Float",     "f32"),
    ("Double",    "f64"),
    ("Boolean",   "bool"),
];

/// Returns `Ok(())` if `element` can back a router: an interface that
/// declares no state.
pub fn verify_interface(element: &Element) -> Result<(), IntentionError> {
    if element.kind != ElementKind::Interface || !element.fields.is_empty() {
        return Err(IntentionError::NotAnInterface {
            element: element.qualified_name(),
        });
    }
    Ok(())
}

pub fn is_context_type(type_: &TypeName) -> bool {
    !type_.nullable && type_.args.is_empty() && CONTEXT_TYPES.contains(&type_.path.as_str())
}

/// Rewrites a boxed type to its value form, keeping nullability. Generic
/// arguments are rewritten the same way. Anything else
/// passes through unchanged.
pub fn normalize_type(type_: &TypeName) -> TypeName {
    if !type_.args.is_empty() {
        return TypeName {
            path:     type_.path.clone(),
            args:     type_.args.iter().map(normalize_type).collect(),
            nullable: type_.nullable,
        };
    }
    match BOXED_TYPES.iter().find(|(boxed, _)| *boxed == type_.path) {
        Some((boxed, value)) => {
            trace!("normalizing {} to {}", boxed, value);
            TypeName::new(*value).nullable(type_.nullable)
        }
        None => type_.clone(),
    }
}

/// Picks the first recognized extra annotation in priority order.
pub fn classify_extra(method: &Method, param: &Param) -> Result<ExtraBinding, IntentionError> {
    for kind in ExtraKind::PRIORITY {
        if let Some(annotation) = param.annotation(kind.annotation()) {
            let key = annotation.string_value().ok_or_else(|| {
                IntentionError::Internal(format!(
                    "@{} on {} needs a single string key",
                    kind.annotation(),
                    param.name
                ))
            })?;
            return Ok(ExtraBinding {
                kind,
                key: key.to_string(),
            });
        }
    }
    Err(IntentionError::MissingExtraBinding {
        method:    method.name.clone(),
        parameter: param.name.clone(),
    })
}

/// Splits a method's parameters into its context and its extras.
///
/// The first non-nullable parameter of the context type is the context; every
/// other parameter must carry an extra annotation. All problems of the method
/// are returned, binding errors first in parameter order.
pub fn classify_method(method: &Method) -> Result<RouteMethod, Vec<IntentionError>> {
    let context = method
        .params
        .iter()
        .position(|param| is_context_type(&param.declared_type()));

    let mut errors = Vec::new();
    let mut params = Vec::with_capacity(method.params.len());
    for (index, param) in method.params.iter().enumerate() {
        let declared = param.declared_type();
        let role = if context == Some(index) {
            Role::Context
        } else {
            match classify_extra(method, param) {
                Ok(binding) => Role::Extra(binding),
                Err(err) => {
                    errors.push(err);
                    continue;
                }
            }
        };
        params.push(RouteParameter {
            name:  param.name.clone(),
            type_: normalize_type(&declared),
            role,
        });
    }

    if context.is_none() {
        errors.push(IntentionError::MissingContext {
            method: method.name.clone(),
        });
    }
    if let Err(err) = verify_return_type(method) {
        errors.push(err);
    }

    match context {
        Some(index) if errors.is_empty() => Ok(RouteMethod {
            name: method.name.clone(),
            context: method.params[index].name.clone(),
            params,
        }),
        _ => Err(errors),
    }
}

pub fn is_request_type(type_: &TypeName) -> bool {
    !type_.nullable && type_.args.is_empty() && REQUEST_TYPES.contains(&type_.path.as_str())
}

/// A routing method must be declared as returning the request it builds.
pub fn verify_return_type(method: &Method) -> Result<(), IntentionError> {
    match &method.return_type {
        Some(type_) if is_request_type(type_) => Ok(()),
        found => Err(IntentionError::WrongReturnType {
            method: method.name.clone(),
            found:  found.as_ref().map_or_else(|| "()".to_string(), |t| t.to_string()),
        }),
    }
}
