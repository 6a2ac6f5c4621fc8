use crate::{
    model::{GeneratedFile, Role, RouteMethod, RouteParameter, RouterDeclaration},
    utils::{escape_rust_keyword, rust_string},
};

/// Path prefixes that already name a crate; everything else is a module path
/// of the consuming crate.
const EXTERNAL_ROOTS: [&str; 5] = ["crate::", "std::", "core::", "alloc::", "intention::"];

/// Renders one router declaration as a Rust source file containing the
/// routing trait and its `<Name>Util` implementation.
pub fn generate_router(decl: &RouterDeclaration) -> GeneratedFile {
    let util_name = decl.util_name();
    let mut rust_code: Vec<String> = Vec::new();

    rust_code.push(format!(
        "// @generated by intention-compiler from {}. Do not edit.",
        qualified(&decl.package, &decl.name)
    ));
    rust_code.push("".to_string());
    rust_code.push("#[allow(unused_imports)]".to_string());
    rust_code.push("use intention::{Context, Destination, Request};".to_string());
    for import in &decl.imports {
        rust_code.push("#[allow(unused_imports)]".to_string());
        rust_code.push(format!("use {};", import_path(import)));
    }
    rust_code.push("".to_string());

    // Trait
    rust_code.push("#[allow(non_snake_case)]".to_string());
    rust_code.push(format!("pub trait {} {{", decl.name));
    for method in &decl.methods {
        rust_code.push(format!("{};", generate_signature(method)));
    }
    rust_code.push("}".to_string());
    rust_code.push("".to_string());

    // Implementation
    rust_code.push(format!("pub struct {};", util_name));
    rust_code.push("".to_string());
    rust_code.push("#[allow(non_snake_case)]".to_string());
    rust_code.push(format!("impl {} for {} {{", decl.name, util_name));
    for (i, method) in decl.methods.iter().enumerate() {
        if i > 0 {
            rust_code.push("".to_string());
        }
        rust_code.push(format!("{} {{", generate_signature(method)));
        rust_code.extend(generate_body(decl, method));
        rust_code.push("    }".to_string());
    }
    rust_code.push("}".to_string());
    rust_code.push("".to_string());

    GeneratedFile {
        package: decl.package.clone(),
        name:    util_name,
        source:  rust_code.join("\n"),
    }
}

fn qualified(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{}::{}", package, name)
    }
}

fn import_path(import: &str) -> String {
    if EXTERNAL_ROOTS.iter().any(|root| import.starts_with(root)) {
        import.to_string()
    } else {
        format!("crate::{}", import)
    }
}

fn param_type(param: &RouteParameter) -> String {
    match param.role {
        Role::Context => "&Context".to_string(),
        Role::Extra(_) => param.type_.to_rust(),
    }
}

/// `    fn name(\n        &self,\n        a: A,\n    ) -> Request`
fn generate_signature(method: &RouteMethod) -> String {
    let mut lines = Vec::with_capacity(method.params.len() + 3);
    lines.push(format!("    fn {}(", escape_rust_keyword(&method.name)));
    lines.push("        &self,".to_string());
    for param in &method.params {
        lines.push(format!(
            "        {}: {},",
            escape_rust_keyword(&param.name),
            param_type(param)
        ));
    }
    lines.push("    ) -> Request".to_string());
    lines.join("\n")
}

/// Name for the request binding that no parameter shadows.
fn request_binding(method: &RouteMethod) -> String {
    let mut name = "request".to_string();
    while method
        .params
        .iter()
        .any(|p| escape_rust_keyword(&p.name) == name)
    {
        name.push('_');
    }
    name
}

fn generate_body(decl: &RouterDeclaration, method: &RouteMethod) -> Vec<String> {
    let request = request_binding(method);
    let has_extras = method.extras().next().is_some();
    let mut body = Vec::new();

    body.push(format!(
        "        let {}{} = Request::new({}, Destination::new({}, {}));",
        if has_extras { "mut " } else { "" },
        request,
        escape_rust_keyword(&method.context),
        rust_string(&decl.destination.package),
        rust_string(&decl.destination.simple),
    ));

    for (param, binding) in method.extras() {
        let name = escape_rust_keyword(&param.name);
        let statement = format!(
            "{}.{}({}, {});",
            request,
            binding.kind.store_method(),
            rust_string(&binding.key),
            name
        );
        if param.is_nullable() {
            body.push(format!("        if let Some({}) = {} {{", name, name));
            body.push(format!("            {}", statement));
            body.push("        }".to_string());
        } else {
            body.push(format!("        {}", statement));
        }
    }

    body.push(format!("        {}", request));
    body
}
