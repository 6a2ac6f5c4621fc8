use std::fmt;

use serde::Serialize;

/// One parsed declaration file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceFile {
    pub package:  Option<String>,
    pub imports:  Vec<String>,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ElementKind {
    Interface,
    Class,
    Object,
}

/// A top-level type declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub name:        String,
    pub package:     String,
    pub imports:     Vec<String>,
    pub line:        usize,
    pub column:      usize,
    pub kind:        ElementKind,
    pub annotations: Vec<Annotation>,
    pub methods:     Vec<Method>,
    pub fields:      Vec<FieldDecl>,
}

impl Element {
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name == name)
    }

    /// `package::Name`, or just `Name` in the root package.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.package, self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Method {
    pub name:        String,
    pub line:        usize,
    pub column:      usize,
    pub annotations: Vec<Annotation>,
    pub params:      Vec<Param>,
    pub return_type: Option<TypeName>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name:        String,
    pub line:        usize,
    pub column:      usize,
    pub annotations: Vec<Annotation>,
    pub type_:       TypeName,
    /// Default value as written; kept for tooling, never emitted.
    pub default:     Option<String>,
}

impl Param {
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name == name)
    }

    /// Declared type with `@Nullable` folded into the type's nullability.
    pub fn declared_type(&self) -> TypeName {
        let mut type_ = self.type_.clone();
        if self.annotation("Nullable").is_some() {
            type_.nullable = true;
        }
        type_
    }
}

/// A stored property. Only concrete types may declare these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDecl {
    pub name:   String,
    pub line:   usize,
    pub column: usize,
    pub type_:  TypeName,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub name:   String,
    pub line:   usize,
    pub column: usize,
    pub args:   Vec<AnnotationArg>,
}

impl Annotation {
    /// The single string argument of an extra annotation.
    pub fn string_value(&self) -> Option<&str> {
        match self.args.as_slice() {
            [AnnotationArg::Str(value)] => Some(value),
            _ => None,
        }
    }

    /// The single type-path argument of a marker annotation.
    pub fn path_value(&self) -> Option<&str> {
        match self.args.as_slice() {
            [AnnotationArg::Path(path)] => Some(path),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AnnotationArg {
    Str(String),
    Int(i64),
    Path(String),
}

/// A written type: a `::` path, optional generic arguments, optional `?`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeName {
    pub path:     String,
    pub args:     Vec<TypeName>,
    pub nullable: bool,
}

impl TypeName {
    pub fn new(path: impl Into<String>) -> TypeName {
        TypeName {
            path:     path.into(),
            args:     Vec::new(),
            nullable: false,
        }
    }

    pub fn nullable(mut self, nullable: bool) -> TypeName {
        self.nullable = nullable;
        self
    }

    /// Rust spelling: `Option<...>` for nullable types.
    pub fn to_rust(&self) -> String {
        let inner = self.non_null_text();
        if self.nullable {
            format!("Option<{}>", inner)
        } else {
            inner
        }
    }

    /// The written type without its `?`.
    pub fn non_null_text(&self) -> String {
        if self.args.is_empty() {
            return self.path.clone();
        }
        let args: Vec<String> = self.args.iter().map(|a| a.to_rust()).collect();
        format!("{}<{}>", self.path, args.join(", "))
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.non_null_text())?;
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullable_types_render_as_option() {
        let list = TypeName {
            path:     "Vec".into(),
            args:     vec![TypeName::new("i32").nullable(true)],
            nullable: true,
        };
        assert_eq!(list.to_rust(), "Option<Vec<Option<i32>>>");
        assert_eq!(list.to_string(), "Vec<Option<i32>>?");
    }
}
