use std::fmt;

use serde::Serialize;

use crate::types::TypeName;

/// A fully-qualified type name split into package and simple name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClassName {
    pub package: String,
    pub simple:  String,
}

impl ClassName {
    pub fn new(package: impl Into<String>, simple: impl Into<String>) -> ClassName {
        ClassName {
            package: package.into(),
            simple:  simple.into(),
        }
    }

    /// Splits at the last `::`; a name without separator is in the root
    /// package.
    pub fn from_qualified(qualified: &str) -> ClassName {
        match qualified.rfind("::") {
            Some(pos) => ClassName::new(&qualified[..pos], &qualified[pos + 2..]),
            None => ClassName::new("", qualified),
        }
    }

    pub fn canonical_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            f.write_str(&self.simple)
        } else {
            write!(f, "{}::{}", self.package, self.simple)
        }
    }
}

/// The five payload forms a parameter can be stored as, in the order they
/// are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExtraKind {
    Scalar,
    IntegerList,
    ParcelableList,
    StringList,
    CharSequenceList,
}

impl ExtraKind {
    pub const PRIORITY: [ExtraKind; 5] = [
        ExtraKind::Scalar,
        ExtraKind::IntegerList,
        ExtraKind::ParcelableList,
        ExtraKind::StringList,
        ExtraKind::CharSequenceList,
    ];

    /// Annotation that selects this kind in a declaration.
    pub fn annotation(self) -> &'static str {
        match self {
            ExtraKind::Scalar           => "Extra",
            ExtraKind::IntegerList      => "IntegerArrayListExtra",
            ExtraKind::ParcelableList   => "ParcelableArrayListExtra",
            ExtraKind::StringList       => "StringArrayListExtra",
            ExtraKind::CharSequenceList => "CharSequenceArrayListExtra",
        }
    }

    /// `Request` method that stores a value of this kind.
    pub fn store_method(self) -> &'static str {
        match self {
            ExtraKind::Scalar           => "put_extra",
            ExtraKind::IntegerList      => "put_integer_array_list_extra",
            ExtraKind::ParcelableList   => "put_parcelable_array_list_extra",
            ExtraKind::StringList       => "put_string_array_list_extra",
            ExtraKind::CharSequenceList => "put_char_sequence_array_list_extra",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtraBinding {
    pub kind: ExtraKind,
    pub key:  String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Role {
    Context,
    Extra(ExtraBinding),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteParameter {
    pub name:  String,
    /// Declared type after boxed-to-value normalization.
    pub type_: TypeName,
    pub role:  Role,
}

impl RouteParameter {
    pub fn is_nullable(&self) -> bool {
        self.type_.nullable
    }

    pub fn binding(&self) -> Option<&ExtraBinding> {
        match &self.role {
            Role::Extra(binding) => Some(binding),
            Role::Context => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMethod {
    pub name:    String,
    pub context: String,
    pub params:  Vec<RouteParameter>,
}

impl RouteMethod {
    pub fn extras(&self) -> impl Iterator<Item = (&RouteParameter, &ExtraBinding)> {
        self.params.iter().filter_map(|p| p.binding().map(|b| (p, b)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouterDeclaration {
    pub name:        String,
    pub package:     String,
    pub imports:     Vec<String>,
    pub destination: ClassName,
    pub methods:     Vec<RouteMethod>,
}

impl RouterDeclaration {
    pub fn util_name(&self) -> String {
        format!("{}Util", self.name)
    }
}

/// One emitted source artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedFile {
    pub package: String,
    pub name:    String,
    pub source:  String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_name_splits_at_last_separator() {
        let name = ClassName::from_qualified("app::screens::MainActivity");
        assert_eq!(name.package, "app::screens");
        assert_eq!(name.simple, "MainActivity");
        assert_eq!(name.canonical_name(), "app::screens::MainActivity");

        let root = ClassName::from_qualified("Target");
        assert_eq!(root.package, "");
        assert_eq!(root.canonical_name(), "Target");
    }

    #[test]
    fn priority_starts_with_scalar() {
        assert_eq!(ExtraKind::PRIORITY[0].annotation(), "Extra");
        assert_eq!(
            ExtraKind::PRIORITY[4].store_method(),
            "put_char_sequence_array_list_extra"
        );
    }
}
