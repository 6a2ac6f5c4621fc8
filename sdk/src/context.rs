use std::fmt;

/// The ambient handle a [`Request`](crate::Request) is built from.
///
/// Generated routers take it as their context parameter and record its
/// package as the origin of every request they build.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Context {
    package: String,
}

impl Context {
    pub fn new(package: impl Into<String>) -> Context {
        Context { package: package.into() }
    }

    pub fn package(&self) -> &str {
        &self.package
    }
}

/// The type a request targets, named by package and simple name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination {
    package: String,
    name:    String,
}

impl Destination {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Destination {
        Destination {
            package: package.into(),
            name:    name.into(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `package::Name`, or just `Name` for the root package.
    pub fn canonical_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}::{}", self.package, self.name)
        }
    }
}
