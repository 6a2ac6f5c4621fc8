use std::collections::HashSet;

use crate::{
    model::ClassName,
    traits::{Elements, ResolveError},
    types::{Element, SourceFile},
};

/// Symbol lookup over the declaration files of one round.
///
/// Types declared in the round are still being compiled, so resolving one
/// yields [`ResolveError::Deferred`] carrying its qualified name. Types from
/// earlier compilations are registered with [`SymbolTable::with_compiled`]
/// and resolve directly.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    pending:  HashSet<String>,
    compiled: HashSet<String>,
}

impl SymbolTable {
    pub fn new(files: &[SourceFile]) -> SymbolTable {
        let pending = files
            .iter()
            .flat_map(|file| file.elements.iter())
            .map(Element::qualified_name)
            .collect();
        SymbolTable {
            pending,
            compiled: HashSet::new(),
        }
    }

    pub fn with_compiled<I, S>(mut self, names: I) -> SymbolTable
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compiled.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn is_pending(&self, qualified: &str) -> bool {
        self.pending.contains(qualified)
    }

    pub fn is_compiled(&self, qualified: &str) -> bool {
        self.compiled.contains(qualified)
    }

    fn lookup(&self, qualified: &str) -> Option<Result<ClassName, ResolveError>> {
        if self.is_compiled(qualified) {
            Some(Ok(ClassName::from_qualified(qualified)))
        } else if self.is_pending(qualified) {
            Some(Err(ResolveError::Deferred {
                descriptor: qualified.to_string(),
            }))
        } else {
            None
        }
    }
}

impl Elements for SymbolTable {
    fn package_of(&self, element: &Element) -> String {
        element.package.clone()
    }

    fn resolve_type(&self, reference: &str, scope: &Element) -> Result<ClassName, ResolveError> {
        if reference.contains("::") {
            // A written path is taken at its word.
            return self.lookup(reference).unwrap_or_else(|| {
                Err(ResolveError::Deferred {
                    descriptor: reference.to_string(),
                })
            });
        }

        let suffix = format!("::{}", reference);
        for import in &scope.imports {
            if import.ends_with(&suffix) {
                return self.lookup(import).unwrap_or_else(|| {
                    Err(ResolveError::Deferred {
                        descriptor: import.clone(),
                    })
                });
            }
        }

        let local = if scope.package.is_empty() {
            reference.to_string()
        } else {
            format!("{}::{}", scope.package, reference)
        };
        self.lookup(&local)
            .unwrap_or_else(|| Err(ResolveError::Unknown(reference.to_string())))
    }
}
