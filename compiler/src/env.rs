use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    error::IntentionError,
    model::GeneratedFile,
    resolver::INTENTION,
    traits::{Diagnostic, Elements, Filer, Messager},
    types::{Element, SourceFile},
    utils::to_snake_case,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorOptions {
    /// Report every failing declaration instead of stopping the round at the
    /// first error.
    pub keep_going: bool,
}

/// The facilities a host hands to the processor once, at init.
pub struct ProcessingEnvironment {
    pub elements: Box<dyn Elements>,
    pub filer:    Box<dyn Filer>,
    pub messager: Box<dyn Messager>,
    pub options:  ProcessorOptions,
}

impl ProcessingEnvironment {
    pub fn new(
        elements: impl Elements + 'static,
        filer: impl Filer + 'static,
        messager: impl Messager + 'static,
    ) -> ProcessingEnvironment {
        ProcessingEnvironment {
            elements: Box::new(elements),
            filer:    Box::new(filer),
            messager: Box::new(messager),
            options:  ProcessorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ProcessorOptions) -> ProcessingEnvironment {
        self.options = options;
        self
    }
}

/// The declarations of one compilation round.
#[derive(Debug, Clone, Default)]
pub struct RoundEnvironment {
    files: Vec<SourceFile>,
}

impl RoundEnvironment {
    pub fn new(files: Vec<SourceFile>) -> RoundEnvironment {
        RoundEnvironment { files }
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Every element carrying the `name` annotation, in declaration order.
    pub fn elements_annotated_with<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.files
            .iter()
            .flat_map(|file| file.elements.iter())
            .filter(move |element| element.annotation(name).is_some())
    }

    pub fn router_candidates(&self) -> impl Iterator<Item = &Element> {
        self.elements_annotated_with(INTENTION)
    }
}

/// Keeps generated files in memory, shared through an `Rc` handle.
#[derive(Debug, Clone, Default)]
pub struct MemoryFiler {
    files: std::rc::Rc<RefCell<Vec<GeneratedFile>>>,
}

impl MemoryFiler {
    pub fn new() -> MemoryFiler {
        MemoryFiler::default()
    }

    pub fn files(&self) -> Vec<GeneratedFile> {
        self.files.borrow().clone()
    }
}

impl Filer for MemoryFiler {
    fn create_source(&self, file: &GeneratedFile) -> Result<(), IntentionError> {
        let mut files = self.files.borrow_mut();
        if files.iter().any(|f| f.package == file.package && f.name == file.name) {
            return Err(IntentionError::Internal(format!(
                "Attempt to recreate a file for type {}",
                file.name
            )));
        }
        files.push(file.clone());
        Ok(())
    }
}

/// Collects diagnostics, shared through an `Rc` handle.
#[derive(Debug, Clone, Default)]
pub struct CollectingMessager {
    diagnostics: std::rc::Rc<RefCell<Vec<Diagnostic>>>,
}

impl CollectingMessager {
    pub fn new() -> CollectingMessager {
        CollectingMessager::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.borrow().iter().filter(|d| d.is_error()).count()
    }
}

impl Messager for CollectingMessager {
    fn print_message(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}

/// Writes each file to `<out_dir>/<package path>/<snake_case name>.rs`.
#[derive(Debug, Clone)]
pub struct FsFiler {
    out_dir: PathBuf,
}

impl FsFiler {
    pub fn new(out_dir: impl Into<PathBuf>) -> FsFiler {
        FsFiler { out_dir: out_dir.into() }
    }

    pub fn path_for(&self, file: &GeneratedFile) -> PathBuf {
        let mut path = self.out_dir.clone();
        for segment in file.package.split("::").filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.rs", to_snake_case(&file.name)));
        path
    }
}

impl Filer for FsFiler {
    fn create_source(&self, file: &GeneratedFile) -> Result<(), IntentionError> {
        let path = self.path_for(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &file.source)?;
        info!("wrote {}", path.display());
        Ok(())
    }
}
