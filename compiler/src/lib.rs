//! intention-compiler
//!
//! This crate implements:
//!  1) A tokenizer + parser for `.intent` declaration files,
//!  2) Validation of `@Intention` routing interfaces and their parameters,
//!  3) Destination lookup with a fallback for types compiled in the same round,
//!  4) Code generation of `<Name>Util` request builders (`generate_router`),
//!  5) The two-phase `IntentionProcessor` and the host facilities it runs on.

pub mod error;
pub mod types;
pub mod model;
pub mod utils;
pub mod tokenizer;
pub mod parser;
pub mod symbols;
pub mod traits;
pub mod resolver;
pub mod verifier;
pub mod gen_rust;
pub mod env;
pub mod processor;
pub mod compiler;

pub use compiler::{compile_round, compile_sources, parse_declarations, CompileOutcome};
pub use env::{CollectingMessager, FsFiler, MemoryFiler, ProcessingEnvironment, ProcessorOptions, RoundEnvironment};
pub use error::IntentionError;
pub use gen_rust::generate_router;
pub use processor::IntentionProcessor;
pub use symbols::SymbolTable;
