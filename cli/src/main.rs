use clap::{Parser, Subcommand};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use intention_compiler::env::{CollectingMessager, FsFiler, MemoryFiler, ProcessingEnvironment, ProcessorOptions, RoundEnvironment};
use intention_compiler::error::IntentionError;
use intention_compiler::traits::{Diagnostic, Filer};
use intention_compiler::types::SourceFile;
use intention_compiler::{parse_declarations, IntentionProcessor, SymbolTable};

#[derive(Parser)]
#[command(name = "intention")]
#[command(about = "Generate request builders from @Intention routing interfaces", long_about = None)]
struct Cli {
    /// Print diagnostics as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct RoundArgs {
    /// Input `.intent` files
    #[arg(short, long, required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Fully-qualified types compiled earlier (e.g. `lib::screens::Legacy`)
    #[arg(long = "extern", value_name = "PATH")]
    externs: Vec<String>,

    /// Report every failing interface instead of stopping at the first
    #[arg(long)]
    keep_going: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a `<Name>Util` source for every `@Intention` interface
    Generate {
        #[command(flatten)]
        round: RoundArgs,

        /// Output directory (if omitted, prints to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate declarations without writing anything
    Check {
        #[command(flatten)]
        round: RoundArgs,
    },

    /// Print the parsed declarations of one file as JSON
    Dump {
        /// Input `.intent` file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err((path, err)) => {
            print_failure(&path, &err, cli.json);
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when diagnostics were reported.
fn run(cli: &Cli) -> Result<bool, (PathBuf, IntentionError)> {
    match &cli.command {
        Commands::Generate { round, output } => match output {
            Some(out_dir) => {
                let filer = FsFiler::new(out_dir);
                run_round(round, filer, cli.json)
            }
            None => {
                let filer = MemoryFiler::new();
                let ok = run_round(round, filer.clone(), cli.json)?;
                for file in filer.files() {
                    println!("{}", file.source);
                }
                Ok(ok)
            }
        },

        Commands::Check { round } => run_round(round, MemoryFiler::new(), cli.json),

        Commands::Dump { input } => {
            let file = read_declarations(input)?;
            let json = serde_json::to_string_pretty(&file)
                .map_err(|e| (input.clone(), IntentionError::Internal(e.to_string())))?;
            println!("{}", json);
            Ok(true)
        }
    }
}

fn read_declarations(path: &Path) -> Result<SourceFile, (PathBuf, IntentionError)> {
    let text = fs::read_to_string(path).map_err(|e| (path.to_path_buf(), IntentionError::Io(e)))?;
    parse_declarations(&text).map_err(|e| (path.to_path_buf(), e))
}

fn run_round(args: &RoundArgs, filer: impl Filer + 'static, json: bool) -> Result<bool, (PathBuf, IntentionError)> {
    let mut inputs = Vec::with_capacity(args.input.len());
    for path in &args.input {
        debug!("parsing {}", path.display());
        inputs.push((path.clone(), read_declarations(path)?));
    }

    let files: Vec<SourceFile> = inputs.iter().map(|(_, file)| file.clone()).collect();
    let symbols = SymbolTable::new(&files).with_compiled(args.externs.iter().cloned());
    let messager = CollectingMessager::new();
    let options = ProcessorOptions { keep_going: args.keep_going };

    let processor = IntentionProcessor::new();
    let first = args.input.first().cloned().unwrap_or_default();
    processor
        .init(ProcessingEnvironment::new(symbols, filer, messager.clone()).with_options(options))
        .map_err(|e| (first.clone(), e))?;
    processor
        .process(&RoundEnvironment::new(files))
        .map_err(|e| (first, e))?;

    let diagnostics = messager.diagnostics();
    print_diagnostics(&inputs, &diagnostics, json);
    info!("{} diagnostic(s)", diagnostics.len());
    Ok(messager.error_count() == 0)
}

/// The input that declares the symbol a diagnostic points at.
fn source_of<'a>(inputs: &'a [(PathBuf, SourceFile)], diagnostic: &Diagnostic) -> Option<&'a Path> {
    let symbol = &diagnostic.location.as_ref()?.symbol;
    inputs
        .iter()
        .find(|(_, file)| {
            file.elements.iter().any(|element| {
                let name = element.qualified_name();
                *symbol == name || symbol.starts_with(&format!("{}::", name))
            })
        })
        .map(|(path, _)| path.as_path())
}

fn print_diagnostics(inputs: &[(PathBuf, SourceFile)], diagnostics: &[Diagnostic], json: bool) {
    if json {
        let entries: Vec<serde_json::Value> = diagnostics
            .iter()
            .map(|d| {
                serde_json::json!({
                    "file": source_of(inputs, d).map(|p| p.display().to_string()),
                    "kind": d.kind,
                    "message": d.message,
                    "location": d.location,
                })
            })
            .collect();
        eprintln!("{}", serde_json::Value::Array(entries));
        return;
    }

    for d in diagnostics {
        let kind = if d.is_error() { "error" } else { "warning" };
        match (source_of(inputs, d), &d.location) {
            (Some(path), Some(loc)) => eprintln!(
                "{}: {}:{}:{}: {} ({})",
                kind,
                path.display(),
                loc.line,
                loc.column,
                d.message,
                loc.symbol
            ),
            _ => eprintln!("{}", d),
        }
    }
}

fn print_failure(path: &Path, err: &IntentionError, json: bool) {
    let (line, column) = match err {
        IntentionError::ParseError { line, column, .. } => (*line, *column),
        _ => (0, 0),
    };
    let message = match err {
        IntentionError::ParseError { msg, .. } => msg.clone(),
        other => other.to_string(),
    };
    if json {
        eprintln!(
            "{}",
            serde_json::json!([{
                "file": path.display().to_string(),
                "kind": "Error",
                "message": message,
                "location": { "line": line, "column": column },
            }])
        );
    } else if line > 0 {
        eprintln!("error: {}:{}:{}: {}", path.display(), line, column, message);
    } else {
        eprintln!("error: {}: {}", path.display(), message);
    }
}
