//! Loxide CLI
//!
//! Main entry point for the `loxide` command.

use clap::{Parser, Subcommand};
use miette::Result;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use loxide::diagnostics::{RunError, SourceFile};
use loxide::interp::Interpreter;

#[derive(Parser)]
#[command(name = "loxide")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A tree-walking interpreter for the Lox programming language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Lox script
    Run {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the token stream of a script
    Tokens {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the parsed AST as JSON
    Ast {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Start the interactive REPL
    Repl,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run { input }) => run(&input),
        Some(Commands::Tokens { input }) => tokens(&input),
        Some(Commands::Ast { input }) => ast(&input),
        Some(Commands::Repl) | None => loxide::repl::repl(),
    }
}

fn read_source(input: &Path) -> Result<SourceFile> {
    let content = std::fs::read_to_string(input)
        .map_err(|e| miette::miette!("Failed to read input file: {}", e))?;
    Ok(SourceFile::new(input.to_string_lossy().to_string(), content))
}

fn run(input: &Path) -> Result<()> {
    tracing::info!("Running {:?}", input);

    let file = read_source(input)?;
    let mut interpreter = Interpreter::new();

    match loxide::run(&file, &mut interpreter) {
        Ok(()) => Ok(()),
        Err(err) => {
            err.emit_all();
            // sysexits convention: EX_DATAERR for malformed input,
            // EX_SOFTWARE for a fault during execution.
            let code = match err {
                RunError::Syntax(_) => 65,
                RunError::Runtime(_) => 70,
            };
            std::process::exit(code);
        }
    }
}

fn tokens(input: &Path) -> Result<()> {
    let file = read_source(input)?;
    let (tokens, errors) = loxide::lexer::lex(&file);

    for token in &tokens {
        println!("{:>4}  {:<12}  {}", token.line, format!("{:?}", token.kind), token.text);
    }

    if !errors.is_empty() {
        RunError::Syntax(errors).emit_all();
        std::process::exit(65);
    }
    Ok(())
}

fn ast(input: &Path) -> Result<()> {
    let file = read_source(input)?;

    match loxide::parse_file(&file) {
        Ok(statements) => {
            let json = serde_json::to_string_pretty(&statements)
                .map_err(|e| miette::miette!("Failed to serialize AST: {}", e))?;
            println!("{}", json);
            Ok(())
        }
        Err(errors) => {
            RunError::Syntax(errors).emit_all();
            std::process::exit(65);
        }
    }
}
