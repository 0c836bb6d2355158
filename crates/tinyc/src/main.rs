//! tinyc - front end for a small imperative language
//!
//! Usage: tinyc [OPTIONS] <input>

use anyhow::Context;
use clap::{Parser as ClapParser, ValueEnum};
use codespan_reporting::term::termcolor::ColorChoice;
use std::fs;
use std::path::PathBuf;
use std::process;
use tinyc::common::DiagnosticReporter;
use tinyc::frontend::{AstFormat, CompileContext, Frontend, FrontendConfig};
use tinyc::CompileError;
use tracing::Level;

/// AST dump format
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum AstStyle {
    /// Indented source-like text
    #[default]
    Tree,
    /// Raw node structures
    Debug,
}

impl From<AstStyle> for AstFormat {
    fn from(style: AstStyle) -> Self {
        match style {
            AstStyle::Tree => AstFormat::Tree,
            AstStyle::Debug => AstFormat::Debug,
        }
    }
}

#[derive(ClapParser, Debug)]
#[command(name = "tinyc")]
#[command(version)]
#[command(about = "Lex, parse and check a tinyc source file", long_about = None)]
struct Args {
    /// Input source file
    #[arg(required = true)]
    input: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dump AST (for debugging)
    #[arg(long)]
    dump_ast: bool,

    /// AST dump format
    #[arg(long, value_enum, default_value = "tree")]
    ast_format: AstStyle,

    /// Dump tokens (for debugging)
    #[arg(long)]
    dump_tokens: bool,

    /// Stop printing diagnostics after this many
    #[arg(long)]
    error_limit: Option<usize>,

    /// Disable coloured diagnostics
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    if let Err(e) = run(&args) {
        match e.downcast_ref::<CompileError>() {
            Some(CompileError::Diagnostics { .. }) => eprintln!("{e}"),
            _ => eprintln!("error: {e:#}"),
        }
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    // Read input file
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("can't open file: {}", args.input.display()))?;
    let filename = args.input.display().to_string();

    // Set up diagnostic reporter
    let color = if args.no_color { ColorChoice::Never } else { ColorChoice::Auto };
    let mut reporter = DiagnosticReporter::with_color(color);
    let file_id = reporter.add_file(filename.clone(), source.clone());

    let config = FrontendConfig {
        dump_tokens: args.dump_tokens,
        dump_ast: args.dump_ast,
        ast_format: args.ast_format.into(),
        verbose: args.verbose,
        error_limit: args.error_limit,
    };

    if args.verbose {
        eprintln!("Checking {}", args.input.display());
    }

    let ctx = CompileContext::new(filename, file_id, &reporter);
    Frontend::new().compile(&source, &ctx, &config)?;

    Ok(())
}
