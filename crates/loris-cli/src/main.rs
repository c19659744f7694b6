//! Loris Language CLI
//!
//! Command-line interface for the Loris programming language: a one-shot
//! runner (file or stdin), a REPL, and lexer/parser debugging subcommands.

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand};
use loris_interpreter::{interpret, Environment, InterpretError, Interpreter, RuntimeError};
use loris_parser::{parse, ParseError};
use std::cell::RefCell;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "loris")]
#[command(version)]
#[command(about = "The Loris programming language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Loris program from a file, or from stdin when no file is given
    Run {
        /// Source file to run
        file: Option<PathBuf>,
    },
    /// Start an interactive session
    Repl,
    /// Lex a source file and display tokens
    Lex {
        /// Source file to lex
        file: PathBuf,
    },
    /// Parse a source file and display the program
    Parse {
        /// Source file to parse
        file: PathBuf,
        /// Show the full AST instead of the printed form
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { file: Some(file) } => run_file(&file),
        Commands::Run { file: None } => run_stdin(),
        Commands::Repl => repl(),
        Commands::Lex { file } => lex_file(&file),
        Commands::Parse { file, verbose } => parse_file(&file, verbose),
    }
}

fn read_source(path: &PathBuf) -> Result<String, ExitCode> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("Error reading file '{}': {}", path.display(), e);
        ExitCode::FAILURE
    })
}

/// Run a program read from stdin against a fresh root environment.
///
/// Parse errors print in the plain `parser errors:` format; the final value
/// prints in its inspect form.
fn run_stdin() -> ExitCode {
    let mut source = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut source) {
        eprintln!("Error reading stdin: {}", e);
        return ExitCode::FAILURE;
    }

    let env = Rc::new(RefCell::new(Environment::new()));
    match interpret(&source, &env) {
        Ok(value) => {
            println!("{}", value.inspect());
            ExitCode::SUCCESS
        }
        Err(InterpretError::Parse(errors)) => {
            print_parse_errors(&errors);
            ExitCode::FAILURE
        }
        Err(InterpretError::Runtime(error)) => {
            println!("{}", error);
            ExitCode::FAILURE
        }
    }
}

/// Run a program from a file, reporting errors against the source
fn run_file(path: &PathBuf) -> ExitCode {
    let source = match read_source(path) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let filename = path.display().to_string();

    let (program, parse_errors) = parse(&source);
    if !parse_errors.is_empty() {
        for error in &parse_errors {
            report_parse_error(&filename, &source, error);
        }
        return ExitCode::FAILURE;
    }

    let mut interpreter = Interpreter::new();
    match interpreter.run(&program) {
        Ok(value) => {
            println!("{}", value.inspect());
            ExitCode::SUCCESS
        }
        Err(runtime_error) => {
            report_runtime_error(&filename, &source, &runtime_error);
            ExitCode::FAILURE
        }
    }
}

/// Interactive session; the root environment persists across lines so `let`
/// bindings survive.
fn repl() -> ExitCode {
    println!("Loris v{} (REPL)", env!("CARGO_PKG_VERSION"));

    let env = Rc::new(RefCell::new(Environment::new()));
    let mut line = String::new();
    loop {
        print!(">>> ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        line.clear();
        match io::stdin().read_line(&mut line) {
            Ok(0) => return ExitCode::SUCCESS,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                return ExitCode::FAILURE;
            }
        }

        match interpret(&line, &env) {
            Ok(value) => println!("{}", value.inspect()),
            Err(InterpretError::Parse(errors)) => print_parse_errors(&errors),
            Err(InterpretError::Runtime(error)) => println!("{}", error),
        }
    }
}

/// Lex a source file and display tokens
fn lex_file(path: &PathBuf) -> ExitCode {
    let source = match read_source(path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let tokens = loris_lexer::Lexer::new(&source).tokenize();
    println!("Tokens ({}):", tokens.len());
    for token in &tokens {
        println!("  {:?} @ {:?}", token.kind, token.span);
    }

    ExitCode::SUCCESS
}

/// Parse a source file and display the program
fn parse_file(path: &PathBuf, verbose: bool) -> ExitCode {
    let source = match read_source(path) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let filename = path.display().to_string();

    let (program, parse_errors) = parse(&source);
    for error in &parse_errors {
        report_parse_error(&filename, &source, error);
    }

    if verbose {
        println!("{:#?}", program);
    } else {
        println!("{}", program);
    }

    if parse_errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_parse_errors(errors: &[ParseError]) {
    println!("parser errors:");
    for error in errors {
        println!("\t{}", error);
    }
}

/// Report a parse error using ariadne
fn report_parse_error(filename: &str, source: &str, error: &ParseError) {
    let span = error.span();
    Report::build(ReportKind::Error, filename, span.start)
        .with_message("parse error")
        .with_label(
            Label::new((filename, span.start..span.end))
                .with_message(error.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .print((filename, Source::from(source)))
        .unwrap();
}

/// Report a runtime error using ariadne
fn report_runtime_error(filename: &str, source: &str, error: &RuntimeError) {
    let span = error.span();
    Report::build(ReportKind::Error, filename, span.start)
        .with_message("runtime error")
        .with_label(
            Label::new((filename, span.start..span.end))
                .with_message(error.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .print((filename, Source::from(source)))
        .unwrap();
}
