//! loxscan CLI
//!
//! Usage: loxscan <tokenize|parse|evaluate|run> <FILE>

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use loxscan::diagnostics::exit_codes;
use loxscan::{Command, Driver};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "loxscan")]
#[command(version)]
#[command(about = "Scan, parse and evaluate expressions with a longest-match automaton", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: CliCommand,

    /// When to use colors in CLI messages
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    color: ColorChoice,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print tokens to stderr before parsing
    #[arg(long, default_value_t = false, global = true)]
    dump_tokens: bool,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Print the token stream
    Tokenize {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the parsed expression tree
    Parse {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the value of the expression
    Evaluate {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Execute `;`-terminated expression statements
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl CliCommand {
    fn split(self) -> (Command, PathBuf) {
        match self {
            CliCommand::Tokenize { file } => (Command::Tokenize, file),
            CliCommand::Parse { file } => (Command::Parse, file),
            CliCommand::Evaluate { file } => (Command::Evaluate, file),
            CliCommand::Run { file } => (Command::Run, file),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            let code = if e.use_stderr() {
                exit_codes::USAGE
            } else {
                exit_codes::SUCCESS
            };
            return ExitCode::from(code);
        }
    };

    match args.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {}
    }
    init_tracing(args.verbose);

    let (command, path) = args.command.split();

    // Read source file
    let source = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "{}: could not read file '{}': {}",
                "error".red().bold(),
                path.display(),
                e
            );
            return ExitCode::from(exit_codes::DATA_ERROR);
        }
    };

    let mut driver = Driver::new(path.to_string_lossy().to_string(), source);
    driver.set_dump_tokens(args.dump_tokens);

    let outcome = driver.execute(command);

    for line in &outcome.stdout {
        println!("{}", line);
    }
    for diag in &outcome.diagnostics {
        eprintln!("{}", diag);
    }

    ExitCode::from(outcome.exit_code)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(colored::control::SHOULD_COLORIZE.should_colorize())
        .with_target(false)
        .init();
}
