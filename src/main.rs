use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use colored::Colorize;
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use monkeylex::repl::{current_user, greeting, Repl, ReplConfig, PROMPT};
use monkeylex::{check_source, tokenize};

#[derive(Parser)]
#[command(name = "monkeylex")]
#[command(author, version, about = "The Monkey language scanner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// One token per line
    #[value(name = "text")]
    Text,
    /// A JSON array of tokens
    #[value(name = "json")]
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive REPL that prints the tokens of each line
    Repl {
        /// Prompt printed before each line
        #[arg(long, default_value = PROMPT)]
        prompt: String,

        /// Print tokens without their positions
        #[arg(long)]
        no_positions: bool,
    },

    /// Dump every token of a source file
    Tokens {
        /// The source file to scan
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,

        /// Fail if the file contains illegal characters
        #[arg(long)]
        deny_illegal: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins over the verbosity flag
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let command = cli.command.unwrap_or(Commands::Repl {
        prompt: PROMPT.to_string(),
        no_positions: false,
    });

    let result = match command {
        Commands::Repl {
            prompt,
            no_positions,
        } => repl(prompt, no_positions),
        Commands::Tokens {
            input,
            format,
            deny_illegal,
        } => dump_tokens(input, format, deny_illegal),
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn repl(prompt: String, no_positions: bool) -> Result<()> {
    println!("{}", greeting(&current_user()));

    let config = ReplConfig {
        prompt,
        show_positions: !no_positions,
        color: true,
    };
    let stats = Repl::new(config)
        .run(io::stdin().lock(), io::stdout().lock())
        .context("REPL session failed")?;

    log::info!(
        "session ended: {} lines, {} tokens, {} illegal",
        stats.lines,
        stats.tokens,
        stats.illegal
    );
    println!();
    Ok(())
}

fn dump_tokens(input: PathBuf, format: Format, deny_illegal: bool) -> Result<()> {
    let source = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read source file: {:?}", input))?;
    log::debug!("scanning {:?} ({} bytes)", input, source.len());

    let tokens = tokenize(&source);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        Format::Text => {
            for token in &tokens {
                writeln!(out, "{}", token)?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &tokens)?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    if deny_illegal {
        let report = check_source(&input.display().to_string(), &source);
        if report.has_errors() {
            let choice = if io::stderr().is_terminal() {
                ColorChoice::Auto
            } else {
                ColorChoice::Never
            };
            let writer = StandardStream::stderr(choice);
            report.emit(&mut writer.lock())?;
            anyhow::bail!("{} illegal character(s) in {:?}", report.error_count(), input);
        }
    }

    Ok(())
}
