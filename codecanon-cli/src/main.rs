//! Command-line interface for codecanon
//! This binary turns C++, C#, Go and Python files into canonical token sequences.
//!
//! Usage:
//!   codecanon tokenize [`<path>`...] [--language `<language>`] [--format json|lines|text]
//!   codecanon languages                                    - List supported languages
//!
//! A path of `-`, or no path at all, reads standard input; `--language` is then required.
//! A file that cannot be parsed prints an empty token list and does not change the exit
//! status. Unreadable files, undetectable languages and bad configuration exit with 1.

mod output;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use codecanon_config::{CanonConfig, Loader, OutputFormat};
use codecanon_parser::{Language, Tokenizer};
use output::{FileResult, Input};
use rayon::prelude::*;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const STDIN: &str = "-";
const LOG_ENV: &str = "CODECANON_LOG";

fn main() {
    let matches = Command::new("codecanon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Canonical token sequences for C++, C#, Go and Python source code")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log parse fallbacks and failures to stderr")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("tokenize")
                .about("Print the canonical tokens of source files")
                .arg(
                    Arg::new("paths")
                        .help("Source files; '-' or nothing reads standard input")
                        .num_args(0..)
                        .index(1),
                )
                .arg(
                    Arg::new("language")
                        .long("language")
                        .short('l')
                        .help("Source language (e.g., 'python', 'go', 'c#', 'c++'); detected from the extension when omitted")
                        .value_parser(parse_language),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (default from configuration: json)")
                        .value_parser(["json", "lines", "text"]),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the built-in defaults")
                        .value_parser(value_parser!(std::path::PathBuf)),
                )
                .arg(
                    Arg::new("distinguish-numbers")
                        .long("distinguish-numbers")
                        .help("Map Python integers to INT_LITERAL instead of FLOAT_LITERAL")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("structural-scopes")
                        .long("structural-scopes")
                        .help("Scope Go and C# by syntactic constructs instead of braces")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .help("Include the parse strategy and any failure in JSON output")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("languages").about("List supported languages"))
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("tokenize", sub)) => handle_tokenize_command(sub),
        Some(("languages", _)) => handle_languages_command(),
        _ => unreachable!("a subcommand is required"),
    }
}

fn parse_language(value: &str) -> Result<Language, String> {
    value.parse::<Language>().map_err(|e| e.to_string())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Handle the tokenize command
fn handle_tokenize_command(matches: &ArgMatches) {
    let config = load_config(matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    let paths: Vec<String> = matches
        .get_many::<String>("paths")
        .map(|values| values.cloned().collect())
        .unwrap_or_else(|| vec![STDIN.to_string()]);
    let language = matches.get_one::<Language>("language").copied();

    let inputs = paths
        .iter()
        .map(|path| read_input(path, language))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(1);
        });

    let tokenizer = Tokenizer::new(config.tokenizer_options());
    let results: Vec<FileResult> = inputs
        .into_par_iter()
        .map(|input| {
            let result = tokenizer.tokenize_with_report(input.language, &input.source);
            if let Err(err) = &result {
                debug!(path = %input.label, reason = %err, "could not tokenize");
            }
            FileResult { input, result }
        })
        .collect();
    debug!(files = results.len(), "tokenized");

    let formatted = output::render(&results, config.output.format, matches.get_flag("report"))
        .unwrap_or_else(|e| {
            eprintln!("Error formatting output: {}", e);
            std::process::exit(1);
        });

    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout.write_all(formatted.as_bytes()) {
        eprintln!("Error writing output: {}", e);
        std::process::exit(1);
    }
}

/// Layer the `--config` file and flags over the defaults
fn load_config(matches: &ArgMatches) -> Result<CanonConfig, codecanon_config::ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<std::path::PathBuf>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("distinguish-numbers") {
        loader = loader.set_override("canonicalization.distinguish_numbers", true)?;
    }
    if matches.get_flag("structural-scopes") {
        loader = loader.set_override("canonicalization.scope_boundaries", "structural")?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        let format: OutputFormat = format.parse().map_err(codecanon_config::ConfigError::Message)?;
        loader = loader.set_override("output.format", format.name())?;
    }
    loader.build()
}

fn read_input(path: &str, language: Option<Language>) -> Result<Input, String> {
    if path == STDIN {
        let language = language
            .ok_or_else(|| "Reading standard input requires --language".to_string())?;
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| format!("Error reading standard input: {}", e))?;
        return Ok(Input {
            label: STDIN.to_string(),
            language,
            source,
        });
    }

    let language = match language {
        Some(language) => language,
        None => Language::from_path(path).ok_or_else(|| {
            format!(
                "Cannot detect the language of {}; pass --language",
                Path::new(path).display()
            )
        })?,
    };
    let source =
        std::fs::read_to_string(path).map_err(|e| format!("Error reading {}: {}", path, e))?;
    Ok(Input {
        label: path.to_string(),
        language,
        source,
    })
}

/// Handle the languages command
fn handle_languages_command() {
    println!("Supported languages:\n");
    for language in Language::ALL {
        println!("  {} ({})", language.name(), language);
        println!("    aliases:    {}", language.aliases().join(", "));
        let extensions: Vec<String> = language
            .extensions()
            .iter()
            .map(|extension| format!(".{}", extension))
            .collect();
        println!("    extensions: {}", extensions.join(", "));
        println!();
    }
}
