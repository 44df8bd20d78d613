//! Command-line interface for rpn
//! Tokenizes and parses files of RPN expressions, one expression per line, and prints
//! the grammar compiler's tables.
//!
//! Usage:
//!   rpnc tokens `<path>` [--format `<format>`] [--output `<file>`]  - Tokenize every line
//!   rpnc parse `<path>` [--format `<format>`]                     - Parse every line
//!   rpnc grammar [--section `<section>`]                          - Show productions, sets, table
//!
//! Exit status is 1 when any line failed, 2 for usage, configuration and I/O errors.

use clap::{Arg, ArgAction, ArgMatches, Command};
use rpn::rpn::ast::Expression;
use rpn::rpn::formats::{render_grammar, write_dump, DumpError, FormatRegistry, GrammarSection};
use rpn::rpn::grammar::Grammar;
use rpn::rpn::pipeline::{LineReport, Pipeline, PipelineOptions, Summary};
use rpn::Token;
use rpn_config::{ConfigError, Loader, RpnConfig};
use std::fs::File;
use std::io::BufWriter;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

const TOKEN_FORMATS: [&str; 3] = ["simple", "json", "table"];
const TREE_FORMATS: [&str; 3] = ["treeviz", "json", "yaml"];

fn main() {
    let matches = build_cli().get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(2);
    });
    init_logging(&config, matches.get_count("verbose") > 0);

    let grammar = if config.grammar.strict {
        Grammar::build_strict().unwrap_or_else(|e| {
            eprintln!("{}", e);
            process::exit(2);
        })
    } else {
        Grammar::build()
    };

    let all_ok = match matches.subcommand() {
        Some(("tokens", sub)) => handle_tokens_command(sub, &config, &grammar),
        Some(("parse", sub)) => handle_parse_command(sub, &config, &grammar),
        Some(("grammar", sub)) => {
            let section = sub
                .get_one::<String>("section")
                .and_then(|s| s.parse::<GrammarSection>().ok())
                .unwrap_or(GrammarSection::All);
            print!("{}", render_grammar(&grammar, section));
            true
        }
        _ => unreachable!(),
    };

    if !all_ok {
        process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("rpnc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Lexer and LL(1) parser for parenthesized RPN expressions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(
            Command::new("tokens")
                .about("Tokenize every line of a file")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(TOKEN_FORMATS)
                        .help("Token format (defaults to output.tokens)"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Also write a token dump file (one JSON array per line)"),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse every line of a file into a derivation tree")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(TREE_FORMATS)
                        .help("Tree format (defaults to output.tree)"),
                ),
        )
        .subcommand(
            Command::new("grammar")
                .about("Show productions, FIRST/FOLLOW sets and the prediction table")
                .arg(
                    Arg::new("section")
                        .long("section")
                        .short('s')
                        .value_parser(GrammarSection::NAMES)
                        .default_value("all"),
                ),
        )
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("File with one expression per line")
        .required(true)
        .index(1)
}

fn load_config(matches: &ArgMatches) -> Result<RpnConfig, ConfigError> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    let verbosity = matches.get_count("verbose");
    if verbosity > 0 {
        loader = loader.set_override("logging.level", verbosity_level(verbosity))?;
    }
    loader.build()
}

fn verbosity_level(count: u8) -> &'static str {
    match count {
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// `-v` beats `RUST_LOG`, which beats `logging.level`.
fn init_logging(config: &RpnConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(&config.logging.level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        process::exit(2);
    })
}

fn report_failure<T>(report: &LineReport<T>) {
    if let Err(err) = &report.result {
        eprintln!("line {}: {}", report.line, err);
        eprintln!("    {}", report.text);
    }
}

fn handle_tokens_command(matches: &ArgMatches, config: &RpnConfig, grammar: &Grammar) -> bool {
    let path = matches.get_one::<String>("path").unwrap();
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or(config.output.tokens.as_str());

    let source = read_source(path);
    let pipeline = Pipeline::with_options(grammar, PipelineOptions::from(&config.pipeline));
    let reports = pipeline.tokenize(&source);
    let registry = FormatRegistry::<[Token]>::tokens();

    for report in &reports {
        match &report.result {
            Ok(tokens) => {
                println!("line {}: {}", report.line, report.text);
                match registry.serialize(tokens, format) {
                    Ok(output) => print!("{}", output),
                    Err(e) => {
                        eprintln!("Format error: {}", e);
                        process::exit(2);
                    }
                }
            }
            Err(_) => report_failure(report),
        }
    }

    if let Some(output) = matches.get_one::<String>("output") {
        let lines: Vec<Vec<Token>> = reports
            .iter()
            .filter_map(|r| r.result.as_ref().ok().cloned())
            .collect();
        let written = File::create(output)
            .map_err(DumpError::from)
            .and_then(|file| write_dump(BufWriter::new(file), &lines));
        if let Err(e) = written {
            eprintln!("Error writing token dump: {}", e);
            process::exit(2);
        }
        info!(path = %output, lines = lines.len(), "token dump written");
    }

    finish(Summary::from_reports(&reports))
}

fn handle_parse_command(matches: &ArgMatches, config: &RpnConfig, grammar: &Grammar) -> bool {
    let path = matches.get_one::<String>("path").unwrap();
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or(config.output.tree.as_str());

    let source = read_source(path);
    let pipeline = Pipeline::with_options(grammar, PipelineOptions::from(&config.pipeline));
    let reports = pipeline.process(&source);
    let registry = FormatRegistry::<Expression>::trees();

    for report in &reports {
        match &report.result {
            Ok(parsed) => {
                println!("line {}: {}", report.line, report.text);
                match registry.serialize(&parsed.tree, format) {
                    Ok(output) => print!("{}", output),
                    Err(e) => {
                        eprintln!("Format error: {}", e);
                        process::exit(2);
                    }
                }
            }
            Err(_) => report_failure(report),
        }
    }

    finish(Summary::from_reports(&reports))
}

fn finish(summary: Summary) -> bool {
    eprintln!("{}", summary);
    summary.all_succeeded()
}
