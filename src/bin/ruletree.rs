//! Command-line interface for ruletree
//!
//! Usage:
//!   ruletree parse `<expression>` [--grammar `<name|path>`] [--format `<format>`] [--strict]
//!   ruletree list-grammars
//!   ruletree list-formats
//!
//! Set `RULETREE_LOG` (e.g. `RULETREE_LOG=debug`) to see rule passes on stderr.

use clap::{Arg, ArgAction, Command};
use ruletree::config;
use ruletree::formats::FormatRegistry;
use ruletree::{ClassificationPolicy, SyntaxTree};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let matches = Command::new("ruletree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build syntax trees from expressions with regex splitting rules")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Build and print the tree of an expression")
                .arg(
                    Arg::new("expression")
                        .help("The expression to parse")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("grammar")
                        .long("grammar")
                        .short('g')
                        .help("Built-in grammar name or path to a YAML/JSON grammar file")
                        .default_value("arithmetic"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'repr', 'treeviz', 'json')")
                        .default_value("repr"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Fail when a leaf matches no leaf rule")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("list-grammars").about("List built-in grammars"))
        .subcommand(Command::new("list-formats").about("List output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("parse", parse_matches)) => {
            let expression = parse_matches.get_one::<String>("expression").unwrap();
            let grammar = parse_matches.get_one::<String>("grammar").unwrap();
            let format = parse_matches.get_one::<String>("format").unwrap();
            handle_parse_command(expression, grammar, format, parse_matches.get_flag("strict"));
        }
        Some(("list-grammars", _)) => handle_list_grammars_command(),
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("RULETREE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_parse_command(expression: &str, grammar_spec: &str, format: &str, strict: bool) {
    let grammar = config::builtin()
        .resolve(grammar_spec)
        .unwrap_or_else(|e| {
            eprintln!("Error loading grammar: {}", e);
            std::process::exit(1);
        });

    let mut options = grammar.options();
    if strict {
        options.classification = ClassificationPolicy::Strict;
    }

    let tree = SyntaxTree::build_with_options(expression, &grammar, options).unwrap_or_else(|e| {
        eprintln!("Build error: {}", e);
        std::process::exit(1);
    });

    let output = FormatRegistry::with_defaults()
        .serialize(&tree, format)
        .unwrap_or_else(|e| {
            eprintln!("Output error: {}", e);
            std::process::exit(1);
        });

    print!("{}", output);
}

fn handle_list_grammars_command() {
    println!("Available grammars:\n");
    for named in config::builtin().list_all() {
        println!("  {}", named.name);
        println!("    {}", named.description);
    }
}

fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let description = registry.get(&name).map(|f| f.description()).unwrap_or("");
        println!("  {:<10} {}", name, description);
    }
}
