use clap::{Arg, ArgAction, Command};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::Path;
use tracing::{debug, Level};

use context::formatting::Identity;
use context::language::Tree;
use context::parsing;
use context::rendering::{self, Terminal};
use context::spelling;

mod problem;

use problem::{concise_loading_error, concise_parsing_error, full_parsing_error, position};

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("context")
        .version(VERSION)
        .propagate_version(true)
        .about("Syntax tools for the ConTeXt typesetting language.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug output."),
        )
        .subcommand(
            Command::new("check")
                .about("Syntax-check the given document")
                .arg(
                    Arg::new("concise")
                        .long("concise")
                        .action(ArgAction::SetTrue)
                        .help("Report each problem on a single line."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The ConTeXt file you want to check, or '-' to read standard input."),
                ),
        )
        .subcommand(
            Command::new("tree")
                .about("Print the syntax tree of the given document")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit the full tree, spans and anonymous tokens included, as JSON."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The ConTeXt file you want to parse, or '-' to read standard input."),
                ),
        )
        .subcommand(
            Command::new("highlight")
                .about("Syntax highlight the given document")
                .arg(
                    Arg::new("raw-control-chars")
                        .short('R')
                        .long("raw-control-chars")
                        .action(ArgAction::SetTrue)
                        .help("Emit ANSI escape codes for syntax highlighting even if output is redirected to a pipe or file."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The ConTeXt file you want to highlight, or '-' to read standard input."),
                ),
        )
        .subcommand(
            Command::new("words")
                .about("List the words of prose in the given document")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The ConTeXt file you want to extract words from, or '-' to read standard input."),
                ),
        )
        .subcommand(
            Command::new("spell")
                .about("Spell check the prose of the given document")
                .arg(
                    Arg::new("dictionary")
                        .long("dictionary")
                        .default_value("/usr/share/hunspell/en_US")
                        .help("Base path of the Hunspell dictionary, without the .aff or .dic extension."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The ConTeXt file you want to spell check, or '-' to read standard input."),
                ),
        )
        .subcommand(
            Command::new("injections")
                .about("List the regions of embedded code in the given document")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The ConTeXt file you want to scan, or '-' to read standard input."),
                ),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let Some((name, submatches)) = matches.subcommand() else {
        println!("usage: context [COMMAND] ...");
        println!("Try '--help' for more information.");
        return;
    };

    // every subcommand requires this argument
    let filename = submatches
        .get_one::<String>("filename")
        .map(Path::new)
        .unwrap_or(Path::new("-"));
    debug!(?filename, command = name);

    let content = match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", concise_loading_error(&error));
            std::process::exit(1);
        }
    };

    let tree = match parsing::parse(&content) {
        Ok(tree) => tree,
        Err(error) => {
            eprintln!("{}: {}", "error".bright_red(), error);
            std::process::exit(1);
        }
    };

    match name {
        "check" => check(&tree, filename, submatches.get_flag("concise")),
        "tree" => {
            if submatches.get_flag("json") {
                match serde_json::to_string_pretty(tree.root()) {
                    Ok(json) => println!("{}", json),
                    Err(error) => {
                        eprintln!("{}: {}", "error".bright_red(), error);
                        std::process::exit(1);
                    }
                }
            } else {
                println!("{}", tree.to_sexp());
            }
        }
        "highlight" => {
            let result = if submatches.get_flag("raw-control-chars")
                || std::io::stdout().is_terminal()
            {
                rendering::render(&Terminal, &tree)
            } else {
                rendering::render(&Identity, &tree)
            };
            print!("{}", result);
        }
        "words" => {
            for (offset, word) in tree.words() {
                let (line, column) = position(tree.source(), offset);
                println!("{}:{}\t{}", line, column, word);
            }
        }
        "spell" => {
            let base = submatches
                .get_one::<String>("dictionary")
                .map(Path::new)
                .unwrap_or(Path::new("en_US"));
            spell(&tree, base);
        }
        "injections" => {
            for injection in tree.injections() {
                let (line, column) = position(tree.source(), injection.span.start);
                println!(
                    "{}\t{}:{}\t{}..{}",
                    injection.language,
                    line,
                    column,
                    injection
                        .span
                        .start,
                    injection
                        .span
                        .end
                );
            }
        }
        _ => {
            println!("No valid subcommand was used")
        }
    }
}

fn check(tree: &Tree, filename: &Path, concise: bool) {
    let errors = tree.errors();
    if errors.is_empty() {
        debug!("No problems found");
        return;
    }

    let styled = std::io::stderr().is_terminal();
    for error in errors {
        let message = match (concise, styled) {
            (true, _) => concise_parsing_error(error, filename, tree.source(), &Identity),
            (false, true) => full_parsing_error(error, filename, tree.source(), &Terminal),
            (false, false) => full_parsing_error(error, filename, tree.source(), &Identity),
        };
        eprintln!("{}", message);
        if !concise {
            eprintln!();
        }
    }
    std::process::exit(1);
}

fn spell(tree: &Tree, base: &Path) {
    let dictionary = match spelling::load_dictionary(base) {
        Ok(dictionary) => dictionary,
        Err(error) => {
            eprintln!("{}", concise_loading_error(&error));
            std::process::exit(1);
        }
    };

    let misspellings = spelling::check(tree, &dictionary);
    if misspellings.is_empty() {
        debug!("No misspellings found");
        return;
    }

    for misspelling in &misspellings {
        let (line, column) = position(tree.source(), misspelling.offset);
        println!(
            "{}:{}\t{}\t{}",
            line,
            column,
            misspelling.word,
            misspelling
                .suggestions
                .join(", ")
        );
    }
    std::process::exit(1);
}
