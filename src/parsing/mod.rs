//! parser for ConTeXt documents

use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::grammar;
use crate::language::{LoadingError, Tree};

mod builder;
mod parser;
mod resolve;
mod scanner;

pub use parser::{Parser, ParsingError};
pub use scanner::{ContextScanner, Scanner, Token};

/// Read a file and return an owned String. We pass that ownership back to the
/// main function so that the Tree created by parse() below can borrow from
/// it. A filename of `-` reads standard input.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    if filename == Path::new("-") {
        let mut content = String::new();
        return match std::io::stdin().read_to_string(&mut content) {
            Ok(_) => Ok(content),
            Err(error) => {
                debug!(?error);
                Err(LoadingError {
                    problem: "Failed reading standard input".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                })
            }
        };
    }

    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Parse text into a syntax Tree using the ConTeXt grammar and scanner.
/// Problems in the document itself do not fail the parse; they are
/// recovered from and reported by `Tree::errors()`.
pub fn parse(content: &str) -> Result<Tree<'_>, ParsingError> {
    let language = grammar::language()?;
    parse_with(language, &ContextScanner, content)
}

/// Parse with a particular grammar and scanner.
pub fn parse_with<'i>(
    language: &grammar::Grammar,
    scanner: &dyn Scanner,
    content: &'i str,
) -> Result<Tree<'i>, ParsingError> {
    let tree = Parser::new(language, scanner, content).parse()?;

    let errors = tree
        .errors()
        .len();
    if errors == 0 {
        debug!("Parsed without errors");
    } else {
        debug!(
            "Recovered from {} error{}",
            errors,
            if errors == 1 { "" } else { "s" }
        );
    }

    Ok(tree)
}
