//! A parser for the ConTeXt typesetting markup language, producing a
//! concrete syntax tree for editors, highlighters and spell checkers.

pub mod formatting;
pub mod grammar;
pub mod language;
pub mod lexical;
pub mod parsing;
pub mod rendering;
pub mod spelling;
mod stack;
