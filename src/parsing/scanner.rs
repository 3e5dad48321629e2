//! Tokens whose extent depends on what surrounds them.

use tracing::trace;

use crate::language::inclusions;
use crate::language::{TokenKind, TokenSet};
use crate::lexical;
use crate::regex;

/// A token recognized by a scanner: its kind and how many bytes of the
/// remaining input it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub width: usize,
}

/// Supplies the tokens the grammar cannot describe by itself. The parser
/// calls `scan()` each time the grammar tries an external token at
/// `offset`; `remaining` is the input from that point on.
///
/// `valid` always holds exactly one kind, the one being tried. Alternatives
/// are tried one call at a time, in grammar order, and the parser settles
/// between them itself, so a scanner never has to choose.
///
/// An implementation returns a token of that kind whose width is no more
/// than `remaining.len()`, or `None` to decline. Only the boundary kinds
/// (see `TokenKind::is_boundary()`) may have zero width.
pub trait Scanner {
    fn scan(&self, valid: TokenSet, offset: usize, remaining: &str) -> Option<Token>;
}

/// The scanner for ConTeXt documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextScanner;

impl Scanner for ContextScanner {
    fn scan(&self, valid: TokenSet, offset: usize, remaining: &str) -> Option<Token> {
        for kind in valid.iter() {
            let width = match kind {
                TokenKind::CommandStop | TokenKind::ScopesStop => Some(0),
                TokenKind::ParagraphMark => paragraph_mark(remaining),
                TokenKind::Text => text(remaining),
                body => inclusions::by_body(body)
                    .and_then(|inclusion| raw_body(remaining, inclusion.close)),
            };

            if let Some(width) = width {
                trace!(?kind, offset, width, "Scanned");
                return Some(Token { kind, width });
            }
        }
        None
    }
}

/// A blank line: optional horizontal space then a line break, followed by
/// one or more lines holding nothing but horizontal space.
fn paragraph_mark(input: &str) -> Option<usize> {
    let re = regex!(r"^[ \t]*\r?\n(?:[ \t]*\r?\n)+");
    re.find(input)
        .map(|m| m.end())
}

/// A run of prose. Interior spaces and single line breaks belong to the
/// run; it ends before anything markup or a paragraph break begins with.
fn text(input: &str) -> Option<usize> {
    if input
        .chars()
        .next()?
        .is_whitespace()
    {
        return None;
    }

    let mut chars = input
        .char_indices()
        .peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' | '{' | '}' | '$' | '%' => return nonempty(i),
            '#' => {
                if let Some((_, next)) = chars.peek() {
                    if next.is_ascii_digit() {
                        return nonempty(i);
                    }
                }
            }
            ' ' | '\t' | '\r' | '\n' => {
                if paragraph_mark(&input[i..]).is_some() {
                    return nonempty(i);
                }
            }
            _ => {}
        }
    }

    nonempty(input.len())
}

fn nonempty(width: usize) -> Option<usize> {
    if width == 0 {
        None
    } else {
        Some(width)
    }
}

/// Everything up to the closing keyword. The keyword only counts when it
/// is a whole word, so `\stopluacodex` inside a Lua body is body text.
fn raw_body(input: &str, close: &str) -> Option<usize> {
    let mut from = 0;

    while let Some(found) = input[from..].find(close) {
        let at = from + found;
        let after = at + close.len();
        let whole = input[after..]
            .chars()
            .next()
            .map_or(true, |c| !lexical::is_word_char(c));

        if whole {
            return nonempty(at);
        }
        from = after;
    }

    None
}
