//! The result of parsing a document.

use serde::Serialize;

use super::inclusions::{self, Language};
use super::{Kind, Node, Span};
use crate::parsing::ParsingError;
use crate::stack::ensure_sufficient_stack;

/// A parsed document. The tree borrows the source it was parsed from; the
/// errors are those recovered from during the parse, each of which also
/// appears as an `ERROR` node.
#[derive(Debug)]
pub struct Tree<'i> {
    source: &'i str,
    root: Node,
    errors: Vec<ParsingError>,
}

/// A region of embedded foreign language, for routing to another parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Injection<'i> {
    pub language: &'static str,
    pub kind: Kind,
    pub span: Span,
    pub body: &'i str,
}

impl<'i> Tree<'i> {
    pub(crate) fn new(source: &'i str, root: Node, errors: Vec<ParsingError>) -> Tree<'i> {
        Tree {
            source,
            root,
            errors,
        }
    }

    pub fn source(&self) -> &'i str {
        self.source
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn errors(&self) -> &[ParsingError] {
        &self.errors
    }

    pub fn has_error(&self) -> bool {
        !self
            .errors
            .is_empty()
            || self
                .root
                .descendants()
                .any(|node| node.kind == Kind::Error)
    }

    pub fn text(&self, node: &Node) -> &'i str {
        node.text(self.source)
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.root
            .leaves()
    }

    /// Every `text` leaf, in order. These are the runs of prose a spell
    /// checker or word counter wants to see.
    pub fn text_runs(&self) -> impl Iterator<Item = &Node> {
        self.root
            .descendants()
            .filter(|node| node.kind == Kind::Text)
    }

    /// The whitespace separated words of the prose, with their byte offsets.
    pub fn words(&self) -> Vec<(usize, &'i str)> {
        let mut result = Vec::new();
        for node in self.text_runs() {
            let run = node.text(self.source);
            let mut start = None;
            for (i, c) in run.char_indices() {
                match (c.is_whitespace(), start) {
                    (true, Some(begin)) => {
                        result.push((node.span.start + begin, &run[begin..i]));
                        start = None;
                    }
                    (false, None) => start = Some(i),
                    _ => {}
                }
            }
            if let Some(begin) = start {
                result.push((node.span.start + begin, &run[begin..]));
            }
        }
        result
    }

    pub fn injections(&self) -> Vec<Injection<'i>> {
        self.root
            .descendants()
            .filter_map(|node| {
                let inclusion = inclusions::by_body_kind(node.kind)?;
                Some(Injection {
                    language: inclusion
                        .language
                        .as_str(),
                    kind: node.kind,
                    span: node.span,
                    body: node.text(self.source),
                })
            })
            .collect()
    }

    /// The languages embedded in this document, without duplicates, in
    /// order of first appearance.
    pub fn languages(&self) -> Vec<Language> {
        let mut result: Vec<Language> = Vec::new();
        for node in self
            .root
            .descendants()
        {
            if let Some(inclusion) = inclusions::by_body_kind(node.kind) {
                if !result.contains(&inclusion.language) {
                    result.push(inclusion.language);
                }
            }
        }
        result
    }

    /// Render the named structure of the tree as an S-expression, the same
    /// shape tree-sitter based tooling prints.
    pub fn to_sexp(&self) -> String {
        let mut output = String::new();
        write_sexp(&self.root, &mut output);
        output
    }
}

fn write_sexp(node: &Node, output: &mut String) {
    ensure_sufficient_stack(|| {
        output.push('(');
        output.push_str(
            node.kind
                .as_str(),
        );
        for child in node.named_children() {
            output.push(' ');
            write_sexp(child, output);
        }
        output.push(')');
    })
}
