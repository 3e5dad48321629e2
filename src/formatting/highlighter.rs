//! Classify the leaves of a syntax tree for highlighting.

use std::borrow::Cow;

use super::Syntax;
use crate::language::inclusions;
use crate::language::{Kind, Node, Tree};
use crate::stack::ensure_sufficient_stack;

/// Convert a tree into (Syntax, text) fragments. The fragments are the
/// tree's leaves in order, so concatenating their text gives back the
/// source exactly.
pub fn highlight<'i>(tree: &Tree<'i>) -> Vec<(Syntax, Cow<'i, str>)> {
    let mut fragments = Vec::new();
    visit(tree.root(), tree.root().kind, tree.source(), &mut fragments);
    fragments
}

fn visit<'i>(node: &Node, parent: Kind, source: &'i str, fragments: &mut Vec<(Syntax, Cow<'i, str>)>) {
    if node.is_leaf() {
        let text = node.text(source);
        if !text.is_empty() {
            fragments.push((classify(node, parent, text), Cow::Borrowed(text)));
        }
        return;
    }

    ensure_sufficient_stack(|| {
        for child in &node.children {
            visit(child, node.kind, source, fragments);
        }
    })
}

fn classify(node: &Node, parent: Kind, text: &str) -> Syntax {
    match node.kind {
        Kind::CommandName => Syntax::Command,
        Kind::Keyword => Syntax::Option,
        Kind::Key => Syntax::Key,
        Kind::ValueText | Kind::ValueBraceGroupText => Syntax::Value,
        Kind::Text => Syntax::Text,
        Kind::ParagraphMark => Syntax::Paragraph,
        Kind::MathText => Syntax::Math,
        Kind::LineComment => Syntax::Comment,
        Kind::ComponentId
        | Kind::GenericId
        | Kind::ProjectId
        | Kind::ProductId
        | Kind::EnvironmentId => Syntax::Identifier,
        Kind::Error => Syntax::Error,
        Kind::Whitespace | Kind::EndOfLine => Syntax::Neutral,
        Kind::Anonymous(_) => punctuation(parent, text),
        kind if inclusions::by_body_kind(kind).is_some() => Syntax::Embedded,
        _ => Syntax::Neutral,
    }
}

/// Anonymous tokens take their meaning from where they appear.
fn punctuation(parent: Kind, text: &str) -> Syntax {
    if text
        .trim()
        .is_empty()
    {
        return Syntax::Neutral;
    }

    match parent {
        Kind::Escaped => Syntax::Escape,
        Kind::MacroArgument => Syntax::Argument,
        Kind::InlineMath | Kind::MathGroup => Syntax::Math,
        Kind::TitleSetting | Kind::SubtitleSetting if text != "=" => Syntax::Key,
        _ if inclusions::INCLUSIONS
            .iter()
            .any(|inclusion| inclusion.kind == parent) =>
        {
            Syntax::Language
        }
        _ if text.starts_with('\\') => Syntax::Structure,
        _ => Syntax::Bracket,
    }
}
