//! Output of highlighted documents

use crate::formatting::{highlight, Render, Syntax};
use crate::language::Tree;

mod terminal;

pub use terminal::Terminal;

/// We do the highlighting in two passes. First we convert the syntax tree
/// into a Vec of "fragments" (Syntax tag, String pairs). Then second we
/// apply the specified renderer to each pair to result in an
/// embellished/highlighted String.
pub fn render(renderer: &impl Render, tree: &Tree) -> String {
    // Pass 1: classify the tree's leaves
    let fragments = highlight(tree);

    // Pass 2: render tagged fragments to final output
    render_to_string(renderer, fragments)
}

/// Pass 2: apply markup to fragments via style() and combine.
fn render_to_string<'i>(
    renderer: &impl Render,
    fragments: Vec<(Syntax, std::borrow::Cow<'i, str>)>,
) -> String {
    let mut output = String::new();

    for (syntax, content) in fragments {
        let rendered = renderer.style(syntax, &content);
        output.push_str(&rendered);
    }

    output
}
