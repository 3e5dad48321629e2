//! Choosing between alternatives which all matched at the same position.

use std::cmp::Ordering;

use super::builder::Fragment;
use crate::grammar::rules::{Assoc, Precedence};
use crate::language::{Node, Origin};

#[derive(Debug)]
pub(super) struct Candidate {
    /// Position of the alternative within its choice.
    pub index: usize,
    pub precedence: Precedence,
    pub fragment: Fragment,
}

/// How strongly a lexer prefers a token of this origin when two tokens of
/// the same length compete.
fn rank(node: &Node) -> u8 {
    match node.origin {
        Origin::Literal => 3,
        Origin::Pattern | Origin::External => 2,
        Origin::Extra => 1,
        Origin::Rule | Origin::Error => 0,
    }
}

/// Compare the token streams of two derivations at the first leaf where
/// they part ways.
fn compare_tokens(a: &Fragment, b: &Fragment) -> Ordering {
    for (x, y) in a
        .leaves()
        .into_iter()
        .zip(b.leaves())
    {
        if x.span == y.span && rank(x) == rank(y) {
            continue;
        }
        return x
            .span
            .len()
            .cmp(
                &y.span
                    .len(),
            )
            .then(rank(x).cmp(&rank(y)));
    }
    Ordering::Equal
}

fn first_width(fragment: &Fragment) -> usize {
    fragment
        .nodes
        .first()
        .map_or(0, |node| {
            node.span
                .len()
        })
}

fn last_width(fragment: &Fragment) -> usize {
    fragment
        .nodes
        .last()
        .map_or(0, |node| {
            node.span
                .len()
        })
}

/// Order two candidates; `Greater` means `a` is preferred.
pub(super) fn compare(a: &Candidate, b: &Candidate) -> Ordering {
    let (x, y) = (&a.fragment, &b.fragment);

    x.end
        .cmp(&y.end)
        .then_with(|| compare_tokens(x, y))
        .then_with(|| {
            a.precedence
                .value
                .cmp(
                    &b.precedence
                        .value,
                )
        })
        .then_with(|| {
            match (
                a.precedence
                    .assoc,
                b.precedence
                    .assoc,
            ) {
                (Assoc::Right, Assoc::Right) => last_width(x).cmp(&last_width(y)),
                (Assoc::Left, Assoc::Left) => first_width(x).cmp(&first_width(y)),
                _ => Ordering::Equal,
            }
        })
        .then_with(|| {
            b.index
                .cmp(&a.index)
        })
}

#[cfg(test)]
mod check {
    use super::*;
    use crate::language::{Kind, Span};

    fn leaf(kind: Kind, start: usize, end: usize, origin: Origin) -> Node {
        Node::leaf(kind, Span::new(start, end), origin)
    }

    fn candidate(index: usize, precedence: i32, nodes: Vec<Node>) -> Candidate {
        let end = nodes
            .last()
            .map_or(0, |node| node.span.end);
        Candidate {
            index,
            precedence: Precedence {
                value: precedence,
                assoc: Assoc::None,
            },
            fragment: Fragment { end, nodes },
        }
    }

    #[test]
    fn longer_match_wins() {
        let a = candidate(0, 10, vec![leaf(Kind::Text, 0, 3, Origin::External)]);
        let b = candidate(1, 0, vec![leaf(Kind::Text, 0, 5, Origin::External)]);
        assert_eq!(compare(&b, &a), Ordering::Greater);
        assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn literal_beats_pattern() {
        // title=  as a literal key versus a pattern key
        let literal = candidate(1, 0, vec![leaf(Kind::Anonymous("title"), 0, 5, Origin::Literal)]);
        let pattern = candidate(0, 0, vec![leaf(Kind::Key, 0, 5, Origin::Pattern)]);
        assert_eq!(compare(&literal, &pattern), Ordering::Greater);
    }

    #[test]
    fn pattern_beats_extra() {
        let space = candidate(
            0,
            0,
            vec![
                leaf(Kind::Anonymous("["), 0, 1, Origin::Literal),
                leaf(Kind::Whitespace, 1, 2, Origin::Extra),
                leaf(Kind::Anonymous("]"), 2, 3, Origin::Literal),
            ],
        );
        let pattern = candidate(
            1,
            0,
            vec![
                leaf(Kind::Anonymous("["), 0, 1, Origin::Literal),
                leaf(Kind::Anonymous("horizontal_space"), 1, 2, Origin::Pattern),
                leaf(Kind::Anonymous("]"), 2, 3, Origin::Literal),
            ],
        );
        assert_eq!(compare(&pattern, &space), Ordering::Greater);
    }

    #[test]
    fn longer_token_beats_rank() {
        let two = candidate(1, 0, vec![leaf(Kind::Anonymous("[]"), 0, 2, Origin::Literal)]);
        let one = candidate(
            0,
            20,
            vec![
                leaf(Kind::Anonymous("["), 0, 1, Origin::Literal),
                leaf(Kind::Anonymous("]"), 1, 2, Origin::Literal),
            ],
        );
        assert_eq!(compare(&two, &one), Ordering::Greater);
    }

    #[test]
    fn precedence_settles_identical_streams() {
        let nodes = vec![
            leaf(Kind::Anonymous("["), 0, 1, Origin::Literal),
            leaf(Kind::Anonymous(","), 1, 2, Origin::Literal),
            leaf(Kind::Anonymous("]"), 2, 3, Origin::Literal),
        ];
        let options = candidate(0, 12, nodes.clone());
        let settings = candidate(1, 14, nodes);
        assert_eq!(compare(&settings, &options), Ordering::Greater);
    }

    #[test]
    fn declaration_order_last() {
        let nodes = vec![leaf(Kind::Text, 0, 3, Origin::External)];
        let first = candidate(0, 0, nodes.clone());
        let second = candidate(1, 0, nodes);
        assert_eq!(compare(&first, &second), Ordering::Greater);
    }

    #[test]
    fn right_associative_binds_later() {
        let mut a = candidate(
            0,
            0,
            vec![
                leaf(Kind::Text, 0, 3, Origin::External),
                leaf(Kind::Text, 3, 4, Origin::External),
            ],
        );
        let mut b = candidate(
            1,
            0,
            vec![
                leaf(Kind::Text, 0, 3, Origin::External),
                leaf(Kind::Text, 3, 4, Origin::External),
            ],
        );
        b.fragment.nodes = vec![Node::branch(
            Kind::TextBlock,
            Span::new(0, 4),
            b.fragment
                .nodes
                .clone(),
        )];
        a.precedence.assoc = Assoc::Right;
        b.precedence.assoc = Assoc::Right;
        assert_eq!(compare(&b, &a), Ordering::Greater);
    }
}
