//! Assembling nodes out of what rules match.

use crate::language::{Kind, Node, Origin, Span};

/// The nodes a rule produced, in order, and where it stopped. Hidden rules
/// hand their fragment straight to the enclosing rule; named rules wrap
/// theirs in a node with `reduce()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Fragment {
    pub end: usize,
    pub nodes: Vec<Node>,
}

impl Fragment {
    pub fn empty(at: usize) -> Fragment {
        Fragment {
            end: at,
            nodes: Vec::new(),
        }
    }

    pub fn append(&mut self, other: Fragment) {
        self.end = other.end;
        self.nodes
            .extend(other.nodes);
    }

    /// Every leaf in the fragment, in source order.
    pub fn leaves(&self) -> Vec<&Node> {
        self.nodes
            .iter()
            .flat_map(|node| node.leaves())
            .collect()
    }
}

/// Mark the nodes of a fragment as extras. Leaves take on the extra origin
/// so that competing derivations rank them below real tokens.
pub(super) fn mark_extra(fragment: &mut Fragment) {
    for node in &mut fragment.nodes {
        node.extra = true;
        if node.is_leaf() {
            node.origin = Origin::Extra;
        }
    }
}

/// Wrap a fragment in a node of the given kind. Extras at either edge are
/// moved out, so that they become siblings of the new node rather than its
/// children. When `relabel` is set and exactly one node remains, that node
/// is given the new kind instead of being wrapped; this is how single-token
/// rules become named leaves and how aliases rename what they cover.
pub(super) fn reduce(kind: Kind, start: usize, fragment: Fragment, relabel: bool) -> Fragment {
    let Fragment { end, mut nodes } = fragment;

    let leading = nodes
        .iter()
        .take_while(|node| node.extra)
        .count();
    let trailing = nodes[leading..]
        .iter()
        .rev()
        .take_while(|node| node.extra)
        .count();

    let after = nodes.split_off(nodes.len() - trailing);
    let mut inner = nodes.split_off(leading);
    let mut result = nodes;

    let node = if relabel && inner.len() == 1 {
        let mut node = inner.remove(0);
        node.kind = kind;
        node
    } else {
        let span = match (inner.first(), inner.last()) {
            (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
            _ => {
                let at = result
                    .last()
                    .map(|node| node.span.end)
                    .unwrap_or(start);
                Span::new(at, at)
            }
        };
        Node::branch(kind, span, inner)
    };

    result.push(node);
    result.extend(after);

    Fragment { end, nodes: result }
}

#[cfg(test)]
mod check {
    use super::*;

    fn space(start: usize, end: usize) -> Node {
        let mut node = Node::leaf(Kind::Whitespace, Span::new(start, end), Origin::Extra);
        node.extra = true;
        node
    }

    #[test]
    fn extras_move_to_the_parent() {
        let text = Node::leaf(Kind::Text, Span::new(1, 6), Origin::External);
        let fragment = Fragment {
            end: 7,
            nodes: vec![space(0, 1), text, space(6, 7)],
        };

        let result = reduce(Kind::TextBlock, 0, fragment, false);
        assert_eq!(result.end, 7);
        assert_eq!(result.nodes.len(), 3);
        assert_eq!(result.nodes[0].kind, Kind::Whitespace);
        assert_eq!(result.nodes[1].kind, Kind::TextBlock);
        assert_eq!(result.nodes[1].span, Span::new(1, 6));
        assert_eq!(result.nodes[1].children.len(), 1);
        assert_eq!(result.nodes[2].kind, Kind::Whitespace);
    }

    #[test]
    fn single_tokens_are_relabelled() {
        let leaf = Node::leaf(
            Kind::Anonymous("command_name"),
            Span::new(0, 8),
            Origin::Pattern,
        );
        let fragment = Fragment {
            end: 8,
            nodes: vec![leaf],
        };

        let result = reduce(Kind::CommandName, 0, fragment, true);
        assert_eq!(result.nodes.len(), 1);
        assert_eq!(result.nodes[0].kind, Kind::CommandName);
        assert!(result.nodes[0].is_leaf());
        assert_eq!(result.nodes[0].origin, Origin::Pattern);
    }

    #[test]
    fn interior_extras_stay() {
        let open = Node::leaf(Kind::Anonymous("{"), Span::new(0, 1), Origin::Literal);
        let close = Node::leaf(Kind::Anonymous("}"), Span::new(2, 3), Origin::Literal);
        let fragment = Fragment {
            end: 3,
            nodes: vec![open, space(1, 2), close],
        };

        let result = reduce(Kind::BraceGroup, 0, fragment, false);
        assert_eq!(result.nodes.len(), 1);
        assert_eq!(result.nodes[0].children.len(), 3);
        assert!(result.nodes[0].children[1].extra);
    }

    #[test]
    fn marking_extras() {
        let comment = Node::leaf(Kind::LineComment, Span::new(0, 5), Origin::Pattern);
        let mut fragment = Fragment {
            end: 5,
            nodes: vec![comment],
        };
        mark_extra(&mut fragment);
        assert!(fragment.nodes[0].extra);
        assert_eq!(fragment.nodes[0].origin, Origin::Extra);
    }
}
