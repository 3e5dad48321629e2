//! The expressions from which productions are composed, and a small set of
//! constructor functions so that the grammar reads close to its notation.

use crate::language::{Kind, TokenKind};

/// Associativity, consulted only when two derivations of the same
/// precedence cover an identical span with an identical token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Assoc {
    #[default]
    None,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Precedence {
    pub value: i32,
    pub assoc: Assoc,
}

/// The right hand side of a production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// A fixed string, reported as an anonymous node.
    Literal(&'static str),
    /// A regular expression, anchored at the current position.
    Pattern(&'static str),
    /// A token requested from the scanner.
    External(TokenKind),
    /// A reference to another production.
    Symbol(Kind),
    Seq(Vec<Rule>),
    Choice(Vec<Rule>),
    Repeat(Box<Rule>),
    Repeat1(Box<Rule>),
    Optional(Box<Rule>),
    Prec(Precedence, Box<Rule>),
    /// Report whatever the inner rule produces under a different kind.
    Alias(Box<Rule>, Kind),
}

impl Rule {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Rule::Literal(_) | Rule::Pattern(_) | Rule::External(_))
    }

    /// Terminals which the engine matches itself, as opposed to asking the
    /// scanner for.
    pub fn is_lexical(&self) -> bool {
        matches!(self, Rule::Literal(_) | Rule::Pattern(_))
    }

    /// Visit this rule and every rule nested within it.
    pub fn walk<'r>(&'r self, visit: &mut impl FnMut(&'r Rule)) {
        visit(self);
        match self {
            Rule::Seq(rules) | Rule::Choice(rules) => {
                for rule in rules {
                    rule.walk(visit);
                }
            }
            Rule::Repeat(rule)
            | Rule::Repeat1(rule)
            | Rule::Optional(rule)
            | Rule::Prec(_, rule)
            | Rule::Alias(rule, _) => rule.walk(visit),
            Rule::Literal(_) | Rule::Pattern(_) | Rule::External(_) | Rule::Symbol(_) => {}
        }
    }
}

pub fn lit(text: &'static str) -> Rule {
    Rule::Literal(text)
}

pub fn pat(pattern: &'static str) -> Rule {
    Rule::Pattern(pattern)
}

pub fn ext(token: TokenKind) -> Rule {
    Rule::External(token)
}

pub fn sym(kind: Kind) -> Rule {
    Rule::Symbol(kind)
}

pub fn seq<const N: usize>(rules: [Rule; N]) -> Rule {
    Rule::Seq(rules.into())
}

pub fn choice<const N: usize>(rules: [Rule; N]) -> Rule {
    Rule::Choice(rules.into())
}

pub fn repeat(rule: Rule) -> Rule {
    Rule::Repeat(Box::new(rule))
}

pub fn repeat1(rule: Rule) -> Rule {
    Rule::Repeat1(Box::new(rule))
}

pub fn optional(rule: Rule) -> Rule {
    Rule::Optional(Box::new(rule))
}

pub fn prec(value: i32, rule: Rule) -> Rule {
    Rule::Prec(
        Precedence {
            value,
            assoc: Assoc::None,
        },
        Box::new(rule),
    )
}

pub fn prec_left(value: i32, rule: Rule) -> Rule {
    Rule::Prec(
        Precedence {
            value,
            assoc: Assoc::Left,
        },
        Box::new(rule),
    )
}

pub fn prec_right(value: i32, rule: Rule) -> Rule {
    Rule::Prec(
        Precedence {
            value,
            assoc: Assoc::Right,
        },
        Box::new(rule),
    )
}

pub fn alias(rule: Rule, kind: Kind) -> Rule {
    Rule::Alias(Box::new(rule), kind)
}

/// One or more of `rule` separated by `separator`.
pub fn sep_by1(rule: Rule, separator: Rule) -> Rule {
    seq([rule.clone(), repeat(seq([separator, rule]))])
}

/// Zero or more of `rule` separated by `separator`.
pub fn sep_by(rule: Rule, separator: Rule) -> Rule {
    optional(sep_by1(rule, separator))
}
