//! Checks run once, when a grammar is built. A grammar which fails any of
//! them is unusable; there is no attempt to parse with it.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::rules::{Precedence, Rule};
use crate::language::{Kind, TokenKind, TokenSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    DuplicateRule(Kind),
    UndefinedRule { rule: Kind, missing: Kind },
    UndeclaredExternal { rule: Kind, token: TokenKind },
    InvalidPattern { pattern: &'static str, reason: String },
    InvalidWord(Kind),
    Unproductive(Kind),
    LeftRecursive(Kind),
    Ambiguous { rule: Kind, first: usize, second: usize },
}

impl GrammarError {
    pub fn message(&self) -> String {
        match self {
            GrammarError::DuplicateRule(kind) => {
                format!("rule '{}' is defined more than once", kind.as_str())
            }
            GrammarError::UndefinedRule { rule, missing } => format!(
                "rule '{}' refers to '{}' which is not defined",
                rule.as_str(),
                missing.as_str()
            ),
            GrammarError::UndeclaredExternal { rule, token } => format!(
                "rule '{}' requests external token {:?} which is not declared",
                rule.as_str(),
                token
            ),
            GrammarError::InvalidPattern { pattern, reason } => {
                format!("invalid pattern /{}/: {}", pattern, reason)
            }
            GrammarError::InvalidWord(kind) => format!(
                "word rule '{}' must be a single pattern",
                kind.as_str()
            ),
            GrammarError::Unproductive(kind) => format!(
                "rule '{}' has no finite derivation",
                kind.as_str()
            ),
            GrammarError::LeftRecursive(kind) => format!(
                "rule '{}' can derive itself without consuming input",
                kind.as_str()
            ),
            GrammarError::Ambiguous {
                rule,
                first,
                second,
            } => format!(
                "alternatives {} and {} of a choice in rule '{}' are identical and of equal precedence",
                first,
                second,
                rule.as_str()
            ),
        }
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grammar error: {}", self.message())
    }
}

impl std::error::Error for GrammarError {}

pub(super) fn check_references(
    rules: &HashMap<Kind, Rule>,
    order: &[Kind],
    externals: TokenSet,
) -> Result<(), GrammarError> {
    for kind in order {
        let mut problem = None;
        rules[kind].walk(&mut |rule| {
            if problem.is_some() {
                return;
            }
            match rule {
                Rule::Symbol(missing) if !rules.contains_key(missing) => {
                    problem = Some(GrammarError::UndefinedRule {
                        rule: *kind,
                        missing: *missing,
                    });
                }
                Rule::External(token) if !externals.contains(*token) => {
                    problem = Some(GrammarError::UndeclaredExternal {
                        rule: *kind,
                        token: *token,
                    });
                }
                _ => {}
            }
        });
        if let Some(error) = problem {
            return Err(error);
        }
    }
    Ok(())
}

/// Rules reachable from the given roots, in a deterministic order.
pub(super) fn reachable(rules: &HashMap<Kind, Rule>, roots: &[Kind]) -> Vec<Kind> {
    let mut seen: HashSet<Kind> = HashSet::new();
    let mut result = Vec::new();
    let mut pending: Vec<Kind> = roots
        .iter()
        .rev()
        .copied()
        .collect();

    while let Some(kind) = pending.pop() {
        if !seen.insert(kind) {
            continue;
        }
        result.push(kind);

        if let Some(rule) = rules.get(&kind) {
            let mut found = vec![];
            rule.walk(&mut |rule| {
                if let Rule::Symbol(other) = rule {
                    found.push(*other);
                }
            });
            pending.extend(
                found
                    .into_iter()
                    .rev(),
            );
        }
    }

    result
}

fn productive(rule: &Rule, known: &HashSet<Kind>) -> bool {
    match rule {
        Rule::Literal(_) | Rule::Pattern(_) | Rule::External(_) => true,
        Rule::Symbol(kind) => known.contains(kind),
        Rule::Seq(rules) => rules
            .iter()
            .all(|rule| productive(rule, known)),
        Rule::Choice(rules) => rules
            .iter()
            .any(|rule| productive(rule, known)),
        Rule::Repeat(_) | Rule::Optional(_) => true,
        Rule::Repeat1(rule) | Rule::Prec(_, rule) | Rule::Alias(rule, _) => productive(rule, known),
    }
}

/// Every reachable rule must have at least one finite derivation.
pub(super) fn check_productive(
    rules: &HashMap<Kind, Rule>,
    reachable: &[Kind],
) -> Result<(), GrammarError> {
    let mut known: HashSet<Kind> = HashSet::new();

    loop {
        let before = known.len();
        for kind in reachable {
            if !known.contains(kind) && productive(&rules[kind], &known) {
                known.insert(*kind);
            }
        }
        if known.len() == before {
            break;
        }
    }

    match reachable
        .iter()
        .find(|kind| !known.contains(*kind))
    {
        Some(kind) => Err(GrammarError::Unproductive(*kind)),
        None => Ok(()),
    }
}

fn nullable(rule: &Rule, known: &HashSet<Kind>) -> bool {
    match rule {
        Rule::Literal(text) => text.is_empty(),
        Rule::Pattern(_) => false,
        Rule::External(token) => token.is_boundary(),
        Rule::Symbol(kind) => known.contains(kind),
        Rule::Seq(rules) => rules
            .iter()
            .all(|rule| nullable(rule, known)),
        Rule::Choice(rules) => rules
            .iter()
            .any(|rule| nullable(rule, known)),
        Rule::Repeat(_) | Rule::Optional(_) => true,
        Rule::Repeat1(rule) | Rule::Prec(_, rule) | Rule::Alias(rule, _) => nullable(rule, known),
    }
}

pub(super) fn nullable_rules(rules: &HashMap<Kind, Rule>, order: &[Kind]) -> HashSet<Kind> {
    let mut known: HashSet<Kind> = HashSet::new();

    loop {
        let before = known.len();
        for kind in order {
            if !known.contains(kind) && nullable(&rules[kind], &known) {
                known.insert(*kind);
            }
        }
        if known.len() == before {
            return known;
        }
    }
}

/// The rules which can begin a derivation of `rule` without anything
/// having been consumed before them.
fn leftmost(rule: &Rule, nullable: &HashSet<Kind>, found: &mut Vec<Kind>) {
    match rule {
        Rule::Literal(_) | Rule::Pattern(_) | Rule::External(_) => {}
        Rule::Symbol(kind) => found.push(*kind),
        Rule::Seq(rules) => {
            for rule in rules {
                leftmost(rule, nullable, found);
                if !self::nullable(rule, nullable) {
                    break;
                }
            }
        }
        Rule::Choice(rules) => {
            for rule in rules {
                leftmost(rule, nullable, found);
            }
        }
        Rule::Repeat(rule)
        | Rule::Repeat1(rule)
        | Rule::Optional(rule)
        | Rule::Prec(_, rule)
        | Rule::Alias(rule, _) => leftmost(rule, nullable, found),
    }
}

pub(super) fn check_left_recursion(
    rules: &HashMap<Kind, Rule>,
    order: &[Kind],
    nullable: &HashSet<Kind>,
) -> Result<(), GrammarError> {
    let mut edges: HashMap<Kind, Vec<Kind>> = HashMap::new();
    for kind in order {
        let mut found = vec![];
        leftmost(&rules[kind], nullable, &mut found);
        edges.insert(*kind, found);
    }

    for kind in order {
        let mut seen: HashSet<Kind> = HashSet::new();
        let mut pending = edges[kind].clone();
        while let Some(next) = pending.pop() {
            if next == *kind {
                return Err(GrammarError::LeftRecursive(*kind));
            }
            if seen.insert(next) {
                if let Some(more) = edges.get(&next) {
                    pending.extend(more.iter());
                }
            }
        }
    }

    Ok(())
}

/// Two alternatives of one choice which are the same expression at the
/// same precedence can never be told apart; that is a defect in the
/// grammar, not something to settle while parsing.
pub(super) fn check_ambiguity(
    rules: &HashMap<Kind, Rule>,
    order: &[Kind],
    precedence: impl Fn(&Rule) -> Precedence,
) -> Result<(), GrammarError> {
    // look through references, one level, to compare what they derive
    let resolve = |rule: &Rule| -> Rule {
        match rule {
            Rule::Symbol(kind) if !kind.is_hidden() => rules
                .get(kind)
                .cloned()
                .unwrap_or_else(|| rule.clone()),
            _ => rule.clone(),
        }
    };

    for kind in order {
        let mut problem = None;
        rules[kind].walk(&mut |rule| {
            if problem.is_some() {
                return;
            }
            if let Rule::Choice(alternatives) = rule {
                for (i, a) in alternatives
                    .iter()
                    .enumerate()
                {
                    for (j, b) in alternatives
                        .iter()
                        .enumerate()
                        .skip(i + 1)
                    {
                        let same = a == b
                            || (matches!(a, Rule::Symbol(_))
                                && matches!(b, Rule::Symbol(_))
                                && resolve(a) == resolve(b));
                        if same && precedence(a) == precedence(b) {
                            problem = Some(GrammarError::Ambiguous {
                                rule: *kind,
                                first: i,
                                second: j,
                            });
                            return;
                        }
                    }
                }
            }
        });
        if let Some(error) = problem {
            return Err(error);
        }
    }

    Ok(())
}
