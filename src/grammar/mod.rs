//! The grammar as data. Productions are written with the constructors in
//! `rules`, checked once by `Grammar::build()`, and then interpreted by the
//! parser in `crate::parsing`.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::language::{Kind, TokenKind, TokenSet};
use crate::lexical;

mod context;
pub mod rules;
mod validate;

use rules::{Precedence, Rule};
pub use validate::GrammarError;

/// A grammar as written, before it has been checked.
#[derive(Debug, Clone)]
pub struct Definition {
    pub start: Kind,
    /// Rules which may appear between any two tokens, tried in this order.
    pub extras: Vec<Kind>,
    pub externals: Vec<TokenKind>,
    /// The rule describing keyword-like tokens; see `Grammar::is_reserved()`.
    pub word: Kind,
    /// When a document cannot be derived whole it is reread as a sequence
    /// of this rule, with whatever does not match marked as errors.
    pub recovery: Kind,
    pub productions: Vec<(Kind, Rule)>,
}

/// A checked grammar, ready to parse with.
#[derive(Debug)]
pub struct Grammar {
    start: Kind,
    extras: Vec<Kind>,
    externals: TokenSet,
    word: Kind,
    recovery: Kind,
    rules: HashMap<Kind, Rule>,
    order: Vec<Kind>,
    patterns: HashMap<&'static str, Regex>,
    reserved: HashSet<&'static str>,
    precedence: HashMap<Kind, Precedence>,
}

impl Grammar {
    pub fn build(definition: Definition) -> Result<Grammar, GrammarError> {
        let Definition {
            start,
            extras,
            externals,
            word,
            recovery,
            productions,
        } = definition;

        let mut rules = HashMap::new();
        let mut order = Vec::new();
        for (kind, rule) in productions {
            if rules
                .insert(kind, rule)
                .is_some()
            {
                return Err(GrammarError::DuplicateRule(kind));
            }
            order.push(kind);
        }

        let externals: TokenSet = externals
            .into_iter()
            .collect();

        let mut roots = vec![start, recovery];
        roots.extend(extras.iter());
        for kind in &roots {
            if !rules.contains_key(kind) {
                return Err(GrammarError::UndefinedRule {
                    rule: *kind,
                    missing: *kind,
                });
            }
        }

        validate::check_references(&rules, &order, externals)?;

        match rules.get(&word) {
            Some(Rule::Pattern(_)) => {}
            _ => return Err(GrammarError::InvalidWord(word)),
        }

        let mut patterns = HashMap::new();
        let mut reserved = HashSet::new();
        for kind in &order {
            let mut problem = None;
            rules[kind].walk(&mut |rule| match rule {
                Rule::Pattern(pattern) => {
                    if patterns.contains_key(pattern) || problem.is_some() {
                        return;
                    }
                    match Regex::new(&lexical::anchored(pattern)) {
                        Ok(regex) => {
                            patterns.insert(*pattern, regex);
                        }
                        Err(error) => {
                            problem = Some(GrammarError::InvalidPattern {
                                pattern: *pattern,
                                reason: error.to_string(),
                            });
                        }
                    }
                }
                Rule::Literal(text) if lexical::is_keyword(text) => {
                    reserved.insert(*text);
                }
                _ => {}
            });
            if let Some(error) = problem {
                return Err(error);
            }
        }

        let reachable = validate::reachable(&rules, &roots);
        validate::check_productive(&rules, &reachable)?;

        let nullable = validate::nullable_rules(&rules, &order);
        validate::check_left_recursion(&rules, &order, &nullable)?;

        let precedence: HashMap<Kind, Precedence> = order
            .iter()
            .filter_map(|kind| match &rules[kind] {
                Rule::Prec(precedence, _) => Some((*kind, *precedence)),
                _ => None,
            })
            .collect();

        let grammar = Grammar {
            start,
            extras,
            externals,
            word,
            recovery,
            rules,
            order,
            patterns,
            reserved,
            precedence,
        };

        validate::check_ambiguity(&grammar.rules, &grammar.order, |rule| {
            grammar.precedence_of(rule)
        })?;

        debug!(
            rules = grammar
                .order
                .len(),
            patterns = grammar
                .patterns
                .len(),
            reserved = grammar
                .reserved
                .len(),
            "Built grammar"
        );

        Ok(grammar)
    }

    pub fn start(&self) -> Kind {
        self.start
    }

    pub fn extras(&self) -> &[Kind] {
        &self.extras
    }

    pub fn externals(&self) -> TokenSet {
        self.externals
    }

    pub fn word(&self) -> Kind {
        self.word
    }

    pub fn recovery(&self) -> Kind {
        self.recovery
    }

    pub fn rule(&self, kind: Kind) -> Option<&Rule> {
        self.rules
            .get(&kind)
    }

    /// Rule kinds in the order they were defined.
    pub fn kinds(&self) -> &[Kind] {
        &self.order
    }

    /// The compiled, anchored form of a pattern appearing in the grammar.
    pub fn pattern(&self, pattern: &str) -> Option<&Regex> {
        self.patterns
            .get(pattern)
    }

    /// Literals shaped like command words. Where one of these could be
    /// matched the word rule may not match the same text.
    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved
            .contains(word)
    }

    /// The precedence an alternative carries: its own annotation, or that
    /// of the production it refers to.
    pub fn precedence_of(&self, rule: &Rule) -> Precedence {
        match rule {
            Rule::Prec(precedence, _) => *precedence,
            Rule::Symbol(kind) => self
                .precedence
                .get(kind)
                .copied()
                .unwrap_or_default(),
            Rule::Alias(inner, _) => self.precedence_of(inner),
            _ => Precedence::default(),
        }
    }

    /// Does this kind's production consist of a single terminal? Such
    /// productions are reported as leaves.
    pub fn is_token_rule(&self, kind: Kind) -> bool {
        self.rules
            .get(&kind)
            .map(Rule::is_terminal)
            .unwrap_or(false)
    }
}

static LANGUAGE: OnceLock<Result<Grammar, GrammarError>> = OnceLock::new();

/// The ConTeXt grammar, built on first use.
pub fn language() -> Result<&'static Grammar, GrammarError> {
    LANGUAGE
        .get_or_init(|| Grammar::build(context::definition()))
        .as_ref()
        .map_err(Clone::clone)
}
