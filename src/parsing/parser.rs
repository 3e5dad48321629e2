use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace, warn};

use super::builder::{self, Fragment};
use super::resolve::{self, Candidate};
use super::scanner::{Scanner, Token};
use crate::grammar::rules::Rule;
use crate::grammar::{Grammar, GrammarError};
use crate::language::{Kind, Node, Origin, Span, TokenKind, TokenSet, Tree};
use crate::lexical;
use crate::stack::ensure_sufficient_stack;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    /// Input at this offset, of this width, matched nothing.
    Unrecognized(usize, usize),
    /// The parse got as far as this offset, where it wanted one of these.
    Expected(usize, String),
    UnexpectedEndOfInput(usize),
    /// Structure starting at this offset nests deeper than the parser
    /// will follow.
    TooDeep(usize),
    Cancelled(usize),
    Grammar(GrammarError),
}

impl ParsingError {
    pub fn offset(&self) -> usize {
        match self {
            ParsingError::Unrecognized(offset, _) => *offset,
            ParsingError::Expected(offset, _) => *offset,
            ParsingError::UnexpectedEndOfInput(offset) => *offset,
            ParsingError::TooDeep(offset) => *offset,
            ParsingError::Cancelled(offset) => *offset,
            ParsingError::Grammar(_) => 0,
        }
    }

    /// How much of the input the problem covers, where that is known.
    pub fn width(&self) -> Option<usize> {
        match self {
            ParsingError::Unrecognized(_, width) => Some(*width),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParsingError::Unrecognized(_, _) => "unrecognized input".to_string(),
            ParsingError::Expected(_, value) => format!("expected {}", value),
            ParsingError::UnexpectedEndOfInput(_) => "unexpected end of input".to_string(),
            ParsingError::TooDeep(_) => "nesting too deep".to_string(),
            ParsingError::Cancelled(_) => "parsing cancelled".to_string(),
            ParsingError::Grammar(error) => error.message(),
        }
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message(), self.offset())
    }
}

impl std::error::Error for ParsingError {}

impl From<GrammarError> for ParsingError {
    fn from(error: GrammarError) -> ParsingError {
        ParsingError::Grammar(error)
    }
}

/// How many rules may be open at once. Anything nested deeper than this is
/// skipped as an error.
const MAX_DEPTH: usize = 1024;

/// Something the parser tried to match and couldn't.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expectation {
    Literal(&'static str),
    Pattern(&'static str),
    Token(TokenKind),
}

/// The furthest position any terminal was attempted at, and what was
/// wanted there.
#[derive(Debug, Default)]
struct Farthest {
    offset: usize,
    expected: Vec<Expectation>,
}

/// Parses one document with a grammar and a scanner. The grammar is
/// interpreted directly: each rule kind is evaluated at most once per
/// position, and where alternatives of a choice both match, the one
/// `resolve::compare()` prefers is kept.
pub struct Parser<'a, 'i> {
    grammar: &'a Grammar,
    scanner: &'a dyn Scanner,
    original: &'i str,
    cancel: Option<&'a AtomicBool>,
    word: Option<&'static str>,
    memo: HashMap<(Kind, usize, bool), Option<Fragment>>,
    farthest: Farthest,
    in_extras: bool,
    depth: usize,
    overflow: Option<usize>,
    cancelled: Option<usize>,
}

impl<'a, 'i> Parser<'a, 'i> {
    pub fn new(grammar: &'a Grammar, scanner: &'a dyn Scanner, original: &'i str) -> Parser<'a, 'i> {
        let word = match grammar.rule(grammar.word()) {
            Some(Rule::Pattern(pattern)) => Some(*pattern),
            _ => None,
        };

        Parser {
            grammar,
            scanner,
            original,
            cancel: None,
            word,
            memo: HashMap::new(),
            farthest: Farthest::default(),
            in_extras: false,
            depth: 0,
            overflow: None,
            cancelled: None,
        }
    }

    /// Abandon the parse once `flag` is set.
    pub fn cancel_on(mut self, flag: &'a AtomicBool) -> Parser<'a, 'i> {
        self.cancel = Some(flag);
        self
    }

    pub fn parse(mut self) -> Result<Tree<'i>, ParsingError> {
        let length = self
            .original
            .len();
        let start = self
            .grammar
            .start();

        debug!(length, "Parsing");

        let (at, leading) = self.extras(0);
        if at == length {
            self.check_cancelled()?;
            let root = Node::branch(start, Span::new(0, length), leading);
            return Ok(Tree::new(self.original, root, vec![]));
        }

        let document = self
            .symbol(start, 0)
            .filter(|_| {
                self.overflow
                    .is_none()
            });
        self.check_cancelled()?;

        if let Some(fragment) = document {
            let (end, trailing) = self.extras(fragment.end);
            if end == length {
                let mut children = Vec::new();
                for node in fragment.nodes {
                    if node.kind == start && !node.extra {
                        children.extend(node.children);
                    } else {
                        children.push(node);
                    }
                }
                children.extend(trailing);

                debug!(
                    entries = self
                        .memo
                        .len(),
                    "Parsed"
                );
                let root = Node::branch(start, Span::new(0, length), children);
                return Ok(Tree::new(self.original, root, vec![]));
            }
            debug!(end, length, "Document stopped short");
        }

        let (children, errors) = self.recover()?;
        debug!(errors = errors.len(), "Recovered");

        let root = Node::branch(start, Span::new(0, length), children);
        Ok(Tree::new(self.original, root, errors))
    }

    /// Reread the input as a sequence of recovery items, marking each
    /// stretch that no item matches as an error.
    fn recover(&mut self) -> Result<(Vec<Node>, Vec<ParsingError>), ParsingError> {
        let length = self
            .original
            .len();
        let item = self
            .grammar
            .recovery();

        let mut children = Vec::new();
        let mut errors = Vec::new();
        let mut offset = 0;

        loop {
            self.overflow = None;

            let (at, extras) = self.extras(offset);
            children.extend(extras);
            offset = at;

            if offset >= length {
                break;
            }
            self.check_cancelled()?;

            let attempt = self.progress(item, offset);
            self.check_cancelled()?;

            if let Some(deepest) = self
                .overflow
                .take()
            {
                let end = deepest
                    .max(self.step(offset))
                    .min(length);
                warn!(start = offset, end, "Skipping input nested too deeply");
                children.push(Node::leaf(Kind::Error, Span::new(offset, end), Origin::Error));
                errors.push(ParsingError::TooDeep(offset));
                offset = end;
                continue;
            }

            if let Some(fragment) = attempt {
                offset = fragment.end;
                children.extend(fragment.nodes);
                continue;
            }

            // try again from a clean slate, to learn what was wanted here
            self.memo
                .clear();
            self.farthest = Farthest::default();
            let _ = self.symbol(item, offset);
            let failure = std::mem::take(&mut self.farthest);

            // deep nesting met while looking ahead is dealt with on the next
            // pass, from where it starts
            let mut end = self.step(offset);
            while end < length
                && self
                    .cancelled
                    .is_none()
            {
                if self
                    .progress(item, end)
                    .is_some()
                    || self
                        .overflow
                        .is_some()
                {
                    break;
                }
                end = self.step(end);
            }
            self.check_cancelled()?;

            debug!(start = offset, end, "Skipping unrecognized input");
            children.push(Node::leaf(Kind::Error, Span::new(offset, end), Origin::Error));
            errors.push(self.diagnose(failure, offset, end));
            offset = end;
        }

        Ok((children, errors))
    }

    fn progress(&mut self, kind: Kind, offset: usize) -> Option<Fragment> {
        self.symbol(kind, offset)
            .filter(|fragment| fragment.end > offset)
    }

    /// The next place recovery might resume from: past a whole command
    /// word, or otherwise past one character.
    fn step(&self, offset: usize) -> usize {
        let rest = &self.original[offset..];
        match lexical::word_at(rest) {
            Some(width) => offset + width,
            None => {
                offset
                    + rest
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8)
            }
        }
    }

    fn diagnose(&self, failure: Farthest, start: usize, end: usize) -> ParsingError {
        let length = self
            .original
            .len();

        if failure
            .expected
            .is_empty()
            || failure.offset <= start
        {
            ParsingError::Unrecognized(start, end - start)
        } else if failure.offset >= length {
            ParsingError::UnexpectedEndOfInput(length)
        } else {
            let labels: Vec<String> = failure
                .expected
                .iter()
                .map(|expectation| self.describe(expectation))
                .collect();
            ParsingError::Expected(failure.offset, join(labels))
        }
    }

    fn describe(&self, expectation: &Expectation) -> String {
        match expectation {
            Expectation::Literal(text) => format!("'{}'", text),
            Expectation::Pattern(pattern) => {
                let grammar = self.grammar;
                grammar
                    .kinds()
                    .iter()
                    .find(|kind| grammar.rule(**kind) == Some(&Rule::Pattern(*pattern)))
                    .map(|kind| {
                        kind.as_str()
                            .replace('_', " ")
                    })
                    .unwrap_or_else(|| format!("/{}/", pattern))
            }
            Expectation::Token(token) => token
                .kind()
                .as_str()
                .replace('_', " "),
        }
    }

    fn check_cancelled(&self) -> Result<(), ParsingError> {
        match self.cancelled {
            Some(offset) => Err(ParsingError::Cancelled(offset)),
            None => Ok(()),
        }
    }

    fn is_cancelled(&mut self, offset: usize) -> bool {
        if self
            .cancelled
            .is_some()
        {
            return true;
        }
        if let Some(flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                debug!(offset, "Cancelled");
                self.cancelled = Some(offset);
                return true;
            }
        }
        false
    }

    fn eval(&mut self, rule: &Rule, offset: usize) -> Option<Fragment> {
        match rule {
            Rule::Literal(_) | Rule::Pattern(_) | Rule::External(_) => self.terminal(rule, offset),
            Rule::Symbol(kind) => self.symbol(*kind, offset),
            Rule::Seq(rules) => self.sequence(rules, offset),
            Rule::Choice(rules) => self.choice(rules, offset),
            Rule::Repeat(inner) => self.repeat(inner, offset, 0, None),
            Rule::Repeat1(inner) => self.repeat(inner, offset, 1, None),
            Rule::Optional(inner) => {
                Some(self.eval(inner, offset).unwrap_or_else(|| Fragment::empty(offset)))
            }
            Rule::Prec(_, inner) => self.eval(inner, offset),
            Rule::Alias(inner, kind) => {
                let fragment = self.eval(inner, offset)?;
                Some(builder::reduce(*kind, offset, fragment, true))
            }
        }
    }

    fn symbol(&mut self, kind: Kind, offset: usize) -> Option<Fragment> {
        let key = (kind, offset, self.in_extras);
        if let Some(cached) = self
            .memo
            .get(&key)
        {
            return cached.clone();
        }
        if self.is_cancelled(offset)
            || self
                .overflow
                .is_some()
        {
            return None;
        }
        if self.depth >= MAX_DEPTH {
            debug!(offset, ?kind, "Nesting too deep");
            self.overflow = Some(offset);
            return None;
        }

        let grammar = self.grammar;
        let rule = grammar.rule(kind)?;

        self.depth += 1;
        let result = ensure_sufficient_stack(|| self.eval(rule, offset));
        self.depth -= 1;

        let result = result.map(|fragment| {
            if kind.is_hidden() {
                fragment
            } else {
                builder::reduce(kind, offset, fragment, grammar.is_token_rule(kind))
            }
        });

        // an abandoned attempt must not be remembered as a real failure
        if self
            .cancelled
            .is_none()
            && self
                .overflow
                .is_none()
        {
            self.memo
                .insert(key, result.clone());
        }
        result
    }

    fn sequence(&mut self, rules: &[Rule], offset: usize) -> Option<Fragment> {
        let mut fragment = Fragment::empty(offset);

        for (i, rule) in rules
            .iter()
            .enumerate()
        {
            // a repetition yields to the terminal which follows it
            let until = rules
                .get(i + 1)
                .filter(|next| next.is_lexical());

            let part = match (rule, until) {
                (Rule::Repeat(inner), Some(_)) => self.repeat(inner, fragment.end, 0, until),
                (Rule::Repeat1(inner), Some(_)) => self.repeat(inner, fragment.end, 1, until),
                _ => self.eval(rule, fragment.end),
            }?;

            fragment.append(part);
        }

        Some(fragment)
    }

    fn choice(&mut self, rules: &[Rule], offset: usize) -> Option<Fragment> {
        let mut best: Option<Candidate> = None;

        for (index, rule) in rules
            .iter()
            .enumerate()
        {
            let fragment = match self.eval(rule, offset) {
                Some(fragment) => fragment,
                None => continue,
            };

            let candidate = Candidate {
                index,
                precedence: self
                    .grammar
                    .precedence_of(rule),
                fragment,
            };

            best = match best {
                None => Some(candidate),
                Some(current) => {
                    if resolve::compare(&candidate, &current) == std::cmp::Ordering::Greater {
                        trace!(
                            offset,
                            preferred = candidate.index,
                            over = current.index,
                            "Resolved conflict"
                        );
                        Some(candidate)
                    } else {
                        Some(current)
                    }
                }
            };
        }

        best.map(|candidate| candidate.fragment)
    }

    fn repeat(
        &mut self,
        inner: &Rule,
        offset: usize,
        minimum: usize,
        until: Option<&Rule>,
    ) -> Option<Fragment> {
        let mut fragment = Fragment::empty(offset);
        let mut count = 0;

        loop {
            if let Some(terminal) = until {
                if self
                    .terminal(terminal, fragment.end)
                    .is_some()
                {
                    break;
                }
            }

            match self.eval(inner, fragment.end) {
                Some(part) if part.end > fragment.end => {
                    fragment.append(part);
                    count += 1;
                }
                _ => break,
            }
        }

        if count < minimum {
            None
        } else {
            Some(fragment)
        }
    }

    /// Match a terminal where we are, or failing that, after any extras.
    fn terminal(&mut self, rule: &Rule, offset: usize) -> Option<Fragment> {
        if let Some(fragment) = self.lexeme(rule, offset) {
            return Some(fragment);
        }
        if self.in_extras {
            return None;
        }

        let (at, extras) = self.extras(offset);
        if at == offset {
            self.expected(rule, offset);
            return None;
        }

        match self.lexeme(rule, at) {
            Some(fragment) => {
                let mut result = Fragment {
                    end: at,
                    nodes: extras,
                };
                result.append(fragment);
                Some(result)
            }
            None => {
                self.expected(rule, at);
                None
            }
        }
    }

    fn lexeme(&mut self, rule: &Rule, offset: usize) -> Option<Fragment> {
        let rest = &self.original[offset..];

        let (width, kind, origin) = match rule {
            Rule::Literal(text) => {
                if text.is_empty() || !rest.starts_with(text) {
                    return None;
                }
                // keywords only match as whole words
                if self
                    .grammar
                    .is_reserved(text)
                    && lexical::word_at(rest) != Some(text.len())
                {
                    return None;
                }
                (text.len(), Kind::Anonymous(*text), Origin::Literal)
            }
            Rule::Pattern(pattern) => {
                let width = self
                    .grammar
                    .pattern(pattern)?
                    .find(rest)?
                    .end();
                if width == 0 {
                    return None;
                }
                if self.word == Some(*pattern)
                    && self
                        .grammar
                        .is_reserved(&rest[..width])
                {
                    return None;
                }
                (width, Kind::Anonymous(lexical::token_name(pattern)), Origin::Pattern)
            }
            Rule::External(token) => {
                let token = self.scan(*token, offset)?;
                if token.width == 0 {
                    return Some(Fragment::empty(offset));
                }
                (token.width, token.kind.kind(), Origin::External)
            }
            _ => return None,
        };

        let end = offset + width;
        Some(Fragment {
            end,
            nodes: vec![Node::leaf(kind, Span::new(offset, end), origin)],
        })
    }

    /// Ask the scanner for a token, and hold it to its contract.
    fn scan(&mut self, kind: TokenKind, offset: usize) -> Option<Token> {
        let valid = TokenSet::of(kind);
        let remaining = &self.original[offset..];

        let token = self
            .scanner
            .scan(valid, offset, remaining)?;

        if !valid.contains(token.kind)
            || token.width > remaining.len()
            || !remaining.is_char_boundary(token.width)
            || (token.width == 0
                && !token
                    .kind
                    .is_boundary())
        {
            warn!(?token, offset, "Scanner returned an invalid token; ignoring it");
            return None;
        }

        Some(token)
    }

    /// Consume any extras starting here.
    fn extras(&mut self, offset: usize) -> (usize, Vec<Node>) {
        let saved = std::mem::replace(&mut self.in_extras, true);
        let grammar = self.grammar;

        let mut at = offset;
        let mut nodes = Vec::new();

        'outer: loop {
            for kind in grammar.extras() {
                if let Some(mut fragment) = self.progress(*kind, at) {
                    builder::mark_extra(&mut fragment);
                    at = fragment.end;
                    nodes.extend(fragment.nodes);
                    continue 'outer;
                }
            }
            break;
        }

        self.in_extras = saved;
        (at, nodes)
    }

    fn expected(&mut self, rule: &Rule, offset: usize) {
        if self.in_extras {
            return;
        }

        let expectation = match rule {
            Rule::Literal(text) => Expectation::Literal(*text),
            Rule::Pattern(pattern) => Expectation::Pattern(*pattern),
            Rule::External(token) => Expectation::Token(*token),
            _ => return,
        };

        let farthest = &mut self.farthest;
        if offset > farthest.offset {
            farthest.offset = offset;
            farthest
                .expected
                .clear();
        }
        if offset == farthest.offset
            && !farthest
                .expected
                .contains(&expectation)
        {
            farthest
                .expected
                .push(expectation);
        }
    }
}

fn join(labels: Vec<String>) -> String {
    match labels.len() {
        0 => String::new(),
        1 => labels[0].clone(),
        n => format!("{} or {}", labels[..n - 1].join(", "), labels[n - 1]),
    }
}
