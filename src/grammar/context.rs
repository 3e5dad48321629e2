//! The productions of the ConTeXt markup language.
//!
//! Precedences, for reference:
//!
//! 20  document: preamble main postamble
//! 16  escaped
//! 14  settings_block
//! 12  option_block
//! 10  inline_math, command_group
//! r   command, value, text_block

use super::rules::*;
use super::Definition;
use crate::language::{Kind, TokenKind, INCLUSIONS};
use crate::lexical;

pub fn definition() -> Definition {
    Definition {
        start: Kind::Document,
        extras: vec![Kind::Whitespace, Kind::LineComment],
        externals: TokenKind::ALL.to_vec(),
        word: Kind::CommandName,
        recovery: Kind::Content,
        productions: productions(),
    }
}

/// A keyword followed by an identifier, written ` id`, `[id]`, or ` [id]`.
fn named(keyword: &'static str, id: Rule) -> Rule {
    seq([
        lit(keyword),
        choice([
            seq([pat(lexical::HORIZONTAL_SPACE), id.clone()]),
            seq([lit("["), id.clone(), lit("]")]),
            seq([pat(lexical::HORIZONTAL_SPACE), lit("["), id, lit("]")]),
        ]),
    ])
}

fn content() -> Rule {
    let mut alternatives = vec![
        sym(Kind::LineComment),
        sym(Kind::Command),
        sym(Kind::MacroArgument),
        sym(Kind::BraceGroup),
        sym(Kind::Escaped),
        sym(Kind::InlineMath),
        sym(Kind::CommandGroup),
        sym(Kind::TextBlock),
    ];
    alternatives.extend(
        INCLUSIONS
            .iter()
            .map(|inclusion| sym(inclusion.kind)),
    );
    alternatives.push(sym(Kind::ProjectCommand));
    alternatives.push(sym(Kind::ProductCommand));
    alternatives.push(sym(Kind::EnvironmentCommand));

    Rule::Choice(alternatives)
}

fn productions() -> Vec<(Kind, Rule)> {
    let mut productions = vec![
        // document
        (
            Kind::Document,
            choice([
                prec(
                    20,
                    seq([sym(Kind::Preamble), sym(Kind::Main), sym(Kind::Postamble)]),
                ),
                sym(Kind::Main),
            ]),
        ),
        // areas
        (
            Kind::Preamble,
            seq([
                repeat(sym(Kind::Content)),
                choice([
                    lit("\\starttext"),
                    named("\\startcomponent", sym(Kind::ComponentId)),
                ]),
            ]),
        ),
        (Kind::ComponentId, pat(lexical::COMPONENT_ID)),
        (Kind::Main, repeat1(sym(Kind::Content))),
        (
            Kind::Postamble,
            seq([
                choice([lit("\\stoptext"), lit("\\stopcomponent")]),
                repeat(sym(Kind::Content)),
            ]),
        ),
        (Kind::Content, content()),
        // project structure
        (Kind::GenericId, pat(lexical::GENERIC_ID)),
        (
            Kind::ProjectCommand,
            named("\\project", alias(sym(Kind::GenericId), Kind::ProjectId)),
        ),
        (
            Kind::ProductCommand,
            named("\\product", alias(sym(Kind::GenericId), Kind::ProductId)),
        ),
        (
            Kind::EnvironmentCommand,
            named(
                "\\environment",
                alias(sym(Kind::GenericId), Kind::EnvironmentId),
            ),
        ),
        // groups
        (
            Kind::BraceGroup,
            seq([
                choice([lit("{"), lit("\\bgroup")]),
                repeat(sym(Kind::Content)),
                choice([lit("}"), lit("\\egroup")]),
            ]),
        ),
        (
            Kind::CommandGroup,
            prec(
                10,
                seq([
                    pat(lexical::GROUP_START),
                    repeat(sym(Kind::Content)),
                    pat(lexical::GROUP_STOP),
                ]),
            ),
        ),
        // inline math
        (
            Kind::MathGroup,
            seq([lit("{"), repeat(sym(Kind::MathContent)), lit("}")]),
        ),
        (
            Kind::MathContent,
            choice([
                sym(Kind::LineComment),
                sym(Kind::Escaped),
                sym(Kind::MathGroup),
                sym(Kind::MathText),
            ]),
        ),
        (Kind::MathText, pat(lexical::MATH_TEXT)),
        (
            Kind::InlineMath,
            prec(10, seq([lit("$"), repeat1(sym(Kind::MathContent)), lit("$")])),
        ),
        // commands
        (
            Kind::Command,
            prec_right(
                0,
                seq([
                    sym(Kind::CommandName),
                    repeat(choice([
                        sym(Kind::EmptyBlock),
                        sym(Kind::OptionBlock),
                        sym(Kind::SettingsBlock),
                    ])),
                    ext(TokenKind::CommandStop),
                    optional(seq([
                        repeat1(sym(Kind::CommandScope)),
                        ext(TokenKind::ScopesStop),
                    ])),
                ]),
            ),
        ),
        (Kind::CommandName, pat(lexical::COMMAND_NAME)),
        (
            Kind::EmptyBlock,
            choice([
                lit("[]"),
                seq([lit("["), pat(lexical::HORIZONTAL_SPACE), lit("]")]),
            ]),
        ),
        (
            Kind::OptionBlock,
            prec(
                12,
                seq([
                    lit("["),
                    sep_by(sym(Kind::Keyword), lit(",")),
                    optional(lit(",")),
                    lit("]"),
                ]),
            ),
        ),
        (Kind::Keyword, pat(lexical::KEYWORD)),
        (
            Kind::SettingsBlock,
            prec(
                14,
                seq([
                    lit("["),
                    sep_by(sym(Kind::SettingItem), lit(",")),
                    optional(lit(",")),
                    lit("]"),
                ]),
            ),
        ),
        (
            Kind::SettingItem,
            choice([
                sym(Kind::Setting),
                sym(Kind::TitleSetting),
                sym(Kind::SubtitleSetting),
            ]),
        ),
        (
            Kind::Setting,
            seq([sym(Kind::Key), lit("="), optional(sym(Kind::Value))]),
        ),
        (
            Kind::TitleSetting,
            seq([lit("title"), lit("="), optional(sym(Kind::Value))]),
        ),
        (
            Kind::SubtitleSetting,
            seq([lit("subtitle"), lit("="), optional(sym(Kind::Value))]),
        ),
        (Kind::Key, pat(lexical::KEYWORD)),
        (
            Kind::Value,
            prec_right(0, repeat1(sym(Kind::ValueContent))),
        ),
        (
            Kind::ValueContent,
            choice([
                sym(Kind::LineComment),
                sym(Kind::Escaped),
                sym(Kind::ValueBraceGroup),
                sym(Kind::ValueText),
                sym(Kind::Command),
            ]),
        ),
        (Kind::ValueText, pat(lexical::VALUE_TEXT)),
        (
            Kind::ValueBraceGroup,
            seq([
                lit("{"),
                repeat(sym(Kind::ValueBraceGroupContent)),
                lit("}"),
            ]),
        ),
        (
            Kind::ValueBraceGroupContent,
            choice([
                sym(Kind::LineComment),
                sym(Kind::Escaped),
                sym(Kind::ValueBraceGroup),
                sym(Kind::ValueBraceGroupText),
                sym(Kind::Command),
            ]),
        ),
        (
            Kind::ValueBraceGroupText,
            pat(lexical::VALUE_BRACE_GROUP_TEXT),
        ),
        (
            Kind::CommandScope,
            seq([
                optional(sym(Kind::EndOfLine)),
                lit("{"),
                repeat(sym(Kind::Content)),
                lit("}"),
            ]),
        ),
        // macros
        (
            Kind::MacroArgument,
            seq([lit("#"), pat(lexical::DIGIT)]),
        ),
        // text
        (
            Kind::TextBlock,
            prec_right(
                0,
                seq([
                    ext(TokenKind::Text),
                    repeat(seq([
                        ext(TokenKind::ParagraphMark),
                        ext(TokenKind::Text),
                    ])),
                    optional(ext(TokenKind::ParagraphMark)),
                ]),
            ),
        ),
        // escapes
        (
            Kind::Escaped,
            prec(
                16,
                Rule::Choice(
                    lexical::ESCAPES
                        .into_iter()
                        .map(lit)
                        .collect(),
                ),
            ),
        ),
        // extras
        (Kind::Whitespace, pat(lexical::WHITESPACE)),
        (Kind::LineComment, pat(lexical::LINE_COMMENT)),
        (Kind::EndOfLine, pat(lexical::END_OF_LINE)),
    ];

    // language inclusions
    for inclusion in &INCLUSIONS {
        productions.push((
            inclusion.kind,
            seq([lit(inclusion.open), ext(inclusion.body), lit(inclusion.close)]),
        ));
    }

    productions
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn every_inclusion_is_content() {
        let content = content();
        for inclusion in &INCLUSIONS {
            let mut found = false;
            content.walk(&mut |rule| {
                if *rule == sym(inclusion.kind) {
                    found = true;
                }
            });
            assert!(found, "{:?} missing from content", inclusion.kind);
        }
    }

    #[test]
    fn one_production_per_kind() {
        let productions = productions();
        for (i, (kind, _)) in productions
            .iter()
            .enumerate()
        {
            let later = productions[i + 1..]
                .iter()
                .any(|(other, _)| other == kind);
            assert!(!later, "{:?} defined twice", kind);
        }
    }
}
