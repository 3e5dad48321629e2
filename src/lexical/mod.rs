//! Tokens whose shape is fixed by a local pattern, independent of nesting.
//!
//! The grammar refers to these pattern strings directly; they are compiled
//! (anchored) once when the grammar is built.

mod cache;

/// A backslash followed by letters, `@` or `:`. This is the grammar's word
/// rule: any literal in the grammar that is a complete word is reserved and
/// can only be matched as that keyword.
pub const COMMAND_NAME: &str = r"\\[@a-zA-Z:]+";

/// `%` to the end of the line. An escaped `\%` never reaches here: the
/// escape is taken whole before the percent sign is looked at.
pub const LINE_COMMENT: &str = r"%[^\r\n]*";

pub const WHITESPACE: &str = r"\s+";

pub const HORIZONTAL_SPACE: &str = r"[ \t]+";

pub const END_OF_LINE: &str = r"\r\n?|\n";

pub const GENERIC_ID: &str = r"[a-zA-Z][a-zA-Z0-9:_-]*";

pub const COMPONENT_ID: &str = r"[a-zA-Z*][a-zA-Z0-9:_-]*";

pub const MATH_TEXT: &str = r"[^${}]+";

pub const VALUE_TEXT: &str = r"[^\\{}\[\]\s,][^\\{}\[\],]*";

pub const VALUE_BRACE_GROUP_TEXT: &str = r"[^\\{}]+";

/// Shared by option keywords and setting keys.
pub const KEYWORD: &str = r"[^\s=,\[\]]+";

pub const DIGIT: &str = r"\d";

/// `\start` or `\stop` not followed by a letter, so that named start/stop
/// pairs are left to the rules which handle them.
pub const GROUP_START: &str = r"\\start[^a-zA-Z]";
pub const GROUP_STOP: &str = r"\\stop[^a-zA-Z]";

/// The escapable special characters. The escaped backslash must be last;
/// textually it is a prefix of nothing else, but it is tried only once
/// every other escape has failed.
pub const ESCAPES: [&str; 11] = [
    "\\%", "\\#", "\\$", "\\&", "\\^", "\\_", "\\{", "\\}", "\\|", "\\~", "\\\\",
];

/// The name a token matched by one of these patterns goes by in the tree,
/// when no rule gives it one.
pub fn token_name(pattern: &str) -> &'static str {
    match pattern {
        COMMAND_NAME => "command_name",
        LINE_COMMENT => "line_comment",
        WHITESPACE => "whitespace",
        HORIZONTAL_SPACE => "horizontal_space",
        END_OF_LINE => "end_of_line",
        GENERIC_ID | COMPONENT_ID => "identifier",
        MATH_TEXT => "math_text",
        VALUE_TEXT | VALUE_BRACE_GROUP_TEXT => "value_text",
        KEYWORD => "keyword",
        DIGIT => "digit",
        GROUP_START => "group_start",
        GROUP_STOP => "group_stop",
        _ => "pattern",
    }
}

/// Wrap a pattern so that it only matches at the start of the input.
pub fn anchored(pattern: &str) -> String {
    format!("^(?:{})", pattern)
}

pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '@' || c == ':'
}

/// The length of the command word at the start of `input`, if there is one.
pub fn word_at(input: &str) -> Option<usize> {
    let rest = input.strip_prefix('\\')?;
    let width: usize = rest
        .chars()
        .take_while(|c| is_word_char(*c))
        .map(char::len_utf8)
        .sum();

    if width == 0 {
        None
    } else {
        Some(width + 1)
    }
}

/// Does this literal look like a command word? Such literals are keywords:
/// they are matched only when the whole word at that position equals them.
pub fn is_keyword(literal: &str) -> bool {
    word_at(literal) == Some(literal.len())
}
