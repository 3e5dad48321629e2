use context::formatting::{Render, Syntax};
use context::parsing::ParsingError;

/// Generate problem and detail messages for parsing errors
pub fn generate_error_message(error: &ParsingError, renderer: &impl Render) -> (String, String) {
    match error {
        ParsingError::Unrecognized(_, _) => (
            "Unrecognized input".to_string(),
            format!(
                r#"
The parser could not make sense of this part of the document and skipped
over it. Stray closing braces like {} and a {} without a matching start
are the usual causes. Special characters meant literally need a backslash,
as in {} or {}.
                "#,
                renderer.style(Syntax::Bracket, "}"),
                renderer.style(Syntax::Structure, "\\stoptext"),
                renderer.style(Syntax::Escape, "\\}"),
                renderer.style(Syntax::Escape, "\\$"),
            )
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::Expected(_, value) => (
            format!("Expected {}", value),
            format!(
                "The parser was looking for {} but found something else.",
                value
            ),
        ),
        ParsingError::UnexpectedEndOfInput(_) => (
            "Unexpected end of input".to_string(),
            format!(
                r#"
The file ended before the construct that was open here was closed. Check
that every {} has its {}, that inline math opened with {} is closed with
another, and that each {} block has its matching {}.
                "#,
                renderer.style(Syntax::Bracket, "{"),
                renderer.style(Syntax::Bracket, "}"),
                renderer.style(Syntax::Math, "$"),
                renderer.style(Syntax::Language, "\\start..."),
                renderer.style(Syntax::Language, "\\stop..."),
            )
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::TooDeep(_) => (
            "Nesting too deep".to_string(),
            format!(
                r#"
Groups, commands and math open here nest deeper than the parser will
follow, so this stretch was skipped. Look for a run of {} or {} that is
never closed.
                "#,
                renderer.style(Syntax::Bracket, "{"),
                renderer.style(Syntax::Structure, "\\start..."),
            )
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::Cancelled(_) => (
            "Parsing cancelled".to_string(),
            "The parse was stopped before it finished.".to_string(),
        ),
        ParsingError::Grammar(error) => (
            "Internal grammar error".to_string(),
            format!(
                "The grammar failed its own consistency checks: {}. This should not have happened! Sorry.",
                error.message()
            ),
        ),
    }
}
