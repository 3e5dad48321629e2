use super::messages::generate_error_message;
use context::{formatting::Render, language::LoadingError, parsing::ParsingError};
use owo_colors::OwoColorize;
use std::path::Path;

/// Format a parsing error with full details including source code context
pub fn full_parsing_error<'i>(
    error: &ParsingError,
    filename: &'i Path,
    source: &'i str,
    renderer: &impl Render,
) -> String {
    let (problem, details) = generate_error_message(error, renderer);
    let offset = error.offset();

    let i = calculate_line_number(source, offset);
    let j = calculate_column_number(source, offset);

    let code = source
        .lines()
        .nth(i)
        .unwrap_or("");
    let line = i + 1;
    let column = j + 1;
    let width = 3.max(
        line.to_string()
            .len(),
    );

    // underline the whole problem where its extent is known, staying on
    // the one line we show
    let carets = error
        .width()
        .map(|width| {
            source
                .get(offset..offset + width)
                .unwrap_or("")
                .lines()
                .next()
                .map_or(1, |first| {
                    first
                        .chars()
                        .count()
                })
                .max(1)
        })
        .unwrap_or(1);
    let marker = format!("{:>column$}", "^".repeat(carets), column = column + carets - 1);

    format!(
        r#"
{}: {}:{}:{} {}

{:width$} {}
{:width$} {} {}
{:width$} {} {}

{}
        "#,
        "error".bright_red(),
        filename.to_string_lossy(),
        line,
        column,
        problem.bold(),
        ' ',
        '|'.bright_blue(),
        line.bright_blue(),
        '|'.bright_blue(),
        code,
        ' ',
        '|'.bright_blue(),
        marker.bright_red(),
        details
    )
    .trim_ascii()
    .to_string()
}

/// Format a parsing error with concise single-line output
pub fn concise_parsing_error<'i>(
    error: &ParsingError,
    filename: &'i Path,
    source: &'i str,
    renderer: &impl Render,
) -> String {
    let (problem, _) = generate_error_message(error, renderer);
    let (line, column) = position(source, error.offset());

    format!(
        "{}: {}:{}:{} {}",
        "error".bright_red(),
        filename.to_string_lossy(),
        line,
        column,
        problem.bold(),
    )
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    let mut result = format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .problem
            .bold()
    );
    if !error
        .details
        .is_empty()
    {
        result.push_str(&format!(" ({})", error.details));
    }
    result
}

/// The one-based line and column of a byte offset.
pub fn position(content: &str, offset: usize) -> (usize, usize) {
    (
        calculate_line_number(content, offset) + 1,
        calculate_column_number(content, offset) + 1,
    )
}

// Helper functions for line/column calculation
fn calculate_line_number(content: &str, offset: usize) -> usize {
    content[..offset]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
}

fn calculate_column_number(content: &str, offset: usize) -> usize {
    let before = &content[..offset];
    match before.rfind('\n') {
        Some(start) => content[start + 1..offset]
            .chars()
            .count(),
        None => before
            .chars()
            .count(),
    }
}
