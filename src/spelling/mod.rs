//! spell checking the prose of ConTeXt documents

use std::path::Path;

use spellbook::Dictionary;
use tracing::debug;

use crate::language::{LoadingError, Tree};

/// A word of prose the dictionary does not know, with the corrections it
/// offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misspelling<'i> {
    pub offset: usize,
    pub word: &'i str,
    pub suggestions: Vec<String>,
}

/// Load a Hunspell dictionary from the `.aff` and `.dic` pair sharing the
/// given base path, so `/usr/share/hunspell/en_US` reads `en_US.aff` and
/// `en_US.dic`.
pub fn load_dictionary(base: &Path) -> Result<Dictionary, LoadingError<'_>> {
    let aff = read(base, "aff")?;
    let dic = read(base, "dic")?;

    Dictionary::new(&aff, &dic).map_err(|error| {
        debug!(?error);
        LoadingError {
            problem: "Invalid dictionary".to_string(),
            details: format!("{:?}", error),
            filename: base,
        }
    })
}

fn read<'a>(base: &'a Path, extension: &str) -> Result<String, LoadingError<'a>> {
    let path = base.with_extension(extension);
    std::fs::read_to_string(&path).map_err(|error| {
        debug!(?error, ?path);
        LoadingError {
            problem: format!("Failed reading dictionary .{} file", extension),
            details: error
                .kind()
                .to_string(),
            filename: base,
        }
    })
}

/// Check every word of prose in the tree. Punctuation around a word is not
/// part of it, and runs with no letters at all (numbers, dashes) are not
/// words. Markup is never looked at.
pub fn check<'i>(tree: &Tree<'i>, dictionary: &Dictionary) -> Vec<Misspelling<'i>> {
    let mut result = Vec::new();

    for (offset, word) in tree.words() {
        let trimmed = word.trim_matches(|c: char| !c.is_alphabetic());
        if trimmed.is_empty() || dictionary.check(trimmed) {
            continue;
        }

        let leading = word.len()
            - word
                .trim_start_matches(|c: char| !c.is_alphabetic())
                .len();

        let mut suggestions = Vec::new();
        dictionary.suggest(trimmed, &mut suggestions);

        result.push(Misspelling {
            offset: offset + leading,
            word: trimmed,
            suggestions,
        });
    }

    debug!(misspellings = result.len(), "Spell checked");
    result
}
