use regex::Regex;
use std::sync::LazyLock;

/// Capitalised words or acronyms, each followed by whitespace, a comma, a
/// period or the end of the text.
static TITLE_CASE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(?:[A-Z]+|[A-Z][A-Za-z]+)(?:\s|$|,|\.))+")
        .expect("title-case run pattern is valid")
});

static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +").expect("space run pattern is valid"));

const CONJUNCTIONS: [&str; 3] = ["or", "and", "alternatively"];

/// Split text into lines on `\n`, keeping blank lines (and a trailing empty
/// line after a final newline) as delimiters.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// True when a title-case or acronym run occurs anywhere in `text`.
pub fn has_title_case_run(text: &str) -> bool {
    TITLE_CASE_RUN.is_match(text)
}

/// True for the joining words placed between alternative contacts.
pub fn is_conjunction(line: &str) -> bool {
    let lowered = line.trim().to_lowercase();
    CONJUNCTIONS.contains(&lowered.as_str())
}

/// Tidy the flat rendering of a page: drop `*` emphasis markers and collapse
/// runs of spaces.
pub fn clean_flat_text(text: &str) -> String {
    let without_markers = text.replace('*', "");
    SPACE_RUNS.replace_all(&without_markers, " ").into_owned()
}
