use shared_types::SentenceSplitter;

/// Matched case-insensitively, so dateline forms such as `ST.` count too.
const ABBREVIATIONS: &[&str] = &[
    "Inc.", "Corp.", "Ltd.", "Co.", "Mr.", "Mrs.", "Ms.", "Dr.", "St.", "Ft.", "Mt.", "Jr.",
    "Sr.", "No.", "U.S.", "e.g.", "i.e.", "vs.", "Jan.", "Feb.", "Mar.", "Apr.", "Jun.", "Jul.",
    "Aug.", "Sep.", "Sept.", "Oct.", "Nov.", "Dec.",
];

const CLOSING: &[char] = &['"', '\'', ')', '\u{201d}', '\u{2019}'];
const OPENING: &[char] = &['"', '\'', '(', '\u{201c}', '\u{2018}'];

/// Punctuation-driven sentence splitter for English press-release prose.
///
/// A sentence ends at `.`, `!` or `?` (plus any closing quotes or brackets)
/// when whitespace follows and the next word starts with an uppercase letter,
/// a digit or an opening quote. Periods closing a known abbreviation or a
/// single-letter initial never end a sentence.
#[derive(Debug, Clone, Default)]
pub struct RuleSentenceSplitter;

impl RuleSentenceSplitter {
    pub fn new() -> Self {
        Self
    }

    fn ends_with_abbreviation(text: &str, terminator_at: usize) -> bool {
        // The word is the run of letters, digits and periods ending at the
        // terminator, so `--Feb.` and `(St.` read as `Feb.` and `St.`
        let word_start = text[..terminator_at]
            .char_indices()
            .rev()
            .find(|(_, c)| !(c.is_alphanumeric() || *c == '.'))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        let word = &text[word_start..=terminator_at];

        if ABBREVIATIONS
            .iter()
            .any(|abbreviation| abbreviation.eq_ignore_ascii_case(word))
        {
            return true;
        }

        // Initials such as the "J." in "John J. Smith"
        let mut chars = word.chars();
        matches!(
            (chars.next(), chars.next(), chars.next()),
            (Some(c), Some('.'), None) if c.is_uppercase()
        )
    }
}

impl SentenceSplitter for RuleSentenceSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((i, ch)) = chars.next() {
            if !matches!(ch, '.' | '!' | '?') {
                continue;
            }
            if ch == '.' && Self::ends_with_abbreviation(text, i) {
                continue;
            }

            let mut end = i + ch.len_utf8();
            while let Some(&(j, next)) = chars.peek() {
                if !CLOSING.contains(&next) {
                    break;
                }
                end = j + next.len_utf8();
                chars.next();
            }

            let rest = &text[end..];
            let next_word = rest.trim_start();
            let has_gap = next_word.len() < rest.len();
            let starts_sentence = next_word
                .chars()
                .next()
                .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit() || OPENING.contains(&c));

            if has_gap && starts_sentence {
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                start = end;
            }
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }

        sentences
    }
}

/// Opening sentence of an article body, if it has any text at all.
pub fn first_sentence(splitter: &dyn SentenceSplitter, body: &str) -> Option<String> {
    splitter.split(body).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple_sentences() {
        let splitter = RuleSentenceSplitter::new();
        let sentences = splitter.split("Acme grew. Revenue doubled! Why? 2019 was strong.");
        assert_eq!(
            sentences,
            vec!["Acme grew.", "Revenue doubled!", "Why?", "2019 was strong."]
        );
    }

    #[test]
    fn test_abbreviation_does_not_end_sentence() {
        let splitter = RuleSentenceSplitter::new();
        let sentences = splitter.split(
            "Acme Robotics Inc. (NASDAQ: ACME) announced today a deal with Widget Labs. The deal closes soon.",
        );
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].starts_with("Acme Robotics Inc. (NASDAQ: ACME)"));
        assert_eq!(sentences[1], "The deal closes soon.");
    }

    #[test]
    fn test_initials_and_lowercase_continuations() {
        let splitter = RuleSentenceSplitter::new();
        let sentences = splitter.split("John J. Smith joined in the U.S. market. version 2.0 ships.");
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn test_dateline_abbreviations_in_any_case() {
        let splitter = RuleSentenceSplitter::new();

        let sentences = splitter.split(
            "ST. LOUIS--(BUSINESS WIRE)--Acme Inc. (NYSE: ACM) opened a plant. Hiring starts now.",
        );
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].starts_with("ST. LOUIS--"));

        let sentences = splitter.split(
            "NEW YORK--(BUSINESS WIRE)--Feb. 7, 2019--Acme Inc. (NYSE: ACM) grew. FT. WORTH is next.",
        );
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1], "FT. WORTH is next.");
    }

    #[test]
    fn test_closing_quote_stays_with_sentence() {
        let splitter = RuleSentenceSplitter::new();
        let sentences = splitter.split("\"We are thrilled.\" The CEO said.");
        assert_eq!(sentences, vec!["\"We are thrilled.\"", "The CEO said."]);
    }

    #[test]
    fn test_first_sentence() {
        let splitter = RuleSentenceSplitter::new();
        assert_eq!(
            first_sentence(&splitter, "  First one. Second one."),
            Some("First one.".to_string())
        );
        assert_eq!(first_sentence(&splitter, ""), None);
        assert_eq!(first_sentence(&splitter, "   \n "), None);
        assert_eq!(
            first_sentence(&splitter, "no terminator here"),
            Some("no terminator here".to_string())
        );
    }
}
