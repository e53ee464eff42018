//! Text normalization for scraped postings. Scraped pages are mostly
//! navigation chrome; a token floor per line removes the bulk of it before
//! anything reaches the classifier.

/// Cleans raw text into normalized lines in reading order.
///
/// Each returned line is trimmed, has internal whitespace runs collapsed to a
/// single space, and carries at least `min_line_tokens` whitespace-separated
/// tokens. Empty input yields an empty vec.
pub fn normalize(raw: &str, min_line_tokens: usize) -> Vec<String> {
    raw.lines()
        .filter_map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < min_line_tokens {
                None
            } else {
                Some(tokens.join(" "))
            }
        })
        .collect()
}

/// Splits text into sentences. A boundary sits immediately after `.`, `!`, or
/// `?` followed by at least one whitespace character; the punctuation stays
/// attached to the preceding sentence and the whitespace run is consumed.
/// A trailing fragment without terminal punctuation is kept as-is.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        match chars.peek() {
            Some(&(_, next)) if next.is_whitespace() => {
                sentences.push(&text[start..i + c.len_utf8()]);
                // Consume the whitespace run; the next sentence starts at the
                // first non-whitespace character, if any.
                start = text.len();
                while let Some(&(j, w)) = chars.peek() {
                    if w.is_whitespace() {
                        chars.next();
                    } else {
                        start = j;
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

pub fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_collapses_whitespace() {
        let raw = "  Senior   Rust\tEngineer wanted  \n";
        let lines = normalize(raw, 3);
        assert_eq!(lines, vec!["Senior Rust Engineer wanted"]);
    }

    #[test]
    fn test_normalize_drops_short_lines() {
        let raw = "Home\nAbout us\nWe are hiring engineers\nLogin";
        let lines = normalize(raw, 3);
        assert_eq!(lines, vec!["We are hiring engineers"]);
    }

    #[test]
    fn test_normalize_empty_input_yields_empty_vec() {
        assert!(normalize("", 3).is_empty());
        assert!(normalize("\n\n  \n", 3).is_empty());
    }

    #[test]
    fn test_normalize_output_has_no_whitespace_runs() {
        let raw = "alpha  beta\t\tgamma\n  one two   three  ";
        for line in normalize(raw, 3) {
            assert_eq!(line, line.trim());
            assert!(!line.contains("  "));
            assert!(!line.contains('\t'));
            assert!(token_count(&line) >= 3);
        }
    }

    #[test]
    fn test_split_sentences_keeps_punctuation_attached() {
        let sentences = split_sentences("We are hiring. Apply now! Any questions? Ask away");
        assert_eq!(
            sentences,
            vec!["We are hiring.", "Apply now!", "Any questions?", "Ask away"]
        );
    }

    #[test]
    fn test_split_sentences_requires_whitespace_after_punctuation() {
        // No whitespace after the period: not a boundary.
        let sentences = split_sentences("v1.2 released. More soon");
        assert_eq!(sentences, vec!["v1.2 released.", "More soon"]);
    }

    #[test]
    fn test_split_sentences_consumes_whitespace_runs() {
        let sentences = split_sentences("First.\n\nSecond.   Third.");
        assert_eq!(sentences, vec!["First.", "Second.", "Third."]);
    }

    #[test]
    fn test_split_sentences_trailing_whitespace_only() {
        assert_eq!(split_sentences("Done.  "), vec!["Done."]);
    }

    #[test]
    fn test_split_sentences_empty_input() {
        assert!(split_sentences("").is_empty());
    }

    #[test]
    fn test_token_count() {
        assert_eq!(token_count("one two  three"), 3);
        assert_eq!(token_count(""), 0);
    }
}
