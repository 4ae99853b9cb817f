//! Message tokenization shared by the addressing heuristics.

/// Characters that separate words in a chat message: whitespace plus the
/// punctuation people put directly after a nick ("bob:", "bob,", "bob?").
pub const DELIMITERS: &[char] = &[
    ' ', '\t', '\n', '\r', '\u{c}', ':', '.', '(', ')', '-', ',', '/', '&', '!', '?', '"', '<',
    '>',
];

fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// The first token of a message, before any delimiter.
///
/// A message that opens with a delimiter yields an empty token; callers
/// treat that as "addresses nobody" rather than skipping ahead, so
/// "  bob, hi" does not count as directly addressing bob.
pub fn leading_token(message: &str) -> &str {
    message.split(is_delimiter).next().unwrap_or("")
}

/// All non-empty tokens of a message, in order.
pub fn words(message: &str) -> impl Iterator<Item = &str> {
    message.split(is_delimiter).filter(|word| !word.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_token_stops_at_first_delimiter() {
        assert_eq!(leading_token("bob: hi there"), "bob");
        assert_eq!(leading_token("bob, are you around?"), "bob");
        assert_eq!(leading_token("hello world"), "hello");
    }

    #[test]
    fn leading_delimiter_yields_empty_token() {
        assert_eq!(leading_token(" bob: hi"), "");
        assert_eq!(leading_token(":wave:"), "");
        assert_eq!(leading_token(""), "");
    }

    #[test]
    fn words_skips_empty_pieces() {
        let collected: Vec<&str> = words("so... bob, (and carol) -- ping?").collect();
        assert_eq!(collected, vec!["so", "bob", "and", "carol", "ping"]);
    }
}
