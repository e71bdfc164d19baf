/// Normalize an editor selection into a test name: strip one layer of
/// matching surrounding quotes (single, double, or backtick) when present
/// on both ends, otherwise return the text unchanged.
///
/// The selection path trusts the text verbatim as a filter, so no regex
/// escaping happens here.
pub fn normalize_selection_text(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && matches!(first, b'\'' | b'"' | b'`') {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_matching_single_quotes() {
        assert_eq!(normalize_selection_text("'foo bar'"), "foo bar");
    }

    #[test]
    fn strips_matching_double_quotes_and_backticks() {
        assert_eq!(normalize_selection_text("\"foo\""), "foo");
        assert_eq!(normalize_selection_text("`foo`"), "foo");
    }

    #[test]
    fn strips_only_one_layer() {
        assert_eq!(normalize_selection_text("''foo''"), "'foo'");
    }

    #[test]
    fn mismatched_quotes_are_untouched() {
        assert_eq!(normalize_selection_text("'foo\""), "'foo\"");
    }

    #[test]
    fn unquoted_text_is_untouched() {
        assert_eq!(normalize_selection_text("foo bar"), "foo bar");
    }

    #[test]
    fn single_quote_character_is_untouched() {
        assert_eq!(normalize_selection_text("'"), "'");
    }

    #[test]
    fn inner_quotes_survive() {
        assert_eq!(normalize_selection_text("'it's fine'"), "it's fine");
    }

    #[test]
    fn does_not_escape_metacharacters() {
        assert_eq!(
            normalize_selection_text("'handles (edge) case'"),
            "handles (edge) case"
        );
    }
}
