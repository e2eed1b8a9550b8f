// Text normalization for values read back from the page
//
// Everything the wrappers return as text goes through `fold` (non-ASCII
// characters dropped) and, for display text, `clean` (fold + trim).

/// Drops every non-ASCII character.
pub fn fold(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

/// Folds to ASCII and trims surrounding whitespace.
pub fn clean(text: &str) -> String {
    fold(text).trim().to_string()
}

/// Splits an identifier value like `orders-sort-desc` into its words.
pub(crate) fn words(identifier: &str) -> impl Iterator<Item = &str> {
    identifier
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_drops_non_ascii() {
        assert_eq!(fold("caf\u{e9} \u{2013} menu"), "caf  menu");
        assert_eq!(fold("  plain  "), "  plain  ");
    }

    #[test]
    fn test_clean_trims() {
        assert_eq!(clean("\n  Save\u{a0}changes \t"), "Savechanges");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn test_words() {
        let words: Vec<&str> = words("orders-sort-desc[2]").collect();
        assert_eq!(words, vec!["orders", "sort", "desc", "2"]);
    }
}
