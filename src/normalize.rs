//! Key normalization: `__` nesting separator to the `:` configuration path delimiter.

/// Path delimiter used by keys in a [`ConfigMap`](crate::config_map::ConfigMap).
pub const KEY_DELIMITER: &str = ":";

/// Nesting separator used by flat environment variable names.
pub const NESTING_SEPARATOR: &str = "__";

/// Rewrite every `__` in `key` into `:`.
///
/// Idempotent: the output never contains `__` that was produced by the
/// substitution, so a second pass is a no-op.
pub fn normalize(key: &str) -> String {
    key.replace(NESTING_SEPARATOR, KEY_DELIMITER)
}

/// Join path segments with [`KEY_DELIMITER`].
pub fn combine(segments: &[&str]) -> String {
    segments.join(KEY_DELIMITER)
}

/// Simple (one-to-one) uppercase mapping of a single char.
///
/// Chars whose uppercase form expands to several chars (`ß`) map to themselves.
fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Case-folded form of `key`, used for case-insensitive key comparison.
pub fn fold_case(key: &str) -> String {
    key.chars().map(fold_char).collect()
}

/// Case-insensitive `strip_prefix`, comparing char by char.
///
/// The remainder starts at the byte offset of the first unmatched char of
/// `key`, so prefixes whose folded form has a different byte length still
/// strip correctly. An empty prefix matches everything.
pub fn strip_prefix_ignore_case<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    let mut key_chars = key.char_indices();
    for p in prefix.chars() {
        match key_chars.next() {
            Some((_, k)) if fold_char(k) == fold_char(p) => {}
            _ => return None,
        }
    }
    let offset = key_chars.next().map(|(i, _)| i).unwrap_or(key.len());
    Some(&key[offset..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_rewrites_nesting() {
        assert_eq!(
            normalize("NestedTest__NestedProperty2"),
            "NestedTest:NestedProperty2"
        );
        assert_eq!(normalize("A__B__C"), "A:B:C");
        assert_eq!(normalize("plain"), "plain");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_odd_underscore_runs() {
        // Matches are taken left to right without overlap
        assert_eq!(normalize("A___B"), "A:_B");
        assert_eq!(normalize("A____B"), "A::B");
    }

    #[test]
    fn test_fold_case_handles_non_ascii() {
        assert_eq!(fold_case("Été:Größe"), fold_case("ÉTÉ:GRÖßE"));
        assert_eq!(fold_case("äpp"), fold_case("ÄPP"));
        assert_ne!(fold_case("a"), fold_case("b"));
    }

    #[test]
    fn test_strip_prefix_ignore_case() {
        assert_eq!(strip_prefix_ignore_case("App:Key", "app:"), Some("Key"));
        assert_eq!(strip_prefix_ignore_case("äpp_Key", "ÄPP_"), Some("Key"));
        assert_eq!(strip_prefix_ignore_case("Key", ""), Some("Key"));
        assert_eq!(strip_prefix_ignore_case("APP_", "app_"), Some(""));
        assert_eq!(strip_prefix_ignore_case("Ke", "Key"), None);
        assert_eq!(strip_prefix_ignore_case("éa", "e"), None);
        // Long s folds to 'S' but is two bytes wide
        assert_eq!(strip_prefix_ignore_case("ſxRest", "SX"), Some("Rest"));
        assert_eq!(strip_prefix_ignore_case("ÀB:rest", "àb:"), Some("rest"));
    }

    #[test]
    fn test_combine() {
        assert_eq!(combine(&["ConnectionStrings", "main"]), "ConnectionStrings:main");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in ".*") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once.clone());
        }

        #[test]
        fn normalize_output_has_no_separator(s in "[A-Za-z_:]*") {
            prop_assert!(!normalize(&s).contains(NESTING_SEPARATOR));
        }
    }
}
