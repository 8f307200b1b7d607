//! Identifier shape checks shared by storage namespaces and place ids.

/// Maximum length accepted for client-supplied identifiers.
pub(crate) const MAX_IDENTIFIER_LEN: usize = 64;

/// Return `true` for lowercase ASCII letters, digits and hyphens, trimmed and
/// non-empty. Place ids derived from Hebrew names may start with a hyphen.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_IDENTIFIER_LEN
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("-51-city-433hwy", true)]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", true)]
    #[case("", false)]
    #[case("Upper", false)]
    #[case(" padded", false)]
    #[case("קפה", false)]
    fn validates_slug_shape(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(value), expected);
    }

    #[rstest]
    fn rejects_overlong_values() {
        assert!(!is_valid_slug(&"a".repeat(MAX_IDENTIFIER_LEN + 1)));
    }
}
