//! Field normalisation helpers shared by the coffee and matcha catalogs.

/// Canonical display order for the brew methods the guide filters on.
pub const BREW_METHOD_ORDER: [&str; 3] = ["אספרסו", "פילטר", "קולד ברו"];

/// Split a comma-separated author field into trimmed, non-empty entries.
///
/// # Examples
/// ```
/// use venue_catalog::parse_list;
///
/// assert_eq!(parse_list("Oat, Almond,, Cow "), vec!["Oat", "Almond", "Cow"]);
/// ```
#[must_use]
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parse a brew-method list, moving known methods to the front in canonical
/// order while unknown methods keep their relative order at the end.
///
/// # Examples
/// ```
/// use venue_catalog::parse_brew_methods;
///
/// assert_eq!(
///     parse_brew_methods("Turkish, פילטר, אספרסו"),
///     vec!["אספרסו", "פילטר", "Turkish"],
/// );
/// ```
#[must_use]
pub fn parse_brew_methods(value: &str) -> Vec<String> {
    let mut methods = parse_list(value);
    methods.sort_by_key(|method| {
        BREW_METHOD_ORDER
            .iter()
            .position(|known| known == method)
            .unwrap_or(BREW_METHOD_ORDER.len())
    });
    methods
}

/// Strip a single leading `@` from an Instagram handle; blank handles vanish.
///
/// # Examples
/// ```
/// use venue_catalog::clean_instagram_handle;
///
/// assert_eq!(clean_instagram_handle("@maecoffee").as_deref(), Some("maecoffee"));
/// assert_eq!(clean_instagram_handle("  "), None);
/// ```
#[must_use]
pub fn clean_instagram_handle(handle: &str) -> Option<String> {
    if handle.trim().is_empty() {
        return None;
    }
    Some(handle.strip_prefix('@').unwrap_or(handle).to_owned())
}

/// Return the value unless it is blank.
#[must_use]
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
