//! Deterministic venue identifiers.
//!
//! Identifiers combine a readable slug built from the Latin letters and
//! digits of the name and city with a short hash of the full `name-city`
//! string. The hash folds UTF-16 code units into a wrapping 32-bit integer so
//! that identifiers published by earlier releases of the guide stay valid.

const NAME_PART_MAX: usize = 20;
const CITY_PART_MAX: usize = 15;
const HASH_PART_MAX: usize = 6;
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Derive the stable identifier for a venue.
///
/// Hebrew names contribute nothing to the readable part, so most identifiers
/// look like `-51-city-433hwy`; the hash keeps them unique.
///
/// # Examples
/// ```
/// use venue_catalog::derive_place_id;
///
/// assert_eq!(derive_place_id("Mix & Matcha", "Tel Aviv"), "mix-matcha-tel-aviv-s7v6wq");
/// assert_eq!(
///     derive_place_id("Mix & Matcha", "Tel Aviv"),
///     derive_place_id("Mix & Matcha", "Tel Aviv"),
/// );
/// ```
#[must_use]
pub fn derive_place_id(name: &str, city: &str) -> String {
    let name_part = readable_part(name, NAME_PART_MAX, "cafe");
    let city_part = readable_part(city, CITY_PART_MAX, "city");
    let hash = hash_part(&format!("{name}-{city}"));
    format!("{name_part}-{city_part}-{hash}")
}

fn readable_part(value: &str, max_len: usize, fallback: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut in_whitespace = false;
    for ch in value
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch.is_whitespace())
    {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(ch);
            in_whitespace = false;
        }
    }

    let truncated: String = slug.chars().take(max_len).collect();
    if truncated.is_empty() {
        fallback.to_owned()
    } else {
        truncated
    }
}

fn hash_part(input: &str) -> String {
    let hash = input.encode_utf16().fold(0_i32, |acc, unit| {
        acc.wrapping_shl(5)
            .wrapping_sub(acc)
            .wrapping_add(i32::from(unit))
    });
    let encoded = to_base36(i64::from(hash).unsigned_abs());
    encoded.chars().take(HASH_PART_MAX).collect()
}

#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "radix conversion is defined in terms of quotient and remainder"
)]
fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while value > 0 {
        let index = usize::try_from(value % 36).unwrap_or_default();
        digits.push(BASE36_DIGITS.get(index).copied().unwrap_or(b'0'));
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("קפה 51", "גבעתיים", "-51-city-433hwy")]
    #[case("קנופי קפה", "ירושלים", "--city-yavbk8")]
    #[case("Mix & Matcha", "Tel Aviv", "mix-matcha-tel-aviv-s7v6wq")]
    #[case("Cafe Nahat 2", "Tel Aviv Yafo", "cafe-nahat-2-tel-aviv-yafo-qensz8")]
    fn derives_published_identifiers(#[case] name: &str, #[case] city: &str, #[case] id: &str) {
        assert_eq!(derive_place_id(name, city), id);
    }

    #[rstest]
    fn readable_part_falls_back_when_nothing_latin_remains() {
        assert_eq!(readable_part("מאצ'ה", NAME_PART_MAX, "cafe"), "cafe");
    }

    #[rstest]
    fn readable_part_truncates_long_names() {
        let part = readable_part("The Very Long Specialty Coffee Name", NAME_PART_MAX, "cafe");
        assert_eq!(part, "the-very-long-specia");
    }

    #[rstest]
    #[case(0, "0")]
    #[case(35, "z")]
    #[case(36, "10")]
    fn base36_encodes_digits(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(to_base36(value), expected);
    }
}
