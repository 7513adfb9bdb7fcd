//! Username validation for generated members.
//!
//! Usernames become ledger key suffixes, so they are restricted to
//! lowercase ASCII letters, digits, `.` and `_`, and must start with a
//! letter.

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;

/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;

/// Validates a username.
///
/// # Examples
///
/// ```
/// use ledger_fixtures::is_valid_username;
///
/// assert!(is_valid_username("ada.lovelace"));
/// assert!(!is_valid_username("ab"));
/// assert!(!is_valid_username("Ada"));
/// assert!(!is_valid_username("1ada"));
/// assert!(!is_valid_username("ada:lovelace"));
/// ```
#[must_use]
pub fn is_valid_username(name: &str) -> bool {
    let length = name.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&length) {
        return false;
    }
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase()) && chars.all(is_valid_username_char)
}

const fn is_valid_username_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '_'
}

/// Lowercases `raw` and drops every character a username cannot hold.
#[must_use]
pub(crate) fn sanitize_username(raw: &str) -> String {
    raw.chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| is_valid_username_char(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("ada", true)]
    #[case("ada.lovelace", true)]
    #[case("o_brien2", true)]
    #[case("ab", false)]
    #[case("", false)]
    #[case("Ada", false)]
    #[case("9lives", false)]
    #[case(".ada", false)]
    #[case("ada-lovelace", false)]
    #[case("ada lovelace", false)]
    #[case("abcdefghijklmnopqrstuvwxyzabcdefg", false)]
    fn validates_usernames(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_valid_username(name), expected);
    }

    #[rstest]
    #[case("O'Brien.Mary-Jo", "obrien.maryjo")]
    #[case("Zoë.Núñez", "zo.nez")]
    #[case("ada.lovelace", "ada.lovelace")]
    fn sanitizes_raw_names(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(sanitize_username(raw), expected);
    }
}
