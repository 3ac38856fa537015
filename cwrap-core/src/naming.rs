//! Case conversion for emitted identifiers.

/// Convert an identifier to snake_case (e.g., "getHTTPStatus" -> "get_http_status").
///
/// A separator is inserted before an uppercase letter when it ends an
/// acronym run and starts a word ("HTTPServer" -> "http_server"), or when it
/// follows a lowercase letter or digit ("fooBar" -> "foo_bar"). Hyphens become
/// underscores. The result is always lowercase, so converting it again is a
/// no-op.
///
/// Characters outside ASCII alphanumerics, `-` and `_` are passed through
/// unchanged.
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' {
            result.push('_');
            continue;
        }

        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();

            let word_boundary = prev.is_ascii_lowercase() || prev.is_ascii_digit();
            let acronym_boundary =
                prev.is_ascii_uppercase() && next.is_some_and(|n| n.is_ascii_lowercase());

            if word_boundary || acronym_boundary {
                result.push('_');
            }
        }

        result.push(c.to_ascii_lowercase());
    }

    result
}
