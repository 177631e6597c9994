//! Syntactic ISBN validation and normalization.
//!
//! Printed barcodes are scanned continuously and most frames decode to
//! garbage, so validation must be cheap and pure: no allocation beyond the
//! normalized copy, no provider round-trip. Both ISBN-10 and ISBN-13 check
//! digits are verified.

/// Strip the separators a printed ISBN may carry (hyphens and spaces).
pub fn normalize(code: &str) -> String {
    code.chars().filter(|c| *c != '-' && !c.is_whitespace()).collect()
}

/// Whether `code`, after normalization, is a syntactically valid ISBN-10 or
/// ISBN-13 (correct length, digit set, and check digit).
pub fn is_valid_isbn(code: &str) -> bool {
    let code = normalize(code);
    let valid = is_valid_isbn10(&code) || is_valid_isbn13(&code);
    if !valid {
        tracing::trace!(%code, "Rejected non-ISBN code");
    }
    valid
}

/// Convert a valid ISBN of either length to its canonical ISBN-13 form.
///
/// Returns `None` when the input is not a valid ISBN. ISBN-13 inputs pass
/// through unchanged (normalized); ISBN-10 inputs are re-prefixed with `978`
/// and given a fresh check digit.
pub fn to_isbn13(code: &str) -> Option<String> {
    let code = normalize(code);
    if is_valid_isbn13(&code) {
        return Some(code);
    }
    if !is_valid_isbn10(&code) {
        return None;
    }
    let mut digits: Vec<u32> = "978".chars().chain(code.chars().take(9)).filter_map(|c| c.to_digit(10)).collect();
    digits.push(isbn13_check_digit(&digits));
    Some(digits.into_iter().map(|d| char::from_digit(d, 10).unwrap_or('0')).collect())
}

fn is_valid_isbn10(code: &str) -> bool {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() != 10 {
        return false;
    }
    let mut sum: u32 = 0;
    for (position, c) in chars.iter().enumerate() {
        // 'X' is only legal as the final (check) character, worth ten.
        let value = match c.to_digit(10) {
            Some(digit) => digit,
            None if (*c == 'X' || *c == 'x') && position == 9 => 10,
            None => return false,
        };
        sum += (10 - position as u32) * value;
    }
    sum % 11 == 0
}

fn is_valid_isbn13(code: &str) -> bool {
    let digits: Vec<u32> = code.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 13 || code.chars().count() != 13 {
        return false;
    }
    isbn13_check_digit(&digits[..12]) == digits[12]
}

fn isbn13_check_digit(digits: &[u32]) -> u32 {
    let sum: u32 = digits.iter().take(12).enumerate().map(|(i, d)| if i % 2 == 0 { *d } else { 3 * d }).sum();
    (10 - sum % 10) % 10
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("9780134190440")] // The C++ Programming Language
    #[case("978-0-13-419044-0")]
    #[case("9780306406157")]
    #[case("0306406152")] // ISBN-10 form of the above
    #[case("0-306-40615-2")]
    #[case("080442957X")] // X check digit
    #[case("080442957x")]
    fn test_valid_isbns(#[case] code: &str) {
        assert!(is_valid_isbn(code));
    }

    #[rstest]
    #[case("")]
    #[case("hello world")]
    #[case("9780134190441")] // bad check digit
    #[case("0306406153")] // bad check digit
    #[case("978013419044")] // 12 digits
    #[case("97801341904400")] // 14 digits
    #[case("X804429570")] // X not in final position
    #[case("https://example.com/book/42")] // QR payload noise
    fn test_invalid_isbns(#[case] code: &str) {
        assert!(!is_valid_isbn(code));
    }

    #[rstest]
    #[case("9780134190440", "9780134190440")]
    #[case("978-0-13-419044-0", "9780134190440")]
    #[case("0306406152", "9780306406157")]
    #[case("0-306-40615-2", "9780306406157")]
    fn test_to_isbn13(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(to_isbn13(input).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("not-an-isbn")]
    #[case("0306406153")]
    fn test_to_isbn13_rejects_invalid(#[case] input: &str) {
        assert_eq!(to_isbn13(input), None);
    }

    #[test]
    fn test_normalize_strips_separators() {
        assert_eq!(normalize(" 978-0-13-419044-0 "), "9780134190440");
    }
}
