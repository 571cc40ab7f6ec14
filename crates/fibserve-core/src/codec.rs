//! Textual encodings of [`Complex`] values.
//!
//! Three forms exist, and their exact shapes are load-bearing:
//!
//! - **input**: what users send (`"3 4"`, `"3+4"`, `"3,5"` …)
//! - **display**: `R±Ii` with 16 fixed fractional digits, returned in
//!   responses
//! - **cache**: `R I`, space-separated, persisted in Redis and required
//!   to round-trip bit-exactly, including the sign of zero
//!
//! Both formatters share one fixed-point primitive so the negative-zero
//! special case lives in a single place.

use crate::complex::Complex;
use crate::error::{CacheFormatError, ParseError};

/// The one value `format!("{:.16}")` is not trusted to render: negative
/// zero must come out with its sign so the cache form round-trips.
const NEG_ZERO: &str = "-0.0000000000000000";

/// Fixed-point with exactly 16 fractional digits, never scientific.
fn format_part(x: f64) -> String {
    if x == 0.0 && x.is_sign_negative() {
        NEG_ZERO.to_owned()
    } else {
        format!("{x:.16}")
    }
}

/// Parse a user input string into a complex value.
///
/// Normalizes `,` to `.` (decimal separator tolerance) and `+` to a
/// space, then splits on whitespace. One numeric token is a real input,
/// two are real and imaginary parts. `"3+4"` and `"3 4"` are therefore
/// the same input; there is intentionally no way to spell a `+`-joined
/// second real term.
pub fn parse_input(raw: &str) -> Result<Complex, ParseError> {
    let normalized = raw.replace(',', ".").replace('+', " ");
    let parts = normalized
        .split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidNumber(token.to_owned()))
        })
        .collect::<Result<Vec<f64>, ParseError>>()?;

    match parts.as_slice() {
        [re] => Ok(Complex::real(*re)),
        [re, im] => Ok(Complex::new(*re, *im)),
        other => Err(ParseError::ComponentCount(other.len())),
    }
}

/// Render the human-readable display form: `R±Ii`.
///
/// The imaginary part's sign is always explicit; `-` only for strictly
/// negative values, so `-0.0` renders `+`. The magnitude goes through
/// the negative-zero-aware path like everything else; that branch
/// cannot fire after `abs()`, but it is preserved on purpose.
pub fn format_display(z: Complex) -> String {
    let sign = if z.im < 0.0 { '-' } else { '+' };
    format!(
        "{}{}{}i",
        format_part(z.re),
        sign,
        format_part(z.im.abs())
    )
}

/// Render the cache-persisted form: `R I`.
///
/// No sign forcing, no suffix, no magnitude transformation; each
/// component that is exactly negative zero renders as the literal
/// `-0.0000000000000000`.
pub fn format_for_cache(z: Complex) -> String {
    format!("{} {}", format_part(z.re), format_part(z.im))
}

/// Parse a cache-persisted string back into a complex value.
///
/// Inverse of [`format_for_cache`]: exactly two space-separated tokens,
/// with the negative-zero literal mapped back to `-0.0` so the
/// round-trip is bit-exact.
pub fn parse_from_cache(s: &str) -> Result<Complex, CacheFormatError> {
    let parts: Vec<&str> = s.split(' ').collect();
    if parts.len() != 2 {
        return Err(CacheFormatError::ComponentCount(parts.len()));
    }

    let parse_part = |token: &str| -> Result<f64, CacheFormatError> {
        if token == NEG_ZERO {
            Ok(-0.0)
        } else {
            token
                .parse::<f64>()
                .map_err(|_| CacheFormatError::InvalidComponent(token.to_owned()))
        }
    };

    Ok(Complex::new(parse_part(parts[0])?, parse_part(parts[1])?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(z: Complex) -> (u64, u64) {
        (z.re.to_bits(), z.im.to_bits())
    }

    #[test]
    fn parses_single_real_token() {
        assert_eq!(parse_input("5").unwrap(), Complex::new(5.0, 0.0));
    }

    #[test]
    fn parses_two_tokens_as_real_and_imaginary() {
        assert_eq!(parse_input("3 4").unwrap(), Complex::new(3.0, 4.0));
    }

    #[test]
    fn plus_joins_like_whitespace() {
        assert_eq!(parse_input("3+4").unwrap(), parse_input("3 4").unwrap());
    }

    #[test]
    fn comma_is_a_decimal_separator() {
        assert_eq!(parse_input("3,5 4").unwrap(), Complex::new(3.5, 4.0));
    }

    #[test]
    fn rejects_three_components() {
        assert_eq!(
            parse_input("1 2 3").unwrap_err(),
            ParseError::ComponentCount(3)
        );
    }

    #[test]
    fn rejects_non_numeric_token() {
        assert_eq!(
            parse_input("abc").unwrap_err(),
            ParseError::InvalidNumber("abc".into())
        );
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse_input("").unwrap_err(), ParseError::ComponentCount(0));
        assert_eq!(parse_input("  ").unwrap_err(), ParseError::ComponentCount(0));
    }

    #[test]
    fn tolerates_leading_plus_and_extra_spaces() {
        assert_eq!(parse_input("+5").unwrap(), Complex::new(5.0, 0.0));
        assert_eq!(parse_input(" 3  4 ").unwrap(), Complex::new(3.0, 4.0));
    }

    #[test]
    fn display_form_of_three() {
        assert_eq!(
            format_display(Complex::new(3.0, 0.0)),
            "3.0000000000000000+0.0000000000000000i"
        );
    }

    #[test]
    fn display_form_negative_values() {
        assert_eq!(
            format_display(Complex::new(-1.5, -2.25)),
            "-1.5000000000000000-2.2500000000000000i"
        );
    }

    #[test]
    fn display_negative_zero_real_uses_literal() {
        // The imaginary sign comes from a plain `< 0.0` comparison, so
        // -0.0 imaginary renders `+`.
        assert_eq!(
            format_display(Complex::new(-0.0, -0.0)),
            "-0.0000000000000000+0.0000000000000000i"
        );
    }

    #[test]
    fn display_magnitude_negative_zero_branch_is_inert() {
        // abs() of any value is non-negative, so the shared primitive's
        // negative-zero branch can never fire for the imaginary
        // magnitude. Pin that down.
        let mag = (-0.0f64).abs();
        assert!(!mag.is_sign_negative());
        assert_eq!(format_part(mag), "0.0000000000000000");
    }

    #[test]
    fn cache_form_keeps_signed_zero() {
        assert_eq!(
            format_for_cache(Complex::new(-0.0, -0.0)),
            "-0.0000000000000000 -0.0000000000000000"
        );
        assert_eq!(
            format_for_cache(Complex::new(0.0, -0.0)),
            "0.0000000000000000 -0.0000000000000000"
        );
    }

    #[test]
    fn cache_round_trip_is_bit_exact() {
        let values = [
            Complex::new(5.0, 0.0),
            Complex::new(-0.0, 0.0),
            Complex::new(0.0, -0.0),
            Complex::new(-0.0, -0.0),
            Complex::new(3.5, -4.25),
            Complex::new(-12345.0625, 0.5),
        ];
        for z in values {
            let round = parse_from_cache(&format_for_cache(z)).unwrap();
            assert_eq!(bits(round), bits(z), "round trip failed for {z:?}");
        }
    }

    #[test]
    fn cache_parse_rejects_wrong_arity() {
        assert_eq!(
            parse_from_cache("1.0").unwrap_err(),
            CacheFormatError::ComponentCount(1)
        );
        assert_eq!(
            parse_from_cache("1.0 2.0 3.0").unwrap_err(),
            CacheFormatError::ComponentCount(3)
        );
    }

    #[test]
    fn cache_parse_rejects_malformed_component() {
        assert_eq!(
            parse_from_cache("1.0 what").unwrap_err(),
            CacheFormatError::InvalidComponent("what".into())
        );
    }
}
