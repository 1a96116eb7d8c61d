// ============================================================================
// Radix Point Placement
// Rebuilds positional notation from an engine (digits, exponent) pair
// ============================================================================
//
// Both float engines report a value as a bare digit string plus an exponent
// with an implicit radix point before the first digit:
//
//     value = 0.d1 d2 d3 ... × base^exponent
//
// Placement depends only on the digit string, its sign and the exponent, so
// it lives here as a pure function instead of next to the engine calls.

/// Most zeros positional output pads on either side of the digits.
const MAX_PADDING: i64 = 64;

/// Insert the radix point into `digits` (optionally `-`-prefixed).
///
/// - All-zero or empty digits render as `"0"`.
/// - `exponent <= 0`: leading `0.` followed by `-exponent` zeros.
/// - `exponent >= digits`: digits padded with trailing zeros, no point.
/// - otherwise: point after `exponent` digits.
///
/// Trailing zeros after the point are dropped, along with a bare point.
///
/// When more than 64 zeros would be padded, the value is written as
/// `d.ddd@e` instead: one leading digit and a decimal exponent `e` counting
/// powers of the base. Both float parsers read this form back.
pub fn place_radix_point(digits: &str, exponent: i64) -> String {
    let (negative, body) = match digits.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, digits),
    };

    if body.bytes().all(|b| b == b'0') {
        return "0".to_string();
    }

    let len = body.len() as i64;
    let mut out = String::with_capacity(body.len() + exponent.unsigned_abs().min(MAX_PADDING as u64) as usize + 24);
    if negative {
        out.push('-');
    }

    if exponent < -MAX_PADDING || exponent - len > MAX_PADDING {
        let (lead, rest) = body.split_at(1);
        out.push_str(lead);
        let rest = rest.trim_end_matches('0');
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        out.push('@');
        out.push_str(&(exponent - 1).to_string());
    } else if exponent <= 0 {
        let fraction = body.trim_end_matches('0');
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take(exponent.unsigned_abs() as usize));
        out.push_str(fraction);
    } else if exponent >= len {
        out.push_str(body);
        out.extend(std::iter::repeat('0').take((exponent - len) as usize));
    } else {
        let (int_part, frac_part) = body.split_at(exponent as usize);
        out.push_str(int_part);
        let frac_part = frac_part.trim_end_matches('0');
        if !frac_part.is_empty() {
            out.push('.');
            out.push_str(frac_part);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_special_case() {
        assert_eq!(place_radix_point("", 0), "0");
        assert_eq!(place_radix_point("000", 5), "0");
        assert_eq!(place_radix_point("-0", -3), "0");
    }

    #[test]
    fn test_exponent_zero() {
        assert_eq!(place_radix_point("5", 0), "0.5");
        assert_eq!(place_radix_point("-125", 0), "-0.125");
    }

    #[test]
    fn test_negative_exponent() {
        assert_eq!(place_radix_point("1", -2), "0.001");
        assert_eq!(place_radix_point("-25", -1), "-0.025");
    }

    #[test]
    fn test_positive_exponent_inside_digits() {
        assert_eq!(place_radix_point("31416", 1), "3.1416");
        assert_eq!(place_radix_point("-15", 1), "-1.5");
        assert_eq!(place_radix_point("2500", 1), "2.5");
        assert_eq!(place_radix_point("10000000", 1), "1");
    }

    #[test]
    fn test_positive_exponent_past_digits() {
        assert_eq!(place_radix_point("12", 4), "1200");
        assert_eq!(place_radix_point("-7", 1), "-7");
        assert_eq!(place_radix_point("ff", 2), "ff");
    }

    #[test]
    fn test_trailing_zeros_in_integer_part_kept() {
        assert_eq!(place_radix_point("100", 3), "100");
        assert_eq!(place_radix_point("1000", 3), "100");
    }

    #[test]
    fn test_padding_limit_boundaries() {
        let at_limit = place_radix_point("1", 65);
        assert_eq!(at_limit.len(), 65);
        assert!(!at_limit.contains('@'));
        assert_eq!(place_radix_point("1", 66), "1@65");

        assert_eq!(place_radix_point("1", -64).len(), 67);
        assert_eq!(place_radix_point("1", -65), "1@-66");
    }

    #[test]
    fn test_exponent_notation_for_extreme_exponents() {
        assert_eq!(place_radix_point("12500", 1_000_000), "1.25@999999");
        assert_eq!(place_radix_point("-3", -1_000_000), "-3@-1000001");
        assert_eq!(place_radix_point("ff", 200), "f.f@199");
        assert_eq!(place_radix_point("000", 1_000_000_000), "0");
    }
}
