//! Fixed-point formatting of totals
//!
//! Totals are rendered the way `Number.prototype.toFixed` renders them:
//! the decision to round up is made on the exact binary value, and an exact
//! tie rounds away from zero. `format!("{:.2}")` is not used directly since
//! it resolves ties differently.

/// Enough fractional digits to print any finite f64 without rounding
const EXACT_DIGITS: usize = 1100;

const MAX_DIGITS: usize = 100;

/// Format `value` with `digits` digits after the decimal point.
///
/// `NaN` becomes `"NaN"`, infinities become `"Infinity"`/`"-Infinity"` and
/// magnitudes of 1e21 or more fall back to exponent notation (`"1e+21"`).
/// Negative values always keep their sign, so `-0.001` formats as `"-0.00"`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    let digits = digits.min(MAX_DIGITS);
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    if magnitude.is_infinite() {
        return format!("{sign}Infinity");
    }
    if magnitude >= 1e21 {
        return format!("{sign}{}", exponent_form(magnitude));
    }

    let exact = format!("{:.*}", EXACT_DIGITS, magnitude);
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut buf: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .collect();
    let round_up = frac_part
        .as_bytes()
        .get(digits)
        .is_some_and(|d| *d >= b'5');

    if round_up {
        let mut carry = true;
        for d in buf.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            buf.insert(0, b'1');
        }
    }

    let text: String = buf.iter().map(|&b| b as char).collect();
    if digits == 0 {
        format!("{sign}{text}")
    } else {
        let int_len = text.len() - digits;
        format!("{sign}{}.{}", &text[..int_len], &text[int_len..])
    }
}

fn exponent_form(magnitude: f64) -> String {
    let plain = format!("{:e}", magnitude);
    match plain.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => plain,
    }
}
