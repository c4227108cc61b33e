//! Conversion between numbers and display text.
//!
//! The display is the only place numbers are stored between keystrokes, so
//! these two functions define what the calculator can represent.

/// Text shown in place of a result that is not a finite number.
pub const ERROR_MARKER: &str = "Error";

const EXPONENTIAL_UPPER: f64 = 1e15;
const EXPONENTIAL_LOWER: f64 = 1e-6;
const MAX_PLAIN_LEN: usize = 12;
/// Enough digits to hold the exact decimal expansion of any `f64`.
const EXACT_DIGITS: usize = 800;

/// Renders a number for the display.
///
/// Non-finite values become [`ERROR_MARKER`]. Very large or very small
/// magnitudes use exponential notation with six fractional digits. Other
/// values use the shortest decimal that round-trips, falling back to ten
/// significant digits when that would exceed twelve characters.
///
/// # Examples
///
/// ```
/// use tcalc::domain::{format_number, ERROR_MARKER};
///
/// assert_eq!(format_number(10.0), "10");
/// assert_eq!(format_number(0.1 + 0.2), "0.3");
/// assert_eq!(format_number(1e15), "1.000000e+15");
/// assert_eq!(format_number(f64::NAN), ERROR_MARKER);
/// ```
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return ERROR_MARKER.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if magnitude >= EXPONENTIAL_UPPER || magnitude < EXPONENTIAL_LOWER {
        return to_exponential(n, 6);
    }

    let formatted = n.to_string();
    if formatted.len() > MAX_PLAIN_LEN {
        return to_significant_digits(n, 10).to_string();
    }

    formatted
}

/// Parses display text back into a number.
///
/// Reads the longest leading `[-]digits[.digits][e[+-]digits]` prefix and
/// ignores the rest, so a partly erased exponent such as `1.5e-` still reads
/// as `1.5`. Text with no leading number, including the error marker, gives
/// NaN so that arithmetic on it propagates to another error marker.
pub fn parse_display(display: &str) -> f64 {
    let bytes = display.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(&bytes[end + 1..]);
        end += 1 + fraction_digits;
    }
    if int_digits + fraction_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_start = end + 1;
        if matches!(bytes.get(exponent_start), Some(b'-' | b'+')) {
            exponent_start += 1;
        }
        let exponent_digits = count_digits(&bytes[exponent_start..]);
        if exponent_digits > 0 {
            end = exponent_start + exponent_digits;
        }
    }

    display[..end].parse::<f64>().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// `1.234568e+15` style: fixed fractional digits, signed exponent.
fn to_exponential(n: f64, fraction_digits: usize) -> String {
    let (digits, exponent) = round_significant(n, fraction_digits + 1);
    let sign = if n < 0.0 { "-" } else { "" };
    let exponent_sign = if exponent < 0 { "-" } else { "+" };
    format!(
        "{}{}.{}e{}{}",
        sign,
        &digits[..1],
        &digits[1..],
        exponent_sign,
        exponent.abs()
    )
}

fn to_significant_digits(n: f64, digits: usize) -> f64 {
    let (kept, exponent) = round_significant(n, digits);
    let sign = if n < 0.0 { "-" } else { "" };
    let rounded = format!("{}{}.{}e{}", sign, &kept[..1], &kept[1..], exponent);
    rounded.parse::<f64>().unwrap_or(n)
}

/// Rounds `|n|` to `digits` significant digits, ties away from zero.
///
/// Returns the kept digits and the decimal exponent of the first one. The
/// decision is made on the exact binary value, so `1000000500000000` keeps
/// `1000001` rather than rounding to even.
fn round_significant(n: f64, digits: usize) -> (String, i32) {
    let exact = format!("{:.*e}", EXACT_DIGITS, n.abs());
    let (mantissa, exponent) = exact.split_once('e').unwrap_or((exact.as_str(), "0"));
    let mut exponent = exponent.parse::<i32>().unwrap_or(0);

    let all: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let mut kept = all[..digits].to_vec();

    if all.get(digits).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
            kept.pop();
            exponent += 1;
        }
    }

    (kept.into_iter().map(char::from).collect(), exponent)
}
