//! Number formatting for observation strings.
//!
//! Reals are printed like C's `%g` with six significant digits, so strings
//! stay stable for consumers that parse them.

const SIGNIFICANT_DIGITS: usize = 6;

/// Format a real with six significant digits, `%g` style.
///
/// ```
/// use bertrand_oligopoly::observer::format_real;
///
/// assert_eq!(format_real(0.5), "0.5");
/// assert_eq!(format_real(1.472920001), "1.47292");
/// assert_eq!(format_real(0.00000025), "2.5e-07");
/// assert_eq!(format_real(-3.0), "-3");
/// ```
#[must_use]
pub fn format_real(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // The exponent after rounding to six digits decides the notation.
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
