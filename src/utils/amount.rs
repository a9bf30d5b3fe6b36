use clap::ValueEnum;
use std::fmt;

/// How amount text from a form is turned into a number
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountParsing {
    /// Take the longest numeric prefix, NaN when there is none
    #[default]
    Lenient,
    /// Reject anything that is not a complete finite number
    Strict,
}

/// Amount text rejected under strict parsing
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidAmount(pub String);

impl fmt::Display for InvalidAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid amount: {:?}", self.0)
    }
}

impl std::error::Error for InvalidAmount {}

pub fn parse_amount(input: &str, mode: AmountParsing) -> Result<f64, InvalidAmount> {
    match mode {
        AmountParsing::Lenient => Ok(parse_number_prefix(input)),
        AmountParsing::Strict => {
            let trimmed = input.trim();
            match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(InvalidAmount(input.to_string())),
            }
        }
    }
}

/// Browser `parseFloat` semantics: skip leading whitespace, read the longest
/// decimal prefix, accept a signed `Infinity`, otherwise NaN.
pub fn parse_number_prefix(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if frac_end > frac_start || mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    s[..end]
        .trim_end_matches('.')
        .parse::<f64>()
        .unwrap_or(f64::NAN)
}

/// Render a number the way a browser prints it in a table cell
pub fn format_amount(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}
