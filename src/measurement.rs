//! Field measurement text in inches: parsing, fraction display and the
//! `>` display contract for readings past the measuring range.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default display resolution: nearest 1/16".
pub const DEFAULT_DENOMINATOR: u32 = 16;

const UNIT_SUFFIXES: [&str; 6] = ["inches", "inch", "in", "\"", "″", "''"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeasurementError {
    #[error("'{0}' is not a measurement in inches")]
    Unparseable(String),

    #[error("'{0}' divides by zero")]
    ZeroDenominator(String),
}

/// A slippage value, or the flag that it ran past the gauge.
///
/// `ExceedsThreshold` carries the threshold, not a measured value. Use
/// [`Measurement::effective_value`] for arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value_in", rename_all = "snake_case")]
pub enum Measurement {
    Known(f64),
    ExceedsThreshold(f64),
}

impl Measurement {
    /// Field-entry semantics: the flag wins, blank or unparseable text counts as 0.
    pub fn from_entry(raw_text: &str, exceeds: bool, threshold_in: f64) -> Self {
        if exceeds {
            Self::ExceedsThreshold(threshold_in)
        } else {
            Self::Known(parse(raw_text).unwrap_or(0.0))
        }
    }

    pub fn effective_value(&self) -> f64 {
        match *self {
            Self::Known(v) | Self::ExceedsThreshold(v) => v,
        }
    }

    pub fn exceeds(&self) -> bool {
        matches!(self, Self::ExceedsThreshold(_))
    }

    pub fn display(&self) -> String {
        format_value(self.effective_value(), self.exceeds())
    }
}

/// How a raw text field reads to a validation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Blank,
    Valid,
    Invalid,
}

pub fn classify(text: &str) -> EntryStatus {
    match parse_strict(text) {
        Ok(None) => EntryStatus::Blank,
        Ok(Some(_)) => EntryStatus::Valid,
        Err(_) => EntryStatus::Invalid,
    }
}

/// Lenient parse. `None` means nothing usable was entered.
pub fn parse(text: &str) -> Option<f64> {
    parse_strict(text).ok().flatten()
}

/// Parses decimals (`0.5`, `.5`), fractions (`3/8`) and mixed numbers
/// (`1 1/2`, `1-1/2`, `1 1 / 2`) with an optional sign and inch mark.
///
/// Blank input is `Ok(None)`, distinct from an explicit `0`.
pub fn parse_strict(text: &str) -> Result<Option<f64>, MeasurementError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let unparseable = || MeasurementError::Unparseable(trimmed.to_string());

    let body = strip_unit(trimmed);
    let (negative, body) = match body.as_bytes().first() {
        Some(b'-') => (true, body[1..].trim_start()),
        Some(b'+') => (false, body[1..].trim_start()),
        _ => (false, body),
    };
    if body.is_empty() {
        return Err(unparseable());
    }

    let magnitude = if body.contains('/') {
        // `1 / 2` reads the same as `1/2`.
        let body = body.split('/').map(str::trim).collect::<Vec<_>>().join("/");
        let (whole, fraction) = match body.split_once(|c: char| c.is_whitespace() || c == '-') {
            Some((w, f)) => (Some(w.trim()), f.trim()),
            None => (None, body.as_str()),
        };

        let (num, den) = fraction.split_once('/').ok_or_else(unparseable)?;
        let num = parse_decimal(num.trim()).ok_or_else(unparseable)?;
        let den = parse_decimal(den.trim()).ok_or_else(unparseable)?;
        if den == 0.0 {
            return Err(MeasurementError::ZeroDenominator(trimmed.to_string()));
        }

        let whole = match whole {
            Some(w) => parse_decimal(w).ok_or_else(unparseable)?,
            None => 0.0,
        };
        whole + num / den
    } else {
        parse_decimal(body).ok_or_else(unparseable)?
    };

    Ok(Some(if negative { -magnitude } else { magnitude }))
}

fn strip_unit(text: &str) -> &str {
    let lower = text.to_ascii_lowercase();
    for suffix in UNIT_SUFFIXES {
        if lower.ends_with(suffix) {
            return text[..text.len() - suffix.len()].trim_end();
        }
    }
    text
}

/// Plain unsigned decimal: digits with at most one point. No exponents.
fn parse_decimal(s: &str) -> Option<f64> {
    let mut digits = 0;
    let mut points = 0;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return None,
        }
    }
    if digits == 0 || points > 1 {
        return None;
    }

    let padded = match (s.starts_with('.'), s.ends_with('.')) {
        (true, _) => format!("0{}", s),
        (_, true) => format!("{}0", s),
        _ => s.to_string(),
    };
    padded.parse().ok()
}

/// Nearest 1/16" as text, e.g. `1 1/2`, `3/16`, `2`.
pub fn to_fraction(value: f64) -> String {
    to_fraction_with(value, DEFAULT_DENOMINATOR)
}

pub fn to_fraction_with(value: f64, denominator: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let den = i64::from(denominator.max(1));
    let units = (value.abs() * den as f64).round() as i64;
    let whole = units / den;
    let rem = units % den;
    let sign = if value < 0.0 && units != 0 { "-" } else { "" };

    if rem == 0 {
        return format!("{}{}", sign, whole);
    }

    let g = gcd(rem, den);
    let (n, d) = (rem / g, den / g);
    if whole == 0 {
        format!("{}{}/{}", sign, n, d)
    } else {
        format!("{}{} {}/{}", sign, whole, n, d)
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// `1.500"`, or `>1.500"` when the value includes a past-range reading.
pub fn format_value(value: f64, exceeds: bool) -> String {
    format!("{}{:.3}\"", if exceeds { ">" } else { "" }, value)
}

/// `>1.500" (≈1 1/2")`
pub fn format_with_fraction(value: f64, exceeds: bool, denominator: u32) -> String {
    format!(
        "{} (≈{}\")",
        format_value(value, exceeds),
        to_fraction_with(value, denominator)
    )
}
