use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Minus sign used for negative numbers (U+2212).
pub const MINUS_SIGN: &str = "\u{2212}";

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "\u{b5}", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Display rule applied to a tooltip value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormatRule {
    /// Fixed number of decimal places.
    Fixed { decimals: u32 },
    /// SI-prefixed value (`4.5k`, `1.2M`) with this many significant digits.
    SiPrefix { significant_digits: u32 },
}

impl NumberFormatRule {
    #[must_use]
    pub fn apply(self, value: f64) -> String {
        match self {
            Self::Fixed { decimals } => format_fixed(value, decimals),
            Self::SiPrefix { significant_digits } => format_si(value, significant_digits),
        }
    }
}

/// Picks the display rule for a value from its magnitude.
///
/// Values below 1 share the one-decimal rule of values below 100, and
/// everything from 1000 up uses two significant digits with an SI prefix.
#[must_use]
pub fn auto_format(value: f64) -> NumberFormatRule {
    if value < 100.0 {
        NumberFormatRule::Fixed { decimals: 1 }
    } else if value < 1000.0 {
        NumberFormatRule::Fixed { decimals: 0 }
    } else {
        NumberFormatRule::SiPrefix {
            significant_digits: 2,
        }
    }
}

/// Formats a value with the rule `auto_format` selects for it.
#[must_use]
pub fn format_auto(value: f64) -> String {
    auto_format(value).apply(value)
}

fn non_finite(value: f64) -> Option<String> {
    if value.is_nan() {
        Some("NaN".to_owned())
    } else if value.is_infinite() {
        let sign = if value < 0.0 { MINUS_SIGN } else { "" };
        Some(format!("{sign}Infinity"))
    } else {
        None
    }
}

fn signed(negative: bool, rounds_to_zero: bool, body: String) -> String {
    if negative && !rounds_to_zero {
        format!("{MINUS_SIGN}{body}")
    } else {
        body
    }
}

/// Fixed-point formatting; ties round away from zero.
#[must_use]
pub fn format_fixed(value: f64, decimals: u32) -> String {
    if let Some(text) = non_finite(value) {
        return text;
    }

    let Some(magnitude) = Decimal::from_f64_retain(value.abs()) else {
        // beyond Decimal's range; no fractional digits left to round
        let body = format!("{:.*}", decimals as usize, value.abs());
        return signed(value < 0.0, false, body);
    };
    let mut rounded =
        magnitude.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);
    signed(value < 0.0, rounded.is_zero(), rounded.to_string())
}

/// SI-prefix formatting with `significant_digits` significant digits.
#[must_use]
pub fn format_si(value: f64, significant_digits: u32) -> String {
    if let Some(text) = non_finite(value) {
        return text;
    }
    let digits = significant_digits.max(1);
    if value == 0.0 {
        return format_fixed(0.0, digits - 1);
    }

    let rounded = Decimal::from_f64_retain(value.abs())
        .and_then(|magnitude| {
            magnitude.round_sf_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero)
        })
        .filter(|rounded| !rounded.is_zero());
    let Some(rounded) = rounded else {
        return format_si_f64(value, digits);
    };

    let normalized = rounded.normalize();
    let exponent = decimal_exponent(&normalized);
    let (prefix_index, prefix_exponent) = si_prefix_for(exponent);

    let Some(mut scaled) = shift_decimal_point(normalized, prefix_exponent) else {
        return format_si_f64(value, digits);
    };
    let decimals = si_decimals(digits, exponent, prefix_exponent);
    scaled = scaled.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    scaled.rescale(decimals);

    let prefix = SI_PREFIXES[prefix_index];
    signed(value < 0.0, scaled.is_zero(), format!("{scaled}{prefix}"))
}

/// SI formatting for magnitudes `Decimal` cannot hold (about 1e-28 and below,
/// 7.9e28 and above).
fn format_si_f64(value: f64, digits: u32) -> String {
    let magnitude = value.abs();
    let leading = magnitude.log10().floor() as i32;
    let unit = 10f64.powi(leading - digits as i32 + 1);
    let rounded = (magnitude / unit).round() * unit;
    let exponent = rounded.log10().floor() as i32;

    let (prefix_index, prefix_exponent) = si_prefix_for(exponent);
    let decimals = si_decimals(digits, exponent, prefix_exponent) as usize;
    let scaled = rounded / 10f64.powi(prefix_exponent);

    let prefix = SI_PREFIXES[prefix_index];
    signed(value < 0.0, false, format!("{scaled:.decimals$}{prefix}"))
}

/// Index into `SI_PREFIXES` and the power of ten that prefix stands for.
fn si_prefix_for(exponent: i32) -> (usize, i32) {
    let step = exponent.div_euclid(3).clamp(-8, 8);
    ((step + 8) as usize, step * 3)
}

fn si_decimals(digits: u32, exponent: i32, prefix_exponent: i32) -> u32 {
    (digits as i32 - 1 - (exponent - prefix_exponent)).max(0) as u32
}

/// Base-10 exponent of the leading digit of a non-zero decimal.
fn decimal_exponent(value: &Decimal) -> i32 {
    let mantissa = value.mantissa().unsigned_abs();
    let digit_count = mantissa.checked_ilog10().map_or(1, |log| log as i32 + 1);
    digit_count - 1 - value.scale() as i32
}

/// Divides by `10^exponent` without leaving decimal arithmetic.
fn shift_decimal_point(value: Decimal, exponent: i32) -> Option<Decimal> {
    if exponent >= 0 {
        let scale = value.scale().checked_add(exponent.unsigned_abs())?;
        if scale > 28 {
            return value
                .to_f64()
                .and_then(|v| Decimal::from_f64(v / 10f64.powi(exponent)));
        }
        Some(Decimal::from_i128_with_scale(value.mantissa(), scale))
    } else {
        let factor = 10i128.checked_pow(exponent.unsigned_abs())?;
        value.checked_mul(Decimal::from_i128_with_scale(factor, 0))
    }
}
