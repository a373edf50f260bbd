use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_unix_millis;

/// Insets separating the drawable chart area from the panel edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Width left for drawing once left/right insets are removed.
    #[must_use]
    pub fn inner_width(self, width: f64) -> f64 {
        width - self.left - self.right
    }

    /// Height left for drawing once top/bottom insets are removed.
    #[must_use]
    pub fn inner_height(self, height: f64) -> f64 {
        height - self.top - self.bottom
    }
}

/// Kind of value carried by x keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Time,
    Number,
    #[default]
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    Line,
    Area,
    Bar,
    StackedBar,
    StackedArea,
    Grouped,
}

impl ChartType {
    /// Stacked types share one y axis sized by per-key stack heights.
    #[must_use]
    pub fn is_stacked(self) -> bool {
        matches!(self, Self::StackedBar | Self::StackedArea)
    }

    /// Bar types position categorical keys on bands instead of points.
    #[must_use]
    pub fn uses_bands(self) -> bool {
        matches!(self, Self::Bar | Self::StackedBar)
    }
}

/// One value in data space: an x key, a domain bound or a title.
///
/// JSON numbers load as `Number` and JSON strings always load as
/// `Category`, so string keys keep their text. Date strings become `Time`
/// through `for_key_type(KeyType::Time)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainValue {
    Number(f64),
    #[serde(skip_deserializing)]
    Time(DateTime<Utc>),
    Category(String),
}

impl DomainValue {
    #[must_use]
    pub fn category(value: impl Into<String>) -> Self {
        Self::Category(value.into())
    }

    /// Numeric position of continuous values; times use unix milliseconds.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Time(time) => Some(datetime_to_unix_millis(*time)),
            Self::Category(_) => None,
        }
    }

    /// Reinterprets the value for an axis of `key_type`.
    ///
    /// RFC 3339 categories become times on time axes, numeric categories
    /// become numbers on number axes and times become RFC 3339 categories on
    /// string axes. Values that do not convert are returned unchanged.
    #[must_use]
    pub fn for_key_type(self, key_type: KeyType) -> Self {
        match (key_type, self) {
            (KeyType::Time, Self::Category(text)) => DateTime::parse_from_rfc3339(&text)
                .map_or(Self::Category(text), |time| Self::Time(time.with_timezone(&Utc))),
            (KeyType::Number, Self::Category(text)) => match text.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => Self::Number(value),
                _ => Self::Category(text),
            },
            (KeyType::String, Self::Time(time)) => {
                Self::Category(time.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            (_, value) => value,
        }
    }
}

impl fmt::Display for DomainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Time(time) => write!(f, "{}", time.to_rfc3339()),
            Self::Category(value) => f.write_str(value),
        }
    }
}

impl From<f64> for DomainValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<DateTime<Utc>> for DomainValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

impl From<&str> for DomainValue {
    fn from(value: &str) -> Self {
        Self::Category(value.to_owned())
    }
}

impl From<String> for DomainValue {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}

/// Token accepted in place of an explicit domain.
pub const AUTO_DOMAIN_TOKEN: &str = "auto";

/// Domain override for one axis.
///
/// Serialized as the string `"auto"` or as an array of domain values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "DomainOverrideRepr", into = "DomainOverrideRepr")]
pub enum DomainOverride {
    #[default]
    Auto,
    Extent(f64, f64),
    Values(Vec<DomainValue>),
}

impl DomainOverride {
    #[must_use]
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Explicit `[start, end]` for continuous scales, taken verbatim.
    ///
    /// Value lists use their first and last numeric entries.
    #[must_use]
    pub fn continuous_extent(&self) -> Option<(f64, f64)> {
        match self {
            Self::Auto => None,
            Self::Extent(start, end) => Some((*start, *end)),
            Self::Values(values) => {
                let mut numeric = values.iter().filter_map(DomainValue::as_f64);
                let first = numeric.next()?;
                let last = numeric.last().unwrap_or(first);
                Some((first, last))
            }
        }
    }

    /// Override with its values reinterpreted for an axis of `key_type`.
    #[must_use]
    pub fn for_key_type(&self, key_type: KeyType) -> Self {
        match self {
            Self::Values(values) => Self::Values(
                values
                    .iter()
                    .cloned()
                    .map(|value| value.for_key_type(key_type))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Explicit category list for ordinal scales.
    #[must_use]
    pub fn categories(&self) -> Option<Vec<DomainValue>> {
        match self {
            Self::Auto => None,
            Self::Extent(start, end) => {
                Some(vec![DomainValue::Number(*start), DomainValue::Number(*end)])
            }
            Self::Values(values) => Some(values.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum DomainOverrideRepr {
    Token(String),
    Values(Vec<DomainValue>),
}

impl TryFrom<DomainOverrideRepr> for DomainOverride {
    type Error = String;

    fn try_from(repr: DomainOverrideRepr) -> Result<Self, Self::Error> {
        match repr {
            DomainOverrideRepr::Token(token) if token == AUTO_DOMAIN_TOKEN => Ok(Self::Auto),
            DomainOverrideRepr::Token(token) => Err(format!(
                "unknown domain token `{token}`, expected `{AUTO_DOMAIN_TOKEN}` or an array"
            )),
            DomainOverrideRepr::Values(values) => match values.as_slice() {
                [DomainValue::Number(start), DomainValue::Number(end)] => {
                    Ok(Self::Extent(*start, *end))
                }
                _ => Ok(Self::Values(values)),
            },
        }
    }
}

impl From<DomainOverride> for DomainOverrideRepr {
    fn from(value: DomainOverride) -> Self {
        match value {
            DomainOverride::Auto => Self::Token(AUTO_DOMAIN_TOKEN.to_owned()),
            DomainOverride::Extent(start, end) => {
                Self::Values(vec![DomainValue::Number(start), DomainValue::Number(end)])
            }
            DomainOverride::Values(values) => Self::Values(values),
        }
    }
}

/// Hashable identity of a `DomainValue`, used to de-duplicate keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomainKey {
    Number(ordered_float::OrderedFloat<f64>),
    Time(i64),
    Category(String),
}

impl DomainValue {
    #[must_use]
    pub fn identity(&self) -> DomainKey {
        match self {
            Self::Number(value) => DomainKey::Number(ordered_float::OrderedFloat(*value)),
            Self::Time(time) => DomainKey::Time(time.timestamp_millis()),
            Self::Category(value) => DomainKey::Category(value.clone()),
        }
    }
}
