use std::fmt::{self, Write as _};
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{AggregatedData, DomainValue};

/// Time granularity used to bucket keys, identified by its short code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BinningResolution {
    Century,
    Decade,
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Other(String),
}

impl BinningResolution {
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "1c" => Self::Century,
            "10y" => Self::Decade,
            "1y" => Self::Year,
            "1q" => Self::Quarter,
            "1mo" => Self::Month,
            "1w" => Self::Week,
            "1d" => Self::Day,
            "1h" => Self::Hour,
            "1m" => Self::Minute,
            "1s" => Self::Second,
            other => Self::Other(other.to_owned()),
        }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Century => "1c",
            Self::Decade => "10y",
            Self::Year => "1y",
            Self::Quarter => "1q",
            Self::Month => "1mo",
            Self::Week => "1w",
            Self::Day => "1d",
            Self::Hour => "1h",
            Self::Minute => "1m",
            Self::Second => "1s",
            Self::Other(code) => code,
        }
    }

    /// Title pattern for this resolution.
    ///
    /// Irregular resolutions map to the empty pattern; unknown codes have no
    /// entry at all.
    #[must_use]
    pub fn title_pattern(&self) -> Option<&'static str> {
        match self {
            Self::Century | Self::Decade | Self::Quarter => Some(""),
            Self::Year => Some("%Y"),
            Self::Month => Some("%B"),
            Self::Week => Some("%U"),
            Self::Day => Some("%A"),
            Self::Hour => Some("%H"),
            Self::Minute => Some("%M"),
            Self::Second => Some("%S"),
            Self::Other(_) => None,
        }
    }

    /// Century, decade and quarter bins need range-style titles.
    #[must_use]
    pub fn is_irregular(&self) -> bool {
        matches!(self, Self::Century | Self::Decade | Self::Quarter)
    }
}

impl From<String> for BinningResolution {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<BinningResolution> for String {
    fn from(resolution: BinningResolution) -> Self {
        resolution.code().to_owned()
    }
}

impl fmt::Display for BinningResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Formatter for century/decade/quarter titles, supplied by the host.
pub type OddBinFormatterFn =
    Arc<dyn Fn(&BinningResolution, DateTime<Utc>, &AggregatedData) -> String + Send + Sync>;

/// Inputs used to turn a title value into display text.
pub struct TitleFormatContext<'a> {
    pub resolution: Option<&'a BinningResolution>,
    pub date_format: &'a str,
    pub odd_bin_formatter: Option<&'a OddBinFormatterFn>,
    pub data: &'a AggregatedData,
}

/// Formats `date` with a strftime pattern; `None` if the pattern is invalid.
#[must_use]
pub fn format_date_pattern(date: DateTime<Utc>, pattern: &str) -> Option<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }
    let mut out = String::new();
    write!(out, "{}", date.format_with_items(items.into_iter())).ok()?;
    Some(out)
}

/// Display text for a date title at the configured resolution.
#[must_use]
pub fn format_date_title(date: DateTime<Utc>, context: &TitleFormatContext<'_>) -> String {
    let pattern = context
        .resolution
        .and_then(BinningResolution::title_pattern)
        .filter(|pattern| !pattern.is_empty());

    if let Some(pattern) = pattern {
        if let Some(text) = format_date_pattern(date, pattern) {
            return text;
        }
    } else if let Some(resolution) = context.resolution.filter(|r| r.is_irregular()) {
        match context.odd_bin_formatter {
            Some(formatter) => return formatter(resolution, date, context.data),
            None => debug!(
                resolution = %resolution,
                "no odd-bin formatter installed; using general date format"
            ),
        }
    }

    format_date_pattern(date, context.date_format).unwrap_or_else(|| {
        warn!(
            pattern = context.date_format,
            "invalid date format pattern; falling back to RFC 3339"
        );
        date.to_rfc3339()
    })
}

/// Display text for any title value; non-dates render verbatim.
#[must_use]
pub fn format_title(title: Option<&DomainValue>, context: &TitleFormatContext<'_>) -> String {
    match title {
        None => String::new(),
        Some(DomainValue::Time(date)) => format_date_title(*date, context),
        Some(DomainValue::Number(value)) => value.to_string(),
        Some(DomainValue::Category(text)) => text.clone(),
    }
}
