use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::primitives::unix_millis_to_datetime;
use crate::core::{DomainKey, DomainValue};

/// Continuous `f64 -> pixel` mapping.
///
/// A zero-width domain maps every value to the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    round: bool,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
            round: false,
        }
    }

    /// Rounds mapped output to whole pixels.
    #[must_use]
    pub fn with_rounding(mut self) -> Self {
        self.round = true;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 || !span.is_finite() {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        let pixel = self.range_start + normalized * (self.range_end - self.range_start);
        if self.round { pixel.round() } else { pixel }
    }
}

/// Continuous scale over timestamps, stored as unix milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    #[must_use]
    pub fn new(domain_millis: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new(domain_millis, range),
        }
    }

    #[must_use]
    pub fn domain_millis(self) -> (f64, f64) {
        self.inner.domain()
    }

    /// Domain bounds as dates; `None` when a bound is outside chrono's range.
    #[must_use]
    pub fn domain_dates(self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let (start, end) = self.inner.domain();
        Some((unix_millis_to_datetime(start)?, unix_millis_to_datetime(end)?))
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.inner.range()
    }

    #[must_use]
    pub fn map_millis(self, millis: f64) -> f64 {
        self.inner.map(millis)
    }
}

/// Discrete scale placing each category on an evenly spaced band or point.
///
/// Repeated categories keep the slot of their first occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<DomainValue>,
    index: IndexMap<DomainKey, usize>,
    range: (f64, f64),
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Band layout without padding: slots tile the whole range.
    #[must_use]
    pub fn band(domain: Vec<DomainValue>, range: (f64, f64)) -> Self {
        Self::with_inner_padding(domain, range, 0.0)
    }

    /// Point layout without padding: first and last keys sit on the range ends.
    #[must_use]
    pub fn point(domain: Vec<DomainValue>, range: (f64, f64)) -> Self {
        Self::with_inner_padding(domain, range, 1.0)
    }

    fn with_inner_padding(domain: Vec<DomainValue>, range: (f64, f64), padding_inner: f64) -> Self {
        let mut index = IndexMap::new();
        let mut unique = Vec::with_capacity(domain.len());
        for value in domain {
            let key = value.identity();
            if !index.contains_key(&key) {
                index.insert(key, unique.len());
                unique.push(value);
            }
        }

        let count = unique.len() as f64;
        let (range_start, range_end) = range;
        let step = (range_end - range_start) / (count - padding_inner).max(1.0);
        let start = range_start + (range_end - range_start - step * (count - padding_inner)) * 0.5;

        Self {
            domain: unique,
            index,
            range,
            start,
            step,
            bandwidth: step * (1.0 - padding_inner),
        }
    }

    #[must_use]
    pub fn domain(&self) -> &[DomainValue] {
        &self.domain
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Pixel start of the slot for `value`, `None` for unknown categories.
    #[must_use]
    pub fn map(&self, value: &DomainValue) -> Option<f64> {
        let slot = *self.index.get(&value.identity())?;
        Some(self.start + self.step * slot as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleKind {
    Linear,
    Time,
    Band,
    Point,
}

/// Domain of a resolved scale.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleDomain {
    Continuous(f64, f64),
    Time(DateTime<Utc>, DateTime<Utc>),
    Categories(Vec<DomainValue>),
}

/// Data-to-pixel mapping produced by the scale resolver.
#[derive(Debug, Clone, PartialEq)]
pub enum Scale {
    Linear(LinearScale),
    Time(TimeScale),
    Band(BandScale),
    Point(BandScale),
}

impl Scale {
    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Linear(_) => ScaleKind::Linear,
            Self::Time(_) => ScaleKind::Time,
            Self::Band(_) => ScaleKind::Band,
            Self::Point(_) => ScaleKind::Point,
        }
    }

    #[must_use]
    pub fn domain(&self) -> ScaleDomain {
        match self {
            Self::Linear(scale) => {
                let (start, end) = scale.domain();
                ScaleDomain::Continuous(start, end)
            }
            Self::Time(scale) => match scale.domain_dates() {
                Some((start, end)) => ScaleDomain::Time(start, end),
                None => {
                    let (start, end) = scale.domain_millis();
                    ScaleDomain::Continuous(start, end)
                }
            },
            Self::Band(scale) | Self::Point(scale) => {
                ScaleDomain::Categories(scale.domain().to_vec())
            }
        }
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(scale) => scale.range(),
            Self::Time(scale) => scale.range(),
            Self::Band(scale) | Self::Point(scale) => scale.range(),
        }
    }

    /// Width of one category slot; zero for continuous and point scales.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        match self {
            Self::Band(scale) | Self::Point(scale) => scale.bandwidth(),
            Self::Linear(_) | Self::Time(_) => 0.0,
        }
    }

    /// Maps a domain value to pixels.
    ///
    /// Returns `None` for values the scale cannot place: categories on a
    /// continuous scale, unknown categories, or non-finite numbers.
    #[must_use]
    pub fn map(&self, value: &DomainValue) -> Option<f64> {
        let pixel = match self {
            Self::Linear(scale) => scale.map(value.as_f64()?),
            Self::Time(scale) => scale.map_millis(value.as_f64()?),
            Self::Band(scale) | Self::Point(scale) => scale.map(value)?,
        };
        pixel.is_finite().then_some(pixel)
    }
}
