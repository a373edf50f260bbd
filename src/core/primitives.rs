use std::hash::Hash;

use chrono::{DateTime, Utc};
use indexmap::IndexSet;

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

#[must_use]
pub fn unix_millis_to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.round() as i64)
}

/// `[min, max]` of the finite values, or `None` when there are none.
#[must_use]
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

/// Drops repeated items, keeping the first occurrence of each.
#[must_use]
pub fn unique_in_order<T, K, F>(items: impl IntoIterator<Item = T>, key_of: F) -> Vec<T>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut seen = IndexSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key_of(item)))
        .collect()
}
