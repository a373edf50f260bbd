use serde::{Deserialize, Serialize};

use crate::core::{DomainValue, KeyType};
use crate::error::{ChartError, ChartResult};

/// Group id assigning a series to the left (primary) y axis.
pub const LEFT_AXIS_GROUP: &str = "0";
/// Group id assigning a series to the right (secondary) y axis.
pub const RIGHT_AXIS_GROUP: &str = "1";

/// One `(key, value)` pair of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: DomainValue,
    pub value: f64,
}

impl KeyValue {
    #[must_use]
    pub fn new(key: impl Into<DomainValue>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Value of one series at a given x key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub id: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub label: Option<String>,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            value: Some(value),
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Entry without a value, as used by legends listing series only.
    #[must_use]
    pub fn without_value(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: None,
            label: None,
        }
    }
}

/// All series values recorded at one x key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub key: DomainValue,
    #[serde(default)]
    pub series: Vec<SeriesPoint>,
}

impl KeyRecord {
    #[must_use]
    pub fn new(key: impl Into<DomainValue>, series: Vec<SeriesPoint>) -> Self {
        Self {
            key: key.into(),
            series,
        }
    }

    /// Sum of the series values at this key.
    #[must_use]
    pub fn stack_height(&self) -> f64 {
        self.series.iter().filter_map(|point| point.value).sum()
    }
}

/// One series with its axis group and all of its values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_group")]
    pub group: String,
    #[serde(default)]
    pub values: Vec<KeyValue>,
}

fn default_group() -> String {
    LEFT_AXIS_GROUP.to_owned()
}

impl SeriesRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, values: Vec<KeyValue>) -> Self {
        Self {
            id: id.into(),
            label: None,
            group: default_group(),
            values,
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Dataset views shared by the scale resolver and the tooltip controller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregatedData {
    #[serde(default)]
    pub data_by_key: Vec<KeyRecord>,
    #[serde(default)]
    pub data_by_series: Vec<SeriesRecord>,
    #[serde(default)]
    pub flat_data_sorted: Vec<KeyValue>,
    #[serde(default)]
    pub group_keys: Vec<String>,
}

impl AggregatedData {
    /// Applies a patch, replacing every field the patch carries.
    pub fn merge(&mut self, patch: AggregatedDataPatch) {
        let AggregatedDataPatch {
            data_by_key,
            data_by_series,
            flat_data_sorted,
            group_keys,
        } = patch;

        if let Some(value) = data_by_key {
            self.data_by_key = value;
        }
        if let Some(value) = data_by_series {
            self.data_by_series = value;
        }
        if let Some(value) = flat_data_sorted {
            self.flat_data_sorted = value;
        }
        if let Some(value) = group_keys {
            self.group_keys = value;
        }
    }
}

/// Partial dataset update; absent fields keep their previous value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatedDataPatch {
    pub data_by_key: Option<Vec<KeyRecord>>,
    pub data_by_series: Option<Vec<SeriesRecord>>,
    pub flat_data_sorted: Option<Vec<KeyValue>>,
    pub group_keys: Option<Vec<String>>,
}

impl AggregatedDataPatch {
    #[must_use]
    pub fn with_data_by_key(mut self, records: Vec<KeyRecord>) -> Self {
        self.data_by_key = Some(records);
        self
    }

    #[must_use]
    pub fn with_data_by_series(mut self, records: Vec<SeriesRecord>) -> Self {
        self.data_by_series = Some(records);
        self
    }

    #[must_use]
    pub fn with_flat_data_sorted(mut self, entries: Vec<KeyValue>) -> Self {
        self.flat_data_sorted = Some(entries);
        self
    }

    #[must_use]
    pub fn with_group_keys(mut self, keys: Vec<String>) -> Self {
        self.group_keys = Some(keys);
        self
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse data patch: {e}")))
    }

    /// Parses a patch and reinterprets every key for `key_type`.
    pub fn from_json_str_for(input: &str, key_type: KeyType) -> ChartResult<Self> {
        Self::from_json_str(input).map(|patch| patch.for_key_type(key_type))
    }

    /// Reinterprets every key carried by the patch for `key_type`.
    #[must_use]
    pub fn for_key_type(self, key_type: KeyType) -> Self {
        let convert = |entry: KeyValue| KeyValue {
            key: entry.key.for_key_type(key_type),
            value: entry.value,
        };
        Self {
            data_by_key: self.data_by_key.map(|records| {
                records
                    .into_iter()
                    .map(|record| KeyRecord {
                        key: record.key.for_key_type(key_type),
                        series: record.series,
                    })
                    .collect()
            }),
            data_by_series: self.data_by_series.map(|records| {
                records
                    .into_iter()
                    .map(|record| SeriesRecord {
                        values: record.values.into_iter().map(&convert).collect(),
                        ..record
                    })
                    .collect()
            }),
            flat_data_sorted: self
                .flat_data_sorted
                .map(|entries| entries.into_iter().map(&convert).collect()),
            group_keys: self.group_keys,
        }
    }
}

impl From<AggregatedData> for AggregatedDataPatch {
    fn from(data: AggregatedData) -> Self {
        Self {
            data_by_key: Some(data.data_by_key),
            data_by_series: Some(data.data_by_series),
            flat_data_sorted: Some(data.flat_data_sorted),
            group_keys: Some(data.group_keys),
        }
    }
}
