use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::primitives::{extent, unique_in_order};
use crate::core::{
    AggregatedData, AggregatedDataPatch, BandScale, ColorScale, DomainValue, KeyRecord,
    KeyType, LEFT_AXIS_GROUP, LinearScale, OrdinalScale, RIGHT_AXIS_GROUP, Scale, TimeScale,
};

use super::{ScaleConfig, ScaleConfigPatch};

/// Values and keys of every series sharing one axis group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupBucket {
    pub all_values: Vec<f64>,
    pub all_keys: Vec<DomainValue>,
}

/// Output of one scale resolution pass.
///
/// `y_scale`/`y2_scale` are `None` when no series is assigned to that axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedScales {
    pub x_scale: Scale,
    pub y_scale: Option<Scale>,
    pub y2_scale: Option<Scale>,
    pub color_scale: ColorScale,
    pub has_second_axis: bool,
}

/// Derives x/y/y2/color scales from chart configuration and aggregated data.
///
/// Resolution reads only the last config and data set on the resolver, so
/// repeated calls with unchanged inputs return equal scales.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScaleResolver {
    config: ScaleConfig,
    data: AggregatedData,
}

impl ScaleResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_config(&mut self, patch: ScaleConfigPatch) -> &mut Self {
        self.config.merge(patch);
        self
    }

    pub fn set_data(&mut self, patch: AggregatedDataPatch) -> &mut Self {
        self.data.merge(patch);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    #[must_use]
    pub fn data(&self) -> &AggregatedData {
        &self.data
    }

    /// Resolves all scales, choosing the stacked or grouped layout from the
    /// configured chart type.
    #[must_use]
    pub fn scales(&self) -> ResolvedScales {
        if self.config.is_stacked() {
            debug!(chart_type = ?self.config.chart_type, "resolving stacked scales");
            self.stacked_scales()
        } else {
            debug!(chart_type = ?self.config.chart_type, "resolving horizontal scales");
            self.horizontal_scales()
        }
    }

    /// Builds the x scale over `keys` spanning the drawable width.
    ///
    /// Keys and override values are first reinterpreted for the configured
    /// key type, so date strings loaded from JSON land on time axes.
    #[must_use]
    pub fn build_x_scale(&self, keys: &[DomainValue]) -> Scale {
        let range = (0.0, self.config.chart_width());
        let key_type = self.config.key_type;
        let domain_override = self.config.x_domain.for_key_type(key_type);
        let keys: Vec<DomainValue> = keys
            .iter()
            .cloned()
            .map(|key| key.for_key_type(key_type))
            .collect();

        match key_type {
            KeyType::Time | KeyType::Number => {
                let domain = domain_override
                    .continuous_extent()
                    .or_else(|| extent(keys.iter().filter_map(DomainValue::as_f64)))
                    .unwrap_or((0.0, 0.0));
                if key_type == KeyType::Time {
                    Scale::Time(TimeScale::new(domain, range))
                } else {
                    Scale::Linear(LinearScale::new(domain, range))
                }
            }
            KeyType::String => {
                let domain = domain_override.categories().unwrap_or(keys);
                if self.config.chart_type.is_some_and(|chart| chart.uses_bands()) {
                    Scale::Band(BandScale::band(domain, range))
                } else {
                    Scale::Point(BandScale::point(domain, range))
                }
            }
        }
    }

    /// Builds a y scale: bottom of the drawable area maps `extent.0`.
    #[must_use]
    pub fn build_y_scale(&self, extent: (f64, f64)) -> Scale {
        let range = (self.config.chart_height(), 0.0);
        Scale::Linear(LinearScale::new(extent, range).with_rounding())
    }

    /// Builds the series color lookup.
    ///
    /// Series beyond the end of the schema resolve to the default color.
    #[must_use]
    pub fn build_color_scale(&self) -> ColorScale {
        let schema = &self.config.color_schema;
        let domain = self
            .data
            .data_by_series
            .iter()
            .enumerate()
            .map(|(position, series)| {
                schema
                    .get(position)
                    .and_then(|entry| entry.key.clone())
                    .unwrap_or_else(|| series.id.clone())
            });
        let range = schema.iter().map(|entry| entry.value.clone()).collect();

        OrdinalScale::new(domain, range).with_unknown(self.config.default_color.clone())
    }

    /// Buckets series by axis group, in first-seen group order.
    #[must_use]
    pub fn split_by_groups(&self) -> IndexMap<String, GroupBucket> {
        let mut groups: IndexMap<String, GroupBucket> = IndexMap::new();
        for series in &self.data.data_by_series {
            let bucket = groups.entry(series.group.clone()).or_default();
            bucket
                .all_values
                .extend(series.values.iter().map(|entry| entry.value));
            bucket
                .all_keys
                .extend(series.values.iter().map(|entry| entry.key.clone()));
        }
        groups
    }

    /// Scales for stacked charts: one y axis from zero to the tallest stack.
    #[must_use]
    pub fn stacked_scales(&self) -> ResolvedScales {
        let stack_heights = self.data.data_by_key.iter().map(KeyRecord::stack_height);
        let unique_keys = unique_in_order(
            self.data.flat_data_sorted.iter().map(|entry| entry.key.clone()),
            DomainValue::identity,
        );

        let x_scale = self.build_x_scale(&unique_keys);
        let color_scale = self.build_color_scale();

        let y_domain = self.config.y_domain.continuous_extent().unwrap_or_else(|| {
            let max = extent(stack_heights).map_or(0.0, |(_, max)| max);
            (0.0, max)
        });
        trace!(?y_domain, keys = unique_keys.len(), "stacked y domain");

        ResolvedScales {
            x_scale,
            y_scale: Some(self.build_y_scale(y_domain)),
            y2_scale: None,
            color_scale,
            has_second_axis: false,
        }
    }

    /// Scales for grouped/horizontal charts with optional secondary axis.
    #[must_use]
    pub fn horizontal_scales(&self) -> ResolvedScales {
        let groups = self.split_by_groups();
        let has_right_axis = groups.contains_key(RIGHT_AXIS_GROUP);

        let keys: Vec<DomainValue> = self
            .data
            .data_by_key
            .iter()
            .map(|record| record.key.clone())
            .collect();
        let x_scale = self.build_x_scale(&keys);
        let color_scale = self.build_color_scale();

        let y_scale = groups.get(LEFT_AXIS_GROUP).map(|bucket| {
            let domain = self
                .config
                .y_domain
                .continuous_extent()
                .or_else(|| extent(bucket.all_values.iter().copied()))
                .unwrap_or((0.0, 0.0));
            self.build_y_scale(domain)
        });

        let y2_scale = groups.get(RIGHT_AXIS_GROUP).map(|bucket| {
            let domain = self
                .config
                .y2_domain
                .continuous_extent()
                .or_else(|| extent(bucket.all_values.iter().copied()))
                .unwrap_or((0.0, 0.0));
            self.build_y_scale(domain)
        });
        trace!(
            groups = groups.len(),
            has_left_axis = y_scale.is_some(),
            has_right_axis,
            "horizontal axis groups"
        );

        ResolvedScales {
            x_scale,
            y_scale,
            y2_scale,
            color_scale,
            has_second_axis: has_right_axis,
        }
    }
}
