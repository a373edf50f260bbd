use serde::{Deserialize, Serialize};

use crate::core::{ChartType, DomainValue, Margin};
use crate::error::{ChartError, ChartResult};

use super::BinningResolution;

pub const DEFAULT_DATE_FORMAT: &str = "%b %d, %Y";

/// Tooltip/legend panel configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    #[serde(default = "default_tooltip_margin")]
    pub margin: Margin,
    #[serde(default = "default_tooltip_width")]
    pub width: f64,
    #[serde(default = "default_tooltip_height")]
    pub height: f64,
    /// Pattern for date titles without a resolution-specific pattern.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Reserved; values are always rendered with `auto_format`.
    #[serde(default)]
    pub number_format: Option<String>,
    #[serde(default = "default_enabled")]
    pub tooltip_is_enabled: bool,
    /// Title shown instead of the key under the pointer.
    #[serde(default)]
    pub tooltip_title: Option<DomainValue>,
    #[serde(default)]
    pub binning_resolution: Option<BinningResolution>,
    #[serde(default)]
    pub chart_type: Option<ChartType>,
}

fn default_tooltip_margin() -> Margin {
    Margin::uniform(2.0)
}

fn default_tooltip_width() -> f64 {
    250.0
}

fn default_tooltip_height() -> f64 {
    45.0
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_owned()
}

fn default_enabled() -> bool {
    true
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            margin: default_tooltip_margin(),
            width: default_tooltip_width(),
            height: default_tooltip_height(),
            date_format: default_date_format(),
            number_format: None,
            tooltip_is_enabled: default_enabled(),
            tooltip_title: None,
            binning_resolution: None,
            chart_type: None,
        }
    }
}

impl TooltipConfig {
    /// Applies a patch field by field; `margin` is replaced as a whole.
    pub fn merge(&mut self, patch: TooltipConfigPatch) {
        let TooltipConfigPatch {
            margin,
            width,
            height,
            date_format,
            number_format,
            tooltip_is_enabled,
            tooltip_title,
            binning_resolution,
            chart_type,
        } = patch;

        if let Some(value) = margin {
            self.margin = value;
        }
        if let Some(value) = width {
            self.width = value;
        }
        if let Some(value) = height {
            self.height = value;
        }
        if let Some(value) = date_format {
            self.date_format = value;
        }
        if let Some(value) = number_format {
            self.number_format = Some(value);
        }
        if let Some(value) = tooltip_is_enabled {
            self.tooltip_is_enabled = value;
        }
        if let Some(value) = tooltip_title {
            self.tooltip_title = Some(value);
        }
        if let Some(value) = binning_resolution {
            self.binning_resolution = Some(value);
        }
        if let Some(value) = chart_type {
            self.chart_type = Some(value);
        }
    }
}

/// Partial `TooltipConfig`; absent fields keep their current value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfigPatch {
    pub margin: Option<Margin>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub date_format: Option<String>,
    pub number_format: Option<String>,
    pub tooltip_is_enabled: Option<bool>,
    pub tooltip_title: Option<DomainValue>,
    pub binning_resolution: Option<BinningResolution>,
    pub chart_type: Option<ChartType>,
}

impl TooltipConfigPatch {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse tooltip config patch: {e}"))
        })
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = Some(margin);
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.tooltip_is_enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<DomainValue>) -> Self {
        self.tooltip_title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_binning_resolution(mut self, resolution: BinningResolution) -> Self {
        self.binning_resolution = Some(resolution);
        self
    }

    #[must_use]
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = Some(chart_type);
        self
    }
}
