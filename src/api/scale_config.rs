use serde::{Deserialize, Serialize};

use crate::core::{ChartType, DomainOverride, KeyType, Margin};
use crate::error::{ChartError, ChartResult};

/// One color schema slot.
///
/// A `key` pins the color to that series id instead of the series found at
/// the same position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSchemaEntry {
    #[serde(default)]
    pub key: Option<String>,
    pub value: String,
}

impl ColorSchemaEntry {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            key: None,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn keyed(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
        }
    }
}

/// Inputs the scale resolver derives scales from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleConfig {
    #[serde(default = "default_scale_margin")]
    pub margin: Margin,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub key_type: KeyType,
    #[serde(default)]
    pub chart_type: Option<ChartType>,
    #[serde(default)]
    pub color_schema: Vec<ColorSchemaEntry>,
    #[serde(default)]
    pub default_color: Option<String>,
    #[serde(default)]
    pub x_domain: DomainOverride,
    #[serde(default)]
    pub y_domain: DomainOverride,
    #[serde(default)]
    pub y2_domain: DomainOverride,
}

fn default_scale_margin() -> Margin {
    Margin::new(60.0, 30.0, 40.0, 70.0)
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            margin: default_scale_margin(),
            width: 0.0,
            height: 0.0,
            key_type: KeyType::default(),
            chart_type: None,
            color_schema: Vec::new(),
            default_color: None,
            x_domain: DomainOverride::Auto,
            y_domain: DomainOverride::Auto,
            y2_domain: DomainOverride::Auto,
        }
    }
}

impl ScaleConfig {
    #[must_use]
    pub fn chart_width(&self) -> f64 {
        self.margin.inner_width(self.width)
    }

    #[must_use]
    pub fn chart_height(&self) -> f64 {
        self.margin.inner_height(self.height)
    }

    #[must_use]
    pub fn is_stacked(&self) -> bool {
        self.chart_type.is_some_and(ChartType::is_stacked)
    }

    /// Applies a patch field by field.
    ///
    /// `margin` is replaced as a whole, never merged side by side.
    pub fn merge(&mut self, patch: ScaleConfigPatch) {
        let ScaleConfigPatch {
            margin,
            width,
            height,
            key_type,
            chart_type,
            color_schema,
            default_color,
            x_domain,
            y_domain,
            y2_domain,
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
        if let Some(value) = key_type {
            self.key_type = value;
        }
        if let Some(value) = chart_type {
            self.chart_type = Some(value);
        }
        if let Some(value) = color_schema {
            self.color_schema = value;
        }
        if let Some(value) = default_color {
            self.default_color = Some(value);
        }
        if let Some(value) = x_domain {
            self.x_domain = value;
        }
        if let Some(value) = y_domain {
            self.y_domain = value;
        }
        if let Some(value) = y2_domain {
            self.y2_domain = value;
        }
    }
}

/// Partial `ScaleConfig`; absent fields keep their current value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfigPatch {
    pub margin: Option<Margin>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub key_type: Option<KeyType>,
    pub chart_type: Option<ChartType>,
    pub color_schema: Option<Vec<ColorSchemaEntry>>,
    pub default_color: Option<String>,
    pub x_domain: Option<DomainOverride>,
    pub y_domain: Option<DomainOverride>,
    pub y2_domain: Option<DomainOverride>,
}

impl ScaleConfigPatch {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse scale config patch: {e}"))
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
    pub fn with_key_type(mut self, key_type: KeyType) -> Self {
        self.key_type = Some(key_type);
        self
    }

    #[must_use]
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = Some(chart_type);
        self
    }

    #[must_use]
    pub fn with_color_schema(mut self, schema: Vec<ColorSchemaEntry>) -> Self {
        self.color_schema = Some(schema);
        self
    }

    #[must_use]
    pub fn with_default_color(mut self, color: impl Into<String>) -> Self {
        self.default_color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_x_domain(mut self, domain: DomainOverride) -> Self {
        self.x_domain = Some(domain);
        self
    }

    #[must_use]
    pub fn with_y_domain(mut self, domain: DomainOverride) -> Self {
        self.y_domain = Some(domain);
        self
    }

    #[must_use]
    pub fn with_y2_domain(mut self, domain: DomainOverride) -> Self {
        self.y2_domain = Some(domain);
        self
    }
}
