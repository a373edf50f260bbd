use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Behavior of the overlay panel.
///
/// Legends are persistent and collapsible; tooltips follow the pointer and
/// never intercept pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelMode {
    Tooltip,
    Legend,
}

impl PanelMode {
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Tooltip => "tooltip-group",
            Self::Legend => "legend-group",
        }
    }

    #[must_use]
    pub fn is_legend(self) -> bool {
        self == Self::Legend
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelDisplay {
    Shown,
    Hidden,
}

/// Rendered size of a panel as measured by its host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelSize {
    pub width: f64,
    pub height: f64,
}

impl PanelSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Host-assigned identity of an attached panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PanelId(pub u64);

pub const SWATCH_SIZE_PX: f64 = 12.0;
pub const SWATCH_LINE_STROKE_PX: f64 = 2.5;

/// Series marker drawn in front of each entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Swatch {
    /// Horizontal segment across the swatch box, used for line charts.
    Line {
        color: Option<String>,
        dash_array: SmallVec<[f64; 4]>,
        stroke_width: f64,
        size: f64,
    },
    /// Filled square.
    Square { color: Option<String>, size: f64 },
}

impl Swatch {
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        match self {
            Self::Line { color, .. } | Self::Square { color, .. } => color.as_deref(),
        }
    }
}

/// One row of the panel body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelItemView {
    pub swatch: Swatch,
    pub label: Option<String>,
    pub value: Option<String>,
}

/// Retained description of the overlay panel pushed to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelView {
    pub mode: PanelMode,
    pub display: PanelDisplay,
    /// `false` lets pointer events pass through to the chart below.
    pub pointer_events: bool,
    pub title_clickable: bool,
    pub collapse_indicator: Option<String>,
    pub collapsed: bool,
    pub title: String,
    pub body_visible: bool,
    pub items: Vec<PanelItemView>,
    pub top_px: Option<f64>,
    pub left_px: Option<f64>,
    pub max_height_px: Option<f64>,
}

impl PanelView {
    #[must_use]
    pub fn new(mode: PanelMode) -> Self {
        Self {
            mode,
            display: PanelDisplay::Shown,
            pointer_events: true,
            title_clickable: false,
            collapse_indicator: None,
            collapsed: false,
            title: String::new(),
            body_visible: true,
            items: Vec::new(),
            top_px: None,
            left_px: None,
            max_height_px: None,
        }
    }

    #[must_use]
    pub fn class_name(&self) -> &'static str {
        self.mode.class_name()
    }
}
