//! Public entry points: scale resolution and the tooltip/legend controller.

mod scale_config;
mod scale_resolver;
mod tooltip_config;
mod tooltip_controller;
mod tooltip_format;
mod tooltip_title;

pub use scale_config::{ColorSchemaEntry, ScaleConfig, ScaleConfigPatch};
pub use scale_resolver::{GroupBucket, ResolvedScales, ScaleResolver};
pub use tooltip_config::{DEFAULT_DATE_FORMAT, TooltipConfig, TooltipConfigPatch};
pub use tooltip_controller::{
    LEGEND_COLLAPSE_INDICATOR, LEGEND_COLLAPSED_TITLE, PanelPosition, TOOLTIP_HANDLER_NAME,
    TOOLTIP_OFFSET_PX, TooltipController, TooltipPhase, TooltipScales,
};
pub use tooltip_format::{
    MINUS_SIGN, NumberFormatRule, auto_format, format_auto, format_fixed, format_si,
};
pub use tooltip_title::{
    BinningResolution, OddBinFormatterFn, TitleFormatContext, format_date_pattern,
    format_date_title, format_title,
};
