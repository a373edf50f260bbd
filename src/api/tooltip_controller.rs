use std::cell::RefCell;
use std::cmp::Reverse;
use std::rc::{Rc, Weak};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    AggregatedData, AggregatedDataPatch, ChartType, ColorScale, DomainValue, KeyRecord,
    SeriesPoint, StyleScale,
};
use crate::interaction::{PanelDispatcher, PointerChannel, PointerEvent};
use crate::render::{
    PanelDisplay, PanelHost, PanelId, PanelItemView, PanelMode, PanelView, SWATCH_LINE_STROKE_PX,
    SWATCH_SIZE_PX, Swatch,
};

use super::tooltip_title::{OddBinFormatterFn, TitleFormatContext, format_title};
use super::{TooltipConfig, TooltipConfigPatch, format_auto};

/// Gap between the pointer and the nearest panel edge.
pub const TOOLTIP_OFFSET_PX: f64 = 4.0;
/// Title shown while a legend is collapsed.
pub const LEGEND_COLLAPSED_TITLE: &str = "Legend";
pub const LEGEND_COLLAPSE_INDICATOR: &str = "\u{2197}";
/// Handler name used when binding pointer channels.
pub const TOOLTIP_HANDLER_NAME: &str = "tooltip";

/// Stored panel coordinate.
///
/// `Auto` pins the panel to the top margin vertically and right-aligns it
/// with the chart horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PanelPosition {
    Auto,
    Px(f64),
}

impl Default for PanelPosition {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

/// Visibility state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TooltipPhase {
    Uninitialized,
    Hidden,
    Shown,
}

/// Series styling injected by the chart.
///
/// In `set_scales`, a `None` field keeps the previously set scale.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipScales {
    pub color_scale: Option<ColorScale>,
    pub style_scale: Option<StyleScale>,
}

impl TooltipScales {
    #[must_use]
    pub fn with_color_scale(mut self, scale: ColorScale) -> Self {
        self.color_scale = Some(scale);
        self
    }

    #[must_use]
    pub fn with_style_scale(mut self, scale: StyleScale) -> Self {
        self.style_scale = Some(scale);
        self
    }
}

#[derive(Debug, Clone)]
struct PanelHandle {
    id: PanelId,
    view: PanelView,
}

/// Pointer-driven tooltip or persistent legend panel.
///
/// The panel visual is attached to the host lazily by `build` and lives
/// until `destroy`. Every operation that needs the visual is a no-op
/// returning `None` while it does not exist.
pub struct TooltipController<H: PanelHost> {
    host: H,
    mode: PanelMode,
    config: TooltipConfig,
    scales: TooltipScales,
    data: AggregatedData,
    odd_bin_formatter: Option<OddBinFormatterFn>,
    handle: Option<PanelHandle>,
    chart_width: f64,
    chart_height: f64,
    x_position: PanelPosition,
    y_position: PanelPosition,
    content: Vec<SeriesPoint>,
    title: Option<DomainValue>,
}

impl<H: PanelHost> TooltipController<H> {
    #[must_use]
    pub fn new(host: H, mode: PanelMode) -> Self {
        Self {
            host,
            mode,
            config: TooltipConfig::default(),
            scales: TooltipScales::default(),
            data: AggregatedData::default(),
            odd_bin_formatter: None,
            handle: None,
            chart_width: 0.0,
            chart_height: 0.0,
            x_position: PanelPosition::default(),
            y_position: PanelPosition::default(),
            content: Vec::new(),
            title: None,
        }
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    #[must_use]
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> TooltipPhase {
        match &self.handle {
            None => TooltipPhase::Uninitialized,
            Some(handle) if handle.view.display == PanelDisplay::Shown => TooltipPhase::Shown,
            Some(_) => TooltipPhase::Hidden,
        }
    }

    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| handle.view.collapsed)
    }

    /// Last view pushed to the host.
    #[must_use]
    pub fn view(&self) -> Option<&PanelView> {
        self.handle.as_ref().map(|handle| &handle.view)
    }

    #[must_use]
    pub fn content(&self) -> &[SeriesPoint] {
        &self.content
    }

    #[must_use]
    pub fn position(&self) -> (PanelPosition, PanelPosition) {
        (self.x_position, self.y_position)
    }

    pub fn set_config(&mut self, patch: TooltipConfigPatch) -> &mut Self {
        self.config.merge(patch);
        self
    }

    pub fn set_scales(&mut self, scales: TooltipScales) -> &mut Self {
        if let Some(scale) = scales.color_scale {
            self.scales.color_scale = Some(scale);
        }
        if let Some(scale) = scales.style_scale {
            self.scales.style_scale = Some(scale);
        }
        self
    }

    /// Dataset handed to the odd-bin title formatter.
    pub fn set_data(&mut self, patch: AggregatedDataPatch) -> &mut Self {
        self.data.merge(patch);
        self
    }

    pub fn set_odd_bin_formatter(&mut self, formatter: OddBinFormatterFn) -> &mut Self {
        self.odd_bin_formatter = Some(formatter);
        self
    }

    pub fn set_title(&mut self, title: impl Into<DomainValue>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_x_position(&mut self, position: PanelPosition) -> &mut Self {
        self.x_position = position;
        self
    }

    pub fn set_y_position(&mut self, position: PanelPosition) -> &mut Self {
        self.y_position = position;
        self
    }

    /// Stores content as given, without sorting.
    pub fn set_content(&mut self, content: Vec<SeriesPoint>) -> &mut Self {
        self.content = content;
        self
    }

    /// Creates the panel visual on first call and refreshes size-derived state.
    pub fn build(&mut self) -> &mut Self {
        self.chart_width = self.config.margin.inner_width(self.config.width);
        self.chart_height = self.config.margin.inner_height(self.config.height);

        if self.handle.is_none() {
            let mut view = PanelView::new(self.mode);
            if self.mode.is_legend() {
                view.title_clickable = true;
                view.collapse_indicator = Some(LEGEND_COLLAPSE_INDICATOR.to_owned());
            } else {
                view.pointer_events = false;
            }
            if !self.config.tooltip_is_enabled {
                view.display = PanelDisplay::Hidden;
            }

            match self.host.attach(&view) {
                Ok(id) => {
                    debug!(panel = id.0, class = view.class_name(), "panel attached");
                    self.handle = Some(PanelHandle { id, view });
                }
                Err(err) => {
                    warn!(error = %err, "panel host refused attach; panel stays uninitialized");
                    return self;
                }
            }
        }

        if self.mode.is_legend() {
            if let Some(handle) = self.handle.as_mut() {
                handle.view.max_height_px = Some(self.chart_height);
            }
            if self.config.tooltip_is_enabled {
                self.show();
            } else {
                self.hide();
            }
        }
        self
    }

    pub fn show(&mut self) -> Option<&mut Self> {
        if !self.config.tooltip_is_enabled {
            return None;
        }
        self.handle.as_mut()?.view.display = PanelDisplay::Shown;
        self.commit();
        Some(self)
    }

    pub fn hide(&mut self) -> Option<&mut Self> {
        self.handle.as_mut()?.view.display = PanelDisplay::Hidden;
        self.commit();
        Some(self)
    }

    /// Panel origin for a pointer at `(mouse_x, mouse_y)`.
    ///
    /// The panel is centered vertically on the pointer and placed on the
    /// pointer's left once the pointer crosses the middle of the chart.
    #[must_use]
    pub fn calculate_tooltip_position(&self, mouse_x: f64, mouse_y: f64) -> Option<(f64, f64)> {
        let handle = self.handle.as_ref()?;
        let size = self.host.measure(handle.id);

        let y = mouse_y + self.config.margin.top - size.height / 2.0;
        let offset = if mouse_x > self.chart_width / 2.0 {
            -size.width - TOOLTIP_OFFSET_PX
        } else {
            TOOLTIP_OFFSET_PX
        };
        Some((mouse_x + offset, y))
    }

    /// Applies the stored position to the panel.
    pub fn reposition(&mut self) -> Option<&mut Self> {
        let id = self.handle.as_ref()?.id;
        let margin = self.config.margin;

        let top = match self.y_position {
            PanelPosition::Auto => margin.top,
            PanelPosition::Px(y) => y,
        };
        let left = match self.x_position {
            PanelPosition::Auto => self.chart_width + margin.left - self.host.measure(id).width,
            PanelPosition::Px(x) => x + margin.left,
        };

        let legend_max_height = self.mode.is_legend().then_some(self.chart_height);
        let handle = self.handle.as_mut()?;
        handle.view.top_px = Some(top);
        handle.view.left_px = Some(left);
        if legend_max_height.is_some() {
            handle.view.max_height_px = legend_max_height;
        }
        trace!(top, left, "panel repositioned");
        self.commit();
        Some(self)
    }

    /// Orders entries by value, largest first.
    ///
    /// Equal values keep their input order; entries without a value sort last.
    #[must_use]
    pub fn sort_series(series: &[SeriesPoint]) -> Vec<SeriesPoint> {
        let mut sorted = series.to_vec();
        sorted.sort_by_key(|entry| {
            let value = entry
                .value
                .filter(|value| !value.is_nan())
                .unwrap_or(f64::NEG_INFINITY);
            Reverse(OrderedFloat(value))
        });
        sorted
    }

    pub fn setup_content(&mut self, series: &[SeriesPoint]) -> &mut Self {
        self.content = Self::sort_series(series);
        self
    }

    pub fn draw_title(&mut self) -> Option<&mut Self> {
        self.handle.as_ref()?;
        let text = if self.is_collapsed() {
            LEGEND_COLLAPSED_TITLE.to_owned()
        } else {
            self.title_text()
        };
        self.handle.as_mut()?.view.title = text;
        self.commit();
        Some(self)
    }

    pub fn draw_content(&mut self) -> Option<&mut Self> {
        self.handle.as_ref()?;
        if !self.content.is_empty() && self.scales.color_scale.is_none() {
            warn!("drawing panel content without a color scale; swatches stay blank");
        }
        let items: Vec<PanelItemView> = self
            .content
            .iter()
            .map(|entry| self.item_view(entry))
            .collect();
        self.handle.as_mut()?.view.items = items;
        self.commit();
        Some(self)
    }

    /// Switches a legend between its collapsed and expanded layouts.
    pub fn toggle_collapse(&mut self, collapsed: bool) -> Option<&mut Self> {
        if !self.mode.is_legend() {
            return None;
        }
        let handle = self.handle.as_mut()?;
        handle.view.collapsed = collapsed;
        handle.view.body_visible = !collapsed;
        debug!(collapsed, "legend collapse toggled");

        self.draw_title();
        self.reposition()
    }

    /// Click on the legend title section.
    pub fn on_title_click(&mut self) -> Option<&mut Self> {
        let collapsed = !self.is_collapsed();
        self.toggle_collapse(collapsed)
    }

    /// Full pointer-move pipeline: position, title and content for the
    /// record under the pointer, then render.
    pub fn setup_tooltip(&mut self, data_point: &KeyRecord, x: f64, y: f64) -> &mut Self {
        self.build();
        if let Some((panel_x, panel_y)) = self.calculate_tooltip_position(x, y) {
            self.set_x_position(PanelPosition::Px(panel_x));
            self.set_y_position(PanelPosition::Px(panel_y));
        }
        self.set_title(data_point.key.clone());
        self.setup_content(&data_point.series);
        self.render()
    }

    pub fn render(&mut self) -> &mut Self {
        self.build();
        self.draw_title();
        self.draw_content();
        self.reposition();
        self
    }

    /// Detaches the panel visual; the next `build` creates a fresh one.
    pub fn destroy(&mut self) -> &mut Self {
        if let Some(handle) = self.handle.take() {
            if let Err(err) = self.host.detach(handle.id) {
                warn!(error = %err, panel = handle.id.0, "panel host failed to detach");
            }
            debug!(panel = handle.id.0, "panel destroyed");
        }
        self
    }

    fn title_text(&self) -> String {
        let title = self.config.tooltip_title.as_ref().or(self.title.as_ref());
        let context = TitleFormatContext {
            resolution: self.config.binning_resolution.as_ref(),
            date_format: &self.config.date_format,
            odd_bin_formatter: self.odd_bin_formatter.as_ref(),
            data: &self.data,
        };
        format_title(title, &context)
    }

    fn item_view(&self, entry: &SeriesPoint) -> PanelItemView {
        let color = self
            .scales
            .color_scale
            .as_ref()
            .and_then(|scale| scale.get(&entry.id));

        let swatch = if self.config.chart_type == Some(ChartType::Line) {
            let style = self
                .scales
                .style_scale
                .as_ref()
                .and_then(|scale| scale.get(&entry.id))
                .unwrap_or_default();
            Swatch::Line {
                color,
                dash_array: style.dash_array(),
                stroke_width: SWATCH_LINE_STROKE_PX,
                size: SWATCH_SIZE_PX,
            }
        } else {
            Swatch::Square {
                color,
                size: SWATCH_SIZE_PX,
            }
        };

        PanelItemView {
            swatch,
            label: if self.mode.is_legend() {
                entry.label.clone()
            } else {
                None
            },
            value: entry.value.map(format_auto),
        }
    }

    fn commit(&mut self) {
        let Some(handle) = self.handle.as_ref() else {
            return;
        };
        if let Err(err) = self.host.update(handle.id, &handle.view) {
            warn!(error = %err, panel = handle.id.0, "panel host rejected update");
        }
    }
}

impl<H: PanelHost + 'static> TooltipController<H> {
    /// Subscribes a shared controller to the three pointer channels.
    ///
    /// Handlers hold weak references: events arriving after the controller
    /// is dropped, or while it is already borrowed, are skipped.
    pub fn bind_events(controller: &Rc<RefCell<Self>>, dispatcher: &mut PanelDispatcher) {
        let over = Rc::downgrade(controller);
        let movement = Rc::downgrade(controller);
        let out = Rc::downgrade(controller);

        dispatcher
            .on(
                PointerChannel::MouseOverPanel,
                TOOLTIP_HANDLER_NAME,
                Box::new(move |_| {
                    with_controller(&over, |tooltip| {
                        tooltip.show();
                    });
                }),
            )
            .on(
                PointerChannel::MouseMovePanel,
                TOOLTIP_HANDLER_NAME,
                Box::new(move |event| {
                    if let PointerEvent::Move { data_point, x, y } = event {
                        with_controller(&movement, |tooltip| {
                            tooltip.setup_tooltip(data_point, *x, *y);
                        });
                    }
                }),
            )
            .on(
                PointerChannel::MouseOutPanel,
                TOOLTIP_HANDLER_NAME,
                Box::new(move |_| {
                    with_controller(&out, |tooltip| {
                        tooltip.hide();
                    });
                }),
            );
    }
}

fn with_controller<H: PanelHost>(
    controller: &Weak<RefCell<TooltipController<H>>>,
    apply: impl FnOnce(&mut TooltipController<H>),
) {
    let Some(controller) = controller.upgrade() else {
        trace!("tooltip controller dropped; skipping pointer event");
        return;
    };
    let Ok(mut tooltip) = controller.try_borrow_mut() else {
        warn!("tooltip controller busy; skipping pointer event");
        return;
    };
    apply(&mut tooltip);
}
