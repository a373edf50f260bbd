mod null_host;
mod panel;

pub use null_host::NullPanelHost;
pub use panel::{
    PanelDisplay, PanelId, PanelItemView, PanelMode, PanelSize, PanelView, SWATCH_LINE_STROKE_PX,
    SWATCH_SIZE_PX, Swatch,
};

use crate::error::ChartResult;

/// Rendering target an overlay panel is attached to.
///
/// Hosts receive a fully materialized `PanelView` on every change so markup
/// or drawing code stays isolated from tooltip state and positioning logic.
pub trait PanelHost {
    /// Creates the visual for a new panel and returns its id.
    fn attach(&mut self, view: &PanelView) -> ChartResult<PanelId>;

    /// Replaces the visual of an attached panel.
    fn update(&mut self, id: PanelId, view: &PanelView) -> ChartResult<()>;

    /// Current rendered size; zero when the panel is not displayed.
    fn measure(&self, id: PanelId) -> PanelSize;

    fn detach(&mut self, id: PanelId) -> ChartResult<()>;
}
