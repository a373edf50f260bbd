use indexmap::IndexMap;

use crate::error::{ChartError, ChartResult};
use crate::render::{PanelDisplay, PanelHost, PanelId, PanelSize, PanelView};

/// In-memory panel host used by tests and headless usage.
///
/// Keeps the last view pushed for each attached panel and reports a fixed
/// size for shown panels; hidden panels measure as zero.
#[derive(Debug, Default)]
pub struct NullPanelHost {
    panels: IndexMap<PanelId, PanelView>,
    next_id: u64,
    panel_size: PanelSize,
    pub attach_count: usize,
    pub update_count: usize,
}

impl NullPanelHost {
    #[must_use]
    pub fn with_panel_size(width: f64, height: f64) -> Self {
        Self {
            panel_size: PanelSize::new(width, height),
            ..Self::default()
        }
    }

    /// The most recently attached panel still present.
    #[must_use]
    pub fn last_panel(&self) -> Option<&PanelView> {
        self.panels.values().last()
    }

    #[must_use]
    pub fn attached_len(&self) -> usize {
        self.panels.len()
    }
}

impl PanelHost for NullPanelHost {
    fn attach(&mut self, view: &PanelView) -> ChartResult<PanelId> {
        let id = PanelId(self.next_id);
        self.next_id += 1;
        self.attach_count += 1;
        self.panels.insert(id, view.clone());
        Ok(id)
    }

    fn update(&mut self, id: PanelId, view: &PanelView) -> ChartResult<()> {
        let slot = self
            .panels
            .get_mut(&id)
            .ok_or_else(|| ChartError::PanelHost(format!("panel {} is not attached", id.0)))?;
        *slot = view.clone();
        self.update_count += 1;
        Ok(())
    }

    fn measure(&self, id: PanelId) -> PanelSize {
        match self.panels.get(&id) {
            Some(view) if view.display == PanelDisplay::Shown => self.panel_size,
            _ => PanelSize::default(),
        }
    }

    fn detach(&mut self, id: PanelId) -> ChartResult<()> {
        self.panels
            .shift_remove(&id)
            .map(|_| ())
            .ok_or_else(|| ChartError::PanelHost(format!("panel {} is not attached", id.0)))
    }
}
