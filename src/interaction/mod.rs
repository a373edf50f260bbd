use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::KeyRecord;

/// Named pointer channels a chart panel publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerChannel {
    MouseOverPanel,
    MouseMovePanel,
    MouseOutPanel,
}

impl PointerChannel {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::MouseOverPanel => "mouseOverPanel",
            Self::MouseMovePanel => "mouseMovePanel",
            Self::MouseOutPanel => "mouseOutPanel",
        }
    }
}

/// Pointer event delivered to subscribed handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Over,
    /// Pointer moved over the panel; `data_point` is the record under it.
    Move {
        data_point: KeyRecord,
        x: f64,
        y: f64,
    },
    Out,
}

impl PointerEvent {
    #[must_use]
    pub fn channel(&self) -> PointerChannel {
        match self {
            Self::Over => PointerChannel::MouseOverPanel,
            Self::Move { .. } => PointerChannel::MouseMovePanel,
            Self::Out => PointerChannel::MouseOutPanel,
        }
    }
}

pub type PointerHandler = Box<dyn FnMut(&PointerEvent) + 'static>;

/// Host-owned dispatcher with named handlers per channel.
///
/// Registering a handler under an existing `(channel, name)` pair replaces
/// the previous one. Handlers run synchronously in registration order.
#[derive(Default)]
pub struct PanelDispatcher {
    handlers: IndexMap<(PointerChannel, String), PointerHandler>,
}

impl PanelDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(
        &mut self,
        channel: PointerChannel,
        name: impl Into<String>,
        handler: PointerHandler,
    ) -> &mut Self {
        self.handlers.insert((channel, name.into()), handler);
        self
    }

    /// Removes a handler; returns whether one was registered.
    pub fn off(&mut self, channel: PointerChannel, name: &str) -> bool {
        self.handlers
            .shift_remove(&(channel, name.to_owned()))
            .is_some()
    }

    #[must_use]
    pub fn handler_count(&self, channel: PointerChannel) -> usize {
        self.handlers
            .keys()
            .filter(|(registered, _)| *registered == channel)
            .count()
    }

    /// Delivers `event` to every handler of its channel; returns how many ran.
    pub fn dispatch(&mut self, event: &PointerEvent) -> usize {
        let channel = event.channel();
        let mut delivered = 0;
        for ((registered, name), handler) in &mut self.handlers {
            if *registered != channel {
                continue;
            }
            trace!(channel = channel.name(), handler = %name, "dispatching pointer event");
            handler(event);
            delivered += 1;
        }
        delivered
    }
}

impl fmt::Debug for PanelDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.handlers
                    .keys()
                    .map(|(channel, name)| format!("{}.{name}", channel.name())),
            )
            .finish()
    }
}
