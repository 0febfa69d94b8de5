//! Adapter facade — the entry points the host runtime drives. Wires the
//! classifier, payload builders, and dispatch gateway together and talks
//! to the vendor sink.

use std::sync::Arc;

use serde_json::Map;
use tracing::{debug, info};

use pixelbridge_core::{EventView, PixelResult, TrackEvent};

use crate::builders::{self, PlannedEvent};
use crate::dispatch::PixelDispatcher;
use crate::format::{format_traits, UserTraits};
use crate::settings::PixelSettings;
use crate::sink::{PixelCall, PixelSink};

/// The Meta Pixel destination adapter. Settings are resolved once at
/// construction and read-only afterward; every entry point runs to
/// completion synchronously and performs no I/O of its own.
pub struct PixelAdapter {
    settings: PixelSettings,
    dispatcher: PixelDispatcher,
    sink: Arc<dyn PixelSink>,
}

impl PixelAdapter {
    pub fn new(settings: PixelSettings, sink: Arc<dyn PixelSink>) -> Self {
        let dispatcher = PixelDispatcher::new(
            sink.clone(),
            settings.pixel_id.clone(),
            settings.only_track_single,
        );
        Self {
            settings,
            dispatcher,
            sink,
        }
    }

    pub fn settings(&self) -> &PixelSettings {
        &self.settings
    }

    /// Bootstrap the vendor pixel: emits the init call, seeded with the
    /// user's advanced-match traits when `init_with_existing_traits` is
    /// set. Script loading is the host's job; calls issued before the
    /// script attaches are queued by the vendor's own shim.
    pub fn initialize(&self, traits: Option<&UserTraits>) -> PixelResult<()> {
        let seeded = self.settings.init_with_existing_traits;
        info!(pixel_id = %self.settings.pixel_id, seeded, "initializing vendor pixel");
        self.sink.call(PixelCall::Init {
            pixel_id: self.settings.pixel_id.clone(),
            agent: self.settings.agent.clone(),
            traits: seeded.then(|| format_traits(traits)),
        })
    }

    /// Whether the vendor library has attached its global.
    pub fn loaded(&self) -> bool {
        self.sink.loaded()
    }

    /// Page view: one standard `PageView` send with no payload.
    pub fn page(&self) -> PixelResult<()> {
        self.dispatcher.track("PageView", Map::new())
    }

    /// Named tracking event: classified against both mapping tables and
    /// dispatched per category.
    pub fn track(&self, event: &TrackEvent) -> PixelResult<()> {
        let plan = builders::track(
            event,
            &self.settings.standard_events,
            &self.settings.legacy_events,
        );
        self.send_plan(event.event(), plan)
    }

    pub fn product_list_viewed(&self, event: &TrackEvent) -> PixelResult<()> {
        let plan = builders::product_list_viewed(event, &self.settings.legacy_events);
        self.send_plan(event.event(), plan)
    }

    pub fn product_viewed(&self, event: &TrackEvent) -> PixelResult<()> {
        let plan = builders::product_viewed(event, &self.settings.legacy_events);
        self.send_plan(event.event(), plan)
    }

    pub fn product_added(&self, event: &TrackEvent) -> PixelResult<()> {
        let plan = builders::product_added(event, &self.settings.legacy_events);
        self.send_plan(event.event(), plan)
    }

    pub fn order_completed(&self, event: &TrackEvent) -> PixelResult<()> {
        let plan = builders::order_completed(event, &self.settings.legacy_events);
        self.send_plan(event.event(), plan)
    }

    fn send_plan(&self, source: &str, plan: Vec<PlannedEvent>) -> PixelResult<()> {
        debug!(source, sends = plan.len(), "dispatching event plan");
        for planned in plan {
            if planned.custom {
                self.dispatcher.track_custom(&planned.name, planned.payload)?;
            } else {
                self.dispatcher.track(&planned.name, planned.payload)?;
            }
        }
        Ok(())
    }
}
