//! Dispatch gateway — the single choke point that selects among the four
//! vendor call variants and issues the call through the sink.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use pixelbridge_core::PixelResult;

use crate::sink::{PixelCall, PixelSink};

/// The four vendor call variants, keyed by (custom, isolated). Enumerating
/// them once keeps each variant's argument shape in a single place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Track,
    TrackSingle,
    TrackCustom,
    TrackSingleCustom,
}

impl CallKind {
    /// Select the variant for a (custom, isolated) pair.
    pub fn select(custom: bool, isolated: bool) -> Self {
        match (custom, isolated) {
            (false, false) => CallKind::Track,
            (false, true) => CallKind::TrackSingle,
            (true, false) => CallKind::TrackCustom,
            (true, true) => CallKind::TrackSingleCustom,
        }
    }

    /// Wire name of the vendor call.
    pub fn as_str(self) -> &'static str {
        match self {
            CallKind::Track => "track",
            CallKind::TrackSingle => "trackSingle",
            CallKind::TrackCustom => "trackCustom",
            CallKind::TrackSingleCustom => "trackSingleCustom",
        }
    }

    /// Isolated-instance variants carry the pixel id argument.
    pub fn is_isolated(self) -> bool {
        matches!(self, CallKind::TrackSingle | CallKind::TrackSingleCustom)
    }
}

/// Issues vendor calls with the once-resolved pixel id and isolation flag
/// threaded explicitly from the settings; nothing here is global.
pub struct PixelDispatcher {
    sink: Arc<dyn PixelSink>,
    pixel_id: String,
    isolated: bool,
}

impl PixelDispatcher {
    pub fn new(sink: Arc<dyn PixelSink>, pixel_id: impl Into<String>, isolated: bool) -> Self {
        Self {
            sink,
            pixel_id: pixel_id.into(),
            isolated,
        }
    }

    /// Send a standard (mapped) event.
    pub fn track(&self, event: &str, payload: Map<String, Value>) -> PixelResult<()> {
        self.send(false, event, payload)
    }

    /// Send a custom (unmapped) event under its raw name.
    pub fn track_custom(&self, event: &str, payload: Map<String, Value>) -> PixelResult<()> {
        self.send(true, event, payload)
    }

    fn send(&self, custom: bool, event: &str, payload: Map<String, Value>) -> PixelResult<()> {
        let kind = CallKind::select(custom, self.isolated);
        // An empty payload is passed as absent, never as an empty object.
        let payload = if payload.is_empty() { None } else { Some(payload) };
        debug!(
            call = kind.as_str(),
            event,
            isolated = self.isolated,
            "dispatching pixel call"
        );
        self.sink.call(PixelCall::Track {
            kind,
            pixel_id: kind.is_isolated().then(|| self.pixel_id.clone()),
            event: event.to_string(),
            payload,
        })
    }
}
