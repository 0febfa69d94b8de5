//! Outbound boundary to the vendor pixel — trait for issuing pixel calls,
//! with no-op and capturing implementations.

use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};

use pixelbridge_core::PixelResult;

use crate::dispatch::CallKind;

/// One call against the vendor pixel global.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelCall {
    /// Pixel bootstrap: `init(pixel_id[, traits])`.
    Init {
        pixel_id: String,
        agent: String,
        traits: Option<Map<String, Value>>,
    },
    /// An event send through one of the four track variants.
    Track {
        kind: CallKind,
        /// Present exactly when `kind` is an isolated-instance variant.
        pixel_id: Option<String>,
        event: String,
        /// Absent when the payload would be empty — the vendor never
        /// receives an explicitly empty payload object.
        payload: Option<Map<String, Value>>,
    },
}

/// Trait for issuing calls against the vendor pixel. Implementations bridge
/// to the actual vendor global; `call` fails only when that global has not
/// attached yet, and the adapter propagates that failure unguarded.
pub trait PixelSink: Send + Sync {
    fn call(&self, call: PixelCall) -> PixelResult<()>;

    /// Whether the vendor library has finished loading.
    fn loaded(&self) -> bool;
}

/// No-op sink for hosts that only exercise the mapping logic.
pub struct NoOpSink;

impl PixelSink for NoOpSink {
    fn call(&self, _call: PixelCall) -> PixelResult<()> {
        Ok(())
    }

    fn loaded(&self) -> bool {
        false
    }
}

/// In-memory sink that records calls for testing.
#[derive(Default)]
pub struct CaptureSink {
    calls: Mutex<Vec<PixelCall>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<PixelCall> {
        self.calls.lock().expect("pixel sink mutex poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().expect("pixel sink mutex poisoned").len()
    }

    pub fn count_kind(&self, kind: CallKind) -> usize {
        self.calls
            .lock()
            .expect("pixel sink mutex poisoned")
            .iter()
            .filter(|c| matches!(c, PixelCall::Track { kind: k, .. } if *k == kind))
            .count()
    }

    /// Event names of the recorded track calls, in call order.
    pub fn event_names(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("pixel sink mutex poisoned")
            .iter()
            .filter_map(|c| match c {
                PixelCall::Track { event, .. } => Some(event.clone()),
                PixelCall::Init { .. } => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().expect("pixel sink mutex poisoned").clear();
    }
}

impl PixelSink for CaptureSink {
    fn call(&self, call: PixelCall) -> PixelResult<()> {
        self.calls.lock().expect("pixel sink mutex poisoned").push(call);
        Ok(())
    }

    fn loaded(&self) -> bool {
        true
    }
}

/// Convenience: a no-op sink for hosts that don't need call emission.
pub fn noop_sink() -> Arc<dyn PixelSink> {
    Arc::new(NoOpSink)
}

/// Convenience: a capture sink for tests.
pub fn capture_sink() -> Arc<CaptureSink> {
    Arc::new(CaptureSink::new())
}
