//! Meta Pixel destination adapter — translates vendor-neutral analytics
//! events into the call shapes expected by the Meta advertising pixel.
//!
//! # Modules
//!
//! - [`settings`] — destination settings and the standard/legacy event mapping tables
//! - [`classify`] — event-name classification against the mapping tables
//! - [`format`] — revenue and advanced-match trait formatters
//! - [`builders`] — per-event-family payload builders
//! - [`dispatch`] — the four-variant call dispatch gateway
//! - [`sink`] — outbound boundary to the vendor pixel global
//! - [`adapter`] — the host-facing facade
//! - [`loader`] — script-tag contract constants

pub mod adapter;
pub mod builders;
pub mod classify;
pub mod dispatch;
pub mod format;
pub mod loader;
pub mod settings;
pub mod sink;

pub use adapter::PixelAdapter;
pub use classify::{classify, Classification};
pub use dispatch::{CallKind, PixelDispatcher};
pub use format::{format_revenue, format_traits, Address, UserTraits};
pub use settings::{EventMapping, EventMappings, PixelSettings};
pub use sink::{capture_sink, noop_sink, CaptureSink, NoOpSink, PixelCall, PixelSink};
