//! Destination settings for the Meta Pixel adapter — pixel identity,
//! dispatch flags, and the standard/legacy event mapping tables.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// One `source event -> vendor event` mapping entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMapping {
    pub source: String,
    pub vendor: String,
}

/// Ordered mapping table. Source names may repeat (one source event may map
/// to several vendor names); order is preserved as configured. Immutable
/// once the settings are constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventMappings(Vec<EventMapping>);

impl EventMappings {
    pub fn new(entries: Vec<EventMapping>) -> Self {
        Self(entries)
    }

    pub fn from_pairs<I, S, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(source, vendor)| EventMapping {
                    source: source.into(),
                    vendor: vendor.into(),
                })
                .collect(),
        )
    }

    /// Vendor names mapped from `source`, in configured order, no dedup.
    /// Source matching is case-insensitive; vendor names pass through
    /// verbatim.
    pub fn matches(&self, source: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|m| m.source.eq_ignore_ascii_case(source))
            .map(|m| m.vendor.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Destination settings, resolved once at initialization and read-only for
/// the adapter's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PixelSettings {
    /// Vendor account id. Required for the isolated-instance call variants.
    #[serde(default)]
    pub pixel_id: String,
    /// Vendor-internal attribution tag sent on the init call.
    #[serde(default = "default_agent")]
    pub agent: String,
    /// Seed the init call with the current user's advanced-match traits.
    #[serde(default)]
    pub init_with_existing_traits: bool,
    /// Send every event through the isolated-instance call variants, so
    /// other pixels loaded on the same page do not also receive it.
    #[serde(default)]
    pub only_track_single: bool,
    /// Mappings into the vendor's fixed standard-event taxonomy.
    #[serde(default)]
    pub standard_events: EventMappings,
    /// Mappings to legacy pixel-specific event names (currency/value only).
    #[serde(default)]
    pub legacy_events: EventMappings,
}

impl Default for PixelSettings {
    fn default() -> Self {
        Self {
            pixel_id: String::new(),
            agent: default_agent(),
            init_with_existing_traits: false,
            only_track_single: false,
            standard_events: EventMappings::default(),
            legacy_events: EventMappings::default(),
        }
    }
}

impl PixelSettings {
    /// Optional up-front check. Dispatch itself never validates these;
    /// hosts that want to fail fast on misconfiguration can.
    pub fn validate(&self) -> Result<()> {
        if self.only_track_single && self.pixel_id.is_empty() {
            return Err(anyhow!(
                "pixel_id must not be empty when only_track_single is set"
            ));
        }
        Ok(())
    }
}

fn default_agent() -> String {
    "pxbridge".to_string()
}
