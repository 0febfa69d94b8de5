//! Event classifier — resolves an incoming event name against the
//! configured standard and legacy mapping tables.

use crate::settings::EventMappings;

/// Result of classifying one event name against both mapping tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    /// Vendor names from the standard table, in configured order.
    pub standard: Vec<&'a str>,
    /// Vendor names from the legacy table, in configured order.
    pub legacy: Vec<&'a str>,
}

impl Classification<'_> {
    /// True when the name matched neither table. Such events go out as
    /// custom events under their raw name.
    pub fn is_unmapped(&self) -> bool {
        self.standard.is_empty() && self.legacy.is_empty()
    }
}

/// Pure and total: an unmapped name yields two empty lists. Both lists may
/// be non-empty at once — the legacy table is consulted independently of
/// the standard one, and legacy sends fire in addition to standard ones.
pub fn classify<'a>(
    event: &str,
    standard: &'a EventMappings,
    legacy: &'a EventMappings,
) -> Classification<'a> {
    Classification {
        standard: standard.matches(event),
        legacy: legacy.matches(event),
    }
}
