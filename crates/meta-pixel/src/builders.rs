//! Payload builders — pure planners that shape vendor payloads per event
//! family and decide which named sends an incoming event produces. The
//! adapter facade feeds the resulting plan to the dispatch gateway, so the
//! builders stay deterministic and independently testable.

use serde_json::{json, Map, Value};

use pixelbridge_core::{EventView, TrackEvent};

use crate::classify::classify;
use crate::format::format_revenue;
use crate::settings::EventMappings;

/// One planned vendor send. `custom` routes the send through the
/// custom-event call variants; `name` is the vendor event name.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedEvent {
    pub custom: bool,
    pub name: String,
    pub payload: Map<String, Value>,
}

impl PlannedEvent {
    fn standard(name: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            custom: false,
            name: name.into(),
            payload,
        }
    }

    fn custom_event(name: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            custom: true,
            name: name.into(),
            payload,
        }
    }
}

/// Generic track: full property passthrough with `revenue` renamed to
/// `value` and formatted. Unmapped events go out once as a custom event
/// under the raw source name; mapped events produce one standard send per
/// standard match ("Purchase" additionally gets a `currency` field) plus
/// one reduced legacy send per legacy match.
pub fn track(
    event: &TrackEvent,
    standard: &EventMappings,
    legacy: &EventMappings,
) -> Vec<PlannedEvent> {
    let revenue = format_revenue(event.revenue());
    let mut payload = Map::new();
    for (key, value) in event.properties() {
        if key == "revenue" {
            payload.insert("value".to_string(), Value::String(revenue.clone()));
        } else {
            payload.insert(key.clone(), value.clone());
        }
    }

    let matched = classify(event.event(), standard, legacy);
    if matched.is_unmapped() {
        return vec![PlannedEvent::custom_event(event.event(), payload)];
    }

    let mut plan = Vec::new();
    for name in &matched.standard {
        let mut payload = payload.clone();
        // The vendor requires a currency parameter on Purchase
        if *name == "Purchase" {
            payload.insert("currency".to_string(), Value::String(event.currency()));
        }
        plan.push(PlannedEvent::standard(*name, payload));
    }
    plan.extend(legacy_fallthrough(event, &matched.legacy));
    plan
}

/// Product List Viewed: fixed `ViewContent` send keyed on the list
/// category, plus legacy fall-through. The standard table is not consulted
/// for product-lifecycle events; only legacy mappings add sends.
pub fn product_list_viewed(event: &TrackEvent, legacy: &EventMappings) -> Vec<PlannedEvent> {
    let mut payload = Map::new();
    payload.insert(
        "content_ids".to_string(),
        json!([event.category().unwrap_or_default()]),
    );
    payload.insert("content_type".to_string(), json!("product_group"));

    let mut plan = vec![PlannedEvent::standard("ViewContent", payload)];
    plan.extend(legacy_fallthrough(event, &legacy.matches(event.event())));
    plan
}

/// Product Viewed: fixed `ViewContent` send with the full single-product
/// shape, plus legacy fall-through.
pub fn product_viewed(event: &TrackEvent, legacy: &EventMappings) -> Vec<PlannedEvent> {
    let mut plan = vec![PlannedEvent::standard("ViewContent", product_payload(event))];
    plan.extend(legacy_fallthrough(event, &legacy.matches(event.event())));
    plan
}

/// Product Added: fixed `AddToCart` send with the full single-product
/// shape, plus legacy fall-through.
pub fn product_added(event: &TrackEvent, legacy: &EventMappings) -> Vec<PlannedEvent> {
    let mut plan = vec![PlannedEvent::standard("AddToCart", product_payload(event))];
    plan.extend(legacy_fallthrough(event, &legacy.matches(event.event())));
    plan
}

/// Order Completed: one `Purchase` send whose `content_ids` collects the
/// resolvable identifier of every line item (items without one are
/// skipped, order preserved) and whose `value` is the order-level revenue,
/// plus legacy fall-through.
pub fn order_completed(event: &TrackEvent, legacy: &EventMappings) -> Vec<PlannedEvent> {
    let content_ids: Vec<Value> = event
        .products()
        .iter()
        .filter_map(|item| content_id(item))
        .map(Value::String)
        .collect();

    let mut payload = Map::new();
    payload.insert("content_ids".to_string(), Value::Array(content_ids));
    payload.insert("content_type".to_string(), json!("product"));
    payload.insert("currency".to_string(), Value::String(event.currency()));
    payload.insert(
        "value".to_string(),
        Value::String(format_revenue(event.revenue())),
    );

    let mut plan = vec![PlannedEvent::standard("Purchase", payload)];
    plan.extend(legacy_fallthrough(event, &legacy.matches(event.event())));
    plan
}

/// Content-identifier fallback chain: product id, else generic id, else SKU.
fn content_id(view: &impl EventView) -> Option<String> {
    view.product_id().or_else(|| view.id()).or_else(|| view.sku())
}

/// Fixed single-product e-commerce shape shared by Product Viewed and
/// Product Added. An event with no resolvable identifier still gets the
/// call, with an empty id in `content_ids`.
fn product_payload(event: &TrackEvent) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert(
        "content_ids".to_string(),
        json!([content_id(event).unwrap_or_default()]),
    );
    payload.insert("content_type".to_string(), json!("product"));
    payload.insert(
        "content_name".to_string(),
        Value::String(event.product_name().unwrap_or_default()),
    );
    payload.insert(
        "content_category".to_string(),
        Value::String(event.category().unwrap_or_default()),
    );
    payload.insert("currency".to_string(), Value::String(event.currency()));
    payload.insert(
        "value".to_string(),
        Value::String(format_revenue(event.price())),
    );
    payload
}

/// Reduced currency/value sends for every legacy match. Property data is
/// intentionally discarded for legacy pixels.
fn legacy_fallthrough(event: &impl EventView, legacy: &[&str]) -> Vec<PlannedEvent> {
    legacy
        .iter()
        .map(|name| {
            let mut payload = Map::new();
            payload.insert("currency".to_string(), Value::String(event.currency()));
            payload.insert(
                "value".to_string(),
                Value::String(format_revenue(event.revenue())),
            );
            PlannedEvent::standard(*name, payload)
        })
        .collect()
}
