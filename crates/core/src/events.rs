//! Vendor-neutral analytics events — the read-only facade the host runtime
//! hands to destination adapters, with typed accessors for the well-known
//! e-commerce fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Capability interface over a tracking call. Concrete events and product
/// line items both satisfy it; the typed accessors read well-known keys out
/// of the free-form properties map and degrade to `None` when a key is
/// missing or has an unusable shape.
pub trait EventView {
    /// Raw event name as supplied by the source.
    fn event(&self) -> &str;

    /// Free-form property map. Adapters never mutate it.
    fn properties(&self) -> &Map<String, Value>;

    /// ISO currency code, defaulting to "USD".
    fn currency(&self) -> String {
        self.properties()
            .get("currency")
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .unwrap_or("USD")
            .to_string()
    }

    fn revenue(&self) -> Option<&Value> {
        self.properties().get("revenue")
    }

    fn price(&self) -> Option<&Value> {
        self.properties().get("price")
    }

    fn value(&self) -> Option<&Value> {
        self.properties().get("value")
    }

    fn product_id(&self) -> Option<String> {
        scalar_string(self.properties().get("product_id"))
    }

    fn id(&self) -> Option<String> {
        scalar_string(self.properties().get("id"))
    }

    fn sku(&self) -> Option<String> {
        scalar_string(self.properties().get("sku"))
    }

    fn product_name(&self) -> Option<String> {
        scalar_string(self.properties().get("name"))
    }

    fn category(&self) -> Option<String> {
        scalar_string(self.properties().get("category"))
    }

    /// Line-item sub-records under `products`; each satisfies the same
    /// accessor subset. Non-object entries are skipped.
    fn products(&self) -> Vec<LineItem<'_>> {
        self.properties()
            .get("products")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(LineItem::new)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A single vendor-neutral tracking call received from the host runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackEvent {
    pub event: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl TrackEvent {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            properties: Map::new(),
        }
    }

    /// Builder-style property insertion.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl EventView for TrackEvent {
    fn event(&self) -> &str {
        &self.event
    }

    fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }
}

/// Borrowed view over one product line item.
#[derive(Debug, Clone, Copy)]
pub struct LineItem<'a> {
    properties: &'a Map<String, Value>,
}

impl<'a> LineItem<'a> {
    pub fn new(properties: &'a Map<String, Value>) -> Self {
        Self { properties }
    }
}

impl EventView for LineItem<'_> {
    fn event(&self) -> &str {
        ""
    }

    fn properties(&self) -> &Map<String, Value> {
        self.properties
    }
}

/// Render a scalar property as a non-empty string: strings pass through,
/// numbers are stringified, everything else is absent.
pub fn scalar_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce a scalar property to a number: JSON numbers pass through, numeric
/// strings are parsed, everything else is absent.
pub fn scalar_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_currency_defaults_to_usd() {
        let event = TrackEvent::new("Order Completed");
        assert_eq!(event.currency(), "USD");

        let event = TrackEvent::new("Order Completed").with_property("currency", "EUR");
        assert_eq!(event.currency(), "EUR");

        // Empty currency falls back to the default
        let event = TrackEvent::new("Order Completed").with_property("currency", "");
        assert_eq!(event.currency(), "USD");
    }

    #[test]
    fn test_scalar_accessors() {
        let event = TrackEvent::new("Product Viewed")
            .with_property("product_id", "p-90")
            .with_property("sku", json!(4412))
            .with_property("name", "Monopoly")
            .with_property("category", "Games");

        assert_eq!(event.product_id().as_deref(), Some("p-90"));
        assert_eq!(event.sku().as_deref(), Some("4412"));
        assert_eq!(event.product_name().as_deref(), Some("Monopoly"));
        assert_eq!(event.category().as_deref(), Some("Games"));
        assert_eq!(event.id(), None);
    }

    #[test]
    fn test_products_line_items() {
        let event = TrackEvent::new("Order Completed").with_property(
            "products",
            json!([
                { "product_id": "p-1", "price": 19.99 },
                { "sku": "sku-2" },
                "not-an-object"
            ]),
        );

        let items = event.products();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_id().as_deref(), Some("p-1"));
        assert_eq!(items[1].sku().as_deref(), Some("sku-2"));
        assert_eq!(items[1].product_id(), None);
    }

    #[test]
    fn test_scalar_number_coercion() {
        assert_eq!(scalar_number(&json!(19.5)), Some(19.5));
        assert_eq!(scalar_number(&json!("7")), Some(7.0));
        assert_eq!(scalar_number(&json!(" 12.25 ")), Some(12.25));
        assert_eq!(scalar_number(&json!("free")), None);
        assert_eq!(scalar_number(&Value::Null), None);
    }

    #[test]
    fn test_track_event_serde() {
        let event = TrackEvent::new("Signed Up").with_property("plan", "pro");
        let json = serde_json::to_string(&event).unwrap();
        let parsed: TrackEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);

        // Properties default to empty when omitted
        let parsed: TrackEvent = serde_json::from_str(r#"{"event":"Bare"}"#).unwrap();
        assert_eq!(parsed.event, "Bare");
        assert!(parsed.properties.is_empty());
    }
}
