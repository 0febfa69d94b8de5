//! Integration test for the full event-translation flow: host-style events
//! in, captured vendor pixel calls out.

use serde_json::json;

use pixelbridge_core::TrackEvent;
use pixelbridge_meta_pixel::{
    capture_sink, CallKind, EventMappings, PixelAdapter, PixelCall, PixelSettings, UserTraits,
};

fn sample_settings() -> PixelSettings {
    PixelSettings {
        pixel_id: "216512348".into(),
        init_with_existing_traits: true,
        standard_events: EventMappings::from_pairs([
            ("Order Completed", "Purchase"),
            ("Signed Up", "Lead"),
        ]),
        legacy_events: EventMappings::from_pairs([
            ("Order Completed", "9028973"),
            ("Played Song", "4401337"),
        ]),
        ..Default::default()
    }
}

#[test]
fn test_full_session_flow() {
    let sink = capture_sink();
    let adapter = PixelAdapter::new(sample_settings(), sink.clone());
    assert!(adapter.settings().validate().is_ok());

    let traits = UserTraits {
        email: Some("jane@example.com".into()),
        name: Some("Jane Doe".into()),
        ..Default::default()
    };
    adapter.initialize(Some(&traits)).unwrap();
    assert!(adapter.loaded());

    adapter.page().unwrap();

    let order = TrackEvent::new("Order Completed")
        .with_property("order_id", "o-1001")
        .with_property("revenue", 74.5)
        .with_property(
            "products",
            json!([
                { "product_id": "p-1", "price": 50 },
                { "name": "unidentified", "price": 10 },
                { "sku": "s-3", "price": 14.5 }
            ]),
        );
    adapter.order_completed(&order).unwrap();

    let calls = sink.calls();
    // init + PageView + Purchase + legacy fall-through
    assert_eq!(calls.len(), 4);

    match &calls[0] {
        PixelCall::Init {
            pixel_id, traits, ..
        } => {
            assert_eq!(pixel_id, "216512348");
            let record = traits.as_ref().unwrap();
            assert_eq!(record["em"], "jane@example.com");
            assert_eq!(record["fn"], "jane");
            assert_eq!(record["ln"], "doe");
        }
        other => panic!("expected init call, got {other:?}"),
    }

    match &calls[2] {
        PixelCall::Track {
            kind,
            event,
            payload,
            ..
        } => {
            assert_eq!(*kind, CallKind::Track);
            assert_eq!(event, "Purchase");
            let payload = payload.as_ref().unwrap();
            assert_eq!(payload["content_ids"], json!(["p-1", "s-3"]));
            assert_eq!(payload["value"], "74.50");
            assert_eq!(payload["currency"], "USD");
        }
        other => panic!("expected purchase call, got {other:?}"),
    }

    match &calls[3] {
        PixelCall::Track { event, payload, .. } => {
            assert_eq!(event, "9028973");
            let payload = payload.as_ref().unwrap();
            assert_eq!(payload.len(), 2);
            assert_eq!(payload["value"], "74.50");
        }
        other => panic!("expected legacy call, got {other:?}"),
    }
}

#[test]
fn test_track_routing_per_mapping_category() {
    let sink = capture_sink();
    let adapter = PixelAdapter::new(sample_settings(), sink.clone());

    // Unmapped: one custom send under the raw name
    adapter
        .track(&TrackEvent::new("Viewed Pricing").with_property("plan", "pro"))
        .unwrap();
    // Standard only
    adapter.track(&TrackEvent::new("Signed Up")).unwrap();
    // Legacy only: currency/value payload
    adapter
        .track(&TrackEvent::new("Played Song").with_property("revenue", "7"))
        .unwrap();

    assert_eq!(
        sink.event_names(),
        ["Viewed Pricing", "Lead", "4401337"]
    );
    assert_eq!(sink.count_kind(CallKind::TrackCustom), 1);
    assert_eq!(sink.count_kind(CallKind::Track), 2);

    match &sink.calls()[2] {
        PixelCall::Track { payload, .. } => {
            let payload = payload.as_ref().unwrap();
            assert_eq!(payload["currency"], "USD");
            assert_eq!(payload["value"], "7.00");
            assert!(!payload.contains_key("plan"));
        }
        other => panic!("expected legacy call, got {other:?}"),
    }
}

#[test]
fn test_isolated_mode_end_to_end() {
    let sink = capture_sink();
    let settings = PixelSettings {
        only_track_single: true,
        ..sample_settings()
    };
    let adapter = PixelAdapter::new(settings, sink.clone());

    adapter.page().unwrap();
    adapter.track(&TrackEvent::new("Viewed Pricing")).unwrap();
    adapter
        .product_added(&TrackEvent::new("Product Added").with_property("sku", "s-9"))
        .unwrap();

    assert_eq!(sink.count_kind(CallKind::TrackSingle), 2);
    assert_eq!(sink.count_kind(CallKind::TrackSingleCustom), 1);
    for call in sink.calls() {
        match call {
            PixelCall::Track { pixel_id, .. } => {
                assert_eq!(pixel_id.as_deref(), Some("216512348"));
            }
            other => panic!("expected track call, got {other:?}"),
        }
    }
}

#[test]
fn test_product_lifecycle_fixed_payloads() {
    let sink = capture_sink();
    let adapter = PixelAdapter::new(sample_settings(), sink.clone());

    adapter
        .product_list_viewed(&TrackEvent::new("Product List Viewed").with_property("category", "Games"))
        .unwrap();
    adapter
        .product_viewed(
            &TrackEvent::new("Product Viewed")
                .with_property("product_id", "p-7")
                .with_property("price", 18.99),
        )
        .unwrap();
    adapter
        .product_added(&TrackEvent::new("Product Added").with_property("id", "i-2"))
        .unwrap();

    assert_eq!(
        sink.event_names(),
        ["ViewContent", "ViewContent", "AddToCart"]
    );

    match &sink.calls()[0] {
        PixelCall::Track { payload, .. } => {
            let payload = payload.as_ref().unwrap();
            assert_eq!(payload["content_ids"], json!(["Games"]));
            assert_eq!(payload["content_type"], "product_group");
        }
        other => panic!("expected track call, got {other:?}"),
    }
    match &sink.calls()[1] {
        PixelCall::Track { payload, .. } => {
            let payload = payload.as_ref().unwrap();
            assert_eq!(payload["content_ids"], json!(["p-7"]));
            assert_eq!(payload["value"], "18.99");
        }
        other => panic!("expected track call, got {other:?}"),
    }
}

#[test]
fn test_vendor_unavailable_propagates() {
    use pixelbridge_core::{PixelError, PixelResult};
    use pixelbridge_meta_pixel::PixelSink;
    use std::sync::Arc;

    // A sink standing in for a page where the vendor global never attached.
    struct DetachedSink;

    impl PixelSink for DetachedSink {
        fn call(&self, _call: PixelCall) -> PixelResult<()> {
            Err(PixelError::VendorUnavailable(
                "vendor global not attached".into(),
            ))
        }

        fn loaded(&self) -> bool {
            false
        }
    }

    let adapter = PixelAdapter::new(sample_settings(), Arc::new(DetachedSink));
    assert!(!adapter.loaded());

    let err = adapter.page().unwrap_err();
    assert!(matches!(err, PixelError::VendorUnavailable(_)));
    let err = adapter.track(&TrackEvent::new("Signed Up")).unwrap_err();
    assert!(matches!(err, PixelError::VendorUnavailable(_)));
}
