use super::*;

#[test]
fn validated_trims_and_accepts_complete_fields() {
    let fields = OrderFields::new(" Ada ", "Lovelace", " 1001", "B7 ");
    let ok = fields.validated().unwrap();
    assert_eq!(ok.first_name, "Ada");
    assert_eq!(ok.order_number, "1001");
    assert_eq!(ok.bin_number, "B7");
    assert_eq!(ok.customer_name(), "Ada Lovelace");
}

#[test]
fn validated_lists_every_missing_field() {
    let err = OrderFields::new("", "  ", "1", "")
        .validated()
        .unwrap_err()
        .to_string();
    assert!(err.contains("First name is required"));
    assert!(err.contains("Last name is required"));
    assert!(err.contains("Bin number is required"));
    assert!(!err.contains("Order number"));
}

#[test]
fn order_json_uses_persisted_field_names() {
    let order = Order {
        id: "o1".to_string(),
        order_number: "1001".to_string(),
        customer_name: "Ada Lovelace".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        bin_number: "B7".to_string(),
        status: OrderStatus::AwaitingPickup,
        created_at: Timestamp(42),
        picked_up_at: None,
        signature: None,
    };
    let v = serde_json::to_value(&order).unwrap();
    assert_eq!(v["orderNumber"], "1001");
    assert_eq!(v["customerName"], "Ada Lovelace");
    assert_eq!(v["binNumber"], "B7");
    assert_eq!(v["status"], "Awaiting Pickup");
    assert_eq!(v["createdAt"], 42);
    assert!(v.get("pickedUpAt").is_none());
    assert!(v.get("signature").is_none());

    let back: Order = serde_json::from_value(v).unwrap();
    assert_eq!(back, order);
}

#[test]
fn name_match_is_case_insensitive_over_all_names() {
    let order: Order = serde_json::from_str(
        r#"{ "id": "x", "orderNumber": "1", "customerName": "Grace Hopper",
             "binNumber": "A1", "status": "Picked Up", "createdAt": 1 }"#,
    )
    .unwrap();
    assert!(order.name_matches("hop"));
    assert!(order.name_matches("grace h"));
    assert!(!order.name_matches("ada"));
    assert!(!order.is_awaiting());
    assert_eq!(order.status.to_string(), "Picked Up");
}
