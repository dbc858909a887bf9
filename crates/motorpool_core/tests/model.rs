use motorpool_core::{Car, Driver, Manufacturer};

#[test]
fn car_new_sets_defaults() {
    let car = Car::new("Corolla", Manufacturer::with_id(1, "Toyota", "Japan"));

    assert_eq!(car.id, None);
    assert_eq!(car.model, "Corolla");
    assert_eq!(car.manufacturer.id, Some(1));
    assert!(car.drivers.is_empty());
}

#[test]
fn driver_and_manufacturer_constructors_assign_ids() {
    let driver = Driver::new("Alice", "AA-111");
    assert_eq!(driver.id, None);

    let persisted = Driver::with_id(5, "Alice", "AA-111");
    assert_eq!(persisted.id, Some(5));

    let manufacturer = Manufacturer::new("Toyota", "Japan");
    assert_eq!(manufacturer.id, None);
}

#[test]
fn car_serialization_uses_expected_wire_fields() {
    let car = Car {
        id: Some(7),
        model: "Corolla".to_string(),
        manufacturer: Manufacturer::with_id(1, "Toyota", "Japan"),
        drivers: vec![Driver::with_id(5, "Alice", "AA-111")],
    };

    let json = serde_json::to_value(&car).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["model"], "Corolla");
    assert_eq!(json["manufacturer"]["id"], 1);
    assert_eq!(json["manufacturer"]["name"], "Toyota");
    assert_eq!(json["manufacturer"]["country"], "Japan");
    assert_eq!(json["drivers"][0]["id"], 5);
    assert_eq!(json["drivers"][0]["license_number"], "AA-111");

    let decoded: Car = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, car);
}

#[test]
fn unpersisted_ids_serialize_as_null() {
    let json = serde_json::to_value(Driver::new("Bob", "BB-222")).unwrap();
    assert!(json["id"].is_null());
}
