// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::vehicle::{InvalidVehicleId, VehicleId, VehicleStatus};

#[test]
pub fn normalize_vehicle_id_on_parse() {
    let id = VehicleId::parse("  tn01ab1234 ").unwrap();
    assert_eq!(id.as_str(), "TN01AB1234");
    assert_eq!(id, VehicleId::parse("TN01AB1234").unwrap());
}

#[test]
pub fn reject_empty_vehicle_id() {
    assert_eq!(VehicleId::parse(""), Err(InvalidVehicleId));
    assert_eq!(VehicleId::parse("   "), Err(InvalidVehicleId));
}

#[test]
pub fn deserialize_status_from_json() {
    let json = r#"
    {
        "id": "TN01AB1234",
        "operator_name": "Kumar",
        "last_updated_at": "2026-08-23T10:15:30.000Z",
        "is_stale": false
    }
    "#;
    let status = VehicleStatus::from_json(json)
        .unwrap_or_else(|e| panic!("Failed to deserialize the raw json. Reason: {e}"));
    assert_eq!(status, common::test_helper::vehicle::get_status());
}
