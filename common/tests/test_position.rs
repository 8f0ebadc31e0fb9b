// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::position::{LocationSample, Position};
use common::test_helper::vehicle::get_timestamp;

fn get_position_as_json<'a>() -> &'a str {
    r#"
    {
        "latitude": 13.0827,
        "longitude": 80.2707
    }
    "#
}

#[test]
pub fn deserialize_position_from_json() {
    let pos = Position::from_json(get_position_as_json())
        .unwrap_or_else(|e| panic!("Failed to deserialize the raw json. Reason: {e}"));
    assert_eq!(pos, Position::new(13.0827, 80.2707));
}

#[test]
pub fn reject_out_of_range_coordinates() {
    assert!(LocationSample::new(90.5, 0.0, &get_timestamp()).is_err());
    assert!(LocationSample::new(-91.0, 0.0, &get_timestamp()).is_err());
    assert!(LocationSample::new(0.0, 180.5, &get_timestamp()).is_err());
    assert!(LocationSample::new(0.0, -181.0, &get_timestamp()).is_err());
}

#[test]
pub fn accept_boundary_coordinates() {
    assert!(LocationSample::new(90.0, 180.0, &get_timestamp()).is_ok());
    assert!(LocationSample::new(-90.0, -180.0, &get_timestamp()).is_ok());
}

#[test]
pub fn project_sample_to_position() {
    let sample = LocationSample::new(13.0827, 80.2707, &get_timestamp()).unwrap();
    assert_eq!(sample.position(), Position::new(13.0827, 80.2707));
    assert_eq!(sample.captured_at(), get_timestamp());
}
