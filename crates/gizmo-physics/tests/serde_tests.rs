// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![cfg(feature = "serde")]
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! JSON surface of configuration and scene records.

use gizmo_physics::{
    BodyRecord, FlipperSide, Gizmo, PhysicsBody, ShapeParams, SimulationConfig, Vector2, World,
};

#[test]
#[allow(clippy::float_cmp)]
fn partial_config_fills_defaults() {
    let config: SimulationConfig =
        serde_json::from_str(r#"{ "tick_rate": 120, "flipper": { "step": 0.2 } }"#).unwrap();
    let defaults = SimulationConfig::default();
    assert_eq!(config.tick_rate, 120);
    assert_eq!(config.iterations, defaults.iterations);
    assert_eq!(config.flipper.max_angle, defaults.flipper.max_angle);
    assert!((config.flipper.step - 0.2).abs() < 1e-15);
    assert_eq!(config.black_hole, defaults.black_hole);
}

#[test]
fn hand_written_record_loads() {
    let json = r#"[
        {
            "gizmo": "Ball",
            "shape": { "kind": "circle", "radius": 0.2 },
            "x": 1.0, "y": 2.0, "angle": 0.0,
            "material": { "density": 1.0, "friction": 0.1, "restitution": 0.5, "restitution_velocity": 0.5 },
            "scale_rate": 2,
            "trigger": false
        },
        {
            "gizmo": { "Flipper": { "side": "Left", "pivot": { "x": 0.0, "y": 0.0 }, "angle": 0.0, "raised": false } },
            "shape": { "kind": "polygon", "vertices": [
                { "x": -1.0, "y": -0.125 }, { "x": 1.0, "y": -0.125 },
                { "x": 1.0, "y": 0.125 }, { "x": -1.0, "y": 0.125 }
            ] },
            "x": 1.0, "y": 0.0, "angle": 0.0,
            "material": { "density": 1.0, "friction": 0.3, "restitution": 0.6, "restitution_velocity": 0.5 },
            "scale_rate": 1,
            "trigger": false
        }
    ]"#;
    let records: Vec<BodyRecord> = serde_json::from_str(json).unwrap();
    let world = World::from_records(SimulationConfig::default(), &records).unwrap();
    let bodies: Vec<_> = world.bodies().iter().map(|(_, b)| b).collect();
    assert_eq!(bodies.len(), 2);
    assert!((bodies[0].shape().radius().unwrap() - 0.4).abs() < 1e-12);
    assert!(matches!(bodies[1].gizmo(), Gizmo::Flipper(s) if s.side == FlipperSide::Left));
}

#[test]
fn records_survive_json() {
    let body = PhysicsBody::curved_pipe(Vector2::new(3.0, 3.0), 0.25).unwrap();
    let record = BodyRecord::from_body(&body);
    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains(r#""kind":"quarter_circle""#));
    let back: BodyRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back.gizmo, record.gizmo);
    let (ShapeParams::QuarterCircle { radius: a }, ShapeParams::QuarterCircle { radius: b }) =
        (&back.shape, &record.shape)
    else {
        panic!("expected quarter circles");
    };
    assert!((a - b).abs() < 1e-12);
    assert!((back.angle - record.angle).abs() < 1e-12);
}
