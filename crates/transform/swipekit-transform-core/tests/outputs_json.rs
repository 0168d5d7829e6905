//! JSON shape of the outputs contract — hosts that mirror changes over a
//! bridge rely on these field names staying put.

use swipekit_transform_core::{
    AnimId, Change, Config, ElementId, EngineEvent, Outputs, Property,
};

#[test]
fn outputs_round_trip() {
    let mut outputs = Outputs::default();
    outputs.push_change(Change {
        element: ElementId(3),
        prop: Property::TranslateX,
        value: 42.5,
    });
    outputs.push_event(EngineEvent::AnimationFinished {
        element: ElementId(3),
        anim: AnimId(7),
    });

    let json = serde_json::to_string(&outputs).expect("outputs serialize");
    let back: Outputs = serde_json::from_str(&json).expect("outputs deserialize");
    assert_eq!(back, outputs);
}

#[test]
fn outputs_fields_default_when_absent() {
    let back: Outputs = serde_json::from_str("{}").expect("empty object parses");
    assert!(back.is_empty());
}

#[test]
fn config_round_trip() {
    let cfg = Config {
        supports_3d: false,
        trig_digits: 9,
        default_duration_ms: 250.0,
    };
    let json = serde_json::to_string(&cfg).expect("config serialize");
    let back: Config = serde_json::from_str(&json).expect("config deserialize");
    assert_eq!(back.trig_digits, 9);
    assert!(!back.supports_3d);
    assert_eq!(back.default_duration_ms, 250.0);
}
