use super::*;

use serde_json::json;

#[test]
fn canonical_form_is_reflexive() {
    let v = json!({ "src": "a.png", "fit": [1, 2, { "z": true, "a": null }] });
    assert_eq!(canonical_form(&v), canonical_form(&v.clone()));
}

#[test]
fn key_order_does_not_matter() {
    let mut a = serde_json::Map::new();
    a.insert("b".into(), json!(2));
    a.insert("a".into(), json!({ "y": 1, "x": 0 }));
    let mut b = serde_json::Map::new();
    b.insert("a".into(), json!({ "x": 0, "y": 1 }));
    b.insert("b".into(), json!(2));
    assert_eq!(
        canonical_form(&Value::Object(a)),
        canonical_form(&Value::Object(b))
    );
}

#[test]
fn output_is_compact_sorted_json() {
    let v = json!({ "z": "q\"uote", "a": [1.5, false] });
    assert_eq!(canonical_form(&v), r#"{"a":[1.5,false],"z":"q\"uote"}"#);
}

#[test]
fn different_values_differ() {
    assert_ne!(canonical_form(&json!({ "a": 1 })), canonical_form(&json!({ "a": 2 })));
    assert_ne!(canonical_form(&json!([1, 2])), canonical_form(&json!([2, 1])));
}

#[test]
fn integral_floats_match_integers() {
    assert_eq!(canonical_form(&json!({ "w": 1.0 })), canonical_form(&json!({ "w": 1 })));
    assert_eq!(canonical_form(&json!([-0.0, 2.0e3])), "[0,2000]");
    assert_eq!(canonical_form(&json!(1.5)), "1.5");
    assert_ne!(canonical_form(&json!(1.5)), canonical_form(&json!(1)));
}
