//! Deterministic serialization of option values, used as cache keys.

use serde_json::Value;

/// Encode `value` as compact JSON with object keys in sorted order.
///
/// Two values are the same cache key iff their canonical forms are byte-identical,
/// independent of the key order they were built with.
pub fn canonical_form(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (k, v)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_scalar(&Value::String(k.clone()), out);
                out.push(':');
                write_canonical(v, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, v) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(v, out);
            }
            out.push(']');
        }
        scalar => write_scalar(scalar, out),
    }
}

/// 2^53; every integer up to this magnitude is exact in an f64.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Floats with an exact integer value encode like that integer, so `1.0` and `1`
/// are the same key.
fn write_scalar(value: &Value, out: &mut String) {
    if let Value::Number(n) = value
        && n.is_f64()
        && let Some(f) = n.as_f64()
        && f.fract() == 0.0
        && f.abs() <= MAX_EXACT_INT
    {
        out.push_str(&(f as i64).to_string());
        return;
    }
    // Display on a scalar `Value` is its compact JSON encoding.
    out.push_str(&value.to_string());
}

#[cfg(test)]
#[path = "../../tests/unit/layers/canonical.rs"]
mod tests;
