//! Masking of sensitive attribute values for rendered output

use serde_json::Value;

/// Replacement for masked values
pub const MASK: &str = "(sensitive value)";

/// Return a copy of `value` with sensitive fields replaced by [`MASK`]
///
/// Each entry of `fields` is `"<block>.<attribute>"`, where `<block>` is the
/// key of the enclosing object or list of objects. `"env.value"` masks the
/// `value` of every record under any `env` key, at any depth. Empty strings
/// stay empty so that unset values remain recognisable.
pub fn mask_sensitive(value: &Value, fields: &[&str]) -> Value {
    let rules: Vec<(&str, &str)> = fields.iter().filter_map(|f| f.split_once('.')).collect();
    mask_inner(value, None, &rules)
}

fn mask_inner(value: &Value, block: Option<&str>, rules: &[(&str, &str)]) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| {
                    let sensitive = block.is_some_and(|b| {
                        rules.iter().any(|(rb, rk)| *rb == b && *rk == key.as_str())
                    });
                    let masked = match child {
                        Value::String(s) if sensitive && !s.is_empty() => Value::from(MASK),
                        _ => mask_inner(child, Some(key.as_str()), rules),
                    };
                    (key.clone(), masked)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| mask_inner(item, block, rules))
                .collect(),
        ),
        other => other.clone(),
    }
}
