//! Accessors over the host's loosely-typed configuration tree
//!
//! Nested blocks arrive as lists of objects (single-record blocks are lists
//! of at most one element), sets arrive as arrays in no particular order.
//! Missing keys and `null` read as the zero value of the requested type.

use serde_json::{Map, Value};

pub(crate) type Block = Map<String, Value>;

pub(crate) fn string(block: &Block, key: &str) -> String {
    block
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub(crate) fn boolean(block: &Block, key: &str) -> bool {
    block.get(key).and_then(Value::as_bool).unwrap_or(false)
}

pub(crate) fn int64(block: &Block, key: &str) -> i64 {
    block.get(key).map(number_as_i64).unwrap_or(0)
}

/// Narrow a host integer to 32 bits
///
/// Host integers are validated by schema before they reach the codec, so a
/// value that does not fit is a programming error.
pub(crate) fn int32(block: &Block, key: &str) -> i32 {
    let n = int64(block, key);
    i32::try_from(n).unwrap_or_else(|_| panic!("{key} = {n} does not fit in a 32-bit integer"))
}

pub(crate) fn float(block: &Block, key: &str) -> f64 {
    block.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Objects of a nested block list, in input order
pub(crate) fn blocks<'a>(block: &'a Block, key: &str) -> impl Iterator<Item = &'a Block> + use<'a> {
    block
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

/// First element of a single-record block, `None` when the list is empty
pub(crate) fn single<'a>(block: &'a Block, key: &str) -> Option<&'a Block> {
    match block.get(key)? {
        Value::Object(map) => Some(map),
        Value::Array(items) => items.first().and_then(Value::as_object),
        _ => None,
    }
}

pub(crate) fn strings(block: &Block, key: &str) -> Vec<String> {
    block
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

pub(crate) fn ints(block: &Block, key: &str) -> Vec<i64> {
    block
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .map(number_as_i64)
        .collect()
}

/// Wrap an optional record as a host single-record block
pub(crate) fn block_list(record: Option<Value>) -> Value {
    Value::Array(record.into_iter().collect())
}

fn number_as_i64(value: &Value) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .unwrap_or(0)
}
