//! Field-level helpers shared by the store backends.

use std::cmp::Ordering;

use serde_json::Value;

use crate::store::{Fields, Filter, FilterOp};

/// Keys owned by the store and never accepted from callers.
pub const RESERVED_KEYS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// Remove reserved keys from caller-supplied fields.
pub fn strip_reserved(mut fields: Fields) -> Fields {
    for key in RESERVED_KEYS {
        fields.remove(key);
    }
    fields
}

/// Merge `patch` into `target`.
///
/// When both sides hold an object under the same key the objects are merged
/// recursively; any other value (arrays included) replaces the stored one.
pub fn merge_fields(target: &mut Fields, patch: Fields) {
    for (key, incoming) in patch {
        match incoming {
            Value::Object(nested) => {
                if let Some(Value::Object(existing)) = target.get_mut(&key) {
                    merge_fields(existing, nested);
                } else {
                    target.insert(key, Value::Object(nested));
                }
            }
            other => {
                target.insert(key, other);
            }
        }
    }
}

/// Whether `fields` satisfies every filter.
pub fn matches_all(fields: &Fields, filters: &[Filter]) -> bool {
    filters.iter().all(|f| matches(fields, f))
}

fn matches(fields: &Fields, filter: &Filter) -> bool {
    let Some(actual) = fields.get(&filter.field) else {
        return false;
    };
    let expected = &filter.value;

    match filter.op {
        FilterOp::Eq => values_equal(actual, expected),
        FilterOp::Ne => !values_equal(actual, expected),
        FilterOp::Lt => compare(actual, expected) == Some(Ordering::Less),
        FilterOp::Lte => matches!(
            compare(actual, expected),
            Some(Ordering::Less | Ordering::Equal)
        ),
        FilterOp::Gt => compare(actual, expected) == Some(Ordering::Greater),
        FilterOp::Gte => matches!(
            compare(actual, expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        FilterOp::ArrayContains => actual
            .as_array()
            .is_some_and(|items| items.iter().any(|item| values_equal(item, expected))),
        FilterOp::In => expected
            .as_array()
            .is_some_and(|options| options.iter().any(|option| values_equal(actual, option))),
    }
}

/// Equality where numbers compare by value (`1` equals `1.0`).
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Ordering between two values of the same scalar type.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
