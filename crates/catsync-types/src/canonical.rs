//! Canonical ordering: recursive key sort used for stable on-disk diffs.
//!
//! Tables are rebuilt with keys in ascending byte order, sequences keep their
//! element order but each element is canonicalized, scalars pass through.
//! The transform is idempotent.

use crate::value::{Table, Value};

/// Return the canonical form of `value`.
pub fn canonicalize(value: Value) -> Value {
    match value {
        Value::Table(table) => Value::Table(canonicalize_table(table)),
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(canonicalize).collect()),
        scalar @ Value::Scalar(_) => scalar,
    }
}

/// Canonicalize a table: sort its keys and canonicalize every value.
pub fn canonicalize_table(table: Table) -> Table {
    let mut entries: Vec<(String, Value)> = table.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    entries
        .into_iter()
        .map(|(key, value)| (key, canonicalize(value)))
        .collect()
}

/// Returns `true` if every table reachable from `value` has strictly
/// ascending keys.
pub fn is_canonical(value: &Value) -> bool {
    match value {
        Value::Table(table) => {
            let keys: Vec<&String> = table.keys().collect();
            keys.windows(2).all(|pair| pair[0] < pair[1]) && table.values().all(is_canonical)
        }
        Value::Sequence(items) => items.iter().all(is_canonical),
        Value::Scalar(_) => true,
    }
}
