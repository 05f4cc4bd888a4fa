use super::value::{QueryMap, QueryValue};

/// Replace `key` wherever it appears, depth-first in iteration order.
///
/// A matched entry is replaced whole and not searched further. With
/// `stop_at_first_match` the walk ends after the first replacement.
/// Returns the number of replacements.
pub fn overwrite_in_map(
    map: &mut QueryMap,
    key: &str,
    value: &QueryValue,
    stop_at_first_match: bool,
) -> usize {
    let mut replaced = 0;
    for (entry_key, entry) in map.iter_mut() {
        if entry_key == key {
            *entry = value.clone();
            replaced += 1;
        } else {
            replaced += overwrite_in_value(entry, key, value, stop_at_first_match);
        }

        if stop_at_first_match && replaced > 0 {
            break;
        }
    }
    replaced
}

fn overwrite_in_value(
    target: &mut QueryValue,
    key: &str,
    value: &QueryValue,
    stop_at_first_match: bool,
) -> usize {
    match target {
        QueryValue::Scalar(_) => 0,
        QueryValue::Map(map) => overwrite_in_map(map, key, value, stop_at_first_match),
        QueryValue::Sequence(items) => {
            let mut replaced = 0;
            for item in items {
                replaced += overwrite_in_value(item, key, value, stop_at_first_match);
                if stop_at_first_match && replaced > 0 {
                    break;
                }
            }
            replaced
        }
    }
}

/// Remove every entry named `key` at any depth; absent keys are a no-op.
/// A nested map that lost entries and is left with keys `"0"`..`"n-1"`
/// collapses back into a sequence.
pub fn remove_in_map(map: &mut QueryMap, key: &str) {
    map.retain(|entry_key, _| entry_key != key);
    for (_, entry) in map.iter_mut() {
        remove_in_value(entry, key);
    }
}

fn remove_in_value(target: &mut QueryValue, key: &str) {
    match target {
        QueryValue::Scalar(_) => {}
        QueryValue::Sequence(items) => {
            for item in items {
                remove_in_value(item, key);
            }
        }
        QueryValue::Map(map) => {
            let before = map.len();
            remove_in_map(map, key);
            if map.len() < before && map.is_list_like() {
                let items = core::mem::take(map).into_values();
                *target = QueryValue::Sequence(items);
            }
        }
    }
}
