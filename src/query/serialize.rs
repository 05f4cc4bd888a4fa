use super::QueryStyle;
use super::value::{QueryMap, QueryValue};
use crate::bag::Rendering;
use crate::compat::{Cow, String, Vec, format};
use crate::unicode::percent_encode::{RAW_QUERY_SET, form_encode_into, percent_encode_into};

/// Flatten the map into `(bracket_key, scalar)` pairs in render order.
///
/// Sequences flatten to `key[]`, maps to `key[sub]`; empty containers
/// produce nothing. In comma-list style a flat sequence under a list key
/// renders as one comma-joined value.
pub fn leaves(map: &QueryMap, style: QueryStyle) -> Vec<(String, Cow<'_, str>)> {
    let mut out = Vec::with_capacity(map.len());
    for (key, value) in map.iter() {
        if let QueryValue::Sequence(items) = value {
            if style.is_list_key(key) && value.is_flat() && !items.is_empty() {
                let joined: Vec<&str> = items.iter().filter_map(QueryValue::as_str).collect();
                out.push((String::from(key), Cow::Owned(joined.join(","))));
                continue;
            }
        }
        flatten(String::from(key), value, &mut out);
    }
    out
}

fn flatten<'a>(prefix: String, value: &'a QueryValue, out: &mut Vec<(String, Cow<'a, str>)>) {
    match value {
        QueryValue::Scalar(s) => out.push((prefix, Cow::Borrowed(s.as_str()))),
        QueryValue::Sequence(items) => {
            for item in items {
                flatten(format!("{prefix}[]"), item, out);
            }
        }
        QueryValue::Map(map) => {
            for (key, item) in map.iter() {
                flatten(format!("{prefix}[{key}]"), item, out);
            }
        }
    }
}

/// Render as `?k=v&k2=v2`, or `""` when nothing would be written.
///
/// The raw form escapes only the characters that would split or decode
/// differently when parsed back, so it reads back to the same map.
pub fn render(map: &QueryMap, style: QueryStyle, rendering: Rendering) -> String {
    let pairs = leaves(map, style);
    if pairs.is_empty() {
        return String::new();
    }

    let mut result = String::from("?");
    for (i, (key, value)) in pairs.iter().enumerate() {
        if i > 0 {
            result.push('&');
        }
        match rendering {
            Rendering::Raw => {
                percent_encode_into(&mut result, key, RAW_QUERY_SET);
                result.push('=');
                percent_encode_into(&mut result, value, RAW_QUERY_SET);
            }
            Rendering::Encoded => {
                form_encode_into(&mut result, key);
                result.push('=');
                form_encode_into(&mut result, value);
            }
        }
    }
    result
}
