use core::iter;

use super::QueryStyle;
use super::value::{QueryMap, QueryValue};
use crate::checkers::parse_index;
use crate::compat::{ToString, Vec, vec};
use crate::unicode::percent_encode::form_decode;

/// Parse a query string (with or without leading `?`) into a nested map.
///
/// Keys and values are form-decoded first, then bracket keys are expanded:
/// `a[]=x` appends, `a[b]=x` addresses a map entry, and a plain key seen
/// twice keeps its first position with the last value.
pub fn parse_query(raw: &str, style: QueryStyle) -> QueryMap {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    let mut map = QueryMap::new();

    for pair in raw.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = form_decode(key);
        let value = form_decode(value);

        let (base, path) = split_key(&key);
        if base.is_empty() {
            continue;
        }

        let value = if path.is_empty() && style.is_list_key(base) && !value.is_empty() {
            QueryValue::Sequence(value.split(',').map(QueryValue::from).collect())
        } else {
            QueryValue::Scalar(value)
        };

        if path.is_empty() {
            map.insert(base, value);
        } else if let Some(slot) = map.get_mut(base) {
            assign(slot, &path, value);
        } else {
            map.insert(base, build(&path, value));
        }
    }

    map
}

/// Split `base[a][][b]` into (`base`, [`a`, ``, `b`]).
/// Unbalanced brackets make the whole key literal; anything after the last
/// closing bracket is ignored.
fn split_key(key: &str) -> (&str, Vec<&str>) {
    let Some(open) = key.find('[') else {
        return (key, Vec::new());
    };
    if open == 0 {
        return (key, Vec::new());
    }

    let base = &key[..open];
    let mut path = Vec::new();
    let mut rest = &key[open..];

    while let Some(inner) = rest.strip_prefix('[') {
        let Some(close) = inner.find(']') else {
            if path.is_empty() {
                return (key, Vec::new());
            }
            break;
        };
        path.push(&inner[..close]);
        rest = &inner[close + 1..];
    }

    (base, path)
}

/// Build a fresh value for a key path with nothing stored under it yet
fn build(path: &[&str], value: QueryValue) -> QueryValue {
    let Some((first, rest)) = path.split_first() else {
        return value;
    };

    let child = build(rest, value);
    if first.is_empty() {
        QueryValue::Sequence(vec![child])
    } else {
        QueryValue::Map(iter::once((*first, child)).collect())
    }
}

/// Store `value` at `path` below an existing value, converting as needed
fn assign(slot: &mut QueryValue, path: &[&str], value: QueryValue) {
    let Some((first, rest)) = path.split_first() else {
        *slot = value;
        return;
    };

    if first.is_empty() {
        match slot {
            QueryValue::Sequence(items) => items.push(build(rest, value)),
            QueryValue::Map(map) => {
                let key = map.next_index().to_string();
                map.insert(key, build(rest, value));
            }
            QueryValue::Scalar(_) => *slot = build(path, value),
        }
        return;
    }

    if let QueryValue::Sequence(items) = slot {
        if let Some(child) = parse_index(first).and_then(|i| items.get_mut(i)) {
            assign(child, rest, value);
            return;
        }
        // Named key under a sequence: the sequence becomes a map keyed by index
        let promoted: QueryMap = core::mem::take(items)
            .into_iter()
            .enumerate()
            .map(|(i, item)| (i.to_string(), item))
            .collect();
        *slot = QueryValue::Map(promoted);
    }

    match slot {
        QueryValue::Map(map) => {
            if let Some(child) = map.get_mut(first) {
                assign(child, rest, value);
            } else {
                map.insert(*first, build(rest, value));
            }
        }
        _ => *slot = build(path, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> QueryMap {
        parse_query(raw, QueryStyle::Brackets)
    }

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("plain"), ("plain", vec![]));
        assert_eq!(split_key("arr[]"), ("arr", vec![""]));
        assert_eq!(split_key("arr[a][][b]"), ("arr", vec!["a", "", "b"]));
        assert_eq!(split_key("arr[a]tail"), ("arr", vec!["a"]));
        assert_eq!(split_key("arr[open"), ("arr[open", vec![]));
        assert_eq!(split_key("[x]"), ("[x]", vec![]));
    }

    #[test]
    fn test_parse_flat() {
        let map = parse("?tag=networking&order=newest");
        assert_eq!(map.keys().collect::<Vec<_>>(), ["tag", "order"]);
        assert_eq!(map.get("tag"), Some(&QueryValue::from("networking")));
    }

    #[test]
    fn test_parse_decodes() {
        let map = parse("q=foo+bar&k%20ey=%C3%A9&empty&=orphan&&");
        assert_eq!(map.get("q"), Some(&QueryValue::from("foo bar")));
        assert_eq!(map.get("k ey"), Some(&QueryValue::from("é")));
        assert_eq!(map.get("empty"), Some(&QueryValue::from("")));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_parse_repeated_key_last_wins() {
        let map = parse("a=1&b=2&a=3");
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(map.get("a"), Some(&QueryValue::from("3")));
    }

    #[test]
    fn test_parse_sequence() {
        let map = parse("arr[]=a&arr[]=b");
        assert_eq!(map.get("arr"), Some(&QueryValue::from(vec!["a", "b"])));
    }

    #[test]
    fn test_parse_mixed_promotes_to_map() {
        let map = parse("first=value&arr[]=foo+bar&arr[baz]=baz");
        let expected: QueryMap = [("0", "foo bar"), ("baz", "baz")].into_iter().collect();
        assert_eq!(map.get("arr"), Some(&QueryValue::Map(expected)));
    }

    #[test]
    fn test_parse_deep_nesting() {
        let map = parse("arr[]=foo&arr[baz]=baz&arr[arr][biz]=biz&arr[][][baz]=inner_value");
        let arr = map.get("arr").and_then(QueryValue::as_map).unwrap();
        assert_eq!(arr.keys().collect::<Vec<_>>(), ["0", "baz", "arr", "1"]);
        assert_eq!(
            arr.get("arr").and_then(|v| v.get("biz")),
            Some(&QueryValue::from("biz"))
        );
        assert_eq!(
            arr.get("1").and_then(|v| v.get("0")).and_then(|v| v.get("baz")),
            Some(&QueryValue::from("inner_value"))
        );
    }

    #[test]
    fn test_parse_explicit_index() {
        let map = parse("a[0]=x&a[1]=y");
        let expected: QueryMap = [("0", "x"), ("1", "y")].into_iter().collect();
        assert_eq!(map.get("a"), Some(&QueryValue::Map(expected)));
    }

    #[test]
    fn test_parse_comma_lists() {
        let map = parse_query("cc=a@x.com,b@x.com&subject=Hi,+there", QueryStyle::CommaLists);
        assert_eq!(
            map.get("cc"),
            Some(&QueryValue::from(vec!["a@x.com", "b@x.com"]))
        );
        assert_eq!(map.get("subject"), Some(&QueryValue::from("Hi, there")));
    }
}
