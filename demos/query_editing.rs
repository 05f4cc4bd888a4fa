#![allow(clippy::expect_used, clippy::print_stdout)]

/// Nested query editing example
use urlbag::{QueryComponents, QueryValue};

fn main() {
    // Parse a query with bracket keys
    let mut query =
        QueryComponents::parse("first=value&arr[]=foo+bar&arr[baz]=baz&arr[][][baz]=inner_value");
    println!("Parsed: {}", query); // ?first=value&arr[]=foo+bar&arr[baz]=baz&arr[][][baz]=inner_value
    println!();

    // Look up nested values
    let arr = query.get("arr").expect("arr is present");
    println!("arr[baz]: {:?}", arr.get("baz").and_then(QueryValue::as_str)); // Some("baz")
    println!();

    // Overwrite only the first `baz`, wherever it is
    query
        .overwrite_recursive([("baz", "first_only")], true)
        .expect("baz is present");
    println!("After overwrite: {}", query);
    println!();

    // Remove `baz` at every depth
    query.remove_recursive("baz");
    println!("After remove: {}", query);
    println!();

    // Insert new entries after `first`
    query
        .insert_after("first", [("page", "2"), ("lang", "en")])
        .expect("first is present");
    println!("Raw: {}", query.raw());
    println!("Encoded: {}", query.encoded());
    println!();

    // Walk every leaf
    println!("Leaves:");
    for (key, value) in query.leaves() {
        println!("  {} = {}", key, value);
    }
}
