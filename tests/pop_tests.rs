use convmap::{convert, ConvertingMap, LookupError};
use std::cell::Cell;

fn map_with_foo() -> ConvertingMap<String, String> {
    let mut map = ConvertingMap::new();
    map.insert("foo".to_string(), "42".to_string());
    map
}

fn must_be_hello(value: &String) -> Result<i32, String> {
    if value != "hello" {
        return Err("value must be 'hello'".to_string());
    }
    Ok(42)
}

#[test]
fn test_pop_removes_converted_entry() {
    let mut map = ConvertingMap::from([("foo", "42"), ("bar", "blub")]);

    assert_eq!(map.pop_converted(&"foo", convert::parse::<i32, _>), Some(42));
    assert!(!map.contains_key(&"foo"));

    // Popping again finds nothing
    assert_eq!(map.pop_converted(&"foo", convert::parse::<i32, _>), None);
}

#[test]
fn test_pop_with_default() {
    let mut map = map_with_foo();

    assert_eq!(map.pop_converted_or("bar", -1, |v| v.parse::<i32>()), -1);
    assert_eq!(map.pop_converted_or("foo", -1, |v| v.parse::<i32>().map(|n| n + 1)), 43);
    assert!(map.is_empty());
}

#[test]
fn test_pop_failed_conversion_keeps_entry() {
    let mut map = map_with_foo();

    assert_eq!(map.pop_converted("foo", must_be_hello), None);
    assert!(map.contains_key("foo"));

    assert_eq!(map.pop_converted_or("foo", -1, must_be_hello), -1);
    assert!(map.contains_key("foo"));

    match map.try_pop_converted("foo", must_be_hello) {
        Err(LookupError::Conversion { source, .. }) => {
            assert_eq!(source.to_string(), "value must be 'hello'")
        }
        other => panic!("Should have gotten conversion error, got {:?}", other),
    }
    assert_eq!(map.get("foo").map(String::as_str), Some("42"));
}

#[test]
fn test_pop_lazy_default() {
    let mut map = map_with_foo();
    let calls = Cell::new(0);
    let default = || {
        calls.set(calls.get() + 1);
        0
    };

    assert_eq!(map.pop_converted_or_else("bar", default, |v| v.parse::<i32>()), 0);
    assert_eq!(calls.get(), 1);

    assert_eq!(map.pop_converted_or_else("foo", default, must_be_hello), 0);
    assert_eq!(calls.get(), 2);
    assert!(map.contains_key("foo"));

    assert_eq!(map.pop_converted_or_else("foo", default, |v| v.parse::<i32>()), 42);
    assert_eq!(calls.get(), 2);
    assert!(!map.contains_key("foo"));
}

#[test]
fn test_try_pop() -> Result<(), LookupError> {
    let mut map = map_with_foo();

    assert_eq!(map.try_pop_converted("foo", |v| v.parse::<i32>())?, 42);
    assert!(map.is_empty());

    let missing = map.try_pop_converted("foo", |v| v.parse::<i32>());
    assert!(matches!(missing, Err(LookupError::KeyNotFound(_))));

    // Plain removal is still the HashMap one
    map.insert("foo".to_string(), "42".to_string());
    assert_eq!(map.remove("foo"), Some("42".to_string()));
    assert_eq!(map.remove("foo"), None);

    Ok(())
}
