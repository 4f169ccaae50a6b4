//! Ready-made converters for the lookup methods of [`ConvertingMap`](crate::ConvertingMap).
//!
//! Any `FnOnce(&V) -> Result<T, E>` works as a converter; these cover the
//! common cases so callers can pass a function path instead of a closure.
//!
//! ```
//! use convmap::{convert, ConvertingMap};
//!
//! let map = ConvertingMap::from([("port", " 8080 "), ("host", "localhost")]);
//!
//! assert_eq!(map.get_converted(&"port", convert::parse::<u16, _>), Some(8080));
//! assert_eq!(map.get_converted_or(&"host", 0u16, convert::parse::<u16, _>), 0);
//! ```

use std::str::FromStr;

/// Parses a string-like value with [`FromStr`], ignoring surrounding whitespace.
pub fn parse<T, V>(value: &V) -> Result<T, T::Err>
where
    T: FromStr,
    V: AsRef<str> + ?Sized,
{
    value.as_ref().trim().parse()
}

/// Converts a clone of the value with [`TryFrom`].
///
/// ```
/// use convmap::{convert, ConvertingMap};
///
/// let map = ConvertingMap::from([("small", 7i64), ("large", 1_000_000i64)]);
///
/// assert_eq!(map.get_converted(&"small", convert::try_from::<u8, _>), Some(7u8));
/// assert_eq!(map.get_converted(&"large", convert::try_from::<u8, _>), None);
/// ```
pub fn try_from<T, V>(value: &V) -> Result<T, T::Error>
where
    T: TryFrom<V>,
    V: Clone,
{
    T::try_from(value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::ParseIntError;

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse::<i32, _>(&"42"), Ok(42));
        assert_eq!(parse::<i32, _>(&"  42\n"), Ok(42));
        assert_eq!(parse::<i32, _>(&"-7".to_string()), Ok(-7));
        assert_eq!(parse::<f64, _>(&"3.5"), Ok(3.5));
        assert_eq!(parse::<bool, _>(&"true"), Ok(true));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let result: Result<i32, ParseIntError> = parse(&"blub");
        assert!(result.is_err());
        assert!(parse::<u8, _>(&"256").is_err());
        assert!(parse::<i32, _>(&"").is_err());
    }

    #[test]
    fn test_try_from_checks_range() {
        assert_eq!(try_from::<u8, _>(&200i32), Ok(200u8));
        assert!(try_from::<u8, _>(&-1i32).is_err());
        assert!(try_from::<i8, _>(&200u64).is_err());
        assert_eq!(try_from::<i64, _>(&5u32), Ok(5i64));
    }
}
