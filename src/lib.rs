//! # convmap
//!
//! A `HashMap` wrapper whose lookups can convert values on the way out.
//!
//! `convmap` provides [`ConvertingMap`], a map that behaves exactly like the
//! `HashMap` it wraps but adds lookups taking a *converter*: any
//! `FnOnce(&V) -> Result<T, E>`. This is handy for loosely typed data such
//! as query strings, form fields, environment snapshots or parsed config
//! where every value is a string but callers want numbers, flags or enums.
//!
//! ## Key Features
//!
//! - **Forgiving lookups**: a missing key and a rejected value both fall back to the caller's default
//! - **Strict lookups when needed**: `try_*` methods tell the two failures apart via [`LookupError`]
//! - **Nothing hidden**: every `HashMap` method is available through `Deref`/`DerefMut`
//! - **Removal that respects conversion**: `pop_converted*` only removes an entry if its value converted
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use convmap::{convert, ConvertingMap};
//!
//! let map = ConvertingMap::from([("foo", "42"), ("bar", "blub")]);
//!
//! // Convert while looking up
//! assert_eq!(map.get_converted(&"foo", convert::parse::<i32, _>), Some(42));
//!
//! // Values that don't convert behave like missing keys
//! assert_eq!(map.get_converted_or(&"bar", -1, convert::parse::<i32, _>), -1);
//! assert_eq!(map.get_converted_or(&"missing", -1, convert::parse::<i32, _>), -1);
//!
//! // Plain lookups are the HashMap ones
//! assert_eq!(map.get(&"foo"), Some(&"42"));
//!
//! let empty = ConvertingMap::<&str, &str>::new();
//! assert_eq!(empty.get(&"x"), None);
//! ```
//!
//! ### Telling Failures Apart
//!
//! ```rust
//! use convmap::{ConvertingMap, LookupError};
//!
//! let map: ConvertingMap<String, String> = [("retries", "three")]
//!     .into_iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect();
//!
//! match map.try_get_converted("retries", |v| v.parse::<u32>()) {
//!     Ok(retries) => println!("Retrying {} times", retries),
//!     Err(LookupError::KeyNotFound(key)) => println!("No {} configured", key),
//!     Err(e @ LookupError::Conversion { .. }) => println!("Bad setting: {}", e),
//! }
//! ```
//!
//! ### Consuming Entries
//!
//! ```rust
//! use convmap::ConvertingMap;
//!
//! let mut form = ConvertingMap::from([("age", "31"), ("email", "not an age")]);
//!
//! let age = form.pop_converted_or(&"age", 0u8, |v| v.parse());
//! assert_eq!(age, 31);
//! assert!(!form.contains_key(&"age"));
//!
//! // A value that fails to convert stays where it was
//! let email = form.pop_converted_or(&"email", 0u8, |v| v.parse());
//! assert_eq!(email, 0);
//! assert!(form.contains_key(&"email"));
//! ```

pub mod convert;
mod error;
mod map;

pub use error::{ConversionError, LookupError};
pub use map::ConvertingMap;
