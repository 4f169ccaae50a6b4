use crate::error::{ConversionError, LookupError};
use std::borrow::Borrow;
use std::collections::hash_map::{self, RandomState};
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::{BuildHasher, Hash};
use std::ops::{Deref, DerefMut};

/// A `HashMap` whose lookups can convert the stored value on the way out
///
/// `ConvertingMap` dereferences to the `HashMap` it wraps, so every ordinary
/// map operation (`insert`, `remove`, `get`, `contains_key`, `iter`, `len`,
/// indexing, ...) works unchanged. On top of that it adds lookups that run a
/// *converter*, any `FnOnce(&V) -> Result<T, E>`, on the value found for a key.
///
/// The lenient lookups never fail: a missing key and a converter returning
/// `Err` both produce the caller's default. The strict `try_*` lookups report
/// which of the two happened through [`LookupError`].
///
/// # Examples
///
/// ```
/// use convmap::ConvertingMap;
///
/// let map = ConvertingMap::from([("foo", "42"), ("bar", "blub")]);
///
/// assert_eq!(map.get_converted(&"foo", |v| v.parse::<i32>()), Some(42));
/// assert_eq!(map.get_converted_or(&"bar", -1, |v| v.parse::<i32>()), -1);
/// assert_eq!(map.get_converted_or(&"missing", -1, |v| v.parse::<i32>()), -1);
///
/// // Without a converter the stored value comes back untouched
/// assert_eq!(map.get(&"foo"), Some(&"42"));
/// ```
#[derive(Clone)]
pub struct ConvertingMap<K, V, S = RandomState> {
    items: HashMap<K, V, S>,
}

impl<K, V> ConvertingMap<K, V, RandomState> {
    /// Creates a new, empty ConvertingMap
    ///
    /// # Examples
    ///
    /// ```
    /// use convmap::ConvertingMap;
    ///
    /// let map = ConvertingMap::<String, String>::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }

    /// Creates an empty ConvertingMap with room for at least `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: HashMap::with_capacity(capacity),
        }
    }
}

impl<K, V, S> ConvertingMap<K, V, S> {
    /// Creates an empty ConvertingMap that hashes keys with `hash_builder`
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            items: HashMap::with_hasher(hash_builder),
        }
    }

    /// Creates an empty ConvertingMap with the given capacity and hasher
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            items: HashMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Unwraps the map, returning the underlying `HashMap`
    pub fn into_inner(self) -> HashMap<K, V, S> {
        self.items
    }
}

impl<K, V, S> ConvertingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Returns the value stored for `key`, or `default` if there is none
    ///
    /// ```
    /// use convmap::ConvertingMap;
    ///
    /// let map = ConvertingMap::from([("foo", "42")]);
    /// assert_eq!(*map.get_or(&"foo", &"default"), "42");
    /// assert_eq!(*map.get_or(&"bar", &"default"), "default");
    /// ```
    pub fn get_or<'a, Q>(&'a self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.get(key).unwrap_or(default)
    }

    /// Returns a clone of the value stored for `key`, or the result of
    /// `default` if there is none
    ///
    /// `default` only runs when the key is missing.
    pub fn get_cloned_or_else<Q, D>(&self, key: &Q, default: D) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
        D: FnOnce() -> V,
    {
        self.items.get(key).cloned().unwrap_or_else(default)
    }

    /// Looks up `key` and runs `converter` on the value found
    ///
    /// Returns `None` if the key is missing or if the converter returns an
    /// error. The converter is not called for a missing key.
    ///
    /// # Examples
    ///
    /// ```
    /// use convmap::ConvertingMap;
    ///
    /// let map = ConvertingMap::from([("foo", "42"), ("bar", "blub")]);
    ///
    /// assert_eq!(map.get_converted(&"foo", |v| v.parse::<u8>()), Some(42));
    /// assert_eq!(map.get_converted(&"bar", |v| v.parse::<u8>()), None);
    /// assert_eq!(map.get_converted(&"baz", |v| v.parse::<u8>()), None);
    /// ```
    pub fn get_converted<Q, T, E, F>(&self, key: &Q, converter: F) -> Option<T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> Result<T, E>,
    {
        self.get_converted_or_else(key, || None, |value| converter(value).map(Some))
    }

    /// Looks up `key` and runs `converter` on the value found, returning
    /// `default` if the key is missing or the conversion fails
    ///
    /// # Examples
    ///
    /// ```
    /// use convmap::ConvertingMap;
    ///
    /// let map = ConvertingMap::from([("foo", "42"), ("bar", "blub")]);
    ///
    /// assert_eq!(map.get_converted_or(&"foo", -1, |v| v.parse::<i64>()), 42);
    /// assert_eq!(map.get_converted_or(&"bar", -1, |v| v.parse::<i64>()), -1);
    /// ```
    pub fn get_converted_or<Q, T, E, F>(&self, key: &Q, default: T, converter: F) -> T
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> Result<T, E>,
    {
        self.get_converted_or_else(key, || default, converter)
    }

    /// Like [`get_converted_or`](Self::get_converted_or), but the default is
    /// produced by a closure
    ///
    /// `default` runs once for every lookup that falls back, and never for a
    /// lookup that succeeds. Its result is not cached.
    pub fn get_converted_or_else<Q, T, E, F, D>(&self, key: &Q, default: D, converter: F) -> T
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> Result<T, E>,
        D: FnOnce() -> T,
    {
        settle(self.items.get(key).map(converter), default)
    }

    /// Returns the value stored for `key`
    ///
    /// # Errors
    ///
    /// Returns `LookupError::KeyNotFound` if the key doesn't exist
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V, LookupError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        self.items
            .get(key)
            .ok_or_else(|| LookupError::KeyNotFound(format!("{:?}", key)))
    }

    /// Looks up `key` and runs `converter` on the value found, reporting
    /// why no value could be produced
    ///
    /// # Examples
    ///
    /// ```
    /// use convmap::{ConvertingMap, LookupError};
    ///
    /// let map = ConvertingMap::from([("foo", "42"), ("bar", "blub")]);
    ///
    /// assert_eq!(map.try_get_converted(&"foo", |v| v.parse::<i32>())?, 42);
    ///
    /// match map.try_get_converted(&"bar", |v| v.parse::<i32>()) {
    ///     Err(LookupError::Conversion { key, source }) => {
    ///         println!("{} holds something that isn't a number: {}", key, source)
    ///     }
    ///     other => panic!("unexpected result: {:?}", other),
    /// }
    ///
    /// assert!(matches!(
    ///     map.try_get_converted(&"baz", |v| v.parse::<i32>()),
    ///     Err(LookupError::KeyNotFound(_))
    /// ));
    /// # Ok::<(), LookupError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// - Returns `LookupError::KeyNotFound` if the key doesn't exist; the
    ///   converter is not called
    /// - Returns `LookupError::Conversion` if the converter fails, with the
    ///   converter's error as its source
    pub fn try_get_converted<Q, T, E, F>(&self, key: &Q, converter: F) -> Result<T, LookupError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
        F: FnOnce(&V) -> Result<T, E>,
        E: Into<ConversionError>,
    {
        let value = self.try_get(key)?;
        converter(value).map_err(|err| LookupError::Conversion {
            key: format!("{:?}", key),
            source: err.into(),
        })
    }

    /// Removes `key` and returns its converted value
    ///
    /// The entry is only removed when the conversion succeeds. If the
    /// converter fails the entry stays in the map and `None` is returned.
    ///
    /// ```
    /// use convmap::ConvertingMap;
    ///
    /// let mut map = ConvertingMap::from([("foo", "42"), ("bar", "blub")]);
    ///
    /// assert_eq!(map.pop_converted(&"foo", |v| v.parse::<i32>()), Some(42));
    /// assert!(!map.contains_key(&"foo"));
    ///
    /// assert_eq!(map.pop_converted(&"bar", |v| v.parse::<i32>()), None);
    /// assert!(map.contains_key(&"bar"));
    /// ```
    pub fn pop_converted<Q, T, E, F>(&mut self, key: &Q, converter: F) -> Option<T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> Result<T, E>,
    {
        self.pop_converted_or_else(key, || None, |value| converter(value).map(Some))
    }

    /// Removes `key` and returns its converted value, or `default` if the
    /// key is missing or the conversion fails
    pub fn pop_converted_or<Q, T, E, F>(&mut self, key: &Q, default: T, converter: F) -> T
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> Result<T, E>,
    {
        self.pop_converted_or_else(key, || default, converter)
    }

    /// Removes `key` and returns its converted value, or the result of
    /// `default` if the key is missing or the conversion fails
    pub fn pop_converted_or_else<Q, T, E, F, D>(&mut self, key: &Q, default: D, converter: F) -> T
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> Result<T, E>,
        D: FnOnce() -> T,
    {
        let outcome = self.items.get(key).map(converter);
        if let Some(Ok(_)) = outcome {
            self.items.remove(key);
        }
        settle(outcome, default)
    }

    /// Removes `key` and returns its converted value
    ///
    /// # Errors
    ///
    /// - Returns `LookupError::KeyNotFound` if the key doesn't exist
    /// - Returns `LookupError::Conversion` if the converter fails; the entry
    ///   is left in the map
    pub fn try_pop_converted<Q, T, E, F>(&mut self, key: &Q, converter: F) -> Result<T, LookupError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
        F: FnOnce(&V) -> Result<T, E>,
        E: Into<ConversionError>,
    {
        let value = self.try_get_converted(key, converter)?;
        self.items.remove(key);
        Ok(value)
    }
}

// Missing keys and rejected values end up in the same place.
fn settle<T, E>(outcome: Option<Result<T, E>>, default: impl FnOnce() -> T) -> T {
    match outcome {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            log::trace!(
                "stored value could not be converted to {}, using default",
                std::any::type_name::<T>()
            );
            default()
        }
        None => default(),
    }
}

impl<K, V, S> Deref for ConvertingMap<K, V, S> {
    type Target = HashMap<K, V, S>;

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<K, V, S> DerefMut for ConvertingMap<K, V, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.items
    }
}

impl<K, V, S> Default for ConvertingMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> Debug for ConvertingMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.items.fmt(f)
    }
}

impl<K, V, S> PartialEq for ConvertingMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<K, V, S> Eq for ConvertingMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> From<HashMap<K, V, S>> for ConvertingMap<K, V, S> {
    fn from(items: HashMap<K, V, S>) -> Self {
        Self { items }
    }
}

impl<K, V, S> From<ConvertingMap<K, V, S>> for HashMap<K, V, S> {
    fn from(map: ConvertingMap<K, V, S>) -> Self {
        map.items
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for ConvertingMap<K, V, RandomState>
where
    K: Eq + Hash,
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self {
            items: HashMap::from(pairs),
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ConvertingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            items: HashMap::from_iter(iter),
        }
    }
}

impl<K, V, S> Extend<(K, V)> for ConvertingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.items.extend(iter)
    }
}

impl<K, V, S> IntoIterator for ConvertingMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = hash_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a ConvertingMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ConvertingMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = hash_map::IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}
