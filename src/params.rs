use crate::error::ParamError;

use std::borrow::Cow;
use std::str::FromStr;
use std::{fmt, slice};

/// A single URL parameter, consisting of a key and a value.
#[derive(PartialEq, Eq, Clone)]
struct Param<'k, 'v> {
    // The key borrows from the tree, the value from the request path unless
    // percent-decoding had to rewrite it.
    key: &'k str,
    value: Cow<'v, str>,
}

/// A list of parameters returned by a route match, in the order they appear
/// in the path.
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let mut tree = routetree::Node::new();
/// # tree.insert("/users/:id", true)?;
/// let matched = tree.at("/users/1")?;
///
/// // Iterate through the keys and values.
/// for (key, value) in matched.params.iter() {
///     println!("key: {}, value: {}", key, value);
/// }
///
/// // Get a specific value by name.
/// assert_eq!(matched.params.get("id"), Some("1"));
/// assert_eq!(matched.params.get_u64("id")?, 1);
/// # Ok(())
/// # }
/// ```
#[derive(PartialEq, Eq, Clone, Default)]
pub struct Params<'k, 'v> {
    inner: Vec<Param<'k, 'v>>,
}

impl<'k, 'v> Params<'k, 'v> {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// Creates an empty parameter list with room for `n` parameters.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            inner: Vec::with_capacity(n),
        }
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if there are no parameters in the list.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Removes all parameters, keeping the allocation.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Returns the value of the first parameter registered under the given key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        let key = key.as_ref();
        self.inner
            .iter()
            .find(|param| param.key == key)
            .map(|param| param.value.as_ref())
    }

    /// Returns the value registered under the given key, or an empty string.
    pub fn get_or_empty(&self, key: impl AsRef<str>) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// Parses the value as a boolean.
    ///
    /// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false
    /// counterparts `0`, `f`, `F`, `FALSE`, `false`, `False`.
    pub fn get_bool(&self, key: impl AsRef<str>) -> Result<bool, ParamError> {
        let key = key.as_ref();
        match self.require(key)? {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            value => Err(invalid(key, value, "bool")),
        }
    }

    /// Parses the value as a signed 64-bit integer.
    pub fn get_i64(&self, key: impl AsRef<str>) -> Result<i64, ParamError> {
        self.parse(key.as_ref(), "i64")
    }

    /// Parses the value as an unsigned 64-bit integer.
    pub fn get_u64(&self, key: impl AsRef<str>) -> Result<u64, ParamError> {
        self.parse(key.as_ref(), "u64")
    }

    /// Parses the value as a 64-bit float.
    pub fn get_f64(&self, key: impl AsRef<str>) -> Result<f64, ParamError> {
        self.parse(key.as_ref(), "f64")
    }

    fn parse<T: FromStr>(&self, key: &str, expected: &'static str) -> Result<T, ParamError> {
        let value = self.require(key)?;
        value.parse().map_err(|_| invalid(key, value, expected))
    }

    fn require(&self, key: &str) -> Result<&str, ParamError> {
        self.get(key).ok_or_else(|| ParamError::Missing {
            name: key.to_owned(),
        })
    }

    /// Returns an iterator over the parameters in the list.
    pub fn iter(&self) -> ParamsIter<'_, 'k, 'v> {
        ParamsIter {
            inner: self.inner.iter(),
        }
    }

    /// Inserts a key value parameter pair into the list.
    pub(crate) fn push(&mut self, key: &'k str, value: Cow<'v, str>) {
        self.inner.push(Param { key, value });
    }
}

fn invalid(key: &str, value: &str, expected: &'static str) -> ParamError {
    ParamError::Invalid {
        name: key.to_owned(),
        value: value.to_owned(),
        expected,
    }
}

impl fmt::Debug for Params<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// An iterator over the keys and values of a route's [parameters](crate::Params).
pub struct ParamsIter<'ps, 'k, 'v> {
    inner: slice::Iter<'ps, Param<'k, 'v>>,
}

impl<'ps, 'k, 'v> Iterator for ParamsIter<'ps, 'k, 'v> {
    type Item = (&'k str, &'ps str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|p| (p.key, p.value.as_ref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ParamsIter<'_, '_, '_> {}
