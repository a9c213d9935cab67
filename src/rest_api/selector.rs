//! # Query Selectors
//!
//! Groups the listing query string into selector lists. Keys are compared
//! case-insensitively and may repeat, so `?id=1&ID=2&name=mint` yields
//! `id = [1, 2]` and `name = [mint]`.

use std::collections::BTreeMap;

/// Selector matching product ids
pub const ID_SELECTOR: &str = "id";

/// Selector matching product names
pub const NAME_SELECTOR: &str = "name";

/// Query parameters grouped by lower-cased key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selectors {
    params: BTreeMap<String, Vec<String>>,
}

impl Selectors {
    /// Group key/value pairs, preserving value order per key.
    pub fn parse<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, value) in pairs {
            params
                .entry(key.as_ref().to_lowercase())
                .or_default()
                .push(value.into());
        }
        Self { params }
    }

    /// Values of a selector, if it was given at all
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.params.get(key).map(Vec::as_slice)
    }

    /// Requested ids
    pub fn ids(&self) -> Option<&[String]> {
        self.get(ID_SELECTOR)
    }

    /// Requested names
    pub fn names(&self) -> Option<&[String]> {
        self.get(NAME_SELECTOR)
    }

    /// True when neither `id` nor `name` was given; other keys do not filter.
    pub fn is_unfiltered(&self) -> bool {
        self.ids().is_none() && self.names().is_none()
    }
}
