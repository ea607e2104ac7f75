//! Canonical header representation.
//!
//! Headers may be supplied either as a `reqwest::header::HeaderMap` or as an
//! ordered list of name/value pairs. Both normalize into [`HeaderList`], which
//! is the only form the executor applies to a request.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{RestError, Result};

/// Ordered list of header name/value pairs.
///
/// Names keep the case they were given with; comparisons are
/// case-insensitive. Repeated names are allowed and are sent as separate
/// header lines in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderList(Vec<(String, String)>);

impl HeaderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any entry has the given name (case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    /// Lay `overrides` on top of `self`.
    ///
    /// Every name present in `overrides` replaces all entries of that name in
    /// `self`; names only present in `self` are kept in their original order.
    pub fn merge_over(&self, overrides: &HeaderList) -> HeaderList {
        let mut merged: Vec<(String, String)> = self
            .0
            .iter()
            .filter(|(name, _)| !overrides.contains(name))
            .cloned()
            .collect();
        merged.extend(overrides.0.iter().cloned());
        HeaderList(merged)
    }

    /// Validate every entry and build a `HeaderMap` preserving repeated names.
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.0.len());
        for (name, value) in &self.0 {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| RestError::InvalidHeader(format!("{name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| RestError::InvalidHeader(format!("{name}: {e}")))?;
            map.append(name, value);
        }
        Ok(map)
    }
}

impl From<HeaderMap> for HeaderList {
    fn from(map: HeaderMap) -> Self {
        HeaderList::from(&map)
    }
}

impl From<&HeaderMap> for HeaderList {
    fn from(map: &HeaderMap) -> Self {
        HeaderList(
            map.iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for HeaderList {
    fn from(pairs: Vec<(K, V)>) -> Self {
        HeaderList(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for HeaderList {
    fn from(pairs: [(K, V); N]) -> Self {
        HeaderList(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        HeaderList(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_header_map_and_pairs_agree() {
        let mut map = HeaderMap::new();
        map.insert("x-api-key", HeaderValue::from_static("secret"));
        let from_map = HeaderList::from(map);
        let from_pairs = HeaderList::from(vec![("x-api-key", "secret")]);
        assert_eq!(from_map, from_pairs);
    }

    #[test]
    fn test_header_map_keeps_repeated_values() {
        let mut map = HeaderMap::new();
        map.append("accept", HeaderValue::from_static("text/plain"));
        map.append("accept", HeaderValue::from_static("application/json"));
        let list = HeaderList::from(&map);
        assert_eq!(list.len(), 2);

        let back = list.to_header_map().unwrap();
        let values: Vec<_> = back.get_all("accept").iter().collect();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_merge_over_replaces_by_name_case_insensitive() {
        let base = HeaderList::from([("X-Trace", "a"), ("Accept", "text/plain"), ("x-trace", "b")]);
        let call = HeaderList::from([("x-TRACE", "c")]);
        let merged = base.merge_over(&call);
        let entries: Vec<_> = merged.iter().collect();
        assert_eq!(entries, vec![("Accept", "text/plain"), ("x-TRACE", "c")]);
    }

    #[test]
    fn test_merge_over_empty_is_identity() {
        let base = HeaderList::from([("Accept", "text/plain")]);
        assert_eq!(base.merge_over(&HeaderList::new()), base);
    }

    #[test]
    fn test_invalid_header_name_rejected() {
        let list = HeaderList::from([("bad header", "v")]);
        assert!(matches!(list.to_header_map(), Err(RestError::InvalidHeader(_))));
    }

    #[test]
    fn test_invalid_header_value_rejected() {
        let list = HeaderList::from([("x-ok", "line\nbreak")]);
        assert!(matches!(list.to_header_map(), Err(RestError::InvalidHeader(_))));
    }
}
