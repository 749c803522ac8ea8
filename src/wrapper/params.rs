//! URL suffixes appended to a wrapper's base URL.

use std::collections::{BTreeMap, HashMap};

/// What follows the base URL in a request.
///
/// A path is appended as-is. Pairs are rendered as `key=value` joined by `&`,
/// also without escaping, so the caller controls the exact bytes sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlParams {
    Path(String),
    Pairs(Vec<(String, String)>),
}

impl UrlParams {
    /// The string appended to the base URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use apilink::UrlParams;
    ///
    /// assert_eq!(UrlParams::from("users/1").render(), "users/1");
    /// assert_eq!(UrlParams::from(vec![("a", "1"), ("b", "2")]).render(), "a=1&b=2");
    /// ```
    pub fn render(&self) -> String {
        match self {
            UrlParams::Path(path) => path.clone(),
            UrlParams::Pairs(pairs) => pairs
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect::<Vec<_>>()
                .join("&"),
        }
    }
}

impl Default for UrlParams {
    fn default() -> Self {
        UrlParams::Path(String::new())
    }
}

impl From<&str> for UrlParams {
    fn from(path: &str) -> Self {
        UrlParams::Path(path.to_string())
    }
}

impl From<String> for UrlParams {
    fn from(path: String) -> Self {
        UrlParams::Path(path)
    }
}

impl From<&String> for UrlParams {
    fn from(path: &String) -> Self {
        UrlParams::Path(path.clone())
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for UrlParams {
    fn from(pairs: Vec<(K, V)>) -> Self {
        UrlParams::Pairs(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for UrlParams {
    fn from(pairs: [(K, V); N]) -> Self {
        UrlParams::from(Vec::from(pairs))
    }
}

impl<K: Into<String>, V: Into<String>> From<BTreeMap<K, V>> for UrlParams {
    fn from(pairs: BTreeMap<K, V>) -> Self {
        UrlParams::from(pairs.into_iter().collect::<Vec<_>>())
    }
}

// Rendered in the map's iteration order
impl<K: Into<String>, V: Into<String>> From<HashMap<K, V>> for UrlParams {
    fn from(pairs: HashMap<K, V>) -> Self {
        UrlParams::from(pairs.into_iter().collect::<Vec<_>>())
    }
}
