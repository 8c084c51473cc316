//! Query string helpers.

use itertools::Itertools;
use std::collections::BTreeMap;
use url::Url;

/// Query parameters for one call, kept sorted by name.
pub type Params = BTreeMap<String, String>;

/// Append `params` to `base` as a query string.
///
/// Values are concatenated as-is, no escaping is done.
///
/// # Example
/// ```
/// use ripe_atlas::query::{add_query_parameters, Params};
///
/// let mut params = Params::new();
/// params.insert("bar".to_string(), "baz".to_string());
/// assert_eq!(add_query_parameters("foo", &params), "foo?bar=baz");
/// assert_eq!(add_query_parameters("foo", &Params::new()), "foo");
/// ```
pub fn add_query_parameters(base: &str, params: &Params) -> String {
    if params.is_empty() {
        return base.to_string();
    }
    let query = params.iter().map(|(k, v)| format!("{}={}", k, v)).join("&");
    format!("{}?{}", base, query)
}

/// Extract the `page` parameter of a pagination link.
///
/// Returns an empty string when the URL is empty, does not parse or has no
/// `page` parameter.
pub fn get_page_num(url: &str) -> String {
    let Ok(url) = Url::parse(url) else {
        return String::new();
    };
    url.query_pairs()
        .find(|(k, _)| k == "page")
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default()
}
