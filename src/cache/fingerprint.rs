//! Request fingerprints used as cache keys

/// Separator between the endpoint and each `key_value` part
const CONNECTOR: &str = "_";

/// Builds the cache key identifying a request by endpoint and parameters
///
/// Each parameter becomes `key_value`; those strings are sorted
/// lexicographically as whole strings (not by key) and appended to the
/// endpoint, all joined with `_`. Existing cache files rely on this exact
/// layout, e.g. `https://api/search_limit_50_location_Ann Arbor_term_Indian`.
///
/// # Example
///
/// ```
/// use tastemap::cache::fingerprint;
///
/// let key = fingerprint("https://api.example.com/search", &[("term", "Indian"), ("limit", "50")]);
/// assert_eq!(key, "https://api.example.com/search_limit_50_term_Indian");
/// ```
pub fn fingerprint(endpoint: &str, params: &[(&str, &str)]) -> String {
    let mut parts: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{}{}{}", key, CONNECTOR, value))
        .collect();
    parts.sort();

    format!("{}{}{}", endpoint, CONNECTOR, parts.join(CONNECTOR))
}
