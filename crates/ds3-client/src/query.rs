//! Query string construction.

use std::collections::BTreeMap;

/// Serialize query parameters as `key1=value1&key2=value2`.
///
/// Entries appear in key order. Keys and values are written as given. An
/// empty map yields an empty string, and [`resolve_url`] then appends no `?`.
#[must_use]
pub fn build_query_string(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Resolve the full request URL: `endpoint + path [+ "?" + query]`.
#[must_use]
pub fn resolve_url(endpoint: &str, path: &str, params: &BTreeMap<String, String>) -> String {
    let query = build_query_string(params);
    if query.is_empty() {
        format!("{endpoint}{path}")
    } else {
        format!("{endpoint}{path}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_should_return_empty_string_for_no_params() {
        assert_eq!(build_query_string(&BTreeMap::new()), "");
    }

    #[test]
    fn test_should_join_n_pairs_with_ampersand() {
        for n in 1..=4 {
            let entries: Vec<(String, String)> = (0..n)
                .map(|i| (format!("k{i}"), format!("v{i}")))
                .collect();
            let map: BTreeMap<_, _> = entries.into_iter().collect();
            let query = build_query_string(&map);

            let tokens: Vec<&str> = query.split('&').collect();
            assert_eq!(tokens.len(), n);
            for (i, token) in tokens.iter().enumerate() {
                assert_eq!(*token, format!("k{i}=v{i}"));
            }
        }
    }

    #[test]
    fn test_should_not_append_question_mark_without_params() {
        let url = resolve_url("http://localhost:8080", "/bucket", &BTreeMap::new());
        assert_eq!(url, "http://localhost:8080/bucket");
    }

    #[test]
    fn test_should_append_query_to_url() {
        let url = resolve_url(
            "http://localhost:8080",
            "/_rest_/bucket/photos",
            &params(&[("operation", "start_bulk_put")]),
        );
        assert_eq!(
            url,
            "http://localhost:8080/_rest_/bucket/photos?operation=start_bulk_put"
        );
    }
}
