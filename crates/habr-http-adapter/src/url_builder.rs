//! Request URL construction

/// Join the configured endpoint and a resource path
///
/// Exactly one `/` separates the two parts whether or not the endpoint ends
/// with one or the path starts with one. The path, including any query
/// string, is used verbatim and is not re-encoded.
pub fn build_url(endpoint: &str, path: &str) -> String {
    let endpoint = endpoint.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    let mut url = String::with_capacity(endpoint.len() + path.len() + 1);
    url.push_str(endpoint);
    url.push('/');
    url.push_str(path);
    url
}
