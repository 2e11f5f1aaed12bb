//! Per-request transport options

use std::collections::BTreeMap;
use std::time::Duration;

use url::Url;

use crate::config::AdapterConfig;

/// Header carrying the OAuth client id
pub const HEADER_CLIENT: &str = "client";
/// Header carrying the OAuth token
pub const HEADER_TOKEN: &str = "token";
/// Header carrying the API key
pub const HEADER_APIKEY: &str = "apikey";

/// Caller supplied transport options
///
/// Every field that is `Some` replaces the value computed from the adapter
/// configuration. A supplied `headers` map replaces the default empty map as
/// a whole; auth headers are still added on top of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraOptions {
    /// Headers sent with every request
    pub headers: Option<BTreeMap<String, String>>,
    /// Fail with a transport error on 4xx/5xx responses
    pub http_errors: Option<bool>,
    /// Request timeout, replaces the configured connection timeout
    pub timeout: Option<Duration>,
    /// Proxy every request is routed through
    pub proxy: Option<Url>,
    /// `User-Agent` header value
    pub user_agent: Option<String>,
}

impl ExtraOptions {
    /// Add a header sent with every request
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Fail on 4xx/5xx responses instead of parsing them
    pub fn http_errors(mut self, http_errors: bool) -> Self {
        self.http_errors = Some(http_errors);
        self
    }

    /// Override the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a proxy URL
    pub fn proxy(mut self, url: Url) -> Self {
        self.proxy = Some(url);
        self
    }

    /// Set the `User-Agent` header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Fully merged options handed to the transport for a single call
#[derive(Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// Request headers, auth headers included
    pub headers: BTreeMap<String, String>,
    /// Fail with a transport error on 4xx/5xx responses
    pub http_errors: bool,
    /// Verify the server TLS certificate
    pub verify: bool,
    /// Request timeout, zero disables it
    pub timeout: Duration,
    /// Proxy every request is routed through
    pub proxy: Option<Url>,
    /// `User-Agent` header value
    pub user_agent: Option<String>,
}

impl RequestOptions {
    /// Whether any auth header is present
    pub fn has_auth(&self) -> bool {
        [HEADER_CLIENT, HEADER_TOKEN, HEADER_APIKEY]
            .iter()
            .any(|name| self.headers.contains_key(*name))
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
        self.headers.insert(name.to_string(), value.to_string());
    }
}

impl std::fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: BTreeMap<&str, &str> = self
            .headers
            .iter()
            .map(|(key, value)| {
                if key == HEADER_TOKEN || key == HEADER_APIKEY {
                    (key.as_str(), "<redacted>")
                } else {
                    (key.as_str(), value.as_str())
                }
            })
            .collect();

        f.debug_struct("RequestOptions")
            .field("headers", &headers)
            .field("http_errors", &self.http_errors)
            .field("verify", &self.verify)
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Merge the adapter configuration and extra options into request options
///
/// Defaults come first, extra options override them, and auth headers are
/// applied last so they win over same-named extra headers. A client/token
/// pair takes precedence over an API key.
pub fn build_request_options(config: &AdapterConfig, extra: &ExtraOptions) -> RequestOptions {
    let mut options = RequestOptions {
        headers: extra.headers.clone().unwrap_or_default(),
        http_errors: extra.http_errors.unwrap_or(false),
        verify: config.strict_ssl,
        timeout: extra.timeout.unwrap_or(config.connection_timeout),
        proxy: extra.proxy.clone(),
        user_agent: extra.user_agent.clone(),
    };

    match (&config.client, &config.token, &config.apikey) {
        (Some(client), Some(token), _) => {
            options.set_header(HEADER_CLIENT, client);
            options.set_header(HEADER_TOKEN, token);
        }
        (_, _, Some(apikey)) => options.set_header(HEADER_APIKEY, apikey),
        _ => {}
    }

    options
}
