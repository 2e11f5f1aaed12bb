//! Transport client construction

use crate::error::TransportError;
use crate::options::RequestOptions;

/// Build a transport client reflecting the given request options
///
/// A fresh client is built for every call so that each request observes the
/// adapter configuration current at call time. Headers are attached to the
/// request rather than the client.
pub(crate) fn build_client(options: &RequestOptions) -> Result<reqwest::Client, TransportError> {
    if rustls::crypto::CryptoProvider::get_default().is_none() {
        let _ = rustls::crypto::ring::default_provider().install_default();
    }

    let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(!options.verify);

    if !options.timeout.is_zero() {
        builder = builder.timeout(options.timeout);
    }

    if let Some(user_agent) = &options.user_agent {
        builder = builder.user_agent(user_agent.as_str());
    }

    if let Some(proxy_url) = &options.proxy {
        let proxy = reqwest::Proxy::all(proxy_url.as_str())
            .map_err(|e| TransportError::Proxy(e.to_string()))?;
        builder = builder.proxy(proxy);
    }

    builder.build().map_err(TransportError::from)
}
