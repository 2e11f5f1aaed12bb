//! HTTP adapter trait and its reqwest implementation

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use crate::client::build_client;
use crate::config::AdapterConfig;
use crate::error::{Error, TransportError};
use crate::form::{encode_form, FORM_CONTENT_TYPE};
use crate::options::{build_request_options, ExtraOptions, RequestOptions};
use crate::response::{parse_response, RawResponse};
use crate::url_builder::build_url;

/// Transport used by the API client to reach the Habrahabr API
///
/// Every request joins `path` onto the configured endpoint, attaches the
/// configured credentials and returns the decoded JSON body. Responses that
/// are not `application/json` fail with [`Error::Network`]; transport
/// failures are returned as [`Error::Transport`] and never retried.
#[async_trait]
pub trait HttpAdapter: Send + Sync + Debug {
    /// HTTP GET request
    async fn get(&self, path: &str) -> Result<Value, Error>;

    /// HTTP POST request with `params` sent as a form body
    async fn post(&self, path: &str, params: &Value) -> Result<Value, Error>;

    /// HTTP PUT request with `params` sent as a form body
    async fn put(&self, path: &str, params: &Value) -> Result<Value, Error>;

    /// HTTP DELETE request
    async fn delete(&self, path: &str) -> Result<Value, Error>;

    /// Set the base URL requests are made against
    fn set_endpoint(&mut self, endpoint: &str);

    /// Set the OAuth token
    fn set_token(&mut self, token: Option<&str>);

    /// Set the OAuth client id
    fn set_client(&mut self, client: Option<&str>);

    /// Set the API key
    fn set_apikey(&mut self, apikey: Option<&str>);

    /// Enable or disable TLS certificate verification
    fn set_strict_ssl(&mut self, strict_ssl: bool);

    /// Set the request timeout, zero disables it
    fn set_connection_timeout(&mut self, timeout: Duration);

    /// Base URL requests are made against
    fn endpoint(&self) -> &str;

    /// OAuth token
    fn token(&self) -> Option<&str>;

    /// OAuth client id
    fn client(&self) -> Option<&str>;

    /// API key
    fn apikey(&self) -> Option<&str>;

    /// Whether TLS certificates are verified
    fn strict_ssl(&self) -> bool;

    /// Request timeout
    fn connection_timeout(&self) -> Duration;
}

/// [`HttpAdapter`] backed by reqwest
#[derive(Debug, Clone, Default)]
pub struct ReqwestAdapter {
    config: AdapterConfig,
    extra: ExtraOptions,
}

impl ReqwestAdapter {
    /// Create a new adapter with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new adapter with additional transport options
    pub fn with_options(extra: ExtraOptions) -> Self {
        Self {
            config: AdapterConfig::default(),
            extra,
        }
    }

    /// Create a new adapter from loaded settings
    pub fn with_config(config: AdapterConfig, extra: ExtraOptions) -> Self {
        Self { config, extra }
    }

    /// Current settings
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Additional transport options supplied at construction
    pub fn extra_options(&self) -> &ExtraOptions {
        &self.extra
    }

    /// Options the next request will be sent with
    pub fn request_options(&self) -> RequestOptions {
        build_request_options(&self.config, &self.extra)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        form: Option<&Value>,
    ) -> Result<Value, Error> {
        let url = build_url(&self.config.endpoint, path);
        let options = self.request_options();
        let client = build_client(&options)?;

        let mut headers = header_map(&options)?;
        let mut request = client.request(method.clone(), url.as_str());

        if let Some(params) = form {
            let body = encode_form(params)?;
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
            request = request.body(body);
        }

        tracing::debug!(%method, %url, auth = options.has_auth(), "Sending request");

        let response = request.headers(headers).send().await?;
        let response = RawResponse::from_reqwest(response).await?;

        tracing::debug!(%method, %url, status = response.status(), "Received response");

        if options.http_errors && response.is_error() {
            return Err(TransportError::Status {
                status: response.status(),
                message: response.reason().to_string(),
            }
            .into());
        }

        parse_response(response)
    }
}

fn header_map(options: &RequestOptions) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::with_capacity(options.headers.len());
    for (name, value) in &options.headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            TransportError::Build(format!("Invalid header name '{name}': {e}"))
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            TransportError::Build(format!("Invalid value for header {name}: {e}"))
        })?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[async_trait]
impl HttpAdapter for ReqwestAdapter {
    #[instrument(skip(self))]
    async fn get(&self, path: &str) -> Result<Value, Error> {
        self.send(Method::GET, path, None).await
    }

    #[instrument(skip(self, params))]
    async fn post(&self, path: &str, params: &Value) -> Result<Value, Error> {
        self.send(Method::POST, path, Some(params)).await
    }

    #[instrument(skip(self, params))]
    async fn put(&self, path: &str, params: &Value) -> Result<Value, Error> {
        self.send(Method::PUT, path, Some(params)).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &str) -> Result<Value, Error> {
        self.send(Method::DELETE, path, None).await
    }

    fn set_endpoint(&mut self, endpoint: &str) {
        self.config.endpoint = endpoint.to_string();
    }

    fn set_token(&mut self, token: Option<&str>) {
        self.config.token = token.map(str::to_string);
    }

    fn set_client(&mut self, client: Option<&str>) {
        self.config.client = client.map(str::to_string);
    }

    fn set_apikey(&mut self, apikey: Option<&str>) {
        self.config.apikey = apikey.map(str::to_string);
    }

    fn set_strict_ssl(&mut self, strict_ssl: bool) {
        self.config.strict_ssl = strict_ssl;
    }

    fn set_connection_timeout(&mut self, timeout: Duration) {
        self.config.connection_timeout = timeout;
    }

    fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    fn token(&self) -> Option<&str> {
        self.config.token.as_deref()
    }

    fn client(&self) -> Option<&str> {
        self.config.client.as_deref()
    }

    fn apikey(&self) -> Option<&str> {
        self.config.apikey.as_deref()
    }

    fn strict_ssl(&self) -> bool {
        self.config.strict_ssl
    }

    fn connection_timeout(&self) -> Duration {
        self.config.connection_timeout
    }
}
