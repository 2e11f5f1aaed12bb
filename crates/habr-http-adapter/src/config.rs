//! Adapter configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

/// Environment variable holding the API endpoint
pub const ENV_ENDPOINT: &str = "HABR_ENDPOINT";
/// Environment variable holding the OAuth client id
pub const ENV_CLIENT: &str = "HABR_CLIENT";
/// Environment variable holding the OAuth token
pub const ENV_TOKEN: &str = "HABR_TOKEN";
/// Environment variable holding the API key
pub const ENV_APIKEY: &str = "HABR_APIKEY";
/// Environment variable toggling certificate verification
pub const ENV_STRICT_SSL: &str = "HABR_STRICT_SSL";
/// Environment variable holding the timeout in seconds
pub const ENV_CONNECTION_TIMEOUT: &str = "HABR_CONNECTION_TIMEOUT";

/// Default request timeout in seconds
pub const DEFAULT_CONNECTION_TIMEOUT: u64 = 5;

/// Connection and authentication settings of an adapter
///
/// `endpoint` must be set before any request is made; it is not validated
/// here and an unusable value surfaces as a transport error on the first call.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Base URL every request path is appended to
    pub endpoint: String,
    /// Verify the server TLS certificate
    pub strict_ssl: bool,
    /// Request timeout, zero disables it
    #[serde(with = "duration_secs")]
    pub connection_timeout: Duration,
    /// OAuth client id, sent together with `token`
    pub client: Option<String>,
    /// OAuth token, sent together with `client`
    pub token: Option<String>,
    /// API key, used when no client/token pair is configured
    pub apikey: Option<String>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            strict_ssl: true,
            connection_timeout: Duration::from_secs(DEFAULT_CONNECTION_TIMEOUT),
            client: None,
            token: None,
            apikey: None,
        }
    }
}

impl std::fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("endpoint", &self.endpoint)
            .field("strict_ssl", &self.strict_ssl)
            .field("connection_timeout", &self.connection_timeout)
            .field("client", &self.client)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("apikey", &self.apikey.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AdapterConfig {
    /// Load settings from a TOML file layered over the defaults
    pub fn from_file<P>(path: P) -> Result<Self, ConfigError>
    where
        P: Into<PathBuf>,
    {
        let path: PathBuf = path.into();
        let path = path
            .to_str()
            .ok_or_else(|| ConfigError::Message("config path is not valid UTF-8".to_string()))?
            .to_string();

        let config = Config::builder()
            // use defaults
            .add_source(Config::try_from(&Self::default())?)
            // override with file contents
            .add_source(File::with_name(&path))
            .build()?;

        config.try_deserialize()
    }

    /// Override settings from `HABR_*` environment variables
    ///
    /// Variables that are unset or fail to parse leave the value untouched.
    pub fn from_env(mut self) -> Self {
        if let Ok(endpoint) = env::var(ENV_ENDPOINT) {
            self.endpoint = endpoint;
        }

        if let Ok(client) = env::var(ENV_CLIENT) {
            self.client = Some(client);
        }

        if let Ok(token) = env::var(ENV_TOKEN) {
            self.token = Some(token);
        }

        if let Ok(apikey) = env::var(ENV_APIKEY) {
            self.apikey = Some(apikey);
        }

        if let Ok(strict_ssl) = env::var(ENV_STRICT_SSL) {
            if let Ok(strict_ssl) = strict_ssl.parse() {
                self.strict_ssl = strict_ssl;
            }
        }

        if let Ok(timeout) = env::var(ENV_CONNECTION_TIMEOUT) {
            if let Ok(secs) = timeout.parse() {
                self.connection_timeout = Duration::from_secs(secs);
            }
        }

        self
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
