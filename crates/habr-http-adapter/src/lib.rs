//! HTTP transport adapter for the Habrahabr API client
//!
//! The adapter turns a resource path and an HTTP verb into a request against
//! the configured API endpoint, authenticates it with either a client/token
//! header pair or an API key, and decodes the JSON response body.
//!
//! Responses without an `application/json` content type are rejected with
//! [`Error::Network`] whatever their status code. Transport failures surface
//! as [`Error::Transport`].
//!
//! # Example
//!
//! ```no_run
//! use habr_http_adapter::{HttpAdapter, ReqwestAdapter};
//!
//! async fn example() -> Result<(), habr_http_adapter::Error> {
//!     let mut adapter = ReqwestAdapter::new();
//!     adapter.set_endpoint("https://api.habrahabr.ru/v1");
//!     adapter.set_client(Some("foo.bar"));
//!     adapter.set_token(Some("secret"));
//!
//!     let user = adapter.get("/users/me").await?;
//!     println!("{}", user["data"]["login"]);
//!     Ok(())
//! }
//! ```

mod adapter;
mod client;
pub mod config;
mod error;
mod form;
mod options;
mod response;
mod url_builder;

pub use adapter::{HttpAdapter, ReqwestAdapter};
pub use crate::config::AdapterConfig;
pub use error::{Error, TransportError};
pub use form::{encode_form, FORM_CONTENT_TYPE};
pub use options::{
    build_request_options, ExtraOptions, RequestOptions, HEADER_APIKEY, HEADER_CLIENT,
    HEADER_TOKEN,
};
pub use response::{is_falsy, parse_response, primary_media_type, RawResponse, JSON_MEDIA_TYPE};
pub use url_builder::build_url;
