//! Fetch the authenticated user's profile
//!
//! Reads `HABR_ENDPOINT`, `HABR_CLIENT` and `HABR_TOKEN` (or `HABR_APIKEY`)
//! from the environment.

use habr_http_adapter::{AdapterConfig, ExtraOptions, HttpAdapter, ReqwestAdapter};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let default_filter = "debug";

    let http_filter = "hyper_util=warn,reqwest=warn,rustls=warn";

    let env_filter = EnvFilter::new(format!("{},{}", default_filter, http_filter));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = AdapterConfig::default().from_env();

    let mut adapter = ReqwestAdapter::with_config(config, ExtraOptions::default());
    adapter.set_strict_ssl(true);

    let user = adapter.get("/users/me").await?;
    println!("User: {:#}", user);

    Ok(())
}
