#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone entry point for the caseload dashboard server.
//!
//! Configuration comes from `CASELOAD_CONFIG` and the environment; see
//! [`caseload_server::ServerConfig`].

use caseload_server::{ServerConfig, run_server};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = ServerConfig::load()?;
    if let Err(e) = run_server(config).await {
        log::error!("{e}");
        return Err(e.into());
    }

    Ok(())
}
