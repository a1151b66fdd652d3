//! Interactive mode for the server.
//!
//! Prompts for the dataset path, bind address and port before starting.

use std::path::PathBuf;

use dialoguer::{Confirm, Input};

use crate::{ServerConfig, ServerError};

/// Runs the server in interactive mode, prompting for configuration.
///
/// Prompts are pre-filled from `base`, which is usually the result of
/// [`ServerConfig::load`]. Delegates to [`super::run_server`].
///
/// # Errors
///
/// Returns [`ServerError`] if the dataset cannot be loaded or the server
/// fails to start.
#[allow(clippy::future_not_send)]
pub async fn run(base: ServerConfig) -> Result<(), ServerError> {
    println!("Caseload Dashboard Server");
    println!();

    let dataset: String = Input::new()
        .with_prompt("Dataset CSV")
        .default(base.dataset_path.display().to_string())
        .interact_text()
        .unwrap_or_else(|_| base.dataset_path.display().to_string());

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(base.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| base.bind_addr.clone());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(base.port)
        .interact_text()
        .unwrap_or(base.port);

    let config = ServerConfig {
        dataset_path: PathBuf::from(dataset),
        bind_addr,
        port,
        ..base
    };

    if !Confirm::new()
        .with_prompt(format!(
            "Serve {} on {}:{}?",
            config.dataset_path.display(),
            config.bind_addr,
            config.port
        ))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(config).await
}
