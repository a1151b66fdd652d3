//! Interactive menu shown when no subcommand is given.

use std::path::PathBuf;

use caseload_analytics::{distinct_districts, distinct_years};
use caseload_case_models::Dimension;
use caseload_server::ServerConfig;
use dialoguer::{Confirm, Input, Select};

/// Top-level actions offered by the menu.
enum Action {
    Serve,
    Report,
    Districts,
    Years,
}

impl Action {
    const ALL: &[Self] = &[Self::Serve, Self::Report, Self::Districts, Self::Years];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Serve => "Start server",
            Self::Report => "Print a congestion report",
            Self::Districts => "List districts",
            Self::Years => "List years",
        }
    }
}

/// Prompts for an action and its inputs, then runs it.
///
/// # Errors
///
/// Returns an error if a prompt fails, the dataset cannot be loaded, or
/// the server fails to start.
pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Caseload Dashboard");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();
    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    if matches!(Action::ALL[idx], Action::Serve) {
        // The server uses actix-web's runtime, so we need to run it
        // in a blocking task to avoid nesting tokio runtimes.
        tokio::task::spawn_blocking(move || {
            actix_web::rt::System::new().block_on(caseload_server::interactive::run(config))
        })
        .await??;
        return Ok(());
    }

    let dataset_path: String = Input::new()
        .with_prompt("Dataset CSV")
        .default(config.dataset_path.display().to_string())
        .interact_text()?;
    let data = caseload_source::load(&PathBuf::from(dataset_path))?;

    match Action::ALL[idx] {
        Action::Serve => {}
        Action::Districts => {
            for district in distinct_districts(&data) {
                println!("{district}");
            }
        }
        Action::Years => {
            for year in distinct_years(&data) {
                println!("{year}");
            }
        }
        Action::Report => {
            let districts = distinct_districts(&data);
            let years = distinct_years(&data);
            if districts.is_empty() || years.is_empty() {
                println!("The dataset has no districts or filing years to report on.");
                return Ok(());
            }

            let district_idx = Select::new()
                .with_prompt("District")
                .items(&districts)
                .default(
                    districts
                        .iter()
                        .position(|d| *d == config.default_district)
                        .unwrap_or(0),
                )
                .interact()?;

            let year_labels: Vec<String> = years.iter().map(ToString::to_string).collect();
            let year_idx = Select::new()
                .with_prompt("Year")
                .items(&year_labels)
                .default(
                    years
                        .iter()
                        .position(|y| *y == config.default_year)
                        .unwrap_or(years.len() - 1),
                )
                .interact()?;

            let dimension_labels: Vec<&str> =
                Dimension::all().iter().map(|d| d.label()).collect();
            let dimension_idx = Select::new()
                .with_prompt("Group by")
                .items(&dimension_labels)
                .default(0)
                .interact()?;

            let chart = Confirm::new()
                .with_prompt("Show as a chart?")
                .default(false)
                .interact()?;

            crate::print_report(
                &data,
                &districts[district_idx],
                years[year_idx],
                Dimension::all()[dimension_idx],
                chart,
            );
        }
    }

    Ok(())
}
