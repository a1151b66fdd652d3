#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the caseload dashboard.
//!
//! Starts the HTTP server or prints congestion reports straight to the
//! terminal. Running without a subcommand drops into an interactive menu.

mod interactive;
mod render;

use std::path::{Path, PathBuf};

use caseload_analytics::{aggregate, distinct_districts, distinct_years};
use caseload_case_models::Dimension;
use caseload_server::ServerConfig;
use caseload_server_models::{ApiChart, ApiTable};
use caseload_source::Dataset;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "caseload", about = "Court caseload congestion dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard HTTP server
    Serve {
        /// CSV dataset to load (overrides `CASELOAD_DATASET`)
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Address to bind to (overrides `BIND_ADDR`)
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (overrides `PORT`)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print a congestion report for one district and year
    Report {
        /// CSV dataset to load (overrides `CASELOAD_DATASET`)
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Court district (comarca)
        #[arg(long)]
        district: Option<String>,
        /// Year; non-numeric values fall back to the default year
        #[arg(long)]
        year: Option<String>,
        /// Secondary grouping: `subject` or `class`
        #[arg(long, default_value = "subject")]
        by: Dimension,
        /// Print a bar chart of the congestion rate instead of a table
        #[arg(long)]
        chart: bool,
    },
    /// List the districts present in the dataset
    Districts {
        /// CSV dataset to load (overrides `CASELOAD_DATASET`)
        #[arg(long)]
        dataset: Option<PathBuf>,
    },
    /// List the filing years present in the dataset
    Years {
        /// CSV dataset to load (overrides `CASELOAD_DATASET`)
        #[arg(long)]
        dataset: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();
    let mut config = ServerConfig::load()?;

    let Some(command) = cli.command else {
        return interactive::run(config).await;
    };

    match command {
        Commands::Serve {
            dataset,
            bind,
            port,
        } => {
            if let Some(dataset) = dataset {
                config.dataset_path = dataset;
            }
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await?;
        }
        Commands::Report {
            dataset,
            district,
            year,
            by,
            chart,
        } => {
            let data = load_dataset(dataset.as_deref(), &config)?;
            let defaults = config.report_defaults();
            let district = district.unwrap_or(defaults.district);
            let year = caseload_server_models::coerce_year(year.as_deref(), defaults.year);
            print_report(&data, &district, year, by, chart);
        }
        Commands::Districts { dataset } => {
            let data = load_dataset(dataset.as_deref(), &config)?;
            for district in distinct_districts(&data) {
                println!("{district}");
            }
        }
        Commands::Years { dataset } => {
            let data = load_dataset(dataset.as_deref(), &config)?;
            for year in distinct_years(&data) {
                println!("{year}");
            }
        }
    }

    Ok(())
}

/// Runs the server on its own actix system.
///
/// The server uses actix-web's runtime, so it runs in a blocking task to
/// avoid nesting tokio runtimes.
async fn serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    tokio::task::spawn_blocking(move || {
        actix_web::rt::System::new().block_on(caseload_server::run_server(config))
    })
    .await??;
    Ok(())
}

fn load_dataset(
    path: Option<&Path>,
    config: &ServerConfig,
) -> Result<Dataset, caseload_source::SourceError> {
    let path = path.unwrap_or(config.dataset_path.as_path());
    let dataset = caseload_source::load(path)?;
    if dataset.is_empty() {
        log::warn!("{} contains no case records", path.display());
    }
    Ok(dataset)
}

fn print_report(data: &Dataset, district: &str, year: i32, dimension: Dimension, chart: bool) {
    let report = aggregate(data, district, year, dimension);
    println!("{district} / {year}");
    println!();
    if chart {
        print!("{}", render::render_chart(&ApiChart::from(&report)));
    } else {
        print!("{}", render::render_table(&ApiTable::from(&report)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_parses_dimension_argument() {
        let cli = Cli::try_parse_from(["caseload", "report", "--by", "class", "--year", "abc"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Report {
                by: Dimension::Class,
                ref year,
                ..
            }) if year.as_deref() == Some("abc")
        ));

        let cli = Cli::try_parse_from(["caseload", "report"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Report {
                by: Dimension::Subject,
                chart: false,
                ..
            })
        ));
    }

    #[test]
    fn report_rejects_unknown_dimension() {
        assert!(Cli::try_parse_from(["caseload", "report", "--by", "judge"]).is_err());
    }
}
