#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the caseload dashboard.
//!
//! Loads the case dataset once at startup and serves subject and class
//! congestion reports, as tables and as bar charts, over JSON. The dataset
//! is shared read-only between workers; nothing is mutated after startup.

pub mod config;
mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use caseload_analytics::filter_options;
use caseload_analytics_models::FilterOptions;
use caseload_server_models::ReportDefaults;
use caseload_source::{Dataset, SourceError};

pub use config::{ConfigError, ServerConfig};

/// Errors that prevent the server from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The dataset could not be loaded.
    #[error("Failed to load dataset: {0}")]
    Source(#[from] SourceError),

    /// The HTTP server failed to bind or crashed.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared application state.
pub struct AppState {
    /// The case dataset, loaded once and never mutated.
    pub dataset: Arc<Dataset>,
    /// District and year lists, computed once from `dataset`.
    pub filters: FilterOptions,
    /// Filter values applied when a request omits them.
    pub defaults: ReportDefaults,
}

impl AppState {
    /// Builds the state, precomputing the filter selector lists.
    #[must_use]
    pub fn new(dataset: Arc<Dataset>, defaults: ReportDefaults) -> Self {
        let filters = filter_options(&dataset);
        Self {
            dataset,
            filters,
            defaults,
        }
    }
}

/// Registers the dashboard routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::subject_table))
        .route("/classe", web::get().to(handlers::class_table))
        .route("/grafico-assunto", web::get().to(handlers::subject_chart))
        .route("/grafico-classe", web::get().to(handlers::class_chart))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .route("/filters", web::get().to(handlers::filters)),
        );
}

/// Starts the caseload dashboard server.
///
/// Loads the dataset named by `config`, then serves until shut down. This
/// is a regular async function; the caller provides the runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns [`ServerError::Source`] if the dataset cannot be loaded, and
/// [`ServerError::Io`] if the HTTP server fails to bind or run.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let dataset = Arc::new(caseload_source::load(&config.dataset_path)?);
    let state = web::Data::new(AppState::new(dataset, config.report_defaults()));

    log::info!(
        "Serving {} records across {} districts and {} years",
        state.dataset.len(),
        state.filters.districts.len(),
        state.filters.years.len()
    );

    let static_dir = config.static_dir.clone();
    let serve_static = static_dir.is_dir();
    if !serve_static {
        log::info!(
            "Static directory {} not found, skipping /static",
            static_dir.display()
        );
    }

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        let mut app = App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(routes);

        if serve_static {
            app = app.service(Files::new("/static", &static_dir));
        }

        app
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use caseload_case_models::CaseRecord;
    use caseload_server_models::{ApiChartResponse, ApiHealth, ApiTableResponse};
    use chrono::NaiveDate;

    use super::*;

    fn case(district: &str, filed: (i32, u32, u32), closed: Option<(i32, u32, u32)>) -> CaseRecord {
        CaseRecord {
            district: district.to_string(),
            filing_date: NaiveDate::from_ymd_opt(filed.0, filed.1, filed.2),
            closing_date: closed.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            action_area: "Cível".to_string(),
            subject: "Cobrança".to_string(),
            class: "Procedimento Comum".to_string(),
        }
    }

    fn state() -> web::Data<AppState> {
        let dataset = Dataset::from_records(vec![
            case("GOIANIRA", (2020, 1, 1), None),
            case("GOIANIRA", (2019, 1, 1), Some((2020, 2, 1))),
            case("TRINDADE", (2021, 1, 1), None),
        ]);
        web::Data::new(AppState::new(
            Arc::new(dataset),
            ReportDefaults {
                district: "GOIANIRA".to_string(),
                year: 2020,
            },
        ))
    }

    macro_rules! app {
        () => {
            test::init_service(App::new().app_data(state()).configure(routes)).await
        };
    }

    #[actix_web::test]
    async fn subject_table_uses_defaults() {
        let app = app!();
        let req = test::TestRequest::get().uri("/").to_request();
        let body: ApiTableResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.selected.district, "GOIANIRA");
        assert_eq!(body.selected.year, 2020);
        assert_eq!(body.table.columns[0], "Assunto");
        assert_eq!(body.table.rows.len(), 2);

        let row = &body.table.rows[0];
        assert_eq!(row.label, "Cobrança");
        assert_eq!((row.filed, row.closed, row.pending), (1, 1, 1));
        assert!((row.congestion_rate - 50.0).abs() < f64::EPSILON);
        assert!(body.table.rows[1].is_total);

        assert_eq!(
            body.filters,
            FilterOptions {
                districts: vec!["GOIANIRA".to_string(), "TRINDADE".to_string()],
                years: vec![2019, 2020, 2021],
            }
        );
    }

    #[actix_web::test]
    async fn class_table_groups_by_class() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/classe?comarca=GOIANIRA&ano=2020")
            .to_request();
        let body: ApiTableResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.table.columns[0], "Classe");
        assert_eq!(body.table.rows[0].label, "Procedimento Comum");
    }

    #[actix_web::test]
    async fn non_numeric_year_matches_default_year() {
        let app = app!();
        let invalid: ApiTableResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/?year=abc").to_request(),
        )
        .await;
        let explicit: ApiTableResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/?year=2020").to_request(),
        )
        .await;

        assert_eq!(invalid.selected, explicit.selected);
        assert_eq!(invalid.table, explicit.table);
    }

    #[actix_web::test]
    async fn repeated_parameters_use_first_value() {
        let app = app!();
        for uri in [
            "/?year=2020&year=2021",
            "/classe?year=2020&ano=2021",
            "/grafico-assunto?comarca=GOIANIRA&district=TRINDADE",
            "/grafico-classe?district=GOIANIRA&district=TRINDADE&year=2020&year=x",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{uri}");

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["selected"]["district"], "GOIANIRA", "{uri}");
            assert_eq!(body["selected"]["year"], 2020, "{uri}");
        }
    }

    #[actix_web::test]
    async fn unknown_district_returns_zero_totals() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/?district=NOWHERE&year=2020")
            .to_request();
        let body: ApiTableResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.table.rows.len(), 1);
        let total = &body.table.rows[0];
        assert!(total.is_total);
        assert_eq!((total.filed, total.closed, total.pending), (0, 0, 0));
        assert!(total.congestion_rate.abs() < f64::EPSILON);
    }

    #[actix_web::test]
    async fn charts_plot_groups_only() {
        let app = app!();
        for (uri, title) in [("/grafico-assunto", "Assunto"), ("/grafico-classe", "Classe")] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let body: ApiChartResponse = test::call_and_read_body_json(&app, req).await;

            assert_eq!(body.chart.x_axis_title, title);
            assert_eq!(body.chart.y_axis_range, [0.0, 100.0]);
            assert_eq!(body.chart.bars.len(), 1);
            assert!((body.chart.bars[0].value - 50.0).abs() < f64::EPSILON);
        }
    }

    #[actix_web::test]
    async fn health_reports_record_count() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: ApiHealth = test::read_body_json(resp).await;
        assert!(body.healthy);
        assert_eq!(body.records, 3);
    }

    #[actix_web::test]
    async fn filters_endpoint_lists_options() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/filters").to_request();
        let body: FilterOptions = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.years, vec![2019, 2020, 2021]);
    }
}
