//! HTTP handler functions for the caseload dashboard.

use actix_web::{HttpResponse, web};
use caseload_analytics::aggregate;
use caseload_case_models::Dimension;
use caseload_server_models::{
    ApiChart, ApiChartResponse, ApiHealth, ApiTable, ApiTableResponse, ReportQueryParams,
};

use crate::AppState;

/// Raw query pairs. Repeated keys are allowed here and resolved by
/// [`ReportQueryParams`]'s `FromIterator`, which keeps the first value.
type QueryPairs = web::Query<Vec<(String, String)>>;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.dataset.len() as u64,
    })
}

/// `GET /api/filters`
///
/// Returns the district and year lists for the filter selectors.
pub async fn filters(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.filters)
}

/// `GET /`
pub async fn subject_table(state: web::Data<AppState>, query: QueryPairs) -> HttpResponse {
    table(&state, query, Dimension::Subject)
}

/// `GET /classe`
pub async fn class_table(state: web::Data<AppState>, query: QueryPairs) -> HttpResponse {
    table(&state, query, Dimension::Class)
}

/// `GET /grafico-assunto`
pub async fn subject_chart(state: web::Data<AppState>, query: QueryPairs) -> HttpResponse {
    chart(&state, query, Dimension::Subject)
}

/// `GET /grafico-classe`
pub async fn class_chart(state: web::Data<AppState>, query: QueryPairs) -> HttpResponse {
    chart(&state, query, Dimension::Class)
}

fn table(state: &AppState, query: QueryPairs, dimension: Dimension) -> HttpResponse {
    let params: ReportQueryParams = query.into_inner().into_iter().collect();
    let selected = params.resolve(&state.defaults);
    let report = aggregate(&state.dataset, &selected.district, selected.year, dimension);

    HttpResponse::Ok().json(ApiTableResponse {
        table: ApiTable::from(&report),
        filters: state.filters.clone(),
        selected,
    })
}

fn chart(state: &AppState, query: QueryPairs, dimension: Dimension) -> HttpResponse {
    let params: ReportQueryParams = query.into_inner().into_iter().collect();
    let selected = params.resolve(&state.defaults);
    let report = aggregate(&state.dataset, &selected.district, selected.year, dimension);

    HttpResponse::Ok().json(ApiChartResponse {
        chart: ApiChart::from(&report),
        filters: state.filters.clone(),
        selected,
    })
}
