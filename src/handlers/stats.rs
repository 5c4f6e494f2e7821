use crate::{
    app::AppState,
    error::TollError,
    models::{AnalyticsReport, ApiResponse, Stats, TimeRange},
    services::analytics::build_report,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub range: Option<String>,
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>, TollError> {
    let transactions = state.store.list().await.map_err(TollError::FetchFailed)?;
    Ok(Json(state.analytics.stats(&transactions)))
}

pub async fn get_analytics(
    State(state): State<AppState>,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<AnalyticsReport>>, TollError> {
    let Query(query) = query.map_err(|rejection| TollError::InvalidQuery(rejection.body_text()))?;
    let range = match query.range.as_deref() {
        None | Some("") => TimeRange::default(),
        Some(raw) => raw.parse().map_err(TollError::InvalidQuery)?,
    };

    let transactions = state.store.list().await.map_err(TollError::FetchFailed)?;
    let report = build_report(&transactions, range, Utc::now());

    Ok(Json(ApiResponse::ok(report)))
}
