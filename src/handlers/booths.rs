use crate::{
    app::AppState,
    error::TollError,
    models::{ApiResponse, BoothSummary, FeeQuote, NetworkInfo, VehicleType},
    services::WalletService,
};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteQuery {
    pub vehicle_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkQuery {
    pub chain_id: String,
}

pub async fn list_booths(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BoothSummary>>>, TollError> {
    let transactions = state.store.list().await.map_err(TollError::FetchFailed)?;
    let summaries = state
        .booths
        .summaries(&transactions, Utc::now().date_naive());

    Ok(Json(ApiResponse::ok(summaries)))
}

/// Fee for one vehicle at one booth. Without a vehicle type the base (car)
/// fee is quoted.
pub async fn quote_fee(
    State(state): State<AppState>,
    Path(booth_id): Path<String>,
    query: Result<Query<QuoteQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<FeeQuote>>, TollError> {
    let Query(query) = query.map_err(|rejection| TollError::InvalidQuery(rejection.body_text()))?;
    let vehicle_type = match query.vehicle_type.as_deref() {
        None | Some("") => VehicleType::Car,
        Some(raw) => raw.parse().map_err(TollError::InvalidQuery)?,
    };

    let quote = state.booths.quote(&booth_id, vehicle_type, &state.wallet)?;
    Ok(Json(ApiResponse::ok(quote)))
}

pub async fn network_info(
    query: Result<Query<NetworkQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<NetworkInfo>>, TollError> {
    let Query(query) = query.map_err(|rejection| TollError::InvalidQuery(rejection.body_text()))?;
    Ok(Json(ApiResponse::ok(WalletService::network_info(&query.chain_id))))
}
