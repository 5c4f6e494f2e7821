use crate::{
    app::AppState,
    error::TollError,
    models::{
        CreateTransactionRequest, SearchResponse, TransactionCreatedResponse,
        TransactionListResponse,
    },
    services::{intake::confirmation_message, SubmissionOutcome, TransactionFilter},
};
use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};

pub async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<TransactionListResponse>, TollError> {
    let transactions = state.store.list().await.map_err(TollError::FetchFailed)?;

    Ok(Json(TransactionListResponse {
        success: true,
        transactions,
    }))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<Json<TransactionCreatedResponse>, TollError> {
    let Json(request) = payload.map_err(|rejection| {
        state
            .analytics
            .record_submission(SubmissionOutcome::Rejected);
        TollError::InvalidRequest(rejection.body_text())
    })?;

    match state.intake.submit(request).await {
        Ok(transaction) => {
            state
                .analytics
                .record_submission(SubmissionOutcome::Confirmed);
            let message = confirmation_message(transaction.payment_method).to_string();
            Ok(Json(TransactionCreatedResponse {
                success: true,
                transaction,
                message,
            }))
        }
        Err(err) => {
            let outcome = match err {
                TollError::VerificationFailed => SubmissionOutcome::VerificationFailed,
                _ => SubmissionOutcome::Rejected,
            };
            state.analytics.record_submission(outcome);
            Err(err)
        }
    }
}

pub async fn search_transactions(
    State(state): State<AppState>,
    query: Result<Query<TransactionFilter>, QueryRejection>,
) -> Result<Json<SearchResponse>, TollError> {
    let Query(filter) = query.map_err(|rejection| TollError::InvalidQuery(rejection.body_text()))?;

    let transactions = state.store.list().await.map_err(TollError::FetchFailed)?;
    let matched = filter.apply(&transactions);

    tracing::debug!(
        matched = matched.len(),
        total = transactions.len(),
        "Filtered transactions"
    );

    Ok(Json(SearchResponse {
        success: true,
        total: matched.len(),
        transactions: matched,
        active_filters: filter.active_filters(),
    }))
}
