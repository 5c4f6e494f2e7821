use crate::{
    app::AppState,
    error::TollError,
    models::BlockchainResponse,
    services::ledger::verify_chain,
};
use axum::{extract::State, Json};

/// Rebuilds the simulated chain from the current store contents.
pub async fn get_blocks(
    State(state): State<AppState>,
) -> Result<Json<BlockchainResponse>, TollError> {
    let transactions = state.store.list().await.map_err(TollError::FetchFailed)?;
    let blocks = state.blocks.build(&transactions);

    Ok(Json(BlockchainResponse {
        success: true,
        total_blocks: blocks.len(),
        total_transactions: transactions.len(),
        chain_valid: verify_chain(&blocks),
        blocks,
    }))
}
