//! Wallet endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::Money;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::context::Caller;
use crate::error::ApiError;
use accounts::wallet_funds;
use payments::PaymentsLedger;

#[derive(Deserialize)]
pub struct AddFundsRequest {
    pub amount: Money,
}

#[derive(Serialize)]
pub struct WalletResponse {
    pub amount: Money,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFundsResponse {
    pub code: u16,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
}

/// GET /wallet — the caller's own balance.
///
/// Goes through the guarded resolution path: the ledger is only consulted
/// after the owner check, so no caller can read another user's balance.
#[tracing::instrument(skip(state, ctx))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
) -> Result<Json<WalletResponse>, ApiError> {
    let user = ctx.require_user()?;
    let amount = wallet_funds(&state.payments, &user.id, &ctx).await?;
    Ok(Json(WalletResponse { amount }))
}

/// POST /wallet/funds — top up the caller's wallet.
#[tracing::instrument(skip(state, ctx, req))]
pub async fn add_funds(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
    Json(req): Json<AddFundsRequest>,
) -> Result<Json<AddFundsResponse>, ApiError> {
    let user = ctx.require_user()?;

    let response = match state.payments.add_funds(&user.id, req.amount).await {
        Ok(wallet) => AddFundsResponse {
            code: 200,
            success: true,
            message: "Successfully added funds to wallet".to_string(),
            amount: Some(wallet.amount),
        },
        Err(e) => AddFundsResponse {
            code: 400,
            success: false,
            message: e.to_string(),
            amount: None,
        },
    };
    Ok(Json(response))
}
