use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};

use pennywise_core::transactions::{NewTransaction, TransactionUpdate, TransactionWithCategory};

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<TransactionWithCategory>>> {
    let transactions = state.transaction_service.get_transactions(&current.id)?;
    Ok(Json(transactions))
}

async fn get_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<TransactionWithCategory>> {
    let transaction = state
        .transaction_service
        .get_transaction(&id, &current.id)?
        .ok_or_else(|| ApiError::not_found("Transaction not found"))?;
    Ok(Json(transaction))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(new_transaction): Json<NewTransaction>,
) -> ApiResult<(StatusCode, Json<TransactionWithCategory>)> {
    let created = state
        .transaction_service
        .create_transaction(&current.id, new_transaction)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(update): Json<TransactionUpdate>,
) -> ApiResult<Json<TransactionWithCategory>> {
    let updated = state
        .transaction_service
        .update_transaction(&id, &current.id, update)
        .await?;
    Ok(Json(updated))
}

async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .transaction_service
        .delete_transaction(&id, &current.id)
        .await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Transaction not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}
