use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Multipart, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pennywise_core::transactions::{
    parse_transactions_csv, write_transactions_csv, NewTransaction, TransactionKind,
};

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportResult {
    imported: usize,
    skipped: usize,
}

async fn import_csv(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> ApiResult<Json<ImportResult>> {
    let mut file_bytes = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;
        file_bytes = Some(bytes);
        break;
    }
    let file_bytes = file_bytes.ok_or_else(|| ApiError::bad_request("No CSV file uploaded"))?;

    let parsed = parse_transactions_csv(file_bytes.as_ref())?;

    // Categories are referenced by name in import files.
    let categories_by_name: HashMap<String, String> = state
        .category_service
        .list_categories(&current.id, None)?
        .into_iter()
        .map(|c| (c.name.to_lowercase(), c.id))
        .collect();

    let mut imported = 0usize;
    let mut skipped = parsed.skipped;
    for row in parsed.rows {
        let category_id = row
            .category
            .as_ref()
            .and_then(|name| categories_by_name.get(&name.to_lowercase()))
            .cloned();
        let result = state
            .transaction_service
            .create_transaction(
                &current.id,
                NewTransaction {
                    category_id,
                    amount: row.amount,
                    description: row.description,
                    date: row.date,
                    kind: row.kind,
                    payment_method: row.payment_method,
                    tags: row.tags,
                },
            )
            .await;
        match result {
            Ok(_) => imported += 1,
            Err(e) => {
                tracing::warn!("Skipping CSV row: {}", e);
                skipped += 1;
            }
        }
    }

    Ok(Json(ImportResult { imported, skipped }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportQuery {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    kind: Option<TransactionKind>,
    category: Option<String>,
}

async fn export_csv(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<Response> {
    let transactions: Vec<_> = state
        .transaction_service
        .get_transactions(&current.id)?
        .into_iter()
        .filter(|t| query.start_date.map_or(true, |d| t.transaction.date >= d))
        .filter(|t| query.end_date.map_or(true, |d| t.transaction.date <= d))
        .filter(|t| query.kind.map_or(true, |k| t.transaction.kind == k))
        .filter(|t| {
            query.category.as_ref().map_or(true, |name| {
                t.category
                    .as_ref()
                    .is_some_and(|c| c.name.eq_ignore_ascii_case(name))
            })
        })
        .collect();

    let mut buffer = Vec::new();
    write_transactions_csv(&mut buffer, &transactions)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"transactions.csv\"",
            ),
        ],
        buffer,
    )
        .into_response())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/csv/import", post(import_csv))
        .route("/csv/export", get(export_csv))
}
