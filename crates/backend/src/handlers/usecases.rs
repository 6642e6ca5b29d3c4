use axum::{http::StatusCode, Json};
use contracts::usecases::common::UseCaseError;
use contracts::usecases::u501_import_events_csv::{
    ImportRequest, ImportResult, ParseRequest, ParseResponse, PreviewResponse,
};
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::system::auth::extractor::CurrentUser;
use crate::usecases::u501_import_events_csv::{ImportExecutor, RepositoryEventStore};

// ============================================================================
// UseCase u501: Import events from CSV
// ============================================================================

static IMPORT_EXECUTOR: Lazy<ImportExecutor> =
    Lazy::new(|| ImportExecutor::new(Arc::new(RepositoryEventStore)));

type UseCaseResponse<T> = Result<Json<T>, (StatusCode, Json<UseCaseError>)>;

fn reject(err: UseCaseError) -> (StatusCode, Json<UseCaseError>) {
    let status = if err.is_validation() {
        tracing::warn!("CSV import rejected: {}", err);
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!("CSV import failed: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(err))
}

/// POST /api/u501/import/parse
pub async fn u501_parse(Json(request): Json<ParseRequest>) -> UseCaseResponse<ParseResponse> {
    IMPORT_EXECUTOR.parse(&request).map(Json).map_err(reject)
}

/// POST /api/u501/import/preview
pub async fn u501_preview(Json(request): Json<ImportRequest>) -> UseCaseResponse<PreviewResponse> {
    IMPORT_EXECUTOR
        .preview(&request)
        .await
        .map(Json)
        .map_err(reject)
}

/// POST /api/u501/import/execute
pub async fn u501_execute(
    CurrentUser(user): CurrentUser,
    Json(request): Json<ImportRequest>,
) -> UseCaseResponse<ImportResult> {
    IMPORT_EXECUTOR
        .execute(&request, Some(user.username))
        .await
        .map(Json)
        .map_err(reject)
}
