use crate::error::{AppError, Result};
use crate::model::{
    BulkShortenItem, BulkShortenRequest, BulkShortenResponse, DeleteResponse, ListedUrl,
    ShortenRequest, ShortenResponse,
};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use knot_admin::Admin;
use knot_core::{ShortCode, Shortener, ShortenerError, UrlRecord};

/// Upper bound on URLs per bulk request.
const BULK_LIMIT: usize = 100;

pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(request): Json<ShortenRequest>,
) -> Result<Response> {
    let outcome = state.shortener().shorten(&request.url).await?;

    let status = if outcome.was_existing {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    let body = ShortenResponse::from_outcome(&outcome, state.base_url());
    Ok((status, Json(body)).into_response())
}

pub async fn bulk_shorten_handler(
    State(state): State<AppState>,
    Json(request): Json<BulkShortenRequest>,
) -> Result<Response> {
    if request.urls.is_empty() {
        return Err(AppError::Validation(
            "URLs list cannot be empty".to_string(),
        ));
    }
    if request.urls.len() > BULK_LIMIT {
        return Err(AppError::Validation(format!(
            "Maximum {} URLs allowed per request",
            BULK_LIMIT
        )));
    }

    let mut results = Vec::with_capacity(request.urls.len());
    let mut new_urls = 0;
    let mut existing_urls = 0;
    let mut errors = 0;

    for url in &request.urls {
        match state.shortener().shorten(url).await {
            Ok(outcome) => {
                if outcome.was_existing {
                    existing_urls += 1;
                } else {
                    new_urls += 1;
                }
                results.push(BulkShortenItem::Shortened(ShortenResponse::from_outcome(
                    &outcome,
                    state.base_url(),
                )));
            }
            // Bad items don't sink the batch; they are reported inline.
            Err(ShortenerError::InvalidUrl(message)) => {
                errors += 1;
                results.push(BulkShortenItem::Failed {
                    original_url: url.clone(),
                    error: message,
                });
            }
            Err(err) => return Err(err.into()),
        }
    }

    let body = BulkShortenResponse {
        total_processed: results.len(),
        new_urls,
        existing_urls,
        errors,
        results,
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlRecord>> {
    let code = ShortCode::new(code)?;

    match state.admin().stats(&code).await? {
        Some(record) => Ok(Json(record)),
        None => Err(AppError::NotFound),
    }
}

pub async fn list_handler(State(state): State<AppState>) -> Result<Json<Vec<ListedUrl>>> {
    let mut listed: Vec<ListedUrl> = state
        .admin()
        .list()
        .await?
        .into_iter()
        .map(|(code, record)| ListedUrl {
            short_url: code.to_url(state.base_url()),
            short_code: code.to_string(),
            original_url: record.original_url,
            created_at: record.created_at,
            clicks: record.clicks,
        })
        .collect();

    // The store yields creation order; present newest first.
    listed.reverse();
    Ok(Json(listed))
}

pub async fn delete_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>> {
    let code = ShortCode::new(code)?;

    if state.admin().delete(&code).await? {
        Ok(Json(DeleteResponse {
            message: "URL deleted successfully",
        }))
    } else {
        Err(AppError::NotFound)
    }
}
