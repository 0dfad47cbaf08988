use crate::error::{AppError, Result};
use crate::model::{DecodeRequest, DecodeResponse, EncodeRequest, EncodeResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use shortest_core::{ShortCode, UrlStatistics};

/// `POST /api/encode`
pub async fn encode_handler(
    State(state): State<AppState>,
    Json(request): Json<EncodeRequest>,
) -> Result<Json<EncodeResponse>> {
    validate_long_url(&request.long_url)?;

    let code = state.shortener.encode(&request.long_url).await?;

    Ok(Json(EncodeResponse {
        short_url: code.to_url(state.base_url()),
    }))
}

/// `POST /api/decode`
pub async fn decode_handler(
    State(state): State<AppState>,
    Json(request): Json<DecodeRequest>,
) -> Result<Json<DecodeResponse>> {
    let code = ShortCode::from_url(request.short_url.trim(), state.base_url())?;
    let long_url = state.shortener.decode(&code).await?;

    Ok(Json(DecodeResponse { long_url }))
}

/// `GET /api/statistics/{code}`
pub async fn statistics_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlStatistics>> {
    let code = ShortCode::parse(code)?;
    let stats = state.shortener.statistics(&code).await?;

    Ok(Json(stats))
}

/// `GET /api/statistics`, the empty short code.
pub async fn statistics_root_handler(
    State(state): State<AppState>,
) -> Result<Json<UrlStatistics>> {
    let code = ShortCode::parse("")?;
    let stats = state.shortener.statistics(&code).await?;

    Ok(Json(stats))
}

/// `GET /api/list`
pub async fn list_handler(State(state): State<AppState>) -> Result<Json<Vec<UrlStatistics>>> {
    Ok(Json(state.shortener.list().await?))
}

/// Accepts absolute http(s) URLs with a host.
fn validate_long_url(long_url: &str) -> Result<()> {
    if long_url.trim().is_empty() {
        return Err(AppError::Validation("URL cannot be empty".to_string()));
    }

    let parsed = ::url::Url::parse(long_url)
        .map_err(|e| AppError::Validation(format!("must be a valid URL: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::Validation(format!(
            "URL scheme must be http or https: {}",
            parsed.scheme()
        )));
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(AppError::Validation(format!(
            "URL must have a host: {long_url}"
        ))),
    }
}
