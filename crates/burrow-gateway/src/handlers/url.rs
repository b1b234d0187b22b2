use crate::error::{AppError, Result};
use crate::model::{ShortenRequest, ShortenResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_core::ShortCode;

/// `POST /`: the body is the URL, the response body is the short URL.
pub async fn shorten_text_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<(StatusCode, String)> {
    let code = state.shortener().shorten(&body).await?;
    Ok((StatusCode::CREATED, code.to_url(state.base_url())))
}

/// `POST /api/shorten`: `{"url": "..."}` in, `{"result": "..."}` out.
pub async fn shorten_json_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>)> {
    let Json(request) = payload.map_err(|e| AppError::InvalidBody(e.body_text()))?;
    if request.url.trim().is_empty() {
        return Err(AppError::MissingField("url"));
    }

    let code = state.shortener().shorten(&request.url).await?;
    let response = ShortenResponse {
        result: code.to_url(state.base_url()),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /{code}`: 307 to the original URL.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let code = ShortCode::new(short_code)?;
    let original_url = state.shortener().resolve(&code).await?;

    let location = HeaderValue::from_str(&original_url).map_err(|_| AppError::InvalidLocation)?;
    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
}
