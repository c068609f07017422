use crate::models::AppState;
use crate::AppError;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

pub fn init(state: AppState) -> Router {
    Router::new()
        .route("/rates", get(rates))
        .route("/rates/{char_code}", get(rate))
        .with_state(state)
}

#[derive(Deserialize)]
struct RatesQuery {
    target: Option<String>,
}
async fn rates(State(state): State<AppState>, Query(query): Query<RatesQuery>) -> impl IntoResponse {
    let target = query.target.unwrap_or_else(|| state.base_currency.clone());
    match state.provider.get_currency_live_rates(&target).await {
        Ok(rates) => (StatusCode::OK, Json(rates)).into_response(),
        Err(err) => error_response(err),
    }
}
/// Курс одной валюты относительно базовой валюты банка
async fn rate(State(state): State<AppState>, Path(char_code): Path<String>) -> impl IntoResponse {
    match state.provider.get_currency_live_rates(&state.base_currency).await {
        Ok(rates) => match rates
            .into_iter()
            .find(|r| r.currency_code.eq_ignore_ascii_case(&char_code))
        {
            Some(rate) => (StatusCode::OK, Json(rate)).into_response(),
            None => (StatusCode::NOT_FOUND, Json("currency not found")).into_response(),
        },
        Err(err) => error_response(err),
    }
}

fn error_response(err: AppError) -> Response {
    let status = match err {
        AppError::NullInput => StatusCode::BAD_REQUEST,
        AppError::UnsupportedCurrency(_) => StatusCode::NOT_FOUND,
        AppError::Fetch(_) | AppError::MalformedPage(_) | AppError::ArithmeticFailure(_) => {
            StatusCode::BAD_GATEWAY
        }
        AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!("{err:?}");
    }
    (status, Json(err.to_string())).into_response()
}
