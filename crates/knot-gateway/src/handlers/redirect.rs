use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::Redirect;
use knot_core::ShortCode;
use knot_redirector::Redirector;

pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect> {
    let code = ShortCode::new(code)?;

    match state.redirector().resolve(&code).await? {
        Some(url) => Ok(Redirect::temporary(&url)),
        None => Err(AppError::NotFound),
    }
}
