use crate::error::Result;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::Redirect;
use shortest_core::{ShortCode, ShortenerError};
use tracing::debug;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// A resolved code counts one visit and answers 307 to the long URL.
/// Unknown or malformed codes answer 307 to the fallback page without
/// touching any statistics.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect> {
    redirect(&state, code).await
}

/// `GET /`, the empty short code.
pub async fn redirect_root_handler(State(state): State<AppState>) -> Result<Redirect> {
    redirect(&state, String::new()).await
}

async fn redirect(state: &AppState, code: String) -> Result<Redirect> {
    let Ok(code) = ShortCode::parse(code) else {
        return Ok(Redirect::temporary(&state.fallback_url));
    };

    match state.shortener.visit(&code).await {
        Ok(long_url) => Ok(Redirect::temporary(&long_url)),
        Err(ShortenerError::NotFound(_)) => {
            debug!(code = %code, "unknown short code, redirecting to fallback");
            Ok(Redirect::temporary(&state.fallback_url))
        }
        Err(other) => Err(other.into()),
    }
}
