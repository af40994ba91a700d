use crate::models::ErrorBody;
use crate::normalize::to_https;
use crate::solver::{SolveError, Solved};
use crate::AppState;
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

const CONNECT_NOT_SUPPORTED: &str = "CONNECT method is not supported by this proxy.\n\
    HTTPS tunneling cannot be forwarded to the solver service.\n\
    Request pages with http:// URLs instead (e.g. http://example.com/); \
    they are fetched over https:// by the solver.\n";

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const TEXT_HTML: &str = "text/html; charset=utf-8";

/// Every request lands on the fallback: proxy targets arrive in absolute form
/// (`GET http://host/path`) or authority form (`CONNECT host:443`), neither of which is a
/// routable path.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(proxy_handler)
        .with_state(app_state)
}

pub async fn proxy_handler(
    State(app_state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Response {
    let span = info_span!(
        "proxy_request",
        request_id = %Uuid::new_v4(),
        method = %method,
        target = %uri
    );

    async move {
        match method {
            Method::GET => handle_get(&app_state, &uri).await,
            Method::CONNECT => reject_connect(&uri),
            other => reject_unsupported(&other),
        }
    }
    .instrument(span)
    .await
}

async fn handle_get(app_state: &AppState, uri: &Uri) -> Response {
    let target_url = to_https(&uri.to_string());
    info!("Forwarding GET to solver as {}", target_url);
    app_state.solver.solve(&target_url).await.into_response()
}

/// Closes the connection after the 501 so nothing the client sends afterwards (typically a
/// TLS ClientHello) is parsed as another request.
fn reject_connect(uri: &Uri) -> Response {
    warn!("Rejecting CONNECT to {}", uri);
    (
        StatusCode::NOT_IMPLEMENTED,
        [
            (header::CONTENT_TYPE, TEXT_PLAIN),
            (header::CONNECTION, "close"),
        ],
        CONNECT_NOT_SUPPORTED,
    )
        .into_response()
}

fn reject_unsupported(method: &Method) -> Response {
    warn!("Rejecting unsupported method {}", method);
    (
        StatusCode::NOT_IMPLEMENTED,
        [(header::CONTENT_TYPE, TEXT_PLAIN)],
        format!("Unsupported method ({})", method),
    )
        .into_response()
}

impl IntoResponse for Solved {
    fn into_response(self) -> Response {
        (self.status, [(header::CONTENT_TYPE, TEXT_HTML)], self.body).into_response()
    }
}

impl IntoResponse for SolveError {
    fn into_response(self) -> Response {
        error!("Solve failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
