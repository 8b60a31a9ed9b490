//! History API handler: `GET /api/history`.

use actix_web::{get, web};

use crate::domain::{ApiResult, Error, HistoryEntry};
use crate::inbound::http::state::HttpState;

/// List every history entry, newest first.
#[utoipa::path(
    get,
    path = "/api/history",
    responses(
        (status = 200, description = "History entries, newest first", body = [HistoryEntry]),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["history"],
    operation_id = "listHistory"
)]
#[get("/history")]
pub async fn list_history(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<HistoryEntry>>> {
    let entries = state.history.list_history().await?;
    Ok(web::Json(entries))
}
