/// Snapshot endpoints: manual recording trigger and status reads
use crate::{
    context::AppContext,
    day::DayKey,
    error::{ApiError, ApiResult},
    snapshot::{read_status, RecordOutcome, SnapshotStatus},
};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Build snapshot routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/snapshot/record", post(record_snapshot))
        .route("/api/snapshot/status", get(status_today))
        .route("/api/snapshot/status/:date", get(status_for_date))
}

#[derive(Debug, Default, Deserialize)]
struct RecordSnapshotRequest {
    date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordSnapshotResponse {
    success: bool,
    message: String,
    tx_hash: String,
    date: String,
}

/// Manually trigger snapshot recording
///
/// Operational recovery path when the scheduled run did not land;
/// accepts an arbitrary day key.
async fn record_snapshot(
    State(ctx): State<AppContext>,
    body: Option<Json<RecordSnapshotRequest>>,
) -> ApiResult<Json<RecordSnapshotResponse>> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let day = match req.date {
        Some(date) => DayKey::parse(&date)?,
        None => ctx.today(),
    };

    info!(%day, "Manual snapshot trigger");

    let outcome = ctx.recorder.record(day).await?;

    if let RecordOutcome::Recorded { tx_hash } = &outcome {
        return Ok(Json(RecordSnapshotResponse {
            success: true,
            message: outcome.reason().to_string(),
            tx_hash: tx_hash.clone(),
            date: day.to_string(),
        }));
    }

    Err(ApiError::Rejected(outcome.reason().to_string()))
}

#[derive(Debug, Serialize)]
struct StatusTodayResponse {
    date: String,
    #[serde(flatten)]
    status: SnapshotStatus,
}

/// Get snapshot status for today
async fn status_today(State(ctx): State<AppContext>) -> Json<StatusTodayResponse> {
    let day = ctx.today();
    let status = read_status(ctx.ledger.as_ref(), day).await;

    Json(StatusTodayResponse {
        date: day.to_string(),
        status,
    })
}

/// Get snapshot status for a specific date
async fn status_for_date(
    State(ctx): State<AppContext>,
    Path(date): Path<String>,
) -> ApiResult<Json<SnapshotStatus>> {
    let day = DayKey::parse(&date)?;
    let status = read_status(ctx.ledger.as_ref(), day).await;

    Ok(Json(status))
}
