/// Background task implementations
use crate::{
    context::AppContext,
    day::DayKey,
    error::ApiResult,
    snapshot::RecordOutcome,
};

/// Record the daily snapshot for a day key
pub async fn record_daily_snapshot(ctx: &AppContext, day: DayKey) -> ApiResult<RecordOutcome> {
    ctx.recorder.record(day).await
}

/// Health check - verify the store is reachable
pub async fn health_check(ctx: &AppContext) -> ApiResult<()> {
    sqlx::query("SELECT 1").fetch_one(&ctx.db).await?;

    Ok(())
}
