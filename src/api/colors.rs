/// Color selection endpoints
use crate::{
    color::normalize_hex_color,
    context::AppContext,
    day::DayKey,
    error::{ApiError, ApiResult},
    store::InsertOutcome,
};
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Build color routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/colors/select", post(select_color))
        .route("/api/colors/my-color", get(my_color))
        .route("/api/colors/today", get(today_selections))
        .route("/api/colors/date/:date", get(selections_for_date))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectColorRequest {
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    color: String,
    wallet_address: Option<String>,
}

#[derive(Debug, Serialize)]
struct SelectColorResponse {
    success: bool,
    message: String,
    date: String,
}

/// User selects their daily color
async fn select_color(
    State(ctx): State<AppContext>,
    Json(req): Json<SelectColorRequest>,
) -> ApiResult<Json<SelectColorResponse>> {
    if req.user_id.trim().is_empty() || req.color.is_empty() {
        return Err(ApiError::Validation(
            "Missing required fields: userId and color".to_string(),
        ));
    }

    let color = normalize_hex_color(&req.color)
        .ok_or_else(|| ApiError::Validation("Invalid hex color format".to_string()))?;

    let day = ctx.today();

    match ctx
        .store
        .insert_if_absent(&req.user_id, day, &color, req.wallet_address.as_deref())
        .await?
    {
        InsertOutcome::Inserted => Ok(Json(SelectColorResponse {
            success: true,
            message: "Color selection saved successfully".to_string(),
            date: day.to_string(),
        })),
        InsertOutcome::AlreadyExists => Err(ApiError::Conflict(
            "You have already selected a color for today".to_string(),
        )),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyColorQuery {
    user_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct MyColorResponse {
    selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
}

/// Get the user's color selection for today
async fn my_color(
    State(ctx): State<AppContext>,
    Query(query): Query<MyColorQuery>,
) -> ApiResult<Json<MyColorResponse>> {
    let user_id = query
        .user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Missing userId parameter".to_string()))?;

    let selection = ctx.store.selection_for_user(&user_id, ctx.today()).await?;

    let response = match selection {
        Some(selection) => MyColorResponse {
            selected: true,
            color: Some(selection.color),
            date: Some(selection.day),
        },
        None => MyColorResponse {
            selected: false,
            color: None,
            date: None,
        },
    };

    Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct SelectionView {
    color: String,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct DaySelectionsResponse {
    date: String,
    count: usize,
    selections: Vec<SelectionView>,
}

/// Get all color selections for today
async fn today_selections(
    State(ctx): State<AppContext>,
) -> ApiResult<Json<DaySelectionsResponse>> {
    day_selections(&ctx, ctx.today()).await
}

/// Get all color selections for a specific date
async fn selections_for_date(
    State(ctx): State<AppContext>,
    Path(date): Path<String>,
) -> ApiResult<Json<DaySelectionsResponse>> {
    let day = DayKey::parse(&date)?;
    day_selections(&ctx, day).await
}

async fn day_selections(
    ctx: &AppContext,
    day: DayKey,
) -> ApiResult<Json<DaySelectionsResponse>> {
    let selections = ctx.store.selections_for_day(day).await?;

    Ok(Json(DaySelectionsResponse {
        date: day.to_string(),
        count: selections.len(),
        selections: selections
            .into_iter()
            .map(|s| SelectionView {
                color: s.color,
                timestamp: s.created_at,
            })
            .collect(),
    }))
}
