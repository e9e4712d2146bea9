/// Color Store: one color selection per user per calendar day
///
/// Selections are an append-only log partitioned by day key. The
/// (user_id, day) primary key makes the daily insert atomic: the second
/// insert for the same pair fails with a unique violation, which is
/// surfaced as `InsertOutcome::AlreadyExists` rather than an error.
use crate::{
    day::DayKey,
    error::{ApiError, ApiResult},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// A user's color selection for one day
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ColorSelection {
    pub user_id: String,
    pub day: String,
    pub color: String,
    pub wallet_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Result of a conditional daily-selection insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyExists,
}

/// Store service over the selections database
pub struct ColorStore {
    db: SqlitePool,
}

impl ColorStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Insert a selection unless the user already has one for the day.
    /// The color is expected to be normalized (`#rrggbb`) by the caller.
    pub async fn insert_if_absent(
        &self,
        user_id: &str,
        day: DayKey,
        color: &str,
        wallet_address: Option<&str>,
    ) -> ApiResult<InsertOutcome> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO color_selections (user_id, day, color, wallet_address, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(user_id)
        .bind(day.to_string())
        .bind(color)
        .bind(wallet_address)
        .bind(now)
        .execute(&self.db)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Ok(InsertOutcome::AlreadyExists)
            }
            Err(e) => Err(ApiError::Database(e)),
        }
    }

    /// All selections for a day, in insertion order
    pub async fn selections_for_day(&self, day: DayKey) -> ApiResult<Vec<ColorSelection>> {
        let selections = sqlx::query_as::<_, ColorSelection>(
            "SELECT user_id, day, color, wallet_address, created_at
             FROM color_selections
             WHERE day = ?1
             ORDER BY rowid",
        )
        .bind(day.to_string())
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::Database)?;

        Ok(selections)
    }

    /// Distinct wallet addresses among a day's selections.
    /// Addresses compare case-sensitively, matching the ledger's own
    /// addressing; selections without a wallet are excluded.
    pub async fn distinct_wallets_for_day(&self, day: DayKey) -> ApiResult<Vec<String>> {
        let wallets = sqlx::query_scalar::<_, String>(
            "SELECT wallet_address
             FROM color_selections
             WHERE day = ?1 AND wallet_address IS NOT NULL
             GROUP BY wallet_address
             ORDER BY MIN(rowid)",
        )
        .bind(day.to_string())
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::Database)?;

        Ok(wallets)
    }

    /// A user's selection for a day, if any
    pub async fn selection_for_user(
        &self,
        user_id: &str,
        day: DayKey,
    ) -> ApiResult<Option<ColorSelection>> {
        let selection = sqlx::query_as::<_, ColorSelection>(
            "SELECT user_id, day, color, wallet_address, created_at
             FROM color_selections
             WHERE user_id = ?1 AND day = ?2",
        )
        .bind(user_id)
        .bind(day.to_string())
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::Database)?;

        Ok(selection)
    }
}
