/// Snapshot Recorder: blends a day's selections and records the result
///
/// Produces at most one ledger-recorded snapshot per day key. Business
/// outcomes (nothing to blend, no eligible contributors, already recorded,
/// confirmation timed out) are data, not errors; only infrastructure
/// failures surface as `Err`.
use crate::{
    color::blend_colors,
    day::DayKey,
    error::ApiResult,
    ledger::Ledger,
    store::ColorStore,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of one recorder run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The snapshot write landed and was confirmed
    Recorded { tx_hash: String },
    /// No selections were made for the day (expected before first selection)
    NoSelections,
    /// Selections exist but none supplied a wallet address, so nobody
    /// could receive rewards
    NoContributors,
    /// The ledger already holds a recorded snapshot for the day
    AlreadyRecorded,
    /// The confirmation wait elapsed; the write's fate is unknown
    TimedOut,
}

impl RecordOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, RecordOutcome::Recorded { .. })
    }

    /// Human-readable description of the outcome
    pub fn reason(&self) -> &'static str {
        match self {
            RecordOutcome::Recorded { .. } => "Snapshot recorded successfully",
            RecordOutcome::NoSelections => "No color selections for this date",
            RecordOutcome::NoContributors => "No contributors with wallet addresses",
            RecordOutcome::AlreadyRecorded => "Snapshot already recorded for this date",
            RecordOutcome::TimedOut => "Snapshot submission timed out, outcome unknown",
        }
    }
}

/// Sole writer of daily snapshots
pub struct SnapshotRecorder {
    store: Arc<ColorStore>,
    ledger: Arc<dyn Ledger>,
    confirmation_timeout: Duration,
}

impl SnapshotRecorder {
    pub fn new(
        store: Arc<ColorStore>,
        ledger: Arc<dyn Ledger>,
        confirmation_timeout: Duration,
    ) -> Self {
        Self {
            store,
            ledger,
            confirmation_timeout,
        }
    }

    /// Record the snapshot for a day key
    ///
    /// Two concurrent runs for the same day may both pass the idempotency
    /// pre-check; the ledger rejects the losing write, so at-most-once
    /// holds at the ledger boundary.
    pub async fn record(&self, day: DayKey) -> ApiResult<RecordOutcome> {
        info!(%day, "Starting snapshot");

        let selections = self.store.selections_for_day(day).await?;
        if selections.is_empty() {
            info!(%day, "No color selections for day");
            return Ok(RecordOutcome::NoSelections);
        }

        let colors: Vec<String> = selections.iter().map(|s| s.color.clone()).collect();
        let collective_color = blend_colors(&colors);
        info!(
            %day,
            count = colors.len(),
            color = %collective_color,
            "Blended selections into collective color"
        );

        let contributors = self.store.distinct_wallets_for_day(day).await?;
        if contributors.is_empty() {
            info!(%day, "No contributors with wallet addresses");
            return Ok(RecordOutcome::NoContributors);
        }
        info!(%day, contributors = contributors.len(), "Found unique contributors");

        let day_id = day.ledger_id();

        // Idempotency pre-check. A failing read means the day has never
        // existed on the ledger, which is the expected unrecorded state.
        match self.ledger.daily_snapshot(day_id).await {
            Ok(Some(snapshot)) if snapshot.recorded => {
                info!(%day, "Snapshot already recorded");
                return Ok(RecordOutcome::AlreadyRecorded);
            }
            Ok(_) => {}
            Err(e) => {
                debug!(%day, error = %e, "Daily snapshot not yet recorded (expected)");
            }
        }

        info!(%day, "Submitting snapshot to ledger");
        let submission =
            self.ledger
                .record_snapshot(day_id, &collective_color, &contributors);

        match tokio::time::timeout(self.confirmation_timeout, submission).await {
            Ok(Ok(tx_hash)) => {
                info!(%day, %tx_hash, "Snapshot confirmed");
                Ok(RecordOutcome::Recorded { tx_hash })
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                warn!(%day, "Snapshot confirmation wait elapsed, outcome unknown");
                Ok(RecordOutcome::TimedOut)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_reasons_are_distinct() {
        let outcomes = [
            RecordOutcome::Recorded {
                tx_hash: "0x0".to_string(),
            },
            RecordOutcome::NoSelections,
            RecordOutcome::NoContributors,
            RecordOutcome::AlreadyRecorded,
            RecordOutcome::TimedOut,
        ];

        assert!(outcomes[0].is_recorded());
        for outcome in &outcomes[1..] {
            assert!(!outcome.is_recorded());
        }

        let reasons: std::collections::HashSet<&str> =
            outcomes.iter().map(|o| o.reason()).collect();
        assert_eq!(reasons.len(), outcomes.len());
    }
}
