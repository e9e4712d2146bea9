/// Status Reader: read-only view of a day's recorded snapshot
use crate::{day::DayKey, ledger::Ledger};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Snapshot status for one day
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotStatus {
    pub recorded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collective_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

impl SnapshotStatus {
    fn not_recorded() -> Self {
        Self {
            recorded: false,
            collective_color: None,
            contributor_count: None,
            price: None,
        }
    }
}

/// Read a day's snapshot status from the ledger.
/// Pure read; a failing ledger query degrades to "not recorded".
pub async fn read_status(ledger: &dyn Ledger, day: DayKey) -> SnapshotStatus {
    match ledger.daily_snapshot(day.ledger_id()).await {
        Ok(Some(snapshot)) if snapshot.recorded => SnapshotStatus {
            recorded: true,
            collective_color: Some(snapshot.color_hex),
            contributor_count: Some(snapshot.contributors.len()),
            price: Some(snapshot.price),
        },
        Ok(_) => SnapshotStatus::not_recorded(),
        Err(e) => {
            warn!(%day, error = %e, "Snapshot status query failed");
            SnapshotStatus::not_recorded()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;

    #[tokio::test]
    async fn test_unrecorded_day_reports_recorded_false() {
        let ledger = MemoryLedger::new();
        let day = DayKey::parse("20250615").unwrap();

        let status = read_status(&ledger, day).await;
        assert!(!status.recorded);
        assert!(status.collective_color.is_none());
        assert!(status.contributor_count.is_none());
        assert!(status.price.is_none());
    }

    #[tokio::test]
    async fn test_recorded_day_reports_snapshot_fields() {
        let ledger = MemoryLedger::new();
        let day = DayKey::parse("20250615").unwrap();
        let contributors = vec!["0xAAA".to_string(), "0xBBB".to_string()];

        use crate::ledger::Ledger as _;
        ledger
            .record_snapshot(day.ledger_id(), "#800080", &contributors)
            .await
            .unwrap();

        let status = read_status(&ledger, day).await;
        assert!(status.recorded);
        assert_eq!(status.collective_color.as_deref(), Some("#800080"));
        assert_eq!(status.contributor_count, Some(2));
        assert_eq!(status.price.as_deref(), Some("0"));
    }

    #[test]
    fn test_not_recorded_serializes_without_optional_fields() {
        let json = serde_json::to_string(&SnapshotStatus::not_recorded()).unwrap();
        assert_eq!(json, r#"{"recorded":false}"#);
    }
}
