/// In-process ledger
///
/// Used when no gateway URL is configured (local development) and by the
/// test suite. Enforces the ledger-side guard the contract provides:
/// a second write for an already-recorded day is rejected, so at-most-once
/// recording holds even when two recorder runs race past the pre-check.
use crate::{
    error::{ApiError, ApiResult},
    ledger::{DailySnapshot, Ledger},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct MemoryLedger {
    snapshots: Mutex<HashMap<u64, DailySnapshot>>,
    tx_counter: AtomicU64,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn record_snapshot(
        &self,
        day: u64,
        color_hex: &str,
        contributors: &[String],
    ) -> ApiResult<String> {
        let mut snapshots = self.snapshots.lock().await;

        if snapshots.get(&day).map(|s| s.recorded).unwrap_or(false) {
            return Err(ApiError::Ledger(format!(
                "Snapshot already recorded for day {}",
                day
            )));
        }

        snapshots.insert(
            day,
            DailySnapshot {
                day,
                color_hex: color_hex.to_string(),
                contributors: contributors.to_vec(),
                minted: false,
                price: "0".to_string(),
                buyer: None,
                token_id: 0,
                recorded: true,
            },
        );

        let tx = self.tx_counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("0x{:064x}", tx))
    }

    async fn daily_snapshot(&self, day: u64) -> ApiResult<Option<DailySnapshot>> {
        let snapshots = self.snapshots.lock().await;
        Ok(snapshots.get(&day).cloned())
    }
}
