/// Ledger: the on-chain contract recording one snapshot per day
///
/// The ledger is an external collaborator. The backend consumes two
/// operations: a write taking (day id, color, contributor addresses) and a
/// read returning a day's recorded tuple. Day ids are the YYYYMMDD digits
/// as an integer.
///
/// Implementations must reject a second write for an already-recorded day;
/// the snapshot recorder's pre-check is advisory and two concurrent runs
/// may both pass it.

pub mod http;
pub mod memory;

pub use http::{HttpLedger, HttpLedgerConfig};
pub use memory::MemoryLedger;

use crate::error::ApiResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A day's recorded tuple on the ledger.
/// All fields besides `day` are zero-valued until `recorded` flips true,
/// which happens exactly once per day id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySnapshot {
    pub day: u64,
    pub color_hex: String,
    pub contributors: Vec<String>,
    pub minted: bool,
    pub price: String,
    pub buyer: Option<String>,
    pub token_id: u64,
    pub recorded: bool,
}

/// Ledger contract surface consumed by the backend
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Record a day's collective color and contributor set, waiting for
    /// confirmation. Returns the transaction identifier.
    async fn record_snapshot(
        &self,
        day: u64,
        color_hex: &str,
        contributors: &[String],
    ) -> ApiResult<String>;

    /// Fetch a day's snapshot. `None` means the day has never existed on
    /// the ledger, an expected state before the first write.
    async fn daily_snapshot(&self, day: u64) -> ApiResult<Option<DailySnapshot>>;
}
