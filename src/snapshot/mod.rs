/// Daily snapshot pipeline
///
/// The recorder is the sole writer of a day's ledger snapshot; the status
/// reader is a tolerant read-only view of the same.

pub mod recorder;
pub mod status;

pub use recorder::{RecordOutcome, SnapshotRecorder};
pub use status::{read_status, SnapshotStatus};
