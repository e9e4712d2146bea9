/// WeColor backend library
///
/// Implements the daily color pipeline: users submit one color per calendar
/// day, a scheduled job blends the day's submissions into a collective color
/// and records it on the ledger, and read endpoints expose a day's recorded
/// snapshot.

pub mod api;
pub mod color;
pub mod config;
pub mod context;
pub mod day;
pub mod db;
pub mod error;
pub mod jobs;
pub mod ledger;
pub mod server;
pub mod snapshot;
pub mod store;
