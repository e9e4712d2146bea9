use chrono::{DateTime, FixedOffset, NaiveTime, Offset, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, sleep};
use tracing::{error, info, warn};

pub mod tasks;

/// Job scheduler for background tasks
pub struct JobScheduler {
    context: Arc<crate::context::AppContext>,
}

impl JobScheduler {
    pub fn new(context: Arc<crate::context::AppContext>) -> Self {
        Self { context }
    }

    /// Start all background jobs
    pub fn start(self: Arc<Self>) {
        info!("Starting background job scheduler");

        tokio::spawn(Self::daily_snapshot_job(Arc::clone(&self)));
        tokio::spawn(Self::health_check_job(Arc::clone(&self)));

        info!("Background jobs started");
    }

    /// Record the daily snapshot at the configured trigger time.
    ///
    /// Non-success outcomes are terminal for that day key: nothing
    /// auto-retries after "no selections" or "already recorded", and
    /// infrastructure failures are left to the manual trigger.
    async fn daily_snapshot_job(scheduler: Arc<Self>) {
        let config = &scheduler.context.config.snapshot;

        loop {
            let now = now_in_offset(config.utc_offset_hours);
            let wait = until_next_trigger(now, config.trigger_time);
            info!(
                seconds = wait.as_secs(),
                trigger = %config.trigger_time,
                "Daily snapshot scheduled"
            );

            sleep(wait).await;

            let day = scheduler.context.today();
            info!(%day, "Running scheduled daily snapshot");

            match tasks::record_daily_snapshot(&scheduler.context, day).await {
                Ok(outcome) if outcome.is_recorded() => {
                    info!(%day, "Scheduled snapshot recorded");
                }
                Ok(outcome) => {
                    warn!(%day, reason = outcome.reason(), "Scheduled snapshot not recorded");
                }
                Err(e) => error!(%day, "Scheduled snapshot failed: {}", e),
            }
        }
    }

    /// Health check job (runs every 5 minutes)
    async fn health_check_job(scheduler: Arc<Self>) {
        let mut interval = interval(Duration::from_secs(300)); // Every 5 minutes

        loop {
            interval.tick().await;

            match tasks::health_check(&scheduler.context).await {
                Ok(_) => {
                    // Silent success - health is good
                }
                Err(e) => error!("Health check failed: {}", e),
            }
        }
    }
}

/// Current wall-clock time in the service's fixed UTC offset
fn now_in_offset(utc_offset_hours: i32) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix());
    Utc::now().with_timezone(&offset)
}

/// Time until the next daily trigger: today's trigger if it is still
/// ahead, otherwise tomorrow's.
fn until_next_trigger(now: DateTime<FixedOffset>, trigger: NaiveTime) -> Duration {
    let local_now = now.naive_local();
    let today_trigger = now.date_naive().and_time(trigger);

    let next = if local_now < today_trigger {
        today_trigger
    } else {
        today_trigger + chrono::Duration::days(1)
    };

    (next - local_now).to_std().unwrap_or(Duration::from_secs(1))
}
