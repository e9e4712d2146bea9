/// WeColor Backend - collective daily color service
///
/// Accepts one color selection per user per day, blends the day's
/// submissions into one collective color on a schedule, and records the
/// result on the WeColor ledger.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wecolor_backend::{config::ServerConfig, context::AppContext, error::ApiResult, jobs, server};

#[tokio::main]
async fn main() -> ApiResult<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wecolor_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    print_banner();

    // Load configuration
    let config = ServerConfig::from_env()?;

    // Create application context
    let ctx = AppContext::new(config).await?;

    // Start background jobs (daily snapshot + health check)
    let scheduler = Arc::new(jobs::JobScheduler::new(Arc::new(ctx.clone())));
    scheduler.start();

    // Start server
    server::serve(ctx).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
 _       __     ______      __
| |     / /__  / ____/___  / /___  _____
| | /| / / _ \/ /   / __ \/ / __ \/ ___/
| |/ |/ /  __/ /___/ /_/ / / /_/ / /
|__/|__/\___/\____/\____/_/\____/_/

        Collective Daily Color Backend v{}
        "#,
        env!("CARGO_PKG_VERSION")
    );
}
