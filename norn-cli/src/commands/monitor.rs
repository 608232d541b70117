//! Monitor command - opens the interactive swarm monitor.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Args;
use tracing::info;

use crate::config::NornConfig;

#[derive(Args, Debug, Default)]
#[command(after_long_help = "\
Examples:
  norn monitor                              Watch swarms on the configured API
  norn monitor --interval 5                 Refresh every 5 seconds
  norn --api-url http://host:8000 monitor   Watch a remote API
")]
pub struct MonitorArgs {
    /// Seconds between automatic refreshes (overrides config)
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,
}

pub async fn run(args: MonitorArgs, config: NornConfig) -> Result<()> {
    let interval = match args.interval {
        Some(0) => bail!("--interval must be at least 1 second"),
        Some(secs) => Duration::from_secs(secs),
        None => config.monitor.refresh_interval(),
    };

    let source = super::http_source(&config)?;
    info!(
        url = %source.swarms_url(),
        interval_secs = interval.as_secs(),
        "Starting swarm monitor"
    );

    norn_tui::install_panic_hook();
    let mut app = norn_tui::App::with_interval(Arc::new(source), interval);
    app.run().await?;

    info!("Swarm monitor closed");
    Ok(())
}
