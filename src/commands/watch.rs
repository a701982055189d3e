use crate::db::orders::Orders;
use crate::libs::config::Config;
use crate::libs::sla::SlaClock;
use crate::libs::watcher::SlaWatcher;
use anyhow::Result;

/// Runs the SLA watch loop with the configured clock and poll interval.
pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let clock = SlaClock::from(&config.sla.unwrap_or_default());

    let mut watcher = SlaWatcher::new(Orders::new()?, clock, config.watch.unwrap_or_default());
    watcher.run().await?;
    Ok(())
}
