use anyhow::Context;
use pos_client::logger::{LogSettings, init_logger, init_logger_with_file};
use pos_client::{ClientConfig, LivenessMonitor, OccupancyPoller, ServiceOverview};
use shared::table::TableLayout;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境 (dotenv, 日志)
    dotenv::dotenv().ok();
    let log = LogSettings::from_env();
    match log.dir.as_deref() {
        Some(dir) => init_logger_with_file(&log.level, log.json, Some(dir))?,
        None => init_logger(&log.level, log.json)?,
    }

    // 2. 配置与桌位布局
    let config = ClientConfig::from_env();
    let layout = TableLayout::from_json_file(&config.layout_file)
        .with_context(|| format!("Failed to load table layout from {}", config.layout_file))?;

    tracing::info!(server = %config.base_url, tables = layout.tables.len(), "POS monitor starting");

    let overview = ServiceOverview::from_layout(&layout);
    if let Some(table) = overview.landing_table() {
        tracing::info!(table = %table, "Single table layout, overview would open it directly");
    }

    let client = Arc::new(config.build_http_client()?);
    let cancel = CancellationToken::new();

    // 3. 轮询任务
    let (tx, mut transitions) = mpsc::unbounded_channel();
    let poller = OccupancyPoller::new(Arc::clone(&client), config.occupancy_interval, overview)
        .with_sink(tx);
    let poll_task = tokio::spawn(poller.run(cancel.clone()));

    if let Some(bar) = &config.bar_name {
        let (monitor, mut status) =
            LivenessMonitor::new(Arc::clone(&client), bar, config.liveness_interval);
        tokio::spawn(monitor.run(cancel.clone()));
        tokio::spawn(async move {
            while status.changed().await.is_ok() {
                let state = status.borrow_and_update().status;
                tracing::debug!(status = state.label(), "Bar feed refreshed");
            }
        });
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                break;
            }
            Some(batch) = transitions.recv() => {
                tracing::debug!(changes = batch.len(), "Occupancy updated");
            }
        }
    }

    cancel.cancel();
    let overview = poll_task.await?;
    let active: Vec<_> = overview.presence().active_tables().collect();
    tracing::info!(active = ?active, "POS monitor stopped");

    Ok(())
}
