use anyhow::Context;
use seatwatch_monitor::{Monitor, MonitorSettings};
use seatwatch_store::app_config::Config;
use seatwatch_store::{DTicketClient, TelegramNotifier};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const BANNER: &str = r#"
    ╔════════════════════════════════════════════════╗
    ║      🚂 Thai Railway Ticket Monitor Bot 🚂      ║
    ╠════════════════════════════════════════════════╣
    ║  Polling sleeper availability, auto-refresh    ║
    ║  Press Ctrl+C to stop                          ║
    ╚════════════════════════════════════════════════╝
"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "seatwatch_monitor=info,seatwatch_core=info,seatwatch_store=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;

    println!("{}", BANNER);

    let notifier = TelegramNotifier::new(&config.telegram).context("Failed to build Telegram client")?;
    let site = DTicketClient::new(config.site.clone());
    let settings = MonitorSettings::from(&config);

    let mut monitor = Monitor::new(site, notifier, config.trips.clone(), settings);
    monitor
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Unable to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}
