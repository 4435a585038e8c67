use std::sync::Arc;

use expense_bot::handlers;
use expense_bot::poller;
use expense_core::BotConfig;
use expense_storage::SqliteStore;
use telegram_client::{BotApi, TelegramClient};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BotConfig::from_env()?;

    let store = Arc::new(SqliteStore::new(&config.db_path));
    store.init().await?;
    info!(db_path = %config.db_path.display(), "database ready");

    let api: Arc<dyn BotApi> = Arc::new(TelegramClient::new(&config.bot_token));
    let dispatcher = handlers::build_dispatcher(api.clone(), store);

    info!("bot initialized, starting long polling");
    poller::run(api, dispatcher, config.poll_timeout_secs).await;
    Ok(())
}
