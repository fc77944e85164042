use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use wellbeing_bot::bot::Bot;
use wellbeing_bot::channels::{ChannelManager, CliChannel, TelegramChannel};
use wellbeing_bot::config::Config;
use wellbeing_bot::llm::GeminiClient;
use wellbeing_bot::store::ResultLog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("  export TELEGRAM_BOT_TOKEN=123456:ABC-...");
            std::process::exit(1);
        }
    };

    // Initialize tracing: console output plus a log file in the log dir.
    std::fs::create_dir_all(&config.log_dir)?;
    let file_appender = tracing_appender::rolling::never(&config.log_dir, "bot.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    eprintln!("🤖 Wellbeing Bot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Data: {}", config.data_dir.display());
    eprintln!("   Log: {}", config.log_dir.join("bot.log").display());
    eprintln!(
        "   Telegram allowed: {}",
        if config.allowed_users.iter().any(|u| u == "*") {
            "everyone".to_string()
        } else {
            config.allowed_users.join(", ")
        }
    );

    let results = ResultLog::new(&config.data_dir);

    let reflections = match &config.gemini_api_key {
        Some(key) => {
            eprintln!("   Reflections: enabled");
            Some(GeminiClient::new(key.clone())?)
        }
        None => {
            eprintln!("   Reflections: disabled (GEMINI_API_KEY not set)");
            None
        }
    };

    // Set up channels
    let mut channels = ChannelManager::new();
    channels.add(Arc::new(CliChannel::new()));
    channels.add(Arc::new(TelegramChannel::new(
        config.telegram_bot_token.expose_secret().to_string(),
        config.allowed_users.clone(),
    )));
    eprintln!("   Channels: cli, telegram\n");

    let bot = Bot::new(results, reflections, channels);
    bot.run().await?;

    Ok(())
}
