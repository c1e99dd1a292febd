use anyhow::Context;
use backend::api::{self, AppState};
use backend::chat::{self, ChatRelay};
use backend::config::ServerConfig;
use backend::game::{SessionRegistry, SessionSettings};
use gridduel::core::RuleSet;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("info"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env()?;

    let ruleset = match &config.ruleset_path {
        Some(path) => RuleSet::load(path)
            .with_context(|| format!("Failed to load ruleset from {}", path.display()))?,
        None => RuleSet::default(),
    };
    ruleset.validate().context("Invalid ruleset")?;

    let registry = SessionRegistry::new(
        ruleset,
        SessionSettings {
            reset_delay: config.reset_delay,
            rejection_replies: config.rejection_replies,
        },
        config.max_sessions,
    );

    let game_app = api::router(AppState { registry });
    let chat_app = chat::router(ChatRelay::new());

    let game_listener = TcpListener::bind(config.game_addr)
        .await
        .with_context(|| format!("Failed to bind game listener on {}", config.game_addr))?;
    let chat_listener = TcpListener::bind(config.chat_addr)
        .await
        .with_context(|| format!("Failed to bind chat listener on {}", config.chat_addr))?;

    info!("Game server listening on {}", config.game_addr);
    info!("Chat relay listening on {}", config.chat_addr);

    tokio::try_join!(
        async { axum::serve(game_listener, game_app).await },
        async { axum::serve(chat_listener, chat_app).await },
    )?;

    Ok(())
}
