use std::sync::Arc;
use tokio::sync::watch;

use ddsc_bot::application::errors::BotError;
use ddsc_bot::application::services::CommandService;
use ddsc_bot::infrastructure::adapters::discord;
use ddsc_bot::infrastructure::config::Config;
use ddsc_bot::infrastructure::health;

#[tokio::main]
async fn main() -> Result<(), BotError> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting ddsc-bot v{}", env!("CARGO_PKG_VERSION"));

    // Health check server binds before the gateway handshake starts
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let shutdown_tx = Arc::new(shutdown_tx);
    let listener = health::bind(&config.health).await?;
    let health_server = tokio::spawn(health::serve(listener, wait_for(shutdown_rx)));

    let mut commands = CommandService::new(&config.bot.prefix);
    commands.register_club_commands(&config.bot.admin_roles, &config.assets.logo());
    commands.register_help();
    let dispatcher = Arc::new(commands.into_dispatcher());
    let names: Vec<&str> = dispatcher.registry().all().map(|c| c.name.as_str()).collect();
    tracing::info!("Registered commands: {}", names.join(", "));

    let mut client = discord::build_client(&config.discord, dispatcher).await?;

    let shard_manager = client.shard_manager.clone();
    let signal_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutting down");
        shard_manager.shutdown_all().await;
        let _ = signal_tx.send(true);
    });

    tracing::info!("Starting Discord bot...");
    let result = client.start().await;
    if let Err(e) = &result {
        tracing::error!("Discord bot error: {}", e);
    }
    let _ = shutdown_tx.send(true);

    match health_server.await {
        Ok(Err(e)) => tracing::error!("Health check server error: {}", e),
        Err(e) => tracing::error!("Health check server task failed: {}", e),
        Ok(Ok(())) => {}
    }

    result?;
    Ok(())
}

async fn wait_for(mut shutdown: watch::Receiver<bool>) {
    // A dropped sender also ends the wait
    let _ = shutdown.wait_for(|stopped| *stopped).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
