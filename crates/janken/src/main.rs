//! Janken Hub server entry point.
//!
//! Loads the configuration, applies command-line overrides, installs the
//! tracing subscriber and runs the WebSocket hub until a shutdown signal
//! arrives.

mod cli;
mod config;
mod logging;
mod signals;

use cli::CliArgs;
use config::AppConfig;
use janken_server::GameServer;
use std::sync::Arc;
use tracing::{error, info};

/// The assembled application: validated configuration plus the server.
pub struct Application {
    config: AppConfig,
    server: Arc<GameServer>,
}

impl Application {
    pub async fn new(args: CliArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = AppConfig::load_from_file(&args.config_path).await?;
        apply_overrides(&mut config, &args);

        config
            .validate()
            .map_err(|e| format!("Configuration validation failed: {e}"))?;

        logging::setup_logging(&config.logging)?;
        display_banner();

        let server = GameServer::new(config.to_server_config()?);
        info!("📂 Config: {}", args.config_path.display());

        Ok(Self {
            config,
            server: Arc::new(server),
        })
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        info!("📋 Configuration Summary:");
        info!("  🌐 Bind address: {}", self.config.server.bind_address);
        info!("  👥 Max connections: {}", self.config.server.max_connections);
        info!("  🤖 NPC roster: {}", self.config.game.npc_names.join(", "));
        info!("🛑 Press Ctrl+C to gracefully shutdown");

        let server = self.server.clone();
        tokio::select! {
            result = server.start() => {
                if let Err(e) = result {
                    error!("❌ Server error: {}", e);
                    return Err(e.into());
                }
            }
            signal = signals::wait_for_shutdown() => {
                let signal = signal?;
                info!(
                    "🛑 {} received, stopping Janken Hub on {} ({} connections open)",
                    signal,
                    self.config.server.bind_address,
                    server.context().connections().connection_count()
                );
            }
        }

        self.server.shutdown().await?;
        info!("👋 Janken Hub stopped");
        Ok(())
    }
}

fn apply_overrides(config: &mut AppConfig, args: &CliArgs) {
    if let Some(bind_address) = &args.bind_address {
        config.server.bind_address = bind_address.clone();
    }
    if let Some(log_level) = &args.log_level {
        config.logging.level = log_level.clone();
    }
    if args.json_logs {
        config.logging.json_format = true;
    }
}

fn display_banner() {
    let version = env!("CARGO_PKG_VERSION");
    info!("╔══════════════════════════════════════════╗");
    info!("║          ✊ ✋ ✌  JANKEN HUB              ║");
    info!("║                 v{:<24}║", version);
    info!("╚══════════════════════════════════════════╝");
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    match Application::new(args).await {
        Ok(app) => {
            if let Err(e) = app.run().await {
                error!("❌ Application error: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("❌ Failed to start application: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
