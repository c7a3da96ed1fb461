use serenity::async_trait;
use serenity::model::application::{Command, Interaction};
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod services;

use config::Config;
use services::ip_service::{self, IpEchoClient};

/// Delete the registered commands again on shutdown.
const REMOVE_COMMANDS: bool = true;

struct IpEcho;

impl TypeMapKey for IpEcho {
    type Value = IpEchoClient;
}

struct Handler {
    config: Arc<Config>,
    registered: Arc<Mutex<Vec<Command>>>,
    setup_failed: Arc<AtomicBool>,
    ready_once: AtomicBool,
}

#[async_trait]
impl EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = interaction {
            commands::dispatch(&ctx, &command).await;
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        // Ready is delivered again after a reconnect; only set up once.
        if self.ready_once.swap(true, Ordering::SeqCst) {
            return;
        }

        info!("{} is connected!", ready.user.name);

        info!("Adding commands...");
        match commands::register_all(&ctx.http, self.config.guild_id).await {
            Ok(registered) => *self.registered.lock().await = registered,
            Err(e) => {
                error!("Cannot register application commands: {}", e);
                self.setup_failed.store(true, Ordering::SeqCst);
                ctx.shard.shutdown_clean();
                return;
            }
        }

        if let Some(channel_id) = self.config.channel_id {
            let report = ip_service::ip_response(&ctx).await;
            if let Err(e) = channel_id
                .say(&ctx.http, format!("Server is up\n{}", report))
                .await
            {
                warn!("Cannot send start up message: {}", e);
            }
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("serveralive=debug".parse().unwrap())
                .add_directive("serenity=warn".parse().unwrap()),
        )
        .with_target(true)
        .init();

    info!("Starting serveralive bot...");

    let config = match Config::from_env() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Invalid bot parameters: {}", e);
            process::exit(1);
        }
    };

    let registered = Arc::new(Mutex::new(Vec::new()));
    let setup_failed = Arc::new(AtomicBool::new(false));

    let handler = Handler {
        config: Arc::clone(&config),
        registered: Arc::clone(&registered),
        setup_failed: Arc::clone(&setup_failed),
        ready_once: AtomicBool::new(false),
    };

    // Slash commands arrive as interactions regardless of gateway intents.
    let intents = GatewayIntents::empty();

    let mut client = Client::builder(&config.token, intents)
        .event_handler(handler)
        .await
        .expect("Failed to create client");

    {
        let mut data = client.data.write().await;
        data.insert::<IpEcho>(IpEchoClient::new());
    }

    let http = client.http.clone();
    let shard_manager = client.shard_manager.clone();

    info!("Press Ctrl+C to exit");
    tokio::select! {
        result = client.start() => {
            if let Err(e) = result {
                error!("Client error: {}", e);
                process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupt received, shutting down...");
        }
    }

    let removal = if REMOVE_COMMANDS {
        info!("Removing commands...");
        let registered = registered.lock().await;
        commands::unregister_all(&http, config.guild_id, &registered).await
    } else {
        Ok(())
    };

    // The gateway session must close even when command cleanup failed.
    shard_manager.shutdown_all().await;

    if let Err(e) = removal {
        error!("Cannot delete commands: {}", e);
        process::exit(1);
    }
    if setup_failed.load(Ordering::SeqCst) {
        process::exit(1);
    }

    info!("Gracefully shutting down.");
}
