//! Order desk HTTP service
//!
//! ```text
//! request ─▶ JWT gate ─▶ role gate ─▶ handler ─▶ service ─┬─▶ cache
//!                                                          ├─▶ repository (PostgreSQL)
//!                                                          └─▶ event queue ─▶ sink
//! ```
//!
//! Usage: `order_desk [--env dev] [--port 8080]`. `JWT_SECRET` must be set;
//! `DATABASE_URL` overrides the configured PostgreSQL URL.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use order_desk::config::AppConfig;
use order_desk::db::Database;
use order_desk::events::{EventSink, LogSink, WebhookSink, event_channel};
use order_desk::gateway::cache::{TtlOrderCache, spawn_janitor};
use order_desk::gateway::state::{AppState, Repositories};
use order_desk::persistence::schema::init_schema;
use order_desk::user_auth::JwtService;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = order_desk::logging::init_logging(&app_config);

    tracing::info!("Starting order desk in {} mode", env);

    // Storage
    let (repos, db) = match &app_config.postgres_url {
        Some(url) => {
            let db = Database::connect(url)
                .await
                .context("Failed to connect to PostgreSQL")?;
            init_schema(db.pool()).await?;
            (Repositories::postgres(db.pool()), Some(Arc::new(db)))
        }
        None => {
            tracing::warn!("⚠️  No postgres_url configured, using in-memory repositories");
            (Repositories::in_memory(), None)
        }
    };

    // Response cache + janitor
    let cache = Arc::new(TtlOrderCache::new(Duration::from_secs(
        app_config.cache.ttl_secs,
    )));
    spawn_janitor(
        cache.clone(),
        Duration::from_secs(app_config.cache.cleanup_interval_secs.max(1)),
    );

    // Status-change events
    let sink: Arc<dyn EventSink> = match &app_config.events.webhook_url {
        Some(url) => {
            tracing::info!("Publishing status changes to {}", url);
            Arc::new(WebhookSink::new(url.as_str()).context("Failed to build webhook client")?)
        }
        None => Arc::new(LogSink),
    };
    let (notifier, worker) = event_channel(
        app_config.events.queue_size,
        app_config.events.topic.clone(),
        sink,
    );
    tokio::spawn(worker.run());

    let jwt = Arc::new(JwtService::new(&app_config.jwt_secret));
    let state = Arc::new(AppState::new(
        repos,
        cache,
        Arc::new(notifier),
        jwt,
        db,
    ));

    let port = get_port_override().unwrap_or(app_config.gateway.port);
    order_desk::gateway::run_server(&app_config.gateway.host, port, state).await
}
