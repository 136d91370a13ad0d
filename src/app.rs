/*
 * Responsibility
 * - tracing + panic hook
 * - Config → dependencies (pool, signing key, verifier/issuer, role store) → Router
 * - HTTP-wide middleware, then axum::serve()
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::repos::PgRoleStore;
use crate::services::auth::{SigningKey, TokenIssuer, TokenVerifier};
use crate::state::{AppState, RoutePermissions};

fn init_tracing() {
    // RUST_LOG wins when set, e.g. RUST_LOG=info,bookshelf_api=debug
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash loudly; production: default hook, keep serving
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("failed to run migrations")?;

    // Loaded once; verifier and issuer each derive their key from it.
    let key = SigningKey::new(config.jwt_secret.as_bytes())?;
    let verifier = Arc::new(TokenVerifier::new(&key, config.access_token_leeway_seconds));
    let issuer = Arc::new(TokenIssuer::new(&key, config.access_token_ttl_seconds));

    let roles = Arc::new(PgRoleStore::new(db.clone()));

    tracing::info!(role_admin = %config.role_admin, "route permissions loaded");

    Ok(AppState::new(
        db,
        verifier,
        issuer,
        roles,
        RoutePermissions {
            admin: config.role_admin,
        },
    ))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(&state))
        .with_state(state);

    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, Duration::from_secs(config.request_timeout_seconds))
}
