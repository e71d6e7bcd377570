mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

use crate::{
    infrastructure::{
        argon2_password_hasher::Argon2PasswordHasher, env_identity_config::EnvIdentityConfig,
        in_memory_user_store::InMemoryUserStore,
    },
    presentation::handlers::me_handler::create_me_router,
    usecase::{get_me_usecase::GetMeUsecase, register_user_usecase::RegisterUserUsecase},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; real deployments configure through the environment
    let dotenv = dotenvy::dotenv();

    if let Err(e) = fmt()
        .with_env_filter(env_filter(dotenvy::var(EnvFilter::DEFAULT_ENV).ok()))
        .json()
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }
    if let Err(e) = dotenv {
        debug!(error = %e, "no .env file loaded");
    }

    let config = Arc::new(EnvIdentityConfig::new());
    let notification_channel =
        dotenvy::var("NOTIFICATION_CHANNEL").unwrap_or_else(|_| "EMAIL".to_string());
    let mut user_store = InMemoryUserStore::new(Argon2PasswordHasher::new(), notification_channel);
    for (tenant_id, tenant_domain) in config.tenants()? {
        info!(tenant_id, %tenant_domain, "tenant registered");
        user_store = user_store.with_tenant(tenant_id, tenant_domain);
    }

    let get_me_usecase = GetMeUsecase::new(user_store.clone());
    let register_user_usecase = RegisterUserUsecase::new(user_store.clone());

    let app = Router::new().nest(
        "/api",
        create_me_router(get_me_usecase, register_user_usecase, config),
    );

    let addr: SocketAddr = dotenvy::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
        .parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

const DEFAULT_LOG_FILTER: &str = "info";

/// `RUST_LOG` directives when set and valid, `info` otherwise.
fn env_filter(directives: Option<String>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}
