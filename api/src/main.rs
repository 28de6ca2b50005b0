use actix_web::{middleware::Logger, HttpServer};
use log::{error, info};
use std::io;
use std::sync::Arc;

use tg_api::{create_app, middleware::auth::SharedTokenService};
use tg_core::{
    InMemoryRevocationRegistry, RevocationCleanupConfig, RevocationCleanupService,
    RevocationRegistry, TokenService, TokenServiceConfig,
};
use tg_infra::{RedisClient, RedisRevocationRegistry};
use tg_shared::config::{AppConfig, Environment, RevocationBackend};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Environment specific file first, then the plain .env
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            env_logger::init();
            error!("{}", e);
            return Err(invalid_input(e));
        }
    };

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.logging.level.as_str()));

    info!("Starting Tokengate API Server ({})", config.environment);

    if let Err(e) = config.validate() {
        error!("{}", e);
        return Err(invalid_input(e));
    }
    if config.jwt.is_using_default_secret() {
        log::warn!("JWT_SECRET is not set; using the built-in development secret");
    }

    let token_config = TokenServiceConfig::from_jwt_config(&config.jwt).map_err(invalid_input)?;
    let cleanup_config = RevocationCleanupConfig {
        interval_seconds: config.jwt.cleanup_interval,
        // Redis expires entries by itself
        enabled: config.revocation_backend == RevocationBackend::Memory,
    };

    let tokens = match config.revocation_backend {
        RevocationBackend::Memory => {
            info!("Using in-memory revocation registry");
            build_token_service(
                Arc::new(InMemoryRevocationRegistry::new()),
                token_config,
                cleanup_config,
            )?
        }
        RevocationBackend::Redis => {
            info!("Using Redis revocation registry");
            let client = RedisClient::new(config.cache.clone())
                .await
                .map_err(|e| io::Error::new(io::ErrorKind::ConnectionRefused, e.to_string()))?;
            build_token_service(
                Arc::new(RedisRevocationRegistry::new(client)),
                token_config,
                cleanup_config,
            )?
        }
    };

    let environment = config.environment;
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        create_app(tokens.clone(), environment).wrap(Logger::default())
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await
}

/// Wire a registry into a token service and start its cleanup task
fn build_token_service<R: RevocationRegistry + 'static>(
    registry: Arc<R>,
    token_config: TokenServiceConfig,
    cleanup_config: RevocationCleanupConfig,
) -> io::Result<SharedTokenService> {
    let cleanup = Arc::new(RevocationCleanupService::new(registry.clone(), cleanup_config));
    // Detached; runs for the life of the process
    let _ = cleanup.start_background_task();

    let service = TokenService::new(registry, token_config).map_err(invalid_input)?;
    Ok(Arc::new(service))
}

fn invalid_input(e: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
}
