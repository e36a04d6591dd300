//! # HTTP Server
//!
//! Combines the Pokémon and static asset routers behind a not-found
//! fallback and request tracing.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::store::Dataset;

use super::config::ServerConfig;
use super::pokemon_routes::{pokemon_routes, PokemonState};
use super::routes::fallback;
use super::static_routes::{static_routes, StaticState};

/// HTTP server for the Pokémon catalog
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over an already loaded dataset
    pub fn new(config: ServerConfig, dataset: Dataset) -> Self {
        let router = Self::build_router(&config, dataset);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &ServerConfig, dataset: Dataset) -> Router {
        let pokemon_state = Arc::new(PokemonState::new(dataset, config.max_body_bytes));
        let static_state = Arc::new(StaticState::new(config.client_dir.clone()));

        Router::new()
            .merge(static_routes(static_state))
            .merge(pokemon_routes(pokemon_state))
            .fallback(fallback)
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process stops
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
