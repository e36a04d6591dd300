//! # HTTP Server Module
//!
//! Axum-based API over the in-memory Pokémon catalog.
//!
//! # Endpoints
//!
//! - `GET /`, `GET /style.css` - browser client
//! - `GET|HEAD /pokemon` - filtered, paginated listing
//! - `GET|HEAD /pokemon/by` - lookup by id or name
//! - `GET|HEAD /pokemon/random` - random sample
//! - `GET|HEAD /types` - distinct categories
//! - `POST /pokemon/update` - partial update by id
//! - `POST /pokemon/add` - create a record

pub mod body;
pub mod config;
pub mod errors;
pub mod pokemon_routes;
pub mod query;
pub mod response;
pub mod routes;
pub mod server;
pub mod static_routes;

pub use config::ServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
