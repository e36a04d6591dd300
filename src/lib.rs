//! pokedex - a small, mutable in-memory Pokémon catalog served over HTTP
//!
//! The dataset is loaded once at startup and then queried and mutated by
//! the HTTP handlers. Nothing is written back to disk.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod store;
