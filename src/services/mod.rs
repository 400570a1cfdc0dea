//! Services module
//!
//! Este módulo contiene la lógica de negocio: la agregación del catálogo y
//! la resolución de jugadores, ambas sobre el cache y el gateway upstream.

pub mod catalog_service;
pub mod player_service;

pub use catalog_service::CatalogService;
pub use player_service::{PlayerCacheTtl, PlayerService};
