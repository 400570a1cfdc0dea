//! Proxy de datos de Hypixel y Mojang con cache por clase de dato.

pub mod api;
pub mod cache;
pub mod clients;
pub mod config;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
