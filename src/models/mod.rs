//! Modelos de datos
//!
//! Este módulo contiene los modelos expuestos por la API y los payloads
//! tipados de los servicios upstream.

pub mod hypixel;
pub mod mojang;
pub mod player;
pub mod quest;

pub use player::{Identity, Player};
pub use quest::{Game, Quest};
