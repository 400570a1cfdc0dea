//! Modelos del catálogo servido por `GET /quests`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    pub quests: Vec<Quest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub name: String,
    pub description: String,
    pub xp: u64,
    pub daily: bool,
}
