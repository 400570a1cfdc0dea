//! Payloads de la API de Hypixel
//!
//! Solo se decodifican los campos que el proxy usa; el resto se ignora.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const MULTIPLIED_EXPERIENCE_REWARD: &str = "MultipliedExperienceReward";
pub const DAILY_RESET_REQUIREMENT: &str = "DailyResetQuestRequirement";

/// Recursos del catálogo publicados en `/v2/resources/{kind}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Quests,
    Games,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Quests => "quests",
            ResourceKind::Games => "games",
        }
    }
}

/// `GET /v2/resources/quests`: slug de juego -> quests, en el orden del upstream
#[derive(Debug, Clone, Deserialize)]
pub struct QuestsResource {
    pub quests: IndexMap<String, Vec<QuestRecord>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rewards: Vec<RewardRecord>,
    #[serde(default)]
    pub requirements: Vec<RequirementRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewardRecord {
    #[serde(rename = "type")]
    pub kind: String,
    /// Solo se interpreta en la recompensa seleccionada
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequirementRecord {
    #[serde(rename = "type")]
    pub kind: String,
}

/// `GET /v2/resources/games`: clave interna -> metadatos del juego
#[derive(Debug, Clone, Deserialize)]
pub struct GamesResource {
    pub games: HashMap<String, GameRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameRecord {
    pub name: String,
    #[serde(rename = "databaseName")]
    pub database_name: String,
}

/// `GET /v2/player`; `player` es null si la cuenta nunca entró al servidor
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerResponse {
    pub player: Option<PlayerStats>,
}

/// Subconjunto de las estadísticas crudas que se guarda en cache
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    #[serde(rename = "networkExp", default)]
    pub network_exp: f64,
    #[serde(default)]
    pub quests: HashMap<String, QuestProgress>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestProgress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completions: Option<Vec<serde_json::Value>>,
}

/// Cuerpo de error de Hypixel: `{"success": false, "cause": "..."}`
#[derive(Debug, Deserialize)]
pub struct HypixelErrorBody {
    pub cause: Option<String>,
}
