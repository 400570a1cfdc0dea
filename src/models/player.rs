//! Modelos del jugador servido por `GET /player`

use serde::{Deserialize, Serialize};

use crate::cache::FieldMap;

const ID_FIELD: &str = "id";
const CANONICAL_NAME_FIELD: &str = "canonical_name";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub uuid: String,
    pub username: String,
    pub xp: i64,
    pub quests_completed: u64,
}

/// Identidad estable de una cuenta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub canonical_name: String,
}

impl Identity {
    pub fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            (ID_FIELD.to_string(), self.id.clone()),
            (CANONICAL_NAME_FIELD.to_string(), self.canonical_name.clone()),
        ])
    }

    /// `None` si falta alguno de los dos campos
    pub fn from_fields(mut fields: FieldMap) -> Option<Self> {
        Some(Self {
            id: fields.remove(ID_FIELD)?,
            canonical_name: fields.remove(CANONICAL_NAME_FIELD)?,
        })
    }
}
