//! Claves de cache con prefijo por familia de datos.

fn make_key(prefix: &str, identifier: &str) -> String {
    format!("{}:{}", prefix, identifier)
}

/// Catálogo completo de juegos y quests
pub fn catalog_key() -> String {
    make_key("catalog", "all")
}

/// Identidad resuelta; insensible a mayúsculas
pub fn identity_key(username: &str) -> String {
    make_key("identity", &username.to_lowercase())
}

/// Estadísticas crudas de un jugador por id estable
pub fn stats_key(id: &str) -> String {
    make_key("stats", id)
}
