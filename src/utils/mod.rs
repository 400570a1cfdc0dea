//! Utilidades del sistema
//!
//! Este módulo contiene el manejo de errores y helpers comunes.

pub mod errors;

pub use errors::{AppError, AppResult};

/// Devuelve el valor derivado del primer elemento que cumple `predicate`,
/// respetando el orden de entrada; si ninguno cumple, devuelve `default`.
pub fn first_match_or<T, U>(
    items: &[T],
    predicate: impl Fn(&T) -> bool,
    project: impl FnOnce(&T) -> U,
    default: U,
) -> U {
    items.iter().find(|item| predicate(item)).map(project).unwrap_or(default)
}
