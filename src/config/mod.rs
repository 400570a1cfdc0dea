//! Configuración del proyecto
//!
//! Este módulo contiene la configuración del servidor, de los servicios
//! upstream y del cache.

pub mod environment;

pub use environment::*;
