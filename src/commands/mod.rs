//! # Comandos del Servidor
//!
//! Handlers de demostración y la tabla de rutas que los registra.
//!
//! Cada comando es una función handler que recibe un Request
//! y retorna una Response.

pub mod basic;

// Re-exportar funciones útiles
pub use basic::*;

use crate::router::{RouteError, Router};

/// Construye el router con los comandos de demostración
pub fn routes(max_routes: usize) -> Result<Router, RouteError> {
    let mut router = Router::with_capacity(max_routes);

    router.register("GET", "/", welcome_handler)?;
    router.register("POST", "/submit", submit_handler)?;

    Ok(router)
}
