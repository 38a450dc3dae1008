//! # Comandos Básicos
//! src/commands/basic.rs
//!
//! Handlers de demostración:
//! - `GET /`: mensaje de bienvenida
//! - `POST /submit`: devuelve el body recibido

use crate::http::{Request, Response, StatusCode};

/// Mensaje que devuelve `GET /`
pub const WELCOME_MESSAGE: &str = "Welcome to the minimal HTTP server.";

/// Handler para GET /
pub fn welcome_handler(_req: &Request) -> Response {
    Response::text(StatusCode::OK, WELCOME_MESSAGE)
}

/// Handler para POST /submit
///
/// Deja el body en el log y lo devuelve precedido de `Received body:\n`.
///
/// # Ejemplo de response
/// ```text
/// Received body:
/// hello
/// ```
pub fn submit_handler(req: &Request) -> Response {
    let body = req.body_string();
    tracing::info!(body = %body, "POST /submit received");

    Response::text(StatusCode::OK, format!("Received body:\n{}", body))
}
