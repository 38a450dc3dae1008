//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes
//! 3. Lee el request con un tope de tamaño
//! 4. Lo despacha al router y escribe la response
//! 5. Cierra la conexión

pub mod limiter;
pub mod reader;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::{handle_connection, Outcome, Server};
