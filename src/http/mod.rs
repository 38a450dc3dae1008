//! # Módulo HTTP
//!
//! Modelo de datos de una petición y su respuesta:
//!
//! - Parsing de la request line, bloque de headers y body
//! - Construcción y envío de responses con plantilla fija
//! - Códigos de estado
//!
//! ### Formato de Request
//!
//! ```text
//! GET / HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 35\r\n
//! \r\n
//! Welcome to the minimal HTTP server.
//! ```

pub mod request;   // Parsing de requests
pub mod response;  // Construcción y envío de responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::Request;
pub use response::{send, Response};
pub use status::StatusCode;
