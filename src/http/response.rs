//! # Construcción y Envío de Respuestas
//! src/http/response.rs
//!
//! Toda response sale con la misma plantilla fija:
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 35\r\n
//! \r\n
//! Welcome to the minimal HTTP server.
//! ```
//!
//! El handler construye la `Response` y la retorna; el servidor la escribe
//! una sola vez con [`send`].

use super::StatusCode;
use crate::error::ServerError;
use std::io::Write;

/// Content-Type por defecto de las responses de texto
pub const TEXT_PLAIN: &str = "text/plain";

/// Una response HTTP lista para serializar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Código de estado HTTP
    status: StatusCode,

    /// Valor del header Content-Type
    content_type: String,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una response con status, content type y body
    ///
    /// # Ejemplo
    /// ```
    /// use microhttp::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::OK, "text/plain", "Hello");
    /// assert_eq!(response.body(), b"Hello");
    /// ```
    pub fn new(status: StatusCode, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.to_string(),
            body: body.into(),
        }
    }

    /// Response `text/plain`
    pub fn text(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status, TEXT_PLAIN, body)
    }

    /// Response de error con el reason phrase como body
    ///
    /// Es lo que el servidor envía cuando falla antes de llegar a un handler.
    pub fn error(status: StatusCode) -> Self {
        Self::text(status, status.reason_phrase())
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// # Ejemplo
    /// ```
    /// use microhttp::http::{Response, StatusCode};
    ///
    /// let bytes = Response::text(StatusCode::OK, "Hi").to_bytes();
    /// assert_eq!(
    ///     bytes,
    ///     b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 2\r\n\r\nHi"
    /// );
    /// ```
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n",
            self.status,
            self.content_type,
            self.body.len()
        );

        let mut result = Vec::with_capacity(head.len() + self.body.len());
        result.extend_from_slice(head.as_bytes());
        result.extend_from_slice(&self.body);
        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene el Content-Type
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Serializa y escribe la response completa
///
/// Si el mensaje serializado excede `max_bytes` no se escribe nada y se
/// retorna `ResponseTooLarge`. Retorna la cantidad de bytes escritos.
pub fn send<W: Write>(writer: &mut W, response: &Response, max_bytes: usize) -> Result<usize, ServerError> {
    let bytes = response.to_bytes();
    if bytes.len() > max_bytes {
        return Err(ServerError::ResponseTooLarge {
            len: bytes.len(),
            limit: max_bytes,
        });
    }

    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(bytes.len())
}
