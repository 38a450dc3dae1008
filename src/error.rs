//! # Errores del Servidor
//! src/error.rs
//!
//! Taxonomía de errores del ciclo de vida de una conexión:
//!
//! - **Fatales** (`Bind`): sin socket no hay nada que servir, `main` termina.
//! - **Por conexión** (`Io`): se registran y se descarta la conexión.
//! - **Límites** (`RequestTooLarge`, `Parse`, `ResponseTooLarge`): se
//!   traducen a una response de error explícita en vez de truncar.

use crate::http::request::ParseError;
use crate::http::StatusCode;
use thiserror::Error;

/// Errores del servidor
#[derive(Debug, Error)]
pub enum ServerError {
    /// No se pudo crear/bindear el socket de escucha
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Error de I/O en una conexión ya aceptada
    #[error("connection I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// El request completo excede `max_request_bytes`
    #[error("request exceeds {limit} bytes")]
    RequestTooLarge { limit: usize },

    /// El request no respeta los límites de headers/body
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// La response serializada no cabe en el buffer de salida
    #[error("response of {len} bytes exceeds {limit} bytes")]
    ResponseTooLarge { len: usize, limit: usize },
}

impl ServerError {
    /// Código de estado con el que se responde al cliente, si corresponde
    ///
    /// `None` significa que no se escribe nada: la conexión se cierra.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ServerError::Bind { .. } | ServerError::Io(_) => None,
            ServerError::RequestTooLarge { .. } => Some(StatusCode::PAYLOAD_TOO_LARGE),
            ServerError::Parse(ParseError::HeadersTooLarge { .. }) => {
                Some(StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE)
            }
            ServerError::Parse(ParseError::BodyTooLarge { .. }) => Some(StatusCode::PAYLOAD_TOO_LARGE),
            ServerError::ResponseTooLarge { .. } => Some(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_errors_map_to_status() {
        let err = ServerError::RequestTooLarge { limit: 8192 };
        assert_eq!(err.status(), Some(StatusCode::PAYLOAD_TOO_LARGE));

        let err = ServerError::from(ParseError::HeadersTooLarge { len: 3000, limit: 2048 });
        assert_eq!(err.status(), Some(StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE));

        let err = ServerError::from(ParseError::BodyTooLarge { len: 5000, limit: 4096 });
        assert_eq!(err.status(), Some(StatusCode::PAYLOAD_TOO_LARGE));

        let err = ServerError::ResponseTooLarge { len: 9000, limit: 8192 };
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_io_errors_are_silent() {
        let err = ServerError::from(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_display() {
        let err = ServerError::ResponseTooLarge { len: 9000, limit: 8192 };
        assert_eq!(err.to_string(), "response of 9000 bytes exceeds 8192 bytes");

        let err = ServerError::from(ParseError::BodyTooLarge { len: 5, limit: 4 });
        assert_eq!(err.to_string(), "request body of 5 bytes exceeds 4 bytes");
    }
}
