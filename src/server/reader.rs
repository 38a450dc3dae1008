//! # Lectura del Request
//! src/server/reader.rs
//!
//! Lee del socket a un buffer que crece por bloques hasta tener el request
//! completo, con un tope fijo (`max_request_bytes`).
//!
//! `httparse` decide cuándo la cabecera está completa y cuánto body se
//! declaró en `Content-Length`. Se considera completo cuando llegaron la
//! cabecera y esos bytes de body. También se corta cuando el cliente cierra
//! su lado de escritura o cuando vence el timeout de lectura con algo ya
//! leído: en ese caso se procesa lo que haya.
//!
//! Si el `Content-Length` declarado no cabe en `max_request_bytes` se
//! rechaza de inmediato, sin esperar el body.

use crate::error::ServerError;
use std::io::{ErrorKind, Read};

/// Tamaño de cada lectura individual
const READ_CHUNK: usize = 4096;

/// Headers que `httparse` puede indexar por request
const MAX_HEADERS: usize = 64;

/// Lee un request completo
///
/// Retorna un buffer vacío si el cliente cerró sin enviar nada.
pub fn read_request<R: Read>(stream: &mut R, max_bytes: usize) -> Result<Vec<u8>, ServerError> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let bytes_read = match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if is_timeout(&e) && !buffer.is_empty() => {
                tracing::debug!(bytes = buffer.len(), "Read timed out, processing partial request");
                break;
            }
            Err(e) => return Err(e.into()),
        };

        buffer.extend_from_slice(&chunk[..bytes_read]);

        if buffer.len() > max_bytes {
            return Err(ServerError::RequestTooLarge { limit: max_bytes });
        }

        if is_complete(&buffer, max_bytes)? {
            break;
        }
    }

    Ok(buffer)
}

/// Verifica si el buffer ya contiene cabecera y body completos
///
/// Una cabecera que `httparse` no acepta se da por completa: el parser
/// tolerante de `Request` decide con lo que haya llegado.
fn is_complete(buffer: &[u8], max_bytes: usize) -> Result<bool, ServerError> {
    let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
    let mut head = httparse::Request::new(&mut headers);

    let head_len = match head.parse(buffer) {
        Ok(httparse::Status::Partial) => return Ok(false),
        Ok(httparse::Status::Complete(len)) => len,
        Err(e) => {
            tracing::debug!(error = %e, "Unframed request head");
            return Ok(true);
        }
    };

    // Content-Length inválido se trata como ausente
    let content_length = head
        .headers
        .iter()
        .find(|header| header.name.eq_ignore_ascii_case("Content-Length"))
        .and_then(|header| std::str::from_utf8(header.value).ok())
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let expected = head_len
        .checked_add(content_length)
        .filter(|total| *total <= max_bytes)
        .ok_or(ServerError::RequestTooLarge { limit: max_bytes })?;

    Ok(buffer.len() >= expected)
}

fn is_timeout(error: &std::io::Error) -> bool {
    matches!(error.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}
