//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Parser mínimo: solo separa la request line, el bloque de headers y el body.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /submit HTTP/1.1\r\n        <- method y path (primeros dos tokens)
//! Content-Length: 5\r\n            <- bloque de headers (se copia tal cual)
//! \r\n                             <- delimitador
//! hello                            <- body
//! ```
//!
//! Los headers no se descomponen en pares clave/valor; se guardan como
//! bloque crudo. El framing (fin de la cabecera y `Content-Length`) lo
//! resuelve `server::reader` con `httparse` antes de llegar aquí.

use crate::config::Limits;
use std::borrow::Cow;
use std::net::SocketAddr;
use thiserror::Error;

/// Longitud máxima del método (en bytes)
pub const MAX_METHOD_LEN: usize = 8;

/// Longitud máxima del path (en bytes)
pub const MAX_PATH_LEN: usize = 256;

/// Delimitador entre headers y body
const BOUNDARY: &[u8] = b"\r\n\r\n";

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// El bloque de headers excede su capacidad
    #[error("request headers of {len} bytes exceed {limit} bytes")]
    HeadersTooLarge { len: usize, limit: usize },

    /// El body excede su capacidad
    #[error("request body of {len} bytes exceeds {limit} bytes")]
    BodyTooLarge { len: usize, limit: usize },
}

/// Un request parseado
///
/// Se crea uno por conexión y se descarta en cuanto el handler retorna.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Método (ej: "GET"); vacío si la request line no lo trae
    method: String,

    /// Path (ej: "/submit"); vacío si la request line no lo trae
    path: String,

    /// Bytes entre la request line y el delimitador, sin procesar
    headers: Vec<u8>,

    /// Bytes después del delimitador
    body: Vec<u8>,

    /// Dirección del cliente, si se conoce
    peer: Option<SocketAddr>,
}

impl Request {
    /// Parsea un request desde el buffer leído del socket
    ///
    /// Un request line incompleto no es un error: los campos faltantes
    /// quedan vacíos y el dispatch simplemente no encuentra ruta. Si no hay
    /// delimitador `\r\n\r\n`, el body queda vacío.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use microhttp::config::Limits;
    /// use microhttp::http::Request;
    ///
    /// let raw = b"POST /submit HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
    /// let request = Request::parse(raw, &Limits::default()).unwrap();
    ///
    /// assert_eq!(request.method(), "POST");
    /// assert_eq!(request.path(), "/submit");
    /// assert_eq!(request.body(), b"hello");
    /// ```
    pub fn parse(buffer: &[u8], limits: &Limits) -> Result<Self, ParseError> {
        // 1. Request line: hasta el primer \r\n (o todo el buffer)
        let line_end = find(buffer, b"\r\n");
        let request_line = String::from_utf8_lossy(&buffer[..line_end.unwrap_or(buffer.len())]);

        let mut tokens = request_line.split_whitespace();
        let method = truncate_token(tokens.next().unwrap_or(""), MAX_METHOD_LEN).to_string();
        let path = truncate_token(tokens.next().unwrap_or(""), MAX_PATH_LEN).to_string();

        // 2. Headers y body, separados por el primer \r\n\r\n
        let headers_start = line_end.map_or(buffer.len(), |end| end + 2);
        let (headers, body) = match find_boundary(buffer) {
            Some(boundary) => (
                buffer.get(headers_start..boundary).unwrap_or(&[]),
                &buffer[boundary + BOUNDARY.len()..],
            ),
            None => (buffer.get(headers_start..).unwrap_or(&[]), &[][..]),
        };

        if headers.len() > limits.max_header_bytes {
            return Err(ParseError::HeadersTooLarge {
                len: headers.len(),
                limit: limits.max_header_bytes,
            });
        }

        if body.len() > limits.max_body_bytes {
            return Err(ParseError::BodyTooLarge {
                len: body.len(),
                limit: limits.max_body_bytes,
            });
        }

        Ok(Request {
            method,
            path,
            headers: headers.to_vec(),
            body: body.to_vec(),
            peer: None,
        })
    }

    /// Asocia la dirección del cliente al request
    pub fn with_peer(mut self, peer: SocketAddr) -> Self {
        self.peer = Some(peer);
        self
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene el bloque de headers sin procesar
    pub fn headers(&self) -> &[u8] {
        &self.headers
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Obtiene el body como texto (bytes inválidos se reemplazan)
    pub fn body_string(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Dirección del cliente
    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }
}

/// Posición del delimitador `\r\n\r\n`, si existe
fn find_boundary(buffer: &[u8]) -> Option<usize> {
    find(buffer, BOUNDARY)
}

/// Recorta un token a `max` bytes sin partir un carácter UTF-8
pub(crate) fn truncate_token(token: &str, max: usize) -> &str {
    if token.len() <= max {
        return token;
    }
    let mut end = max;
    while !token.is_char_boundary(end) {
        end -= 1;
    }
    &token[..end]
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &[u8]) -> Request {
        Request::parse(raw, &Limits::default()).unwrap()
    }

    #[test]
    fn test_parse_simple_get() {
        let request = parse(b"GET / HTTP/1.1\r\n\r\n");

        assert_eq!(request.method(), "GET");
        assert_eq!(request.path(), "/");
        assert!(request.headers().is_empty());
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_parse_post_with_body() {
        let request = parse(b"POST /submit HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello");

        assert_eq!(request.method(), "POST");
        assert_eq!(request.path(), "/submit");
        assert_eq!(request.headers(), b"Content-Length: 5");
        assert_eq!(request.body(), b"hello");
        assert_eq!(request.body_string(), "hello");
    }

    #[test]
    fn test_parse_with_headers() {
        let request = parse(b"GET / HTTP/1.1\r\nHost: localhost:8080\r\nUser-Agent: test\r\n\r\n");

        assert_eq!(request.headers(), b"Host: localhost:8080\r\nUser-Agent: test");
    }

    #[test]
    fn test_body_keeps_inner_delimiters() {
        let request = parse(b"POST /submit HTTP/1.1\r\n\r\nline1\r\n\r\nline2");
        assert_eq!(request.body(), b"line1\r\n\r\nline2");
    }

    #[test]
    fn test_no_boundary_means_no_body() {
        let request = parse(b"POST /submit HTTP/1.1\r\nContent-Length: 5\r\nhello");

        assert_eq!(request.method(), "POST");
        assert_eq!(request.path(), "/submit");
        assert!(request.body().is_empty());
        assert_eq!(request.headers(), b"Content-Length: 5\r\nhello");
    }

    #[test]
    fn test_missing_path_token() {
        let request = parse(b"GET\r\n\r\n");

        assert_eq!(request.method(), "GET");
        assert_eq!(request.path(), "");
    }

    #[test]
    fn test_empty_buffer() {
        let request = parse(b"");

        assert_eq!(request.method(), "");
        assert_eq!(request.path(), "");
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_version_token_is_ignored() {
        let request = parse(b"GET /x HTTP/9.9\r\n\r\n");
        assert_eq!(request.path(), "/x");

        let request = parse(b"GET /x\r\n\r\n");
        assert_eq!(request.path(), "/x");
    }

    #[test]
    fn test_long_tokens_are_truncated() {
        let long_path = format!("/{}", "a".repeat(400));
        let raw = format!("VERYLONGMETHOD {} HTTP/1.1\r\n\r\n", long_path);
        let request = parse(raw.as_bytes());

        assert_eq!(request.method(), "VERYLONG");
        assert_eq!(request.path().len(), MAX_PATH_LEN);
        assert!(long_path.starts_with(request.path()));
    }

    #[test]
    fn test_body_at_capacity() {
        let limits = Limits { max_body_bytes: 4, ..Limits::default() };
        let request = Request::parse(b"POST / HTTP/1.1\r\n\r\nabcd", &limits).unwrap();
        assert_eq!(request.body(), b"abcd");
    }

    #[test]
    fn test_body_over_capacity() {
        let limits = Limits { max_body_bytes: 4, ..Limits::default() };
        let result = Request::parse(b"POST / HTTP/1.1\r\n\r\nabcde", &limits);
        assert_eq!(result.unwrap_err(), ParseError::BodyTooLarge { len: 5, limit: 4 });
    }

    #[test]
    fn test_headers_over_capacity() {
        let limits = Limits { max_header_bytes: 8, ..Limits::default() };
        let result = Request::parse(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n", &limits);
        assert!(matches!(result, Err(ParseError::HeadersTooLarge { len: 15, limit: 8 })));
    }

    #[test]
    fn test_truncate_token_char_boundary() {
        assert_eq!(truncate_token("abc", 8), "abc");
        assert_eq!(truncate_token("abcdef", 3), "abc");
        // 'ñ' ocupa dos bytes: no se puede cortar a la mitad
        assert_eq!(truncate_token("añb", 2), "a");
    }

    #[test]
    fn test_with_peer() {
        let peer: SocketAddr = "127.0.0.1:4000".parse().unwrap();
        let request = parse(b"GET / HTTP/1.1\r\n\r\n").with_peer(peer);
        assert_eq!(request.peer(), Some(peer));
    }
}
