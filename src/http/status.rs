//! # Códigos de Estado HTTP
//! src/http/status.rs
//!
//! Código numérico de la status line. Un handler puede responder con
//! cualquier código de tres dígitos; los que genera el propio servidor
//! tienen constante con nombre:
//!
//! - **200**: respuesta normal de los handlers de ejemplo
//! - **404**: ninguna ruta coincide con (method, path)
//! - **413**: request o body por encima de su capacidad
//! - **431**: bloque de headers por encima de su capacidad
//! - **500**: la response no cabe en el buffer de salida

/// Código de estado HTTP (100..=999)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(u16);

impl StatusCode {
    /// 200 OK
    pub const OK: StatusCode = StatusCode(200);

    /// 404 Not Found - No hay ruta registrada para (method, path)
    pub const NOT_FOUND: StatusCode = StatusCode(404);

    /// 413 Payload Too Large - Request o body excede el límite configurado
    pub const PAYLOAD_TOO_LARGE: StatusCode = StatusCode(413);

    /// 431 Request Header Fields Too Large
    pub const REQUEST_HEADER_FIELDS_TOO_LARGE: StatusCode = StatusCode(431);

    /// 500 Internal Server Error - Response demasiado grande, entre otros
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);

    /// Crea un código a partir de su valor numérico
    ///
    /// Retorna `None` si no tiene tres dígitos.
    ///
    /// # Ejemplo
    /// ```
    /// use microhttp::http::StatusCode;
    ///
    /// let teapot = StatusCode::from_u16(418).unwrap();
    /// assert_eq!(teapot.to_string(), "418 I'm a teapot");
    /// assert_eq!(StatusCode::from_u16(1000), None);
    /// ```
    pub fn from_u16(code: u16) -> Option<Self> {
        (100..=999).contains(&code).then_some(StatusCode(code))
    }

    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use microhttp::http::StatusCode;
    /// assert_eq!(StatusCode::OK.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Reason phrase canónica del código
    ///
    /// Los códigos sin frase registrada usan `Unknown`.
    ///
    /// # Ejemplo
    /// ```
    /// use microhttp::http::StatusCode;
    /// assert_eq!(StatusCode::OK.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NOT_FOUND.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self.0 {
            100 => "Continue",
            101 => "Switching Protocols",
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            303 => "See Other",
            304 => "Not Modified",
            307 => "Temporary Redirect",
            308 => "Permanent Redirect",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            408 => "Request Timeout",
            409 => "Conflict",
            410 => "Gone",
            411 => "Length Required",
            413 => "Payload Too Large",
            414 => "URI Too Long",
            415 => "Unsupported Media Type",
            418 => "I'm a teapot",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            431 => "Request Header Fields Too Large",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}
