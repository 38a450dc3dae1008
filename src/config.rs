//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor con soporte para argumentos CLI y variables
//! de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./microhttp --port 8080 \
//!   --max-request-bytes 8192 \
//!   --max-connections 4 \
//!   --read-timeout-ms 2000
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=0.0.0.0 ./microhttp
//! ```

use clap::Parser;
use std::time::Duration;

/// Capacidades fijas de los buffers de entrada y salida
///
/// Superar cualquiera de ellas produce una response de error explícita
/// (413, 431 o 500), nunca un truncado silencioso.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Tamaño máximo del request completo (request line + headers + body)
    pub max_request_bytes: usize,

    /// Tamaño máximo del bloque de headers
    pub max_header_bytes: usize,

    /// Tamaño máximo del body
    pub max_body_bytes: usize,

    /// Tamaño máximo de la response serializada
    pub max_response_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_request_bytes: 8192,
            max_header_bytes: 2048,
            max_body_bytes: 4096,
            max_response_bytes: 8192,
        }
    }
}

/// Configuración del servidor
#[derive(Debug, Clone, Parser)]
#[command(name = "microhttp")]
#[command(about = "Servidor HTTP/1.1 mínimo: una petición por conexión")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha (por defecto todas las interfaces)
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    // === Buffers ===

    /// Tamaño máximo del request completo en bytes
    #[arg(long = "max-request-bytes", default_value = "8192", env = "MAX_REQUEST_BYTES")]
    pub max_request_bytes: usize,

    /// Tamaño máximo del bloque de headers en bytes
    #[arg(long = "max-header-bytes", default_value = "2048", env = "MAX_HEADER_BYTES")]
    pub max_header_bytes: usize,

    /// Tamaño máximo del body en bytes
    #[arg(long = "max-body-bytes", default_value = "4096", env = "MAX_BODY_BYTES")]
    pub max_body_bytes: usize,

    /// Tamaño máximo de la response serializada en bytes
    #[arg(long = "max-response-bytes", default_value = "8192", env = "MAX_RESPONSE_BYTES")]
    pub max_response_bytes: usize,

    // === Rutas y conexiones ===

    /// Capacidad de la tabla de rutas
    #[arg(long = "max-routes", default_value = "16", env = "MAX_ROUTES")]
    pub max_routes: usize,

    /// Conexiones atendidas en paralelo (1 = secuencial)
    #[arg(long = "max-connections", default_value = "1", env = "MAX_CONNECTIONS")]
    pub max_connections: usize,

    /// Timeout de lectura del request en milisegundos (0 = sin timeout)
    #[arg(long = "read-timeout-ms", default_value = "5000", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    // === Logging ===

    /// Filtro de logging cuando RUST_LOG no está definido
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use microhttp::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Capacidades de los buffers
    pub fn limits(&self) -> Limits {
        Limits {
            max_request_bytes: self.max_request_bytes,
            max_header_bytes: self.max_header_bytes,
            max_body_bytes: self.max_body_bytes,
            max_response_bytes: self.max_response_bytes,
        }
    }

    /// Timeout de lectura, `None` si está deshabilitado
    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_ms > 0).then(|| Duration::from_millis(self.read_timeout_ms))
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.max_request_bytes == 0 {
            return Err("Max request bytes must be >= 1".to_string());
        }
        if self.max_header_bytes > self.max_request_bytes {
            return Err("Max header bytes must be <= max request bytes".to_string());
        }
        if self.max_body_bytes > self.max_request_bytes {
            return Err("Max body bytes must be <= max request bytes".to_string());
        }
        if self.max_response_bytes == 0 {
            return Err("Max response bytes must be >= 1".to_string());
        }
        if self.max_routes == 0 {
            return Err("Max routes must be >= 1".to_string());
        }
        if self.max_connections == 0 {
            return Err("Max connections must be >= 1".to_string());
        }

        Ok(())
    }

    /// Deja un resumen de la configuración en el log
    pub fn print_summary(&self) {
        tracing::info!(
            address = %self.address(),
            max_connections = self.max_connections,
            read_timeout_ms = self.read_timeout_ms,
            max_routes = self.max_routes,
            "Configuration loaded"
        );
        tracing::info!(
            max_request_bytes = self.max_request_bytes,
            max_header_bytes = self.max_header_bytes,
            max_body_bytes = self.max_body_bytes,
            max_response_bytes = self.max_response_bytes,
            "Buffer limits"
        );
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        let limits = Limits::default();
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            max_request_bytes: limits.max_request_bytes,
            max_header_bytes: limits.max_header_bytes,
            max_body_bytes: limits.max_body_bytes,
            max_response_bytes: limits.max_response_bytes,
            max_routes: 16,
            max_connections: 1,
            read_timeout_ms: 5000,
            log_level: "info".to_string(),
        }
    }
}
