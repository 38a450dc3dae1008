//! # microhttp
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo: acepta una conexión, lee un request, lo
//! despacha a un handler registrado por (method, path), escribe la response
//! y cierra la conexión.
//!
//! ## Arquitectura
//!
//! - `http`: Request, Response y códigos de estado
//! - `router`: Tabla de rutas y dispatch
//! - `server`: Acceptor TCP, lectura con límites y envío
//! - `commands`: Handlers de demostración
//! - `config`: Configuración por CLI / variables de entorno
//! - `logging`: Inicialización de `tracing`
//! - `error`: Errores del servidor
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use microhttp::config::Config;
//! use microhttp::http::{Request, Response, StatusCode};
//! use microhttp::router::Router;
//! use microhttp::server::Server;
//!
//! let mut router = Router::new();
//! router
//!     .register("GET", "/", |_req: &Request| Response::text(StatusCode::OK, "hi"))
//!     .unwrap();
//!
//! let server = Server::bind(&Config::default(), router).expect("Error al iniciar servidor");
//! server.run();
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod router;
pub mod server;
