//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Tabla de rutas (method, path) → handler con capacidad fija.
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! La comparación es exacta y distingue mayúsculas, tanto del método como
//! del path: no hay comodines, prefijos ni parámetros. Las rutas se prueban
//! en orden de registro y gana la primera que coincide. Si ninguna
//! coincide, se responde 404 Not Found.
//!
//! El router se construye una vez al arrancar y luego se mueve al servidor;
//! a partir de ahí solo se lee.

use crate::http::request::{truncate_token, MAX_METHOD_LEN, MAX_PATH_LEN};
use crate::http::{Request, Response, StatusCode};
use thiserror::Error;

/// Capacidad por defecto de la tabla de rutas
pub const DEFAULT_MAX_ROUTES: usize = 16;

/// Un handler recibe el request y retorna la response que se enviará
///
/// Retornar la response (en vez de escribirla) garantiza que cada
/// invocación produce exactamente una respuesta.
pub trait Handler: Send + Sync {
    fn handle(&self, request: &Request) -> Response;
}

impl<F> Handler for F
where
    F: Fn(&Request) -> Response + Send + Sync,
{
    fn handle(&self, request: &Request) -> Response {
        self(request)
    }
}

/// Errores al registrar una ruta
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// La tabla ya está llena
    #[error("too many handlers registered (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    #[error("route method must not be empty")]
    EmptyMethod,

    #[error("route path must not be empty")]
    EmptyPath,
}

/// Una ruta registrada
struct Route {
    method: String,
    path: String,
    handler: Box<dyn Handler>,
}

/// Router que mapea (method, path) a handlers
pub struct Router {
    routes: Vec<Route>,
    capacity: usize,
}

impl Router {
    /// Crea un router vacío con la capacidad por defecto
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ROUTES)
    }

    /// Crea un router vacío que admite hasta `capacity` rutas
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            routes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Registra una ruta con su handler
    ///
    /// Método y path demasiado largos se recortan (no se rechazan). Con la
    /// tabla llena el registro se rechaza y se deja un warning en el log.
    ///
    /// # Ejemplo
    /// ```
    /// use microhttp::router::Router;
    /// use microhttp::http::{Request, Response, StatusCode};
    ///
    /// fn hello_handler(_req: &Request) -> Response {
    ///     Response::text(StatusCode::OK, "Hello")
    /// }
    ///
    /// let mut router = Router::new();
    /// router.register("GET", "/hello", hello_handler).unwrap();
    /// assert_eq!(router.len(), 1);
    /// ```
    pub fn register<H>(&mut self, method: &str, path: &str, handler: H) -> Result<(), RouteError>
    where
        H: Handler + 'static,
    {
        if method.is_empty() {
            return Err(RouteError::EmptyMethod);
        }
        if path.is_empty() {
            return Err(RouteError::EmptyPath);
        }

        if self.routes.len() >= self.capacity {
            tracing::warn!(method, path, capacity = self.capacity, "Too many handlers registered");
            return Err(RouteError::CapacityExceeded { capacity: self.capacity });
        }

        let stored_method = truncate_token(method, MAX_METHOD_LEN);
        let stored_path = truncate_token(path, MAX_PATH_LEN);
        if stored_method.len() != method.len() || stored_path.len() != path.len() {
            tracing::warn!(
                method = stored_method,
                path = stored_path,
                "Route method/path truncated"
            );
        }

        self.routes.push(Route {
            method: stored_method.to_string(),
            path: stored_path.to_string(),
            handler: Box::new(handler),
        });
        Ok(())
    }

    /// Busca el handler registrado para (method, path)
    pub fn find(&self, method: &str, path: &str) -> Option<&dyn Handler> {
        self.routes
            .iter()
            .find(|route| route.method == method && route.path == path)
            .map(|route| route.handler.as_ref())
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// Si no encuentra un handler, retorna 404 Not Found.
    ///
    /// # Ejemplo
    /// ```
    /// use microhttp::config::Limits;
    /// use microhttp::router::Router;
    /// use microhttp::http::{Request, StatusCode};
    ///
    /// let router = Router::new();
    /// let raw = b"DELETE /nope HTTP/1.1\r\n\r\n";
    /// let request = Request::parse(raw, &Limits::default()).unwrap();
    /// assert_eq!(router.dispatch(&request).status(), StatusCode::NOT_FOUND);
    /// ```
    pub fn dispatch(&self, request: &Request) -> Response {
        match self.find(request.method(), request.path()) {
            Some(handler) => handler.handle(request),
            None => {
                tracing::debug!(method = request.method(), path = request.path(), "No route matched");
                Response::text(
                    StatusCode::NOT_FOUND,
                    format!("Not Found: {} {}", request.method(), request.path()),
                )
            }
        }
    }

    /// Cantidad de rutas registradas
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Verifica si no hay rutas registradas
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Capacidad máxima de la tabla
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field(
                "routes",
                &self
                    .routes
                    .iter()
                    .map(|route| format!("{} {}", route.method, route.path))
                    .collect::<Vec<_>>(),
            )
            .field("capacity", &self.capacity)
            .finish()
    }
}
