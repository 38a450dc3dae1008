//! # Servidor TCP
//! src/server/tcp.rs
//!
//! Ciclo de vida de cada conexión:
//!
//! ```text
//! accept → read → parse → dispatch → handler → write → close
//! ```
//!
//! Por defecto se atiende una conexión a la vez, completa, antes de aceptar
//! la siguiente. Con `max_connections > 1` cada conexión corre en su propio
//! thread, pero nunca hay más de `max_connections` en curso.
//!
//! Tras una response de error el servidor cierra su lado de escritura y
//! descarta lo que el cliente siga enviando antes de cerrar. Un close con
//! bytes sin leer produce un RST y el cliente perdería la response.

use crate::config::{Config, Limits};
use crate::error::ServerError;
use crate::http::{send, Request, Response, StatusCode};
use crate::router::Router;
use crate::server::limiter::ConnectionLimiter;
use crate::server::reader::read_request;
use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Tope de bytes descartados al cerrar una conexión rechazada
const DRAIN_LIMIT: usize = 1 << 20;

/// Espera máxima por datos del cliente durante el descarte
const DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Cómo terminó una conexión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// El cliente cerró sin enviar nada
    Closed,

    /// Se envió la response del router
    Responded(StatusCode),

    /// Se envió una response de error por un límite excedido
    Rejected(StatusCode),
}

/// Servidor HTTP de una petición por conexión
pub struct Server {
    listener: TcpListener,
    router: Arc<Router>,
    limits: Limits,
    read_timeout: Option<Duration>,
    /// `None` en modo secuencial
    limiter: Option<Arc<ConnectionLimiter>>,
}

impl Server {
    /// Crea el socket de escucha en `host:port`
    ///
    /// Un fallo aquí es fatal para el proceso: sin socket no hay nada que
    /// servir.
    pub fn bind(config: &Config, router: Router) -> Result<Self, ServerError> {
        let address = config.address();
        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            addr: address.clone(),
            source,
        })?;

        let local_addr = listener.local_addr()?;
        tracing::info!(address = %local_addr, routes = router.len(), "Server listening");

        let limiter = (config.max_connections > 1).then(|| ConnectionLimiter::new(config.max_connections));
        if limiter.is_some() {
            tracing::info!(max_connections = config.max_connections, "One thread per connection");
        }

        Ok(Self {
            listener,
            router: Arc::new(router),
            limits: config.limits(),
            read_timeout: config.read_timeout(),
            limiter,
        })
    }

    /// Dirección en la que quedó escuchando el servidor
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Atiende conexiones indefinidamente
    pub fn run(&self) {
        loop {
            self.accept_one();
        }
    }

    /// Acepta y atiende una conexión
    ///
    /// Un error en `accept` se registra y no detiene al servidor.
    pub fn accept_one(&self) {
        // En modo concurrente el permiso se pide antes de aceptar
        let permit = self.limiter.as_ref().map(|limiter| limiter.acquire());

        let (stream, peer) = match self.listener.accept() {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "Accept failed");
                return;
            }
        };

        match permit {
            None => {
                tracing::debug!(peer = %peer, "Connection accepted");
                serve(stream, peer, &self.router, &self.limits, self.read_timeout)
            }
            Some(permit) => {
                if let Some(limiter) = &self.limiter {
                    tracing::debug!(peer = %peer, in_flight = limiter.in_flight(), "Connection accepted");
                }
                let router = Arc::clone(&self.router);
                let limits = self.limits;
                let read_timeout = self.read_timeout;

                thread::spawn(move || {
                    let _permit = permit;
                    serve(stream, peer, &router, &limits, read_timeout);
                });
            }
        }
    }
}

/// Atiende una conexión TCP y la cierra
fn serve(mut stream: TcpStream, peer: SocketAddr, router: &Router, limits: &Limits, read_timeout: Option<Duration>) {
    if let Err(e) = stream.set_read_timeout(read_timeout) {
        tracing::warn!(peer = %peer, error = %e, "Could not set read timeout");
    }

    match handle_connection(&mut stream, Some(peer), router, limits) {
        Ok(Outcome::Rejected(_)) => linger(&mut stream, peer),
        Ok(_) => {}
        Err(e) => tracing::debug!(peer = %peer, error = %e, "Connection dropped"),
    }
    // `stream` se cierra al salir del scope
}

/// Cierra la escritura y descarta lo que el cliente siga enviando
///
/// Termina cuando el cliente cierra, vence `DRAIN_TIMEOUT` o se descartan
/// `DRAIN_LIMIT` bytes.
fn linger(stream: &mut TcpStream, peer: SocketAddr) {
    if let Err(e) = stream.shutdown(Shutdown::Write) {
        tracing::debug!(peer = %peer, error = %e, "Shutdown failed");
        return;
    }
    if let Err(e) = stream.set_read_timeout(Some(DRAIN_TIMEOUT)) {
        tracing::debug!(peer = %peer, error = %e, "Could not set drain timeout");
    }

    let mut sink = [0u8; 4096];
    let mut drained = 0;
    while drained < DRAIN_LIMIT {
        match stream.read(&mut sink) {
            Ok(0) => break,
            Ok(n) => drained += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }

    tracing::debug!(peer = %peer, drained, "Rejected connection drained");
}

/// Procesa un request completo sobre un stream ya aceptado
///
/// - Si el cliente no envía nada, no se escribe nada.
/// - Si se excede algún límite, se responde con el código correspondiente.
/// - Si la response del handler no cabe en el buffer de salida, se envía
///   un 500 en su lugar.
pub fn handle_connection<S: Read + Write>(
    stream: &mut S,
    peer: Option<SocketAddr>,
    router: &Router,
    limits: &Limits,
) -> Result<Outcome, ServerError> {
    let raw = match read_request(stream, limits.max_request_bytes) {
        Ok(raw) => raw,
        Err(e) => return reject(stream, e, limits),
    };

    if raw.is_empty() {
        tracing::debug!(peer = ?peer, "Connection closed before any data");
        return Ok(Outcome::Closed);
    }

    let mut request = match Request::parse(&raw, limits) {
        Ok(request) => request,
        Err(e) => return reject(stream, e.into(), limits),
    };
    if let Some(peer) = peer {
        request = request.with_peer(peer);
    }

    tracing::debug!(
        peer = ?request.peer(),
        method = request.method(),
        path = request.path(),
        bytes = raw.len(),
        "Request received"
    );

    let response = router.dispatch(&request);

    match send(stream, &response, limits.max_response_bytes) {
        Ok(written) => {
            tracing::info!(
                peer = ?request.peer(),
                method = request.method(),
                path = request.path(),
                status = response.status().as_u16(),
                bytes = written,
                "Response sent"
            );
            Ok(Outcome::Responded(response.status()))
        }
        Err(e @ ServerError::ResponseTooLarge { .. }) => reject(stream, e, limits),
        Err(e) => Err(e),
    }
}

/// Responde con el código asociado al error, o lo propaga si no tiene uno
fn reject<S: Write>(stream: &mut S, error: ServerError, limits: &Limits) -> Result<Outcome, ServerError> {
    let Some(status) = error.status() else {
        return Err(error);
    };

    tracing::warn!(error = %error, status = status.as_u16(), "Request rejected");
    send(stream, &Response::error(status), limits.max_response_bytes)?;
    Ok(Outcome::Rejected(status))
}
