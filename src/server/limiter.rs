//! # Límite de Conexiones Simultáneas
//! src/server/limiter.rs
//!
//! Semáforo contador para el modo con un thread por conexión. El acceptor
//! pide un permiso antes de aceptar; si ya hay `max` conexiones en curso se
//! bloquea hasta que alguna termine.

use std::sync::{Arc, Condvar, Mutex};

/// Semáforo de conexiones en curso
pub struct ConnectionLimiter {
    /// Conexiones en curso
    in_flight: Mutex<usize>,

    /// Notifica cuando se libera un permiso
    condvar: Condvar,

    /// Máximo de conexiones simultáneas
    max: usize,
}

/// Permiso para atender una conexión; se libera al hacer drop
pub struct Permit {
    limiter: Arc<ConnectionLimiter>,
}

impl ConnectionLimiter {
    /// Crea un limitador con `max` permisos
    pub fn new(max: usize) -> Arc<Self> {
        Arc::new(Self {
            in_flight: Mutex::new(0),
            condvar: Condvar::new(),
            max,
        })
    }

    /// Obtiene un permiso
    ///
    /// Bloquea hasta que haya uno disponible
    pub fn acquire(self: &Arc<Self>) -> Permit {
        let mut in_flight = self.in_flight.lock().unwrap();

        while *in_flight >= self.max {
            in_flight = self.condvar.wait(in_flight).unwrap();
        }

        *in_flight += 1;
        Permit {
            limiter: Arc::clone(self),
        }
    }

    /// Conexiones en curso
    pub fn in_flight(&self) -> usize {
        *self.in_flight.lock().unwrap()
    }

    fn release(&self) {
        let mut in_flight = self.in_flight.lock().unwrap();
        *in_flight -= 1;
        self.condvar.notify_one();
    }
}

impl Drop for Permit {
    fn drop(&mut self) {
        self.limiter.release();
    }
}
