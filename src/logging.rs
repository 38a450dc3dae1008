//! # Logging
//! src/logging.rs
//!
//! Inicializa el subscriber de `tracing`. `RUST_LOG` tiene prioridad sobre
//! el filtro que llega de la configuración.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Instala el subscriber global
///
/// Si ya hay uno instalado (por ejemplo, en tests), no hace nada.
pub fn init(default_filter: &str) {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(from_env.as_deref(), default_filter);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Elige el filtro: entorno, luego configuración, luego `info`
fn build_filter(from_env: Option<&str>, default_filter: &str) -> EnvFilter {
    from_env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(default_filter).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_config_filter_without_env() {
        let filter = build_filter(None, "debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_env_overrides_config() {
        let filter = build_filter(Some("warn"), "debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_invalid_filters_fall_back() {
        // Entorno inválido: se usa la configuración
        let filter = build_filter(Some("microhttp=nope"), "error");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));

        // Ambos inválidos: info
        let filter = build_filter(Some("microhttp=nope"), "microhttp=loud");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_init_twice_keeps_first_subscriber() {
        init("debug");
        init("error");
        // El segundo init no falla y queda un subscriber global real
        let installed = tracing::dispatcher::get_default(|dispatch| {
            !dispatch.is::<tracing::subscriber::NoSubscriber>()
        });
        assert!(installed);
    }
}
