//! # microhttp - Entry Point
//! src/main.rs
//!
//! Registra los handlers de demostración y arranca el servidor.

use microhttp::commands;
use microhttp::config::Config;
use microhttp::logging;
use microhttp::server::Server;

fn main() {
    let config = Config::new();
    logging::init(&config.log_level);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    }
    config.print_summary();

    let router = match commands::routes(config.max_routes) {
        Ok(router) => router,
        Err(e) => {
            tracing::error!(error = %e, "Could not register routes");
            std::process::exit(1);
        }
    };

    let server = match Server::bind(&config, router) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "Fatal startup error");
            std::process::exit(1);
        }
    };

    // Esto bloquea el thread para siempre
    server.run();
}
