use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use log::{error, info};

use crate::app::create_app;
use crate::config::Config;

mod app;
mod config;
mod database;
mod error;
mod models;
mod routes;
#[cfg(test)]
mod test_support;
mod weather;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = Config::parse();

    let app = match create_app(&config).await {
        Ok(app) => app,
        Err(err) => {
            error!("Failed to initialize database: {err}");
            std::process::exit(1);
        }
    };

    let addr = config.listen_addr;
    info!("listening on {}", addr);
    let served = match (config.key_file_path, config.cert_file_path) {
        (Some(key_file_path), Some(cert_file_path)) => {
            info!(
                "using tls with key file {} and cert file {}",
                key_file_path, cert_file_path
            );
            let tls = match RustlsConfig::from_pem_file(cert_file_path, key_file_path).await {
                Ok(tls) => tls,
                Err(err) => {
                    error!("Failed to load tls configuration: {err}");
                    std::process::exit(1);
                }
            };
            axum_server::bind_rustls(addr, tls)
                .serve(app.into_make_service())
                .await
        }
        (None, None) => {
            axum_server::bind(addr)
                .serve(app.into_make_service())
                .await
        }
        _ => {
            error!("Both a key file and a cert file are needed to serve tls");
            std::process::exit(1);
        }
    };

    if let Err(err) = served {
        error!("Server error: {err}");
        std::process::exit(1);
    }
}
