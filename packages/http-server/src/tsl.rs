//! TLS configuration loading.
use axum_server::tls_rustls::RustlsConfig;
use roomtracker_configuration::TslConfig;
use thiserror::Error;

/// Error that can occur when loading the TLS config.
#[derive(Error, Debug)]
pub enum Error {
    #[error("bad TLS config: {raw_error}")]
    BadTlsConfig { raw_error: String },
}

/// Builds the rustls config from the configured certificate and key files.
///
/// Returns `None` when no TLS config is present.
///
/// # Errors
///
/// Returns an error when the certificate or key file cannot be loaded.
pub async fn make_rust_tls(opt_tsl_config: Option<&TslConfig>) -> Option<Result<RustlsConfig, Error>> {
    match opt_tsl_config {
        Some(tsl_config) => {
            tracing::info!("Loading TLS certificate from: {}", tsl_config.ssl_cert_path);

            Some(
                RustlsConfig::from_pem_file(
                    tsl_config.ssl_cert_path.as_std_path(),
                    tsl_config.ssl_key_path.as_std_path(),
                )
                .await
                .map_err(|err| Error::BadTlsConfig {
                    raw_error: err.to_string(),
                }),
            )
        }
        None => None,
    }
}
