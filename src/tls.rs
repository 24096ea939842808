//! TLS setup for the Gemini listener
//!
//! Gemini requires TLS on every connection. Clients typically pin the
//! server certificate on first use, so a self-signed certificate is the
//! common case and no client certificates are requested.
//!
//! The certificate chain and private key are read from PEM files once at
//! startup and the resulting acceptor is shared by all connections. Uses the
//! ring crypto provider.

use anyhow::{Context, Result, bail};
use rustls::ServerConfig;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use std::path::Path;
use std::sync::Arc;
use tokio_rustls::TlsAcceptor;
use tracing::debug;

/// Read every certificate from a PEM file
pub fn load_certificates(path: &Path) -> Result<Vec<CertificateDer<'static>>> {
    let pem = std::fs::read(path)
        .with_context(|| format!("Failed to read TLS certificate from {}", path.display()))?;

    let certs = rustls_pemfile::certs(&mut pem.as_slice())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to parse TLS certificate {}", path.display()))?;

    if certs.is_empty() {
        bail!("No certificates found in {}", path.display());
    }

    Ok(certs)
}

/// Read the first private key (PKCS#8, PKCS#1 or SEC1) from a PEM file
pub fn load_private_key(path: &Path) -> Result<PrivateKeyDer<'static>> {
    let pem = std::fs::read(path)
        .with_context(|| format!("Failed to read TLS private key from {}", path.display()))?;

    rustls_pemfile::private_key(&mut pem.as_slice())
        .with_context(|| format!("Failed to parse TLS private key {}", path.display()))?
        .with_context(|| format!("No private key found in {}", path.display()))
}

/// Build a server configuration from a certificate chain and key
pub fn server_config(
    certs: Vec<CertificateDer<'static>>,
    key: PrivateKeyDer<'static>,
) -> Result<ServerConfig> {
    let config =
        ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
            .with_safe_default_protocol_versions()
            .context("Failed to create TLS config with ring provider")?
            .with_no_client_auth()
            .with_single_cert(certs, key)
            .context("Certificate and private key do not form a valid pair")?;

    Ok(config)
}

/// Load certificate and key files into a ready acceptor
pub fn acceptor_from_pem(cert_path: &Path, key_path: &Path) -> Result<TlsAcceptor> {
    let certs = load_certificates(cert_path)?;
    let key = load_private_key(key_path)?;

    debug!(
        "TLS: Loaded {} certificate(s) from {}",
        certs.len(),
        cert_path.display()
    );

    Ok(TlsAcceptor::from(Arc::new(server_config(certs, key)?)))
}
