//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `CAFE_GUIDE_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::forms::{DEFAULT_FORM_ENDPOINT, DEFAULT_FORM_ID};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Configuration values for the guide server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CAFE_GUIDE")]
pub struct GuideSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Directory holding per-client state; in-memory storage when unset.
    pub storage_dir: Option<PathBuf>,
    /// Formspree form receiving place suggestions.
    pub form_id: Option<String>,
    /// Formspree submission endpoint.
    pub form_endpoint: Option<String>,
    /// File holding the session cookie key material.
    pub session_key_file: Option<PathBuf>,
    /// Allow a generated session key when the key file cannot be read.
    #[ortho_config(default = false)]
    pub allow_ephemeral_session_key: bool,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = false)]
    pub cookie_secure: bool,
}

impl GuideSettings {
    /// Configured listen address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`AddrParseError`] when the configured address is malformed.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    /// Configured form id, falling back to the guide's form.
    pub fn form_id(&self) -> &str {
        self.form_id.as_deref().unwrap_or(DEFAULT_FORM_ID)
    }

    /// Configured form endpoint, falling back to Formspree.
    pub fn form_endpoint(&self) -> &str {
        self.form_endpoint.as_deref().unwrap_or(DEFAULT_FORM_ENDPOINT)
    }

    /// Configured session key path, falling back to the secrets mount.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }
}
