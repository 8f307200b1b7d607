//! HTTP server configuration object and helpers.

use actix_web::cookie::{Key, SameSite};
use camino::Utf8PathBuf;
use std::net::SocketAddr;

/// Hosted form receiving place suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FormTarget {
    pub(crate) endpoint: String,
    pub(crate) form_id: String,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage_dir: Option<Utf8PathBuf>,
    pub(crate) form: Option<FormTarget>,
}

impl ServerConfig {
    /// Construct a server configuration from session and binding settings.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            storage_dir: None,
            form: None,
        }
    }

    /// Persist client state under `dir` instead of in memory.
    #[must_use]
    pub fn with_storage_dir(mut self, dir: Utf8PathBuf) -> Self {
        self.storage_dir = Some(dir);
        self
    }

    /// Forward suggestions to `form_id` under `endpoint`.
    ///
    /// Without a form target suggestions are accepted and dropped.
    #[must_use]
    pub fn with_form(mut self, endpoint: impl Into<String>, form_id: impl Into<String>) -> Self {
        self.form = Some(FormTarget {
            endpoint: endpoint.into(),
            form_id: form_id.into(),
        });
        self
    }
}
