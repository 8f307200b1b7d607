//! Session cookie settings derived from [`GuideSettings`].
//!
//! Key material is read from disk, derived into a cookie key and wiped from
//! memory. Debug builds, or deployments that opt in, fall back to a
//! generated key when the file is unavailable.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroize;

use crate::settings::GuideSettings;

const SESSION_KEY_MIN_LEN: usize = 64;

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing key file.
    Debug,
    /// Release builds require a readable key file unless ephemeral keys are
    /// explicitly allowed.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cafe_guide::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Session settings ready to hand to the session middleware.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

/// Errors raised while preparing session settings.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        /// Key file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The session key file holds too little key material.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        /// Key file path.
        path: PathBuf,
        /// Bytes read.
        length: usize,
        /// Required bytes.
        min_len: usize,
    },
}

/// Build session settings from the server settings and build mode.
///
/// # Errors
///
/// Returns [`SessionConfigError`] when the key file is unreadable and no
/// fallback is allowed, or when it holds fewer than 64 bytes.
///
/// # Examples
///
/// ```rust
/// use std::ffi::OsString;
///
/// use cafe_guide::inbound::http::session_config::{BuildMode, session_settings};
/// use cafe_guide::settings::GuideSettings;
/// use ortho_config::OrthoConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("cafe_guide_session_key_example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
///
/// let mut settings = GuideSettings::load_from_iter([OsString::from("cafe-guide")])?;
/// settings.session_key_file = Some(key_path.clone());
/// settings.cookie_secure = true;
///
/// let session = session_settings(&settings, BuildMode::Release)?;
/// assert!(session.cookie_secure);
///
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings(
    settings: &GuideSettings,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let key = session_key(
        settings.session_key_file(),
        mode,
        settings.allow_ephemeral_session_key,
    )?;
    if !settings.cookie_secure && !mode.is_debug() {
        warn!("session cookie is not marked Secure");
    }
    Ok(SessionSettings {
        key,
        cookie_secure: settings.cookie_secure,
        same_site: SameSite::Lax,
    })
}

fn session_key(path: PathBuf, mode: BuildMode, allow_ephemeral: bool) -> Result<Key, SessionConfigError> {
    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            } else {
                Err(SessionConfigError::KeyRead {
                    path,
                    source: error,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests;
