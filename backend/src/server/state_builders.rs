//! Builders wiring outbound adapters into the HTTP state.

use std::io;
use std::sync::Arc;

use actix_web::web;
use tracing::info;

use cafe_guide::domain::ports::{FixtureSuggestionSubmitter, KeyValueStore, SuggestionSubmitter};
use cafe_guide::inbound::http::state::{HttpState, HttpStatePorts};
use cafe_guide::outbound::catalog::BundledPlaceCatalog;
use cafe_guide::outbound::forms::FormspreeSubmitter;
use cafe_guide::outbound::storage::{DirectoryKeyValueStore, InMemoryKeyValueStore};

use super::ServerConfig;

/// Select the directory store when a storage directory is configured,
/// otherwise keep client state in memory.
fn build_store(config: &ServerConfig) -> io::Result<Arc<dyn KeyValueStore>> {
    match &config.storage_dir {
        Some(dir) => {
            let store = DirectoryKeyValueStore::open(dir.clone())?;
            info!(root = %store.root(), "persisting client state on disk");
            Ok(Arc::new(store))
        }
        None => {
            info!("client state kept in memory; it is lost on restart");
            Ok(Arc::new(InMemoryKeyValueStore::default()))
        }
    }
}

fn build_suggestion_submitter(config: &ServerConfig) -> io::Result<Arc<dyn SuggestionSubmitter>> {
    match &config.form {
        Some(form) => {
            let submitter =
                FormspreeSubmitter::new(&form.endpoint, &form.form_id).map_err(io::Error::other)?;
            info!(url = %submitter.url(), "forwarding suggestions");
            Ok(Arc::new(submitter))
        }
        None => Ok(Arc::new(FixtureSuggestionSubmitter)),
    }
}

/// Build the shared HTTP state from configuration.
///
/// # Errors
///
/// Returns [`io::Error`] when the storage directory cannot be opened, the
/// bundled catalogs fail validation or the form endpoint is invalid.
pub(crate) fn build_http_state(config: &ServerConfig) -> io::Result<web::Data<HttpState>> {
    let catalog = BundledPlaceCatalog::load().map_err(io::Error::other)?;
    let ports = HttpStatePorts {
        store: build_store(config)?,
        catalog: Arc::new(catalog),
        suggestions: build_suggestion_submitter(config)?,
        clock: Arc::new(mockable::DefaultClock),
    };
    Ok(web::Data::new(HttpState::new(ports)))
}
