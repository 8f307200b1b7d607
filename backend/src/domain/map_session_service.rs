//! Map corrections and "locate me" requests kept between requests.
//!
//! Both pieces of state belong to the client rather than to a mode, so they
//! are stored once per namespace.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::ports::{KeyValueStore, StorageKey, StorageNamespace};
use super::stored_value::{read_json, write_json};
use super::{
    Coordinates, Error, GeolocationFailure, LOCATION_REQUEST_OPTIONS, LocationRequestOptions,
    LocationTracker, MapCommand, MapController, MapSession,
};

/// Slack on top of the client's own timeout before a request counts as
/// abandoned.
const ABANDONED_REQUEST_GRACE_SECS: i64 = 5;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLocation {
    #[serde(flatten)]
    tracker: LocationTracker,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    requested_at: Option<DateTime<Utc>>,
}

fn abandon_after() -> TimeDelta {
    TimeDelta::milliseconds(i64::from(LOCATION_REQUEST_OPTIONS.timeout))
        + TimeDelta::seconds(ABANDONED_REQUEST_GRACE_SECS)
}

/// Reads and updates a client's map and location state.
#[derive(Clone)]
pub struct MapSessionService {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl MapSessionService {
    /// Create a service over a store and the clock timing location requests.
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Saved map bookkeeping; absent state reads as a fresh map.
    pub async fn map_session(&self, namespace: &StorageNamespace) -> Result<MapSession, Error> {
        Ok(read_json(self.store.as_ref(), namespace, StorageKey::MapState)
            .await?
            .unwrap_or_default())
    }

    /// Persist `current` unless it equals what was read.
    pub async fn save_map_session(
        &self,
        namespace: &StorageNamespace,
        previous: MapSession,
        current: MapSession,
    ) -> Result<(), Error> {
        if previous == current {
            return Ok(());
        }
        write_json(self.store.as_ref(), namespace, StorageKey::MapState, &current).await
    }

    /// Handle the client's "move ended" event, returning the correction to
    /// apply if the map left Israel.
    pub async fn move_end(
        &self,
        namespace: &StorageNamespace,
        center: Coordinates,
        zoom: f64,
    ) -> Result<Option<MapCommand>, Error> {
        let saved = self.map_session(namespace).await?;
        let mut map = MapController::new(center, zoom).resume(saved);
        let command = map.on_move_end(center, zoom);
        self.save_map_session(namespace, saved, map.session()).await?;
        if command.is_some() {
            debug!(lat = center.latitude, lng = center.longitude, "map left the allowed box");
        }
        Ok(command)
    }

    /// Current state of the "locate me" button.
    pub async fn location(&self, namespace: &StorageNamespace) -> Result<LocationTracker, Error> {
        Ok(self.stored_location(namespace).await?.tracker)
    }

    /// Start a location request; conflicts while one is in flight.
    pub async fn begin_locate(
        &self,
        namespace: &StorageNamespace,
    ) -> Result<LocationRequestOptions, Error> {
        let mut stored = self.stored_location(namespace).await?;
        let options = stored
            .tracker
            .begin()
            .map_err(|err| Error::conflict(err.to_string()))?;
        stored.requested_at = Some(self.clock.utc());
        self.write_location(namespace, &stored).await?;
        debug!("location requested");
        Ok(options)
    }

    /// Record a position fix. The fly key advances so the guide flies there
    /// once.
    pub async fn complete_locate(
        &self,
        namespace: &StorageNamespace,
        location: Coordinates,
    ) -> Result<LocationTracker, Error> {
        let mut stored = self.stored_location(namespace).await?;
        stored.tracker.succeed(location);
        stored.requested_at = None;
        self.write_location(namespace, &stored).await?;
        info!(fly_key = stored.tracker.fly_key(), "location fixed");
        Ok(stored.tracker)
    }

    /// Record a failed request.
    pub async fn fail_locate(
        &self,
        namespace: &StorageNamespace,
        failure: GeolocationFailure,
    ) -> Result<LocationTracker, Error> {
        let mut stored = self.stored_location(namespace).await?;
        stored.tracker.fail(failure);
        stored.requested_at = None;
        self.write_location(namespace, &stored).await?;
        info!(?failure, "location request failed");
        Ok(stored.tracker)
    }

    async fn stored_location(&self, namespace: &StorageNamespace) -> Result<StoredLocation, Error> {
        let mut stored: StoredLocation =
            read_json(self.store.as_ref(), namespace, StorageKey::LocationState)
                .await?
                .unwrap_or_default();
        let abandoned = stored.tracker.is_loading()
            && stored
                .requested_at
                .is_none_or(|at| self.clock.utc() - at > abandon_after());
        if abandoned {
            warn!("dropping abandoned location request");
            stored.tracker.fail(GeolocationFailure::Timeout);
            stored.requested_at = None;
        }
        Ok(stored)
    }

    async fn write_location(
        &self,
        namespace: &StorageNamespace,
        stored: &StoredLocation,
    ) -> Result<(), Error> {
        write_json(self.store.as_ref(), namespace, StorageKey::LocationState, stored).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockKeyValueStore;
    use crate::domain::{ErrorCode, ISRAEL_BOUNDS};
    use chrono::{Local, TimeZone};
    use rstest::rstest;
    use std::sync::Mutex;

    struct FixtureClock;

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0)
                .single()
                .expect("valid timestamp")
        }
    }

    fn service(store: MockKeyValueStore) -> MapSessionService {
        MapSessionService::new(Arc::new(store), Arc::new(FixtureClock))
    }

    fn stored(key: StorageKey, value: Option<String>) -> MockKeyValueStore {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .withf(move |_, k| *k == key)
            .returning(move |_, _| Ok(value.clone()));
        store
    }

    fn capture(store: &mut MockKeyValueStore, key: StorageKey) -> Arc<Mutex<Option<String>>> {
        let written = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&written);
        store
            .expect_set()
            .withf(move |_, k, _| *k == key)
            .times(1)
            .returning(move |_, _, value| {
                *sink.lock().expect("lock") = Some(value);
                Ok(())
            });
        written
    }

    #[rstest]
    #[tokio::test]
    async fn correction_is_remembered_for_the_next_move_end() {
        let mut store = stored(StorageKey::MapState, None);
        let written = capture(&mut store, StorageKey::MapState);
        let ns = StorageNamespace::random();
        let command = service(store)
            .move_end(&ns, Coordinates::new(37.98, 23.72), 7.0)
            .await
            .expect("move end");
        assert_eq!(
            command,
            Some(MapCommand::SetView {
                center: ISRAEL_BOUNDS.center(),
                zoom: 7.0,
                animate: false,
            })
        );
        let raw = written.lock().expect("lock").clone().expect("state written");
        let session: MapSession = serde_json::from_str(&raw).expect("valid json");
        assert!(session.programmatic_move);
    }

    #[rstest]
    #[tokio::test]
    async fn move_inside_israel_writes_nothing() {
        let ns = StorageNamespace::random();
        let command = service(stored(StorageKey::MapState, None))
            .move_end(&ns, Coordinates::new(32.08, 34.78), 9.0)
            .await
            .expect("move end");
        assert_eq!(command, None);
    }

    #[rstest]
    #[tokio::test]
    async fn pending_request_conflicts() {
        let pending = format!(
            r#"{{"loading":true,"flyKey":2,"requestedAt":"{}"}}"#,
            FixtureClock.utc().to_rfc3339()
        );
        let ns = StorageNamespace::random();
        let err = service(stored(StorageKey::LocationState, Some(pending)))
            .begin_locate(&ns)
            .await
            .expect_err("request in flight");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn abandoned_request_no_longer_blocks() {
        let stale = FixtureClock.utc() - TimeDelta::minutes(5);
        let pending = format!(
            r#"{{"loading":true,"flyKey":2,"requestedAt":"{}"}}"#,
            stale.to_rfc3339()
        );
        let mut store = stored(StorageKey::LocationState, Some(pending));
        let written = capture(&mut store, StorageKey::LocationState);
        let ns = StorageNamespace::random();
        let options = service(store).begin_locate(&ns).await.expect("stale request dropped");
        assert_eq!(options, LOCATION_REQUEST_OPTIONS);

        let raw = written.lock().expect("lock").clone().expect("state written");
        let saved: StoredLocation = serde_json::from_str(&raw).expect("valid json");
        assert!(saved.tracker.is_loading());
        assert_eq!(saved.tracker.fly_key(), 2);
        assert_eq!(saved.requested_at, Some(FixtureClock.utc()));
    }

    #[rstest]
    #[tokio::test]
    async fn fix_advances_the_fly_key() {
        let mut store = stored(
            StorageKey::LocationState,
            Some(r#"{"loading":true,"flyKey":2}"#.to_owned()),
        );
        let written = capture(&mut store, StorageKey::LocationState);
        let ns = StorageNamespace::random();
        let tracker = service(store)
            .complete_locate(&ns, Coordinates::new(32.08, 34.78))
            .await
            .expect("fix recorded");
        assert!(!tracker.is_loading());
        assert_eq!(tracker.fly_key(), 3);
        assert_eq!(tracker.location(), Some(Coordinates::new(32.08, 34.78)));
        assert!(written.lock().expect("lock").is_some());
    }
}
