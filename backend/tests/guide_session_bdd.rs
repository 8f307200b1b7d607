//! Behaviour tests for per-client guide state over a live server.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. Client state lives in a temporary
//! directory so a scenario can restart the server and read it back.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use awc::Client;
use camino::Utf8PathBuf;
use cafe_guide::Trace;
use cafe_guide::domain::TRACE_ID_HEADER;
use cafe_guide::domain::ports::FixtureSuggestionSubmitter;
use cafe_guide::inbound::http::favorites::{list_favorites, toggle_favorite};
use cafe_guide::inbound::http::mode::{get_mode, set_mode};
use cafe_guide::inbound::http::notes::{list_notes, set_note};
use cafe_guide::inbound::http::places::list_places;
use cafe_guide::inbound::http::reviews::submit_review;
use cafe_guide::inbound::http::state::{HttpState, HttpStatePorts};
use cafe_guide::outbound::catalog::BundledPlaceCatalog;
use cafe_guide::outbound::storage::DirectoryKeyValueStore;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

const NOTE_TEXT: &str = "לחזור בשבת";

struct GuideWorld {
    runtime: Runtime,
    local: LocalSet,
    storage: TempDir,
    key: Key,
    base_url: String,
    server: ServerHandle,
    session_cookie: Option<String>,
    place_id: Option<String>,
    last_status: Option<u16>,
    last_trace_id: Option<String>,
    last_body: Option<Value>,
}

type SharedWorld = Rc<RefCell<GuideWorld>>;

struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn storage_root(storage: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(storage.path().to_path_buf()).expect("UTF-8 temp dir")
}

async fn spawn_guide_server(root: Utf8PathBuf, key: Key) -> Result<(String, ServerHandle), String> {
    let store = DirectoryKeyValueStore::open(root).map_err(|err| err.to_string())?;
    let catalog = BundledPlaceCatalog::load().map_err(|err| err.to_string())?;
    let http_state = web::Data::new(HttpState::new(HttpStatePorts {
        store: Arc::new(store),
        catalog: Arc::new(catalog),
        suggestions: Arc::new(FixtureSuggestionSubmitter),
        clock: Arc::new(mockable::DefaultClock),
    }));
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".to_owned())
            .cookie_path("/".to_owned())
            .cookie_secure(false)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();
        let api = web::scope("/api/v1")
            .wrap(session)
            .service(get_mode)
            .service(set_mode)
            .service(list_places)
            .service(list_favorites)
            .service(toggle_favorite)
            .service(list_notes)
            .service(set_note)
            .service(submit_review);

        App::new()
            .app_data(http_state.clone())
            .wrap(Trace)
            .service(api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

#[fixture]
fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();
    let storage = TempDir::new().expect("temp dir");
    let key = Key::generate();

    let (base_url, server) = local
        .block_on(
            &runtime,
            spawn_guide_server(storage_root(&storage), key.clone()),
        )
        .expect("server should start");

    WorldFixture {
        world: Rc::new(RefCell::new(GuideWorld {
            runtime,
            local,
            storage,
            key,
            base_url,
            server,
            session_cookie: None,
            place_id: None,
            last_status: None,
            last_trace_id: None,
            last_body: None,
        })),
    }
}

struct RequestSpec<'a> {
    method: Method,
    path: &'a str,
    payload: Option<Value>,
    label: &'a str,
}

/// Send a JSON request, carrying the session cookie once one was issued.
fn perform_json_request(world: &SharedWorld, spec: RequestSpec<'_>) -> Value {
    let RequestSpec {
        method,
        path,
        payload,
        label,
    } = spec;
    let cookie = world.borrow().session_cookie.clone();
    let (status, trace_id, issued_cookie, body) = with_world_async(world, |base_url| async move {
        let mut request = Client::default().request(method, format!("{base_url}{path}"));
        if let Some(cookie) = cookie {
            request = request.insert_header((header::COOKIE, cookie));
        }
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await.expect(label),
            None => request.send().await.expect(label),
        };
        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let issued_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(str::to_owned);
        let body = response.body().await.expect(label);
        let json: Value = serde_json::from_slice(&body).expect(label);
        (status, trace_id, issued_cookie, json)
    });

    let mut ctx = world.borrow_mut();
    if ctx.session_cookie.is_none() {
        ctx.session_cookie = issued_cookie;
    }
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body.clone());
    body
}

fn first_coffee_place(world: &SharedWorld) -> String {
    let body = perform_json_request(
        world,
        RequestSpec {
            method: Method::GET,
            path: "/api/v1/places",
            payload: None,
            label: "list places request",
        },
    );
    assert_eq!(body.get("mode").and_then(Value::as_str), Some("coffee"));
    let id = body
        .pointer("/places/0/place/id")
        .and_then(Value::as_str)
        .expect("first place id")
        .to_owned();
    world.borrow_mut().place_id = Some(id.clone());
    id
}

fn list(world: &SharedWorld, path: &str) -> Value {
    perform_json_request(
        world,
        RequestSpec {
            method: Method::GET,
            path,
            payload: None,
            label: "list request",
        },
    )
}

fn remembered_place(world: &SharedWorld) -> String {
    world.borrow().place_id.clone().expect("place id")
}

#[given("a running guide server")]
fn a_running_guide_server(world: &WorldFixture) {
    let _ = world;
}

#[given("the client has favourited a coffee place")]
fn the_client_has_favourited_a_coffee_place(world: &WorldFixture) {
    let world = world.world();
    let id = first_coffee_place(&world);
    let path = format!("/api/v1/favorites/{id}/toggle");
    let body = perform_json_request(
        &world,
        RequestSpec {
            method: Method::POST,
            path: &path,
            payload: None,
            label: "toggle favourite request",
        },
    );
    assert_eq!(body.get("favorite").and_then(Value::as_bool), Some(true));
}

#[given("the client has written a note")]
fn the_client_has_written_a_note(world: &WorldFixture) {
    let world = world.world();
    let id = first_coffee_place(&world);
    let path = format!("/api/v1/notes/{id}");
    perform_json_request(
        &world,
        RequestSpec {
            method: Method::PUT,
            path: &path,
            payload: Some(json!({ "text": NOTE_TEXT })),
            label: "set note request",
        },
    );
    assert_eq!(world.borrow().last_status, Some(200));
}

#[when("the client requests the current mode")]
fn the_client_requests_the_current_mode(world: &WorldFixture) {
    list(&world.world(), "/api/v1/mode");
}

#[when("the client switches to {mode}")]
fn the_client_switches_to(world: &WorldFixture, mode: String) {
    let body = perform_json_request(
        &world.world(),
        RequestSpec {
            method: Method::PUT,
            path: "/api/v1/mode",
            payload: Some(json!({ "mode": mode })),
            label: "set mode request",
        },
    );
    assert_eq!(body.get("mode").and_then(Value::as_str), Some(mode.as_str()));
}

#[when("the server restarts over the same storage directory")]
fn the_server_restarts_over_the_same_storage_directory(world: &WorldFixture) {
    let world = world.world();
    let mut ctx = world.borrow_mut();
    let old_server = ctx.server.clone();
    let root = storage_root(&ctx.storage);
    let key = ctx.key.clone();
    let (base_url, server) = ctx
        .local
        .block_on(&ctx.runtime, async move {
            old_server.stop(true).await;
            spawn_guide_server(root, key).await
        })
        .expect("server should restart");
    ctx.base_url = base_url;
    ctx.server = server;
}

#[when("the client submits a review rated {rating}")]
fn the_client_submits_a_review_rated(world: &WorldFixture, rating: u8) {
    let world = world.world();
    let id = first_coffee_place(&world);
    let path = format!("/api/v1/places/{id}/reviews");
    perform_json_request(
        &world,
        RequestSpec {
            method: Method::POST,
            path: &path,
            payload: Some(json!({ "author": "דנה", "text": "נחמד", "rating": rating })),
            label: "submit review request",
        },
    );
}

#[then("the mode is coffee")]
fn the_mode_is_coffee(world: &WorldFixture) {
    let world = world.world();
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(200));
    let body = ctx.last_body.as_ref().expect("mode body");
    assert_eq!(body, &json!({ "mode": "coffee" }));
}

#[then("a session cookie was issued")]
fn a_session_cookie_was_issued(world: &WorldFixture) {
    let world = world.world();
    let ctx = world.borrow();
    let cookie = ctx.session_cookie.as_deref().expect("session cookie");
    assert!(cookie.starts_with("session="));
}

#[then("the client has no favourites")]
fn the_client_has_no_favourites(world: &WorldFixture) {
    let body = list(&world.world(), "/api/v1/favorites");
    assert_eq!(body, json!({ "mode": "matcha", "ids": [] }));
}

#[then("the favourited place is listed")]
fn the_favourited_place_is_listed(world: &WorldFixture) {
    let world = world.world();
    let id = remembered_place(&world);
    let body = list(&world, "/api/v1/favorites");
    assert_eq!(body, json!({ "mode": "coffee", "ids": [id] }));
}

#[then("the note is still listed")]
fn the_note_is_still_listed(world: &WorldFixture) {
    let world = world.world();
    let id = remembered_place(&world);
    let body = list(&world, "/api/v1/notes");
    assert_eq!(
        body.pointer(&format!("/notes/{id}")).and_then(Value::as_str),
        Some(NOTE_TEXT)
    );
}

#[then("the response is a bad request with a trace id")]
fn the_response_is_a_bad_request_with_a_trace_id(world: &WorldFixture) {
    let world = world.world();
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(400));

    let trace_id = ctx.last_trace_id.as_deref().expect("trace id header");
    let body = ctx.last_body.as_ref().expect("error body");
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(trace_id));
    assert_eq!(
        body.pointer("/details/field").and_then(Value::as_str),
        Some("rating")
    );
}

#[scenario(
    path = "tests/features/guide_session.feature",
    name = "First visit defaults to coffee"
)]
fn first_visit_defaults_to_coffee(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/guide_session.feature",
    name = "Favourites stay with their mode"
)]
fn favourites_stay_with_their_mode(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/guide_session.feature",
    name = "Notes survive a server restart"
)]
fn notes_survive_a_server_restart(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/guide_session.feature",
    name = "Invalid reviews carry a trace id"
)]
fn invalid_reviews_carry_a_trace_id(world: WorldFixture) {
    drop(world);
}
