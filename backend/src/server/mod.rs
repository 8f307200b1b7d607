//! Server construction and middleware wiring.

mod config;
mod shutdown;
mod state_builders;

pub use config::ServerConfig;
pub use shutdown::drain_on_signal;

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use cafe_guide::Trace;
#[cfg(debug_assertions)]
use cafe_guide::doc::ApiDoc;
use cafe_guide::inbound::http::error::{json_error_handler, query_error_handler};
use cafe_guide::inbound::http::favorites::{list_favorites, toggle_favorite};
use cafe_guide::inbound::http::geolocation::{
    describe_failure, get_location, location_options, record_location, record_location_failure,
    request_location,
};
use cafe_guide::inbound::http::guide::get_guide;
use cafe_guide::inbound::http::health::{HealthState, live, ready};
use cafe_guide::inbound::http::map::move_end;
use cafe_guide::inbound::http::mode::{get_mode, set_mode, toggle_mode};
use cafe_guide::inbound::http::notes::{list_notes, set_note};
use cafe_guide::inbound::http::places::{get_place, list_places};
use cafe_guide::inbound::http::reviews::{list_reviews, submit_review};
use cafe_guide::inbound::http::state::HttpState;
use cafe_guide::inbound::http::suggestions::submit_suggestion;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::days(365)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(get_mode)
        .service(set_mode)
        .service(toggle_mode)
        .service(list_reviews)
        .service(submit_review)
        .service(list_places)
        .service(get_place)
        .service(get_guide)
        .service(list_favorites)
        .service(toggle_favorite)
        .service(list_notes)
        .service(set_note)
        .service(submit_suggestion)
        .service(move_end)
        .service(location_options)
        .service(describe_failure)
        .service(get_location)
        .service(request_location)
        .service(record_location)
        .service(record_location_failure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] containing session, binding and adapter settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener. Signal
/// handling is left to [`drain_on_signal`].
///
/// # Errors
/// Propagates [`std::io::Error`] when an adapter cannot be built or binding
/// the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        storage_dir: _,
        form: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
