//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The session cookie carries only the client's storage namespace. A
//! namespace is minted on first use; a tampered value is replaced.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use crate::domain::Error;
use crate::domain::ports::StorageNamespace;

pub(crate) const NAMESPACE_KEY: &str = "storage_namespace";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Namespace stored in the cookie, if present and well formed.
    pub fn namespace(&self) -> Result<Option<StorageNamespace>, Error> {
        let raw = self
            .0
            .get::<String>(NAMESPACE_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| match StorageNamespace::new(value) {
            Ok(namespace) => Some(namespace),
            Err(error) => {
                warn!(%error, "invalid storage namespace in session cookie");
                None
            }
        }))
    }

    /// Namespace for this client, minting and persisting one when missing.
    pub fn namespace_or_issue(&self) -> Result<StorageNamespace, Error> {
        if let Some(namespace) = self.namespace()? {
            return Ok(namespace);
        }
        let namespace = StorageNamespace::random();
        self.0
            .insert(NAMESPACE_KEY, namespace.as_str())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?;
        debug!(%namespace, "issued storage namespace");
        Ok(namespace)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/ns",
                web::get().to(|session: SessionContext| async move {
                    let namespace = session.namespace_or_issue()?;
                    Ok::<_, Error>(HttpResponse::Ok().body(namespace.to_string()))
                }),
            )
    }

    #[actix_web::test]
    async fn namespace_is_stable_across_requests() {
        let app = test::init_service(session_test_app()).await;

        let first = test::call_service(&app, test::TestRequest::get().uri("/ns").to_request()).await;
        assert_eq!(first.status(), StatusCode::OK);
        let cookie = first
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();
        let first_ns = test::read_body(first).await;

        let second = test::call_service(
            &app,
            test::TestRequest::get().uri("/ns").cookie(cookie).to_request(),
        )
        .await;
        let second_ns = test::read_body(second).await;
        assert_eq!(first_ns, second_ns);
    }

    #[actix_web::test]
    async fn tampered_namespace_is_replaced() {
        let app = test::init_service(session_test_app().route(
            "/tamper",
            web::get().to(|session: actix_session::Session| async move {
                session
                    .insert(NAMESPACE_KEY, "../../etc")
                    .expect("set invalid namespace");
                HttpResponse::Ok()
            }),
        ))
        .await;

        let tampered =
            test::call_service(&app, test::TestRequest::get().uri("/tamper").to_request()).await;
        let cookie = tampered
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/ns").cookie(cookie).to_request(),
        )
        .await;
        let body = test::read_body(res).await;
        let namespace = std::str::from_utf8(&body).expect("utf8 body");
        assert!(StorageNamespace::new(namespace).is_ok());
        assert_ne!(namespace, "../../etc");
    }
}
