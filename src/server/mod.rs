//! HTTP surface.
//!
//! Every request gets its own `Translator` built from the request's query,
//! cookies, session and `Accept-Language` header. Cookie writes made while
//! handling the request are returned as `Set-Cookie` headers.

mod cookies;
mod session;

pub use cookies::{CookieJar, parse_cookie_header};
pub use session::{SESSION_COOKIE, SessionHandle, SessionRegistry};

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::header::{ACCEPT_LANGUAGE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Serialize;
use tracing::debug;

use crate::i18n::{RequestSignals, TranslationContext};
use crate::service::{Translator, TranslatorFactory};

/// Shared state of the HTTP server.
#[derive(Debug, Clone)]
pub struct AppState {
    pub factory: TranslatorFactory,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(factory: TranslatorFactory) -> Self {
        Self {
            factory,
            sessions: SessionRegistry::new(),
        }
    }
}

/// Build the router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/translate/:key", get(translate))
        .route("/language", get(current_language))
        .route("/language/:code", put(set_language))
        .route("/languages", get(languages))
        .route("/keys", get(keys))
        .with_state(state)
}

/// Entry of the `/languages` response.
#[derive(Debug, Serialize)]
struct LanguageInfo {
    code: &'static str,
    name: &'static str,
}

/// Translator plus the cookie jar it writes to, for one request.
struct RequestScope {
    translator: Translator,
    cookies: CookieJar,
}

impl RequestScope {
    fn open(state: &AppState, headers: &HeaderMap, parameter: Option<String>) -> Self {
        let cookies = CookieJar::from_headers(headers);
        let session = state.sessions.open(cookies.value(SESSION_COOKIE));
        let accept_language = headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let translator = state.factory.begin(
            RequestSignals::new(parameter, accept_language),
            Box::new(cookies.clone()),
            Box::new(session),
        );

        Self {
            translator,
            cookies,
        }
    }

    /// Attach pending cookies to `body`.
    fn respond(self, body: impl IntoResponse) -> Response {
        let headers: Vec<_> = self
            .cookies
            .set_cookie_headers()
            .into_iter()
            .map(|cookie| (SET_COOKIE, cookie))
            .collect();
        (AppendHeaders(headers), body).into_response()
    }
}

async fn translate(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(mut params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let parameter = params.remove(state.factory.language_key());
    let mut scope = RequestScope::open(&state, &headers, parameter);

    let context: TranslationContext = params.into_iter().collect();
    let text = scope.translator.translate(&key, Some(&context));
    debug!("Translated {} -> {:?}", key, text);
    scope.respond(text)
}

async fn current_language(
    State(state): State<AppState>,
    Query(mut params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let parameter = params.remove(state.factory.language_key());
    let mut scope = RequestScope::open(&state, &headers, parameter);
    let language = scope.translator.language();
    scope.respond(language.code())
}

async fn set_language(
    State(state): State<AppState>,
    Path(code): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut scope = RequestScope::open(&state, &headers, None);
    match scope.translator.set_language(&code) {
        Ok(_) => scope.respond(StatusCode::NO_CONTENT),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

async fn languages(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let scope = RequestScope::open(&state, &headers, None);
    let languages: Vec<LanguageInfo> = scope
        .translator
        .languages()
        .iter()
        .map(|language| LanguageInfo {
            code: language.code(),
            name: language.name(),
        })
        .collect();
    scope.respond(Json(languages))
}

async fn keys(
    State(state): State<AppState>,
    Query(mut params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let parameter = params.remove(state.factory.language_key());
    let mut scope = RequestScope::open(&state, &headers, parameter);
    let keys: Vec<String> = scope
        .translator
        .keys()
        .into_iter()
        .map(|key| key.into_string())
        .collect();
    scope.respond(Json(keys))
}
