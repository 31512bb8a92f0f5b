//! Request-filtering pipeline built once at startup from an `HttpSecurity` builder.
//!
//! The chain is a flat, ordered list of filters. `enforce` runs the request-side
//! checks in order, forwards the request, then lets each filter post-process the
//! response.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub const DEFAULT_REALM: &str = "Realm";
pub const DEFAULT_CSRF_HEADER: &str = "X-XSRF-TOKEN";
pub const DEFAULT_CSRF_COOKIE: &str = "XSRF-TOKEN";
pub const SESSION_COOKIE: &str = "SESSION";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecurityConfigError {
    #[error("HTTP Basic realm must not be empty")]
    EmptyRealm,
    #[error("CSRF header and cookie names must not be empty")]
    EmptyCsrfTokenName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionCreationPolicy {
    Always,
    Never,
    #[default]
    IfRequired,
    Stateless,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBasicConfigurer {
    enabled: bool,
    realm: String,
}

impl Default for HttpBasicConfigurer {
    fn default() -> Self {
        Self {
            enabled: true,
            realm: DEFAULT_REALM.to_string(),
        }
    }
}

impl HttpBasicConfigurer {
    pub fn disable(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn realm_name(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfConfigurer {
    enabled: bool,
    header_name: String,
    cookie_name: String,
}

impl Default for CsrfConfigurer {
    fn default() -> Self {
        Self {
            enabled: true,
            header_name: DEFAULT_CSRF_HEADER.to_string(),
            cookie_name: DEFAULT_CSRF_COOKIE.to_string(),
        }
    }
}

impl CsrfConfigurer {
    pub fn disable(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn header_name(mut self, name: impl Into<String>) -> Self {
        self.header_name = name.into();
        self
    }

    pub fn cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionManagementConfigurer {
    policy: SessionCreationPolicy,
}

impl SessionManagementConfigurer {
    pub fn session_creation_policy(mut self, policy: SessionCreationPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Builder mirroring the usual web-security DSL: each section is configured
/// through a closure over its configurer.
#[derive(Debug, Clone, Default)]
pub struct HttpSecurity {
    http_basic: Option<HttpBasicConfigurer>,
    csrf: CsrfConfigurer,
    session_management: SessionManagementConfigurer,
}

impl HttpSecurity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn http_basic<F>(mut self, customize: F) -> Self
    where
        F: FnOnce(HttpBasicConfigurer) -> HttpBasicConfigurer,
    {
        self.http_basic = Some(customize(self.http_basic.take().unwrap_or_default()));
        self
    }

    pub fn csrf<F>(mut self, customize: F) -> Self
    where
        F: FnOnce(CsrfConfigurer) -> CsrfConfigurer,
    {
        self.csrf = customize(self.csrf);
        self
    }

    pub fn session_management<F>(mut self, customize: F) -> Self
    where
        F: FnOnce(SessionManagementConfigurer) -> SessionManagementConfigurer,
    {
        self.session_management = customize(self.session_management);
        self
    }

    pub fn build(self) -> Result<SecurityFilterChain, SecurityConfigError> {
        let mut filters = Vec::new();

        if self.csrf.enabled {
            if self.csrf.header_name.trim().is_empty() || self.csrf.cookie_name.trim().is_empty() {
                return Err(SecurityConfigError::EmptyCsrfTokenName);
            }
            filters.push(SecurityFilter::Csrf {
                header_name: self.csrf.header_name,
                cookie_name: self.csrf.cookie_name,
            });
        }

        if let Some(basic) = self.http_basic.filter(|b| b.enabled) {
            if basic.realm.trim().is_empty() {
                return Err(SecurityConfigError::EmptyRealm);
            }
            filters.push(SecurityFilter::BasicChallenge { realm: basic.realm });
        }

        // Only the stateless policy has something to enforce; there is no session store.
        if self.session_management.policy == SessionCreationPolicy::Stateless {
            filters.push(SecurityFilter::StatelessSession);
        }

        Ok(SecurityFilterChain {
            filters,
            session_policy: self.session_management.policy,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityFilter {
    Csrf {
        header_name: String,
        cookie_name: String,
    },
    BasicChallenge {
        realm: String,
    },
    StatelessSession,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityFilterChain {
    filters: Vec<SecurityFilter>,
    session_policy: SessionCreationPolicy,
}

impl SecurityFilterChain {
    pub fn filters(&self) -> &[SecurityFilter] {
        &self.filters
    }

    pub fn session_creation_policy(&self) -> SessionCreationPolicy {
        self.session_policy
    }

    pub fn is_http_basic_enabled(&self) -> bool {
        self.filters
            .iter()
            .any(|f| matches!(f, SecurityFilter::BasicChallenge { .. }))
    }

    pub fn is_csrf_enabled(&self) -> bool {
        self.filters
            .iter()
            .any(|f| matches!(f, SecurityFilter::Csrf { .. }))
    }

    fn is_stateless(&self) -> bool {
        self.filters.contains(&SecurityFilter::StatelessSession)
    }
}

/// Axum middleware running the configured chain around every request.
pub async fn enforce(
    State(chain): State<Arc<SecurityFilterChain>>,
    mut req: Request,
    next: Next,
) -> Response {
    for filter in chain.filters() {
        match filter {
            SecurityFilter::Csrf {
                header_name,
                cookie_name,
            } => {
                if requires_csrf_token(req.method())
                    && !csrf_token_matches(req.headers(), header_name, cookie_name)
                {
                    tracing::info!(method = %req.method(), uri = %req.uri(), "csrf_token_rejected");
                    return reject(StatusCode::FORBIDDEN, "Invalid CSRF token");
                }
            }
            SecurityFilter::BasicChallenge { realm } => {
                if !has_basic_credentials(req.headers()) {
                    tracing::info!(uri = %req.uri(), "basic_auth_challenge");
                    return basic_challenge(realm);
                }
            }
            SecurityFilter::StatelessSession => strip_session_cookie(req.headers_mut()),
        }
    }

    let mut res = next.run(req).await;
    if chain.is_stateless() {
        drop_session_set_cookie(res.headers_mut());
    }
    res
}

fn requires_csrf_token(method: &Method) -> bool {
    !matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}

fn csrf_token_matches(headers: &HeaderMap, header_name: &str, cookie_name: &str) -> bool {
    let Some(sent) = headers
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    else {
        return false;
    };
    cookies(headers).any(|(k, v)| k == cookie_name && v == sent)
}

fn has_basic_credentials(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "))
        .map(|creds| !creds.trim().is_empty())
        .unwrap_or(false)
}

fn basic_challenge(realm: &str) -> Response {
    let mut res = reject(StatusCode::UNAUTHORIZED, "Unauthorized");
    let challenge = format!("Basic realm=\"{}\"", realm.replace('"', "'"));
    if let Ok(v) = HeaderValue::from_str(&challenge) {
        res.headers_mut().insert(header::WWW_AUTHENTICATE, v);
    }
    res
}

fn strip_session_cookie(headers: &mut HeaderMap) {
    let kept: Vec<String> = cookies(headers)
        .filter(|(k, _)| *k != SESSION_COOKIE)
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    headers.remove(header::COOKIE);
    if kept.is_empty() {
        return;
    }
    if let Ok(v) = HeaderValue::from_str(&kept.join("; ")) {
        headers.insert(header::COOKIE, v);
    }
}

/// Removes only `Set-Cookie` values naming the session cookie; other cookies pass.
fn drop_session_set_cookie(headers: &mut HeaderMap) {
    let kept: Vec<HeaderValue> = headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter(|v| set_cookie_name(v) != Some(SESSION_COOKIE))
        .cloned()
        .collect();
    headers.remove(header::SET_COOKIE);
    for v in kept {
        headers.append(header::SET_COOKIE, v);
    }
}

fn set_cookie_name(value: &HeaderValue) -> Option<&str> {
    value
        .to_str()
        .ok()?
        .split(';')
        .next()?
        .split_once('=')
        .map(|(k, _)| k.trim())
}

fn cookies(headers: &HeaderMap) -> impl Iterator<Item = (&str, &str)> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|part| part.trim().split_once('='))
        .map(|(k, v)| (k.trim(), v.trim()))
}

fn reject(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, middleware, routing::post};
    use tower::ServiceExt;

    fn app(chain: SecurityFilterChain) -> Router {
        async fn echo_cookie(headers: HeaderMap) -> Response {
            let seen = headers
                .get(header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            let mut res = seen.into_response();
            res.headers_mut().append(
                header::SET_COOKIE,
                HeaderValue::from_static("SESSION=abc; Path=/"),
            );
            res.headers_mut().append(
                header::SET_COOKIE,
                HeaderValue::from_static("XSRF-TOKEN=t; Path=/"),
            );
            res
        }
        Router::new()
            .route("/echo", post(echo_cookie).get(echo_cookie))
            .layer(middleware::from_fn_with_state(Arc::new(chain), enforce))
    }

    fn set_cookies(res: &Response) -> Vec<&str> {
        res.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    fn request(method: Method) -> axum::http::request::Builder {
        axum::http::Request::builder().method(method).uri("/echo")
    }

    #[test]
    fn defaults_enable_csrf_only() {
        let chain = HttpSecurity::new().build().unwrap();
        assert!(chain.is_csrf_enabled());
        assert!(!chain.is_http_basic_enabled());
        assert_eq!(
            chain.session_creation_policy(),
            SessionCreationPolicy::IfRequired
        );
    }

    #[test]
    fn filters_follow_declared_order() {
        let chain = HttpSecurity::new()
            .session_management(|s| s.session_creation_policy(SessionCreationPolicy::Stateless))
            .http_basic(|b| b.realm_name("basic"))
            .build()
            .unwrap();
        assert_eq!(
            chain.filters(),
            &[
                SecurityFilter::Csrf {
                    header_name: DEFAULT_CSRF_HEADER.into(),
                    cookie_name: DEFAULT_CSRF_COOKIE.into(),
                },
                SecurityFilter::BasicChallenge {
                    realm: "basic".into()
                },
                SecurityFilter::StatelessSession,
            ]
        );
    }

    #[test]
    fn build_rejects_blank_names() {
        let err = HttpSecurity::new()
            .http_basic(|b| b.realm_name(" "))
            .build()
            .unwrap_err();
        assert_eq!(err, SecurityConfigError::EmptyRealm);

        let err = HttpSecurity::new()
            .csrf(|c| c.header_name(""))
            .build()
            .unwrap_err();
        assert_eq!(err, SecurityConfigError::EmptyCsrfTokenName);

        // Disabled sections are not validated.
        assert!(
            HttpSecurity::new()
                .http_basic(|b| b.realm_name("").disable())
                .csrf(|c| c.cookie_name("").disable())
                .build()
                .is_ok()
        );
    }

    #[tokio::test]
    async fn csrf_blocks_mutations_without_matching_token() {
        let chain = HttpSecurity::new().build().unwrap();

        let res = app(chain.clone())
            .oneshot(request(Method::POST).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = app(chain.clone())
            .oneshot(
                request(Method::POST)
                    .header(DEFAULT_CSRF_HEADER, "t1")
                    .header(header::COOKIE, "XSRF-TOKEN=t2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = app(chain.clone())
            .oneshot(
                request(Method::POST)
                    .header(DEFAULT_CSRF_HEADER, "t1")
                    .header(header::COOKIE, "other=1; XSRF-TOKEN=t1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app(chain)
            .oneshot(request(Method::GET).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn basic_challenge_requires_authorization_header() {
        let chain = HttpSecurity::new()
            .csrf(CsrfConfigurer::disable)
            .http_basic(|b| b.realm_name("basic"))
            .build()
            .unwrap();

        let res = app(chain.clone())
            .oneshot(request(Method::GET).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            res.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"basic\""
        );

        let res = app(chain)
            .oneshot(
                request(Method::GET)
                    .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn stateless_sessions_drop_session_cookies() {
        let chain = HttpSecurity::new()
            .csrf(CsrfConfigurer::disable)
            .session_management(|s| s.session_creation_policy(SessionCreationPolicy::Stateless))
            .build()
            .unwrap();

        let res = app(chain)
            .oneshot(
                request(Method::GET)
                    .header(header::COOKIE, "SESSION=old; theme=dark")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(set_cookies(&res), vec!["XSRF-TOKEN=t; Path=/"]);
        let body = http_body_util::BodyExt::collect(res.into_body())
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(&body[..], b"theme=dark");
    }

    #[tokio::test]
    async fn if_required_policy_leaves_cookies_alone() {
        let chain = HttpSecurity::new()
            .csrf(CsrfConfigurer::disable)
            .build()
            .unwrap();
        let res = app(chain)
            .oneshot(request(Method::GET).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            set_cookies(&res),
            vec!["SESSION=abc; Path=/", "XSRF-TOKEN=t; Path=/"]
        );
    }
}
