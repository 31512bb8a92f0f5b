//! Security posture of the service.
//!
//! HTTP Basic and CSRF are off and no session state is kept. Nothing replaces
//! them, so every route is reachable without credentials.

use crate::presentation::http::security::{
    CsrfConfigurer, HttpBasicConfigurer, HttpSecurity, SecurityConfigError, SecurityFilterChain,
    SessionCreationPolicy,
};

pub fn configure(security: HttpSecurity) -> Result<SecurityFilterChain, SecurityConfigError> {
    security
        .http_basic(HttpBasicConfigurer::disable)
        .session_management(|session| {
            session.session_creation_policy(SessionCreationPolicy::Stateless)
        })
        .csrf(CsrfConfigurer::disable)
        .build()
}
