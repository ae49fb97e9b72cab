//! Per-request caller context extraction.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use common::AuthContext;

use crate::AppState;
use accounts::IdentityProvider;

/// Extractor wrapping the caller's [`AuthContext`].
///
/// The bearer token in the `Authorization` header is resolved through the
/// Identity Provider. A missing or unknown token is not rejected here — it
/// produces an anonymous context, and each operation decides for itself
/// whether that is acceptable.
pub struct Caller(pub AuthContext);

impl FromRequestParts<Arc<AppState>> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.strip_prefix("Bearer ").unwrap_or(value));

        let ctx = match token {
            Some(token) => match state.accounts.identity_for_token(token).await {
                Some(identity) => AuthContext::for_user(identity),
                None => AuthContext::anonymous(),
            },
            None => AuthContext::anonymous(),
        };

        Ok(Caller(ctx))
    }
}
