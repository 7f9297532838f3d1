//! Authorization Guards
//!
//! Extractors gating routes on "authenticated", "is admin" and "has
//! paid". Failures never surface an error page: they redirect to a safe
//! default with a flash notice, so a forged request simply lands back on
//! the dashboard with nothing changed.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use abonflow_core::User;

use crate::flash;
use crate::session::SESSION_COOKIE;
use crate::state::AppState;

/// Rejection: redirect with an optional notice
pub struct AuthRedirect {
    to: &'static str,
    notice: Option<&'static str>,
}

impl AuthRedirect {
    fn login() -> Self {
        Self {
            to: "/login",
            notice: None,
        }
    }

    fn not_admin() -> Self {
        Self {
            to: "/dashboard",
            notice: Some("Accès réservé à l'administrateur."),
        }
    }

    fn not_paid() -> Self {
        Self {
            to: "/dashboard",
            notice: Some("Accès réservé aux utilisateurs ayant payé."),
        }
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        let redirect = Redirect::to(self.to);
        match self.notice {
            Some(notice) => (flash::set(CookieJar::new(), notice), redirect).into_response(),
            None => redirect.into_response(),
        }
    }
}

/// The authenticated user behind the session cookie
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(AuthRedirect::login)?;
        let user_id = app
            .sessions
            .user_id(&token)
            .ok_or_else(AuthRedirect::login)?;

        // A session pointing at a deleted account is treated as logged out.
        let user = app
            .users
            .get(user_id)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "User lookup failed during auth");
                AuthRedirect::login()
            })?
            .ok_or_else(AuthRedirect::login)?;

        Ok(CurrentUser(user))
    }
}

/// An authenticated user carrying the admin flag
pub struct AdminUser(pub User);

impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if user.is_admin {
            Ok(AdminUser(user))
        } else {
            Err(AuthRedirect::not_admin())
        }
    }
}

/// An authenticated user whose subscription is paid
pub struct PaidUser(pub User);

impl<S> FromRequestParts<S> for PaidUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if user.status.is_paid() {
            Ok(PaidUser(user))
        } else {
            Err(AuthRedirect::not_paid())
        }
    }
}
