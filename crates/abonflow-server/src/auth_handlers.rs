//! Authentication Handlers
//!
//! Registration, login and logout. Sessions are opaque tokens held in
//! memory; the browser only carries the token in an HTTP-only cookie.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use abonflow_core::Plan;
use abonflow_store::StoreError;

use crate::error::AppError;
use crate::flash;
use crate::session::{self, SESSION_COOKIE};
use crate::state::AppState;
use crate::views::{render, LoginPage, RegisterPage};

pub async fn login_page(jar: CookieJar) -> Result<Response, AppError> {
    let (jar, notice) = flash::take(jar);
    let page = LoginPage { flash: notice };
    Ok((jar, render(&page)?).into_response())
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state.users.authenticate(&form.email, &form.password).await? {
        Some(user) => {
            let token = state.sessions.open(user.id);
            let jar = jar.add(session::session_cookie(token));
            let jar = flash::set(jar, "Bienvenue !");
            let target = if user.is_admin { "/admin" } else { "/dashboard" };
            tracing::info!(user_id = user.id, "User logged in");
            Ok((jar, Redirect::to(target)).into_response())
        }
        None => {
            let jar = flash::set(jar, "Email ou mot de passe incorrect.");
            Ok((jar, Redirect::to("/login")).into_response())
        }
    }
}

pub async fn register_page(jar: CookieJar) -> Result<Response, AppError> {
    let (jar, notice) = flash::take(jar);
    let page = RegisterPage { flash: notice };
    Ok((jar, render(&page)?).into_response())
}

#[derive(Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub plan: String,
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let plan = Plan::from_str(&form.plan);
    match state.users.register(&form.email, &form.password, plan).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, plan = plan.as_str(), "User registered");
            let jar = flash::set(jar, "Compte créé, connectez-vous !");
            Ok((jar, Redirect::to("/login")).into_response())
        }
        Err(err @ StoreError::EmailTaken(_)) => {
            let jar = flash::set(jar, err.user_message());
            Ok((jar, Redirect::to("/register")).into_response())
        }
        Err(err) => Err(AppError::Store(err)),
    }
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.close(cookie.value());
    }
    let jar = jar.remove(session::clear_session_cookie());
    let jar = flash::set(jar, "Déconnecté.");
    (jar, Redirect::to("/")).into_response()
}
