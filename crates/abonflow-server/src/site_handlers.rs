//! Public Site Handlers
//!
//! Home page and the contact form. The contact form appends to a local
//! text file; there is no mail integration.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;

use crate::error::AppError;
use crate::flash;
use crate::state::AppState;
use crate::views::{render, HomePage};

pub async fn home(jar: CookieJar) -> Result<Response, AppError> {
    let (jar, notice) = flash::take(jar);
    let page = HomePage { flash: notice };
    Ok((jar, render(&page)?).into_response())
}

#[derive(Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub async fn contact(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ContactForm>,
) -> Result<Response, AppError> {
    let entry = format!(
        "Nom: {}\nEmail: {}\nMessage: {}\n---\n",
        form.name, form.email, form.message
    );
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&state.config.contact_log)
        .await?;
    file.write_all(entry.as_bytes()).await?;

    tracing::info!(email = %form.email, "Contact message recorded");

    let jar = flash::set(jar, "Merci pour votre message ! Nous vous répondrons très vite.");
    Ok((jar, Redirect::to("/")).into_response())
}
