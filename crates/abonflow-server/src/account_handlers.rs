//! Account Handlers
//!
//! Member dashboard and the payment declaration flow. Payment proof can
//! be a free-text reference, an uploaded file, or nothing at all; any of
//! the three moves the account into the pending state for admin review.

use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::flash;
use crate::state::AppState;
use crate::views::{render, DashboardPage, PaymentPage};

pub async fn dashboard(CurrentUser(user): CurrentUser, jar: CookieJar) -> Result<Response, AppError> {
    let (jar, notice) = flash::take(jar);
    let page = DashboardPage {
        flash: notice,
        email: user.email,
        plan: user.plan.as_str().to_string(),
        status: user.status.as_str().to_string(),
        admin_message: user.admin_message,
        is_paid: user.status.is_paid(),
    };
    Ok((jar, render(&page)?).into_response())
}

pub async fn payment_page(CurrentUser(user): CurrentUser, jar: CookieJar) -> Result<Response, AppError> {
    let (jar, notice) = flash::take(jar);
    let page = PaymentPage {
        flash: notice,
        plan: user.plan.as_str().to_string(),
        price: user.monthly_price(),
    };
    Ok((jar, render(&page)?).into_response())
}

/// Keep only filesystem-safe characters; a name left empty after
/// filtering gets a generated one.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        uuid::Uuid::new_v4().to_string()
    } else {
        cleaned
    }
}

pub async fn submit_payment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut file_proof: Option<String> = None;
    let mut text_proof: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("file") => {
                let Some(file_name) = field.file_name().map(str::to_string) else {
                    continue;
                };
                if file_name.is_empty() {
                    continue;
                }
                let data = field.bytes().await?;
                if data.is_empty() {
                    continue;
                }
                tokio::fs::create_dir_all(&state.config.upload_dir).await?;
                let path = state.config.upload_dir.join(sanitize_filename(&file_name));
                tokio::fs::write(&path, &data).await?;
                tracing::info!(user_id = user.id, path = %path.display(), "Proof file stored");
                file_proof = Some(path.to_string_lossy().into_owned());
            }
            Some("preuve") => {
                let value = field.text().await?;
                if !value.trim().is_empty() {
                    text_proof = Some(value.trim().to_string());
                }
            }
            // Payment mode and anything else is informational only.
            _ => {
                let _ = field.bytes().await?;
            }
        }
    }

    // An uploaded file outranks the text reference.
    let proof = file_proof.or(text_proof);
    state
        .users
        .submit_payment_proof(user.id, proof.as_deref())
        .await?;

    let jar = flash::set(
        jar,
        "Votre demande de paiement a été prise en compte. Nous vous contacterons pour valider.",
    );
    Ok((jar, Redirect::to("/dashboard")).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_safe_names() {
        assert_eq!(sanitize_filename("virement-2024.pdf"), "virement-2024.pdf");
        assert_eq!(sanitize_filename("preuve 01.png"), "preuve01.png");
    }

    #[test]
    fn test_sanitize_strips_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "....etcpasswd");
    }

    #[test]
    fn test_sanitize_generates_when_empty() {
        let name = sanitize_filename("é à ç");
        assert!(!name.is_empty());
        let again = sanitize_filename("...");
        assert!(!again.is_empty());
        assert_ne!(again, "...");
    }
}
