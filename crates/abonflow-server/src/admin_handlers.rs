//! Admin Handlers
//!
//! Back-office dashboard: KPI summary, member list, payment lifecycle
//! actions, negotiated pricing, account deletion and per-user agent
//! management. Every route here requires the [`AdminUser`] guard.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::Deserialize;

use abonflow_core::{AgentConfig, AgentKind, KpiSnapshot, MonthlySeries};

use crate::auth::AdminUser;
use crate::error::AppError;
use crate::flash;
use crate::state::AppState;
use crate::views::{render, AddAgentPage, AdminAgentsPage, AdminPage, AgentRow, MemberRow};

/// Months of history in the KPI chart series.
const KPI_MONTHS: usize = 6;

pub async fn dashboard(
    State(state): State<AppState>,
    _admin: AdminUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let (jar, notice) = flash::take(jar);
    let members = state.users.list_members().await?;
    let kpi = KpiSnapshot::compute(&members, Utc::now());

    let members = members
        .into_iter()
        .map(|user| MemberRow {
            id: user.id,
            email: user.email,
            status: user.status.as_str().to_string(),
            plan: user.plan.as_str().to_string(),
            registered: user.registered_at.format("%d/%m/%Y").to_string(),
            proof: user.payment_proof.unwrap_or_default(),
            message: user.admin_message.unwrap_or_default(),
            price: user.custom_price.unwrap_or(0),
            sur_mesure: user.plan == abonflow_core::Plan::SurMesure,
        })
        .collect();

    let page = AdminPage {
        flash: notice,
        kpi,
        members,
    };
    Ok((jar, render(&page)?).into_response())
}

/// JSON series feeding the admin chart: signups and revenue per month
/// over the trailing window, oldest first.
pub async fn kpi_data(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<MonthlySeries>, AppError> {
    let members = state.users.list_members().await?;
    Ok(Json(MonthlySeries::compute(&members, Utc::now(), KPI_MONTHS)))
}

pub async fn approve(
    State(state): State<AppState>,
    _admin: AdminUser,
    jar: CookieJar,
    Path(user_id): Path<i64>,
) -> Result<Response, AppError> {
    let jar = match state.users.get(user_id).await? {
        Some(user) => {
            state.users.approve_payment(user_id).await?;
            flash::set(jar, &format!("Paiement validé pour {}", user.email))
        }
        None => jar,
    };
    Ok((jar, Redirect::to("/admin")).into_response())
}

pub async fn reject(
    State(state): State<AppState>,
    _admin: AdminUser,
    jar: CookieJar,
    Path(user_id): Path<i64>,
) -> Result<Response, AppError> {
    let jar = match state.users.get(user_id).await? {
        Some(user) => {
            state.users.reject_payment(user_id).await?;
            flash::set(jar, &format!("Paiement refusé pour {}", user.email))
        }
        None => jar,
    };
    Ok((jar, Redirect::to("/admin")).into_response())
}

#[derive(Deserialize)]
pub struct MessageForm {
    #[serde(default)]
    pub message: String,
}

pub async fn request_proof(
    State(state): State<AppState>,
    _admin: AdminUser,
    jar: CookieJar,
    Path(user_id): Path<i64>,
    Form(form): Form<MessageForm>,
) -> Result<Response, AppError> {
    let jar = if state.users.request_more_proof(user_id, &form.message).await? {
        flash::set(jar, "Demande de preuve supplémentaire envoyée.")
    } else {
        jar
    };
    Ok((jar, Redirect::to("/admin")).into_response())
}

pub async fn send_message(
    State(state): State<AppState>,
    _admin: AdminUser,
    jar: CookieJar,
    Path(user_id): Path<i64>,
    Form(form): Form<MessageForm>,
) -> Result<Response, AppError> {
    let jar = if state.users.set_admin_message(user_id, &form.message).await? {
        flash::set(jar, "Message envoyé.")
    } else {
        jar
    };
    Ok((jar, Redirect::to("/admin")).into_response())
}

#[derive(Deserialize)]
pub struct PriceForm {
    #[serde(default)]
    pub price: String,
}

pub async fn set_price(
    State(state): State<AppState>,
    _admin: AdminUser,
    jar: CookieJar,
    Path(user_id): Path<i64>,
    Form(form): Form<PriceForm>,
) -> Result<Response, AppError> {
    let jar = match form.price.trim().parse::<i64>() {
        Ok(price) if price >= 0 => {
            state.users.set_custom_price(user_id, price).await?;
            flash::set(jar, &format!("Prix négocié fixé à {price} €."))
        }
        _ => flash::set(jar, "Montant invalide."),
    };
    Ok((jar, Redirect::to("/admin")).into_response())
}

pub async fn delete_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    jar: CookieJar,
    Path(user_id): Path<i64>,
) -> Result<Response, AppError> {
    let jar = if state.users.delete(user_id).await? {
        flash::set(jar, "Utilisateur supprimé.")
    } else {
        jar
    };
    Ok((jar, Redirect::to("/admin")).into_response())
}

pub async fn user_agents(
    State(state): State<AppState>,
    _admin: AdminUser,
    jar: CookieJar,
    Path(user_id): Path<i64>,
) -> Result<Response, AppError> {
    let (jar, notice) = flash::take(jar);
    let Some(user) = state.users.get(user_id).await? else {
        let jar = flash::set(jar, "Utilisateur introuvable.");
        return Ok((jar, Redirect::to("/admin")).into_response());
    };

    let agents = state
        .agents
        .list_for_user(user_id)
        .await?
        .iter()
        .map(AgentRow::from_agent)
        .collect();

    let page = AdminAgentsPage {
        flash: notice,
        user_id,
        email: user.email,
        agents,
    };
    Ok((jar, render(&page)?).into_response())
}

pub async fn add_agent_page(
    _admin: AdminUser,
    jar: CookieJar,
    Path(user_id): Path<i64>,
) -> Result<Response, AppError> {
    let (jar, notice) = flash::take(jar);
    let page = AddAgentPage {
        flash: notice,
        user_id,
    };
    Ok((jar, render(&page)?).into_response())
}

#[derive(Deserialize)]
pub struct AddAgentForm {
    pub name: String,
    pub kind: String,
}

pub async fn add_agent(
    State(state): State<AppState>,
    _admin: AdminUser,
    jar: CookieJar,
    Path(user_id): Path<i64>,
    Form(form): Form<AddAgentForm>,
) -> Result<Response, AppError> {
    if state.users.get(user_id).await?.is_none() {
        let jar = flash::set(jar, "Utilisateur introuvable.");
        return Ok((jar, Redirect::to("/admin")).into_response());
    }

    let kind = AgentKind::from_str(&form.kind);
    let name = form.name.trim();
    let name = if name.is_empty() { kind.as_str() } else { name };
    state
        .agents
        .create(user_id, &kind, name, &AgentConfig::new())
        .await?;

    let jar = flash::set(jar, "Agent IA créé avec succès.");
    Ok((jar, Redirect::to(&format!("/admin/agents/{user_id}"))).into_response())
}

pub async fn delete_agent(
    State(state): State<AppState>,
    _admin: AdminUser,
    jar: CookieJar,
    Path((agent_id, user_id)): Path<(i64, i64)>,
) -> Result<Response, AppError> {
    let jar = if state.agents.delete(agent_id).await? {
        flash::set(jar, "Agent IA supprimé.")
    } else {
        jar
    };
    Ok((jar, Redirect::to(&format!("/admin/agents/{user_id}"))).into_response())
}
