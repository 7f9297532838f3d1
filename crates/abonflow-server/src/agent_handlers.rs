//! Member Agent Handlers
//!
//! A paying member can list their agents and edit each one's
//! configuration. Ownership is checked on every config route: an agent
//! id belonging to someone else redirects away without touching it.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::CookieJar;

use abonflow_core::{Agent, AgentConfig};

use crate::auth::PaidUser;
use crate::error::AppError;
use crate::flash;
use crate::state::AppState;
use crate::views::{render, AgentConfigPage, AgentRow, FieldRow, MyAgentsPage};

pub async fn my_agents(
    State(state): State<AppState>,
    PaidUser(user): PaidUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let (jar, notice) = flash::take(jar);
    let agents = state
        .agents
        .list_for_user(user.id)
        .await?
        .iter()
        .map(AgentRow::from_agent)
        .collect();

    let page = MyAgentsPage {
        flash: notice,
        agents,
    };
    Ok((jar, render(&page)?).into_response())
}

/// Fetch an agent and verify it belongs to `user_id`.
async fn owned_agent(
    state: &AppState,
    agent_id: i64,
    user_id: i64,
) -> Result<Option<Agent>, AppError> {
    let agent = state.agents.get(agent_id).await?;
    Ok(agent.filter(|agent| agent.user_id == user_id))
}

pub async fn config_page(
    State(state): State<AppState>,
    PaidUser(user): PaidUser,
    jar: CookieJar,
    Path(agent_id): Path<i64>,
) -> Result<Response, AppError> {
    let (jar, notice) = flash::take(jar);
    let Some(agent) = owned_agent(&state, agent_id, user.id).await? else {
        let jar = flash::set(jar, "Accès refusé.");
        return Ok((jar, Redirect::to("/mes-agents")).into_response());
    };

    let fields = agent
        .config
        .rows(&agent.kind)
        .into_iter()
        .map(|(field, value)| FieldRow { field, value })
        .collect();

    let page = AgentConfigPage {
        flash: notice,
        agent_id: agent.id,
        name: agent.name,
        kind: agent.kind.as_str().to_string(),
        fields,
    };
    Ok((jar, render(&page)?).into_response())
}

pub async fn save_config(
    State(state): State<AppState>,
    PaidUser(user): PaidUser,
    jar: CookieJar,
    Path(agent_id): Path<i64>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let Some(agent) = owned_agent(&state, agent_id, user.id).await? else {
        let jar = flash::set(jar, "Accès refusé.");
        return Ok((jar, Redirect::to("/mes-agents")).into_response());
    };

    let config = AgentConfig::for_kind(&agent.kind, |field| form.get(field).map(String::as_str));
    state.agents.save_config(agent.id, &config).await?;
    tracing::info!(user_id = user.id, agent_id = agent.id, "Agent configuration saved");

    let jar = flash::set(jar, "Configuration enregistrée !");
    Ok((
        jar,
        Redirect::to(&format!("/mes-agents/config/{agent_id}")),
    )
        .into_response())
}
