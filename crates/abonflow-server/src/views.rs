//! HTML Views
//!
//! Thin askama templates over precomputed display rows. Handlers do all
//! the lookups and formatting; templates only interpolate.

use askama::Template;
use axum::response::Html;

use abonflow_core::{Agent, KpiSnapshot};

use crate::error::AppError;

/// Render a template into an HTML response.
pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct HomePage {
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub flash: Option<String>,
    pub email: String,
    pub plan: String,
    pub status: String,
    pub admin_message: Option<String>,
    pub is_paid: bool,
}

#[derive(Template)]
#[template(path = "paiement.html")]
pub struct PaymentPage {
    pub flash: Option<String>,
    pub plan: String,
    pub price: i64,
}

/// One user row on the admin dashboard
pub struct MemberRow {
    pub id: i64,
    pub email: String,
    pub status: String,
    pub plan: String,
    pub registered: String,
    pub proof: String,
    pub message: String,
    pub price: i64,
    pub sur_mesure: bool,
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminPage {
    pub flash: Option<String>,
    pub kpi: KpiSnapshot,
    pub members: Vec<MemberRow>,
}

/// One agent row in agent lists
pub struct AgentRow {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub summary: String,
}

impl AgentRow {
    pub fn from_agent(agent: &Agent) -> Self {
        let summary = agent
            .config
            .rows(&agent.kind)
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(field, value)| format!("{field}: {value}"))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            id: agent.id,
            name: agent.name.clone(),
            kind: agent.kind.as_str().to_string(),
            summary,
        }
    }
}

#[derive(Template)]
#[template(path = "admin_agents.html")]
pub struct AdminAgentsPage {
    pub flash: Option<String>,
    pub user_id: i64,
    pub email: String,
    pub agents: Vec<AgentRow>,
}

#[derive(Template)]
#[template(path = "add_agent.html")]
pub struct AddAgentPage {
    pub flash: Option<String>,
    pub user_id: i64,
}

#[derive(Template)]
#[template(path = "mes_agents.html")]
pub struct MyAgentsPage {
    pub flash: Option<String>,
    pub agents: Vec<AgentRow>,
}

/// One prefilled configuration field
pub struct FieldRow {
    pub field: &'static str,
    pub value: String,
}

#[derive(Template)]
#[template(path = "config_agent.html")]
pub struct AgentConfigPage {
    pub flash: Option<String>,
    pub agent_id: i64,
    pub name: String,
    pub kind: String,
    pub fields: Vec<FieldRow>,
}
