//! Agent Records Storage
//!
//! Agents are created and deleted by the admin; their configuration is
//! edited by the owning user. Rows cascade away with their owner.

use sqlx::{FromRow, SqlitePool};

use abonflow_core::{Agent, AgentConfig, AgentKind};

use crate::error::Result;

#[derive(FromRow)]
struct AgentRow {
    id: i64,
    user_id: i64,
    kind: String,
    name: String,
    config: String,
}

impl From<AgentRow> for Agent {
    fn from(row: AgentRow) -> Self {
        Agent {
            id: row.id,
            user_id: row.user_id,
            kind: AgentKind::from_str(&row.kind),
            name: row.name,
            config: AgentConfig::from_json(&row.config),
        }
    }
}

const SELECT_AGENT: &str = "SELECT id, user_id, kind, name, config FROM agents";

/// Storage for agent configuration records
#[derive(Clone)]
pub struct AgentStore {
    pool: SqlitePool,
}

impl AgentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an agent for a user, with an optional initial config.
    pub async fn create(
        &self,
        user_id: i64,
        kind: &AgentKind,
        name: &str,
        config: &AgentConfig,
    ) -> Result<Agent> {
        let result = sqlx::query(
            "INSERT INTO agents (user_id, kind, name, config) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(name)
        .bind(config.to_json())
        .execute(&self.pool)
        .await?;

        tracing::info!(user_id, kind = %kind, name = %name, "Agent created");

        Ok(Agent {
            id: result.last_insert_rowid(),
            user_id,
            kind: kind.clone(),
            name: name.to_string(),
            config: config.clone(),
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<Agent>> {
        let row = sqlx::query_as::<_, AgentRow>(&format!("{SELECT_AGENT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Agent::from))
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Agent>> {
        let rows = sqlx::query_as::<_, AgentRow>(&format!(
            "{SELECT_AGENT} WHERE user_id = ? ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Agent::from).collect())
    }

    /// Re-serialize and save a configuration. Unknown ids are a no-op.
    pub async fn save_config(&self, id: i64, config: &AgentConfig) -> Result<bool> {
        let result = sqlx::query("UPDATE agents SET config = ? WHERE id = ?")
            .bind(config.to_json())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an agent. Unknown ids are a no-op.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM agents WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            tracing::info!(agent_id = id, "Agent deleted");
        }
        Ok(result.rows_affected() > 0)
    }
}
