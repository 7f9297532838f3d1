//! Application State

use std::sync::Arc;

use abonflow_store::{AgentStore, UserStore};

use crate::config::ServerConfig;
use crate::session::SessionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// User accounts and payment lifecycle
    pub users: UserStore,

    /// Agent configuration records
    pub agents: AgentStore,

    /// Browser sessions
    pub sessions: Arc<SessionStore>,

    /// Runtime configuration
    pub config: Arc<ServerConfig>,
}
