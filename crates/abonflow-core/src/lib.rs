//! # abonflow-core
//!
//! Domain model for the abonflow subscription service.
//!
//! Holds the types shared by the store and the web layer: subscription
//! plans with their pricing, the payment lifecycle statuses, user and
//! agent records, and the pure KPI aggregation used by the admin
//! dashboard. Nothing here touches the database or the network.

pub mod agent;
pub mod kpi;
pub mod plan;
pub mod status;
pub mod user;

pub use agent::{Agent, AgentConfig, AgentKind};
pub use kpi::{KpiSnapshot, MonthKey, MonthlySeries};
pub use plan::Plan;
pub use status::Status;
pub use user::User;
