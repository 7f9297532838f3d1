//! # abonflow-server
//!
//! HTTP layer of the subscription portal: public site, member account
//! area and admin back-office, served as classic server-rendered pages
//! over the storage crate.

pub mod account_handlers;
pub mod admin_handlers;
pub mod agent_handlers;
pub mod auth;
pub mod auth_handlers;
pub mod config;
pub mod error;
pub mod flash;
pub mod session;
pub mod site_handlers;
pub mod state;
pub mod views;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public site
        .route("/", get(site_handlers::home))
        .route("/contact", post(site_handlers::contact))
        .route("/login", get(auth_handlers::login_page).post(auth_handlers::login))
        .route(
            "/register",
            get(auth_handlers::register_page).post(auth_handlers::register),
        )
        .route("/logout", get(auth_handlers::logout))
        // Member area
        .route("/dashboard", get(account_handlers::dashboard))
        .route(
            "/paiement",
            get(account_handlers::payment_page).post(account_handlers::submit_payment),
        )
        .route("/mes-agents", get(agent_handlers::my_agents))
        .route(
            "/mes-agents/config/{agent_id}",
            get(agent_handlers::config_page).post(agent_handlers::save_config),
        )
        // Admin back-office
        .route("/admin", get(admin_handlers::dashboard))
        .route("/admin/kpi-data", get(admin_handlers::kpi_data))
        .route("/admin/valider/{user_id}", get(admin_handlers::approve))
        .route("/admin/annuler/{user_id}", get(admin_handlers::reject))
        .route("/admin/preuve/{user_id}", post(admin_handlers::request_proof))
        .route("/admin/message/{user_id}", post(admin_handlers::send_message))
        .route("/admin/prix/{user_id}", post(admin_handlers::set_price))
        .route("/admin/supprimer/{user_id}", post(admin_handlers::delete_user))
        .route("/admin/agents/{user_id}", get(admin_handlers::user_agents))
        .route(
            "/admin/agents/add/{user_id}",
            get(admin_handlers::add_agent_page).post(admin_handlers::add_agent),
        )
        .route(
            "/admin/agents/delete/{agent_id}/{user_id}",
            post(admin_handlers::delete_agent),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
