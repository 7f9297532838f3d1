//! Server entry point and maintenance commands.
//!
//! Without arguments the binary serves HTTP. Two subcommands exist for
//! operations: `seed [count]` fabricates demo data and `export-users
//! [path]` dumps the member table as CSV.

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use abonflow_server::config::ServerConfig;
use abonflow_server::session::SessionStore;
use abonflow_server::state::AppState;
use abonflow_store::{AgentStore, UserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env();

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("seed") => {
            let count = args.next().and_then(|raw| raw.parse().ok()).unwrap_or(20);
            let pool = abonflow_store::connect(&config.database_url).await?;
            let users = abonflow_store::seed::seed_users(&pool, count).await?;
            let agents = abonflow_store::seed::seed_agents(&pool, 2).await?;
            println!("{users} utilisateurs et {agents} agents de démonstration créés");
            return Ok(());
        }
        Some("export-users") => {
            let path = args.next().unwrap_or_else(|| "utilisateurs_export.csv".into());
            let pool = abonflow_store::connect(&config.database_url).await?;
            let count = UserStore::new(pool)
                .export_csv(std::path::Path::new(&path))
                .await?;
            println!("Export CSV terminé : {path} ({count} utilisateurs)");
            return Ok(());
        }
        Some(other) => {
            anyhow::bail!("commande inconnue : {other} (attendu : seed | export-users)");
        }
        None => {}
    }

    let pool = abonflow_store::connect(&config.database_url).await?;
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let users = UserStore::new(pool.clone());
    users
        .ensure_admin(&config.admin_email, &config.admin_password)
        .await?;

    let bind_addr = config.bind_addr.clone();
    let state = AppState {
        users,
        agents: AgentStore::new(pool),
        sessions: Arc::new(SessionStore::new()),
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("abonflow server running on http://{bind_addr}");
    axum::serve(listener, abonflow_server::app(state)).await?;
    Ok(())
}
