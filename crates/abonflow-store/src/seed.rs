//! Demo Data Seeding
//!
//! Fabricates plausible user and agent rows for demos. Data-generation
//! utility only; nothing here is reachable from the web layer.

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::SqlitePool;

use abonflow_core::{AgentConfig, AgentKind, Plan, Status};

use crate::agents::AgentStore;
use crate::error::Result;
use crate::password;
use crate::users::UserStore;

const FIRST_NAMES: &[&str] = &[
    "camille", "julien", "sophie", "nicolas", "claire", "thomas", "emma", "lucas", "lea",
    "antoine", "manon", "hugo", "chloe", "maxime", "ines", "romain",
];

const LAST_NAMES: &[&str] = &[
    "martin", "bernard", "dubois", "moreau", "laurent", "simon", "michel", "lefevre",
    "garcia", "roux", "fournier", "girard", "lambert", "mercier",
];

const SOFTWARES: &[&str] = &["Sage", "Cegid", "Quickbooks", "EBP"];
const FREQUENCIES: &[&str] = &["mensuel", "trimestriel", "annuel"];

/// Insert `count` fabricated users with a spread of plans, statuses and
/// registration dates over the trailing six months. Returns how many
/// rows were actually created (emails that collide are skipped).
pub async fn seed_users(pool: &SqlitePool, count: usize) -> Result<usize> {
    let store = UserStore::new(pool.clone());
    let password_hash = password::hash("demo1234")?;

    let plans = [Plan::Essentiel, Plan::Pro, Plan::SurMesure];
    let statuses = [
        Status::Paye,
        Status::EnAttenteValidation,
        Status::Annule,
        Status::PreuveSupplementaire,
    ];

    let mut rng = rand::thread_rng();
    let mut created = 0;
    for i in 0..count {
        let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("demo");
        let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("martin");
        let email = format!("{first}.{last}{i}@exemple.fr");
        if store.get_by_email(&email).await?.is_some() {
            continue;
        }

        let plan = *plans.choose(&mut rng).unwrap_or(&Plan::Essentiel);
        let status = *statuses.choose(&mut rng).unwrap_or(&Status::Paye);
        let registered_at = Utc::now() - Duration::days(rng.gen_range(0..180));

        sqlx::query(
            "INSERT INTO users (email, password_hash, status, plan, registered_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&email)
        .bind(&password_hash)
        .bind(status.as_str())
        .bind(plan.as_str())
        .bind(registered_at)
        .execute(pool)
        .await?;
        created += 1;
    }

    tracing::info!(created, "Seeded demo users");
    Ok(created)
}

/// Give every non-admin user `per_user` fabricated agents with a filled
/// configuration. Returns the number of agents created.
pub async fn seed_agents(pool: &SqlitePool, per_user: usize) -> Result<usize> {
    let users = UserStore::new(pool.clone());
    let agents = AgentStore::new(pool.clone());

    let mut rng = rand::thread_rng();
    let mut created = 0;
    for user in users.list_members().await? {
        for _ in 0..per_user {
            let kind = if rng.gen_bool(0.5) {
                AgentKind::Emailing
            } else {
                AgentKind::Comptable
            };
            let config = demo_config(&kind, &mut rng);
            let name = format!(
                "{}Bot",
                FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Demo")
            );
            agents.create(user.id, &kind, &name, &config).await?;
            created += 1;
        }
    }

    tracing::info!(created, "Seeded demo agents");
    Ok(created)
}

fn demo_config<R: Rng>(kind: &AgentKind, rng: &mut R) -> AgentConfig {
    match kind {
        AgentKind::Emailing => AgentConfig::for_kind(kind, |field| match field {
            "email" => Some("prospect@exemple.fr"),
            "subject" => Some("Relance commerciale"),
            "template" => Some("Bonjour, suite à notre échange..."),
            _ => None,
        }),
        AgentKind::Comptable => {
            let software = SOFTWARES.choose(rng).copied().unwrap_or("Sage");
            let frequency = FREQUENCIES.choose(rng).copied().unwrap_or("mensuel");
            AgentConfig::for_kind(kind, |field| match field {
                "software" => Some(software),
                "frequency" => Some(frequency),
                "notes" => Some("Export automatique des écritures"),
                _ => None,
            })
        }
        AgentKind::Other(_) => AgentConfig::new(),
    }
}
