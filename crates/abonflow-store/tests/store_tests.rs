//! Integration tests over an in-memory database.

use abonflow_core::{AgentConfig, AgentKind, Plan, Status};
use abonflow_store::users::{MSG_MORE_PROOF, MSG_PAYMENT_APPROVED, MSG_PAYMENT_REJECTED};
use abonflow_store::{connect_in_memory, AgentStore, StoreError, UserStore};

async fn stores() -> (UserStore, AgentStore) {
    let pool = connect_in_memory().await.expect("in-memory db");
    (UserStore::new(pool.clone()), AgentStore::new(pool))
}

#[tokio::test]
async fn register_then_authenticate() {
    let (users, _) = stores().await;

    let user = users
        .register("claire@exemple.fr", "motdepasse", Plan::Pro)
        .await
        .unwrap();
    assert_eq!(user.status, Status::Gratuit);
    assert_eq!(user.plan, Plan::Pro);
    assert!(!user.is_admin);

    let logged_in = users
        .authenticate("claire@exemple.fr", "motdepasse")
        .await
        .unwrap();
    assert!(logged_in.is_some());

    let wrong = users
        .authenticate("claire@exemple.fr", "autre")
        .await
        .unwrap();
    assert!(wrong.is_none());
}

#[tokio::test]
async fn duplicate_email_never_creates_second_row() {
    let (users, _) = stores().await;

    users
        .register("claire@exemple.fr", "motdepasse", Plan::Essentiel)
        .await
        .unwrap();
    let err = users
        .register("claire@exemple.fr", "autre", Plan::Pro)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::EmailTaken(_)));

    assert_eq!(users.list_members().await.unwrap().len(), 1);
}

#[tokio::test]
async fn approval_forces_paid_state_from_any_prior_status() {
    let (users, _) = stores().await;
    let user = users
        .register("marc@exemple.fr", "pw", Plan::Essentiel)
        .await
        .unwrap();

    // Walk through several prior states; approval always lands on payé
    // with the fixed confirmation message.
    for setup in [
        Status::Gratuit,
        Status::Annule,
        Status::PreuveSupplementaire,
        Status::EnAttenteValidation,
    ] {
        match setup {
            Status::Annule => {
                users.reject_payment(user.id).await.unwrap();
            }
            Status::PreuveSupplementaire => {
                users.request_more_proof(user.id, "").await.unwrap();
            }
            Status::EnAttenteValidation => {
                users.submit_payment_proof(user.id, Some("virement")).await.unwrap();
            }
            _ => {}
        }

        assert!(users.approve_payment(user.id).await.unwrap());
        let reloaded = users.get(user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.status, Status::Paye);
        assert_eq!(reloaded.admin_message.as_deref(), Some(MSG_PAYMENT_APPROVED));
    }
}

#[tokio::test]
async fn lifecycle_messages() {
    let (users, _) = stores().await;
    let user = users
        .register("lea@exemple.fr", "pw", Plan::Pro)
        .await
        .unwrap();

    users.reject_payment(user.id).await.unwrap();
    let reloaded = users.get(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, Status::Annule);
    assert_eq!(reloaded.admin_message.as_deref(), Some(MSG_PAYMENT_REJECTED));

    // Blank request falls back to the stock wording
    users.request_more_proof(user.id, "  ").await.unwrap();
    let reloaded = users.get(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, Status::PreuveSupplementaire);
    assert_eq!(reloaded.admin_message.as_deref(), Some(MSG_MORE_PROOF));

    users
        .request_more_proof(user.id, "Merci d'envoyer le reçu bancaire.")
        .await
        .unwrap();
    let reloaded = users.get(user.id).await.unwrap().unwrap();
    assert_eq!(
        reloaded.admin_message.as_deref(),
        Some("Merci d'envoyer le reçu bancaire.")
    );

    users
        .set_admin_message(user.id, "Bonjour, votre dossier est en cours.")
        .await
        .unwrap();
    let reloaded = users.get(user.id).await.unwrap().unwrap();
    // A plain message does not move the status
    assert_eq!(reloaded.status, Status::PreuveSupplementaire);
}

#[tokio::test]
async fn proof_submission_keeps_previous_proof_when_none_given() {
    let (users, _) = stores().await;
    let user = users
        .register("paul@exemple.fr", "pw", Plan::Essentiel)
        .await
        .unwrap();

    users
        .submit_payment_proof(user.id, Some("uploads/recu.pdf"))
        .await
        .unwrap();
    users.submit_payment_proof(user.id, None).await.unwrap();

    let reloaded = users.get(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, Status::EnAttenteValidation);
    assert_eq!(reloaded.payment_proof.as_deref(), Some("uploads/recu.pdf"));
}

#[tokio::test]
async fn actions_on_unknown_ids_are_noops() {
    let (users, agents) = stores().await;

    assert!(!users.approve_payment(999).await.unwrap());
    assert!(!users.reject_payment(999).await.unwrap());
    assert!(!users.delete(999).await.unwrap());
    assert!(!agents.delete(999).await.unwrap());
    assert!(!agents.save_config(999, &AgentConfig::new()).await.unwrap());
}

#[tokio::test]
async fn agent_config_round_trip() {
    let (users, agents) = stores().await;
    let user = users
        .register("emma@exemple.fr", "pw", Plan::Pro)
        .await
        .unwrap();

    let agent = agents
        .create(user.id, &AgentKind::Emailing, "EmmaBot", &AgentConfig::new())
        .await
        .unwrap();

    let config = AgentConfig::for_kind(&AgentKind::Emailing, |field| match field {
        "email" => Some("clients@exemple.fr"),
        "subject" => Some("Relance"),
        "template" => Some("Bonjour {nom},"),
        _ => None,
    });
    assert!(agents.save_config(agent.id, &config).await.unwrap());

    let reloaded = agents.get(agent.id).await.unwrap().unwrap();
    assert_eq!(reloaded.config, config);
    assert_eq!(reloaded.kind, AgentKind::Emailing);
    assert_eq!(agents.list_for_user(user.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_a_user_removes_their_agents() {
    let (users, agents) = stores().await;
    let user = users
        .register("hugo@exemple.fr", "pw", Plan::Essentiel)
        .await
        .unwrap();
    let agent = agents
        .create(user.id, &AgentKind::Comptable, "ComptaBot", &AgentConfig::new())
        .await
        .unwrap();

    assert!(users.delete(user.id).await.unwrap());
    assert!(agents.get(agent.id).await.unwrap().is_none());
    assert!(agents.list_for_user(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn admin_is_excluded_from_member_lists() {
    let (users, _) = stores().await;
    users
        .ensure_admin("admin@exemple.fr", "admin1234")
        .await
        .unwrap();
    // Idempotent
    users
        .ensure_admin("admin@exemple.fr", "admin1234")
        .await
        .unwrap();
    users
        .register("claire@exemple.fr", "pw", Plan::Pro)
        .await
        .unwrap();

    let members = users.list_members().await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].email, "claire@exemple.fr");

    let admin = users.get_by_email("admin@exemple.fr").await.unwrap().unwrap();
    assert!(admin.is_admin);
    assert_eq!(admin.status, Status::Paye);
}

#[tokio::test]
async fn negotiated_price_is_stored() {
    let (users, _) = stores().await;
    let user = users
        .register("dir@exemple.fr", "pw", Plan::SurMesure)
        .await
        .unwrap();
    assert_eq!(user.monthly_price(), 0);

    users.set_custom_price(user.id, 4500).await.unwrap();
    let reloaded = users.get(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.custom_price, Some(4500));
    assert_eq!(reloaded.monthly_price(), 4500);
}

#[tokio::test]
async fn csv_export_writes_member_rows() {
    let (users, _) = stores().await;
    users.ensure_admin("admin@exemple.fr", "pw").await.unwrap();
    users
        .register("claire@exemple.fr", "pw", Plan::Pro)
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    let count = users.export_csv(&path).await.unwrap();
    assert_eq!(count, 1);

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("ID,Email,Statut,Offre,Date"));
    let row = lines.next().unwrap();
    assert!(row.contains("claire@exemple.fr"));
    assert!(row.contains("gratuit"));
    // Admin row is not exported
    assert!(!contents.contains("admin@exemple.fr"));
}

#[tokio::test]
async fn seeding_creates_demo_rows() {
    let pool = connect_in_memory().await.unwrap();
    let users = UserStore::new(pool.clone());

    let created = abonflow_store::seed::seed_users(&pool, 8).await.unwrap();
    assert_eq!(created, 8);
    assert_eq!(users.list_members().await.unwrap().len(), 8);

    let agents = abonflow_store::seed::seed_agents(&pool, 2).await.unwrap();
    assert_eq!(agents, 16);
}
