//! User Accounts Storage
//!
//! CRUD over the `users` table plus the payment lifecycle transitions.
//! All admin-facing transitions overwrite the user's admin message; the
//! approve/reject texts are fixed, request-more-proof takes the admin's
//! own wording.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use abonflow_core::{Plan, Status, User};

use crate::error::{Result, StoreError};
use crate::password;

/// Message set when an admin validates a payment.
pub const MSG_PAYMENT_APPROVED: &str = "Votre paiement a été validé. Merci !";

/// Message set when an admin refuses a payment.
pub const MSG_PAYMENT_REJECTED: &str = "Votre paiement a été refusé. Merci de nous contacter.";

/// Default message when an admin asks for more proof without wording.
pub const MSG_MORE_PROOF: &str = "Merci de fournir une preuve de paiement supplémentaire.";

#[derive(FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    status: String,
    plan: String,
    registered_at: DateTime<Utc>,
    is_admin: bool,
    payment_proof: Option<String>,
    admin_message: Option<String>,
    custom_price: Option<i64>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            status: Status::from_str(&row.status),
            plan: Plan::from_str(&row.plan),
            registered_at: row.registered_at,
            is_admin: row.is_admin,
            payment_proof: row.payment_proof,
            admin_message: row.admin_message,
            custom_price: row.custom_price,
        }
    }
}

const SELECT_USER: &str = "SELECT id, email, password_hash, status, plan, registered_at, \
                           is_admin, payment_proof, admin_message, custom_price FROM users";

/// Storage for user accounts
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new account on `plan`, starting in the free state.
    ///
    /// Fails with [`StoreError::EmailTaken`] when the email already has
    /// a row; never creates a second one.
    pub async fn register(&self, email: &str, raw_password: &str, plan: Plan) -> Result<User> {
        if self.get_by_email(email).await?.is_some() {
            return Err(StoreError::EmailTaken(email.to_string()));
        }

        let password_hash = password::hash(raw_password)?;
        let result = sqlx::query(
            "INSERT INTO users (email, password_hash, status, plan, registered_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(email)
        .bind(&password_hash)
        .bind(Status::Gratuit.as_str())
        .bind(plan.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        tracing::info!(email = %email, plan = %plan, "Registered new user");

        self.get(result.last_insert_rowid())
            .await?
            .ok_or_else(|| StoreError::Sqlx(sqlx::Error::RowNotFound))
    }

    /// Check credentials; `None` when the email is unknown or the
    /// password does not match.
    pub async fn authenticate(&self, email: &str, raw_password: &str) -> Result<Option<User>> {
        match self.get_by_email(email).await? {
            Some(user) if password::verify(raw_password, &user.password_hash) => Ok(Some(user)),
            _ => Ok(None),
        }
    }

    pub async fn get(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    /// Every non-admin account, oldest registration first. Admin lists
    /// and KPI aggregation both work over this set.
    pub async fn list_members(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "{SELECT_USER} WHERE is_admin = 0 ORDER BY registered_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    /// User submits a proof of payment (file path or text reference) and
    /// moves to the pending state. A missing proof still moves the
    /// status; the admin can ask for more.
    pub async fn submit_payment_proof(&self, id: i64, proof: Option<&str>) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE users SET status = ?, payment_proof = COALESCE(?, payment_proof) \
             WHERE id = ?",
        )
        .bind(Status::EnAttenteValidation.as_str())
        .bind(proof)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            tracing::info!(user_id = id, "Payment proof submitted");
        }
        Ok(result.rows_affected() > 0)
    }

    /// Admin validates the payment: status becomes paid and the fixed
    /// confirmation message replaces any previous one, whatever the
    /// prior status was. Unknown ids are a no-op.
    pub async fn approve_payment(&self, id: i64) -> Result<bool> {
        self.transition(id, Status::Paye, MSG_PAYMENT_APPROVED).await
    }

    /// Admin refuses the payment.
    pub async fn reject_payment(&self, id: i64) -> Result<bool> {
        self.transition(id, Status::Annule, MSG_PAYMENT_REJECTED).await
    }

    /// Admin asks for more proof, with their own wording (or the stock
    /// text when blank).
    pub async fn request_more_proof(&self, id: i64, message: &str) -> Result<bool> {
        let message = if message.trim().is_empty() {
            MSG_MORE_PROOF
        } else {
            message
        };
        self.transition(id, Status::PreuveSupplementaire, message)
            .await
    }

    async fn transition(&self, id: i64, status: Status, message: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET status = ?, admin_message = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(message)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            tracing::info!(user_id = id, status = %status, "Payment status transition");
        }
        Ok(result.rows_affected() > 0)
    }

    /// Overwrite the admin message without touching the status.
    pub async fn set_admin_message(&self, id: i64, message: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET admin_message = ? WHERE id = ?")
            .bind(message)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record the negotiated monthly price of a sur-mesure contract.
    pub async fn set_custom_price(&self, id: i64, price: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET custom_price = ? WHERE id = ?")
            .bind(price)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            tracing::info!(user_id = id, price, "Negotiated price set");
        }
        Ok(result.rows_affected() > 0)
    }

    /// Delete an account. Agent rows cascade with it.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            tracing::info!(user_id = id, "User deleted");
        }
        Ok(result.rows_affected() > 0)
    }

    /// Create the bootstrap admin account if it does not exist yet. The
    /// admin is provisioned paid on the pro plan and is excluded from
    /// member lists and KPIs.
    pub async fn ensure_admin(&self, email: &str, raw_password: &str) -> Result<()> {
        if self.get_by_email(email).await?.is_some() {
            return Ok(());
        }

        let password_hash = password::hash(raw_password)?;
        sqlx::query(
            "INSERT INTO users (email, password_hash, status, plan, registered_at, is_admin) \
             VALUES (?, ?, ?, ?, ?, 1)",
        )
        .bind(email)
        .bind(&password_hash)
        .bind(Status::Paye.as_str())
        .bind(Plan::Pro.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        tracing::info!(email = %email, "Bootstrap admin account created");
        Ok(())
    }

    /// Export the non-admin user table as CSV. Returns the row count.
    pub async fn export_csv(&self, path: &std::path::Path) -> Result<usize> {
        let members = self.list_members().await?;
        let mut out = String::from("ID,Email,Statut,Offre,Date\n");
        for user in &members {
            out.push_str(&format!(
                "{},{},{},{},{}\n",
                user.id,
                user.email,
                user.status,
                user.plan,
                user.registered_at.format("%Y-%m-%d")
            ));
        }
        tokio::fs::write(path, out).await?;
        Ok(members.len())
    }
}
