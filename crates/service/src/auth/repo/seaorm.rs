use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::auth::domain::UserRecord;
use crate::auth::errors::AuthError;
use crate::auth::repository::UserStore;

/// SeaORM-backed user store over the `users` table.
pub struct SeaOrmUserStore {
    pub db: DatabaseConnection,
}

fn to_record(m: models::user::Model) -> UserRecord {
    UserRecord {
        id: m.id,
        email: m.email,
        password_hash: m.password_hash,
        full_name: m.full_name,
        is_active: m.is_active,
        is_corporate: m.is_corporate,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    }
}

fn map_err(e: models::errors::ModelError) -> AuthError {
    match e {
        models::errors::ModelError::Conflict(_) => AuthError::EmailExists,
        models::errors::ModelError::NotFound(_) => AuthError::UserNotFound,
        models::errors::ModelError::Validation(msg) => AuthError::Validation(msg),
        models::errors::ModelError::Db(msg) => AuthError::Repository(msg),
    }
}

#[async_trait::async_trait]
impl UserStore for SeaOrmUserStore {
    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        full_name: Option<&str>,
    ) -> Result<UserRecord, AuthError> {
        models::user::create(&self.db, email, password_hash, full_name)
            .await
            .map(to_record)
            .map_err(map_err)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError> {
        models::user::find_by_email(&self.db, email)
            .await
            .map(|opt| opt.map(to_record))
            .map_err(map_err)
    }

    async fn find_by_id(&self, id: i64) -> Result<UserRecord, AuthError> {
        models::user::find_by_id(&self.db, id)
            .await
            .map_err(map_err)?
            .map(to_record)
            .ok_or(AuthError::UserNotFound)
    }
}
