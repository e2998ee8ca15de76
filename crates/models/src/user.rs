use chrono::Utc;
use sea_orm::{entity::prelude::*, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_corporate: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| ModelError::Validation("invalid email".into()))?;
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    email: &str,
    password_hash: &str,
    full_name: Option<&str>,
) -> Result<Model, ModelError> {
    validate_email(email)?;
    if password_hash.trim().is_empty() {
        return Err(ModelError::Validation("password hash required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        email: Set(email.to_string()),
        password_hash: Set(password_hash.to_string()),
        full_name: Set(full_name.map(|n| n.to_string())),
        is_active: Set(true),
        is_corporate: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    match am.insert(db).await {
        Ok(model) => Ok(model),
        // Unique violation on email means the account already exists
        Err(e) => match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Err(ModelError::Conflict("email already exists".into()))
            }
            _ => Err(ModelError::Db(e.to_string())),
        },
    }
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Flip the active flag; deactivation is the soft-delete for accounts.
pub async fn set_active(db: &DatabaseConnection, id: i64, active: bool) -> Result<Model, ModelError> {
    let found = find_by_id(db, id)
        .await?
        .ok_or_else(|| ModelError::NotFound("user not found".into()))?;
    let mut am: ActiveModel = found.into();
    am.is_active = Set(active);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))
}
