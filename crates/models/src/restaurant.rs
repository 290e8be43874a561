use chrono::Utc;
use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, Set, SqlErr};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurant")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub address: String,
    pub phone: String,
    pub rating: Option<f64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    Ok(())
}

/// Insert a row; both timestamps are set here, never by the caller.
pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    address: &str,
    phone: &str,
    rating: Option<f64>,
) -> Result<Model, errors::ModelError> {
    validate_name(name)?;

    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(name.to_string()),
        address: Set(address.to_string()),
        phone: Set(phone.to_string()),
        rating: Set(rating),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => errors::ModelError::Conflict(name.to_string()),
        _ => errors::ModelError::Db(e.to_string()),
    })
}
