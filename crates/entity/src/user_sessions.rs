//! User Sessions Entity
//!
//! One row per live browser session. The primary key is the opaque bearer
//! token; the row snapshots the identity resolved at login (role and team
//! binding included) and is immutable apart from `last_used_at`, which the
//! idle-timeout check touches on every authenticated request.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:           uuid::Uuid,
    pub user_id:      i32,
    pub user_name:    String,
    pub user_email:   String,
    pub role:         String,
    pub team_id:      Option<String>,
    pub created_at:   chrono::DateTime<chrono::Utc>,
    pub last_used_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::UserId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}
