//! Users Entity
//!
//! Represents the people known to the help desk. Accounts are provisioned
//! out of band; this system only reads them. A user's role is never stored
//! here — it is derived from team membership at login.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i32,
    pub name:    String,
    #[sea_orm(unique)]
    pub email:   String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::team_members::Entity")]
    TeamMembers,
    #[sea_orm(has_many = "super::tickets::Entity")]
    Tickets,
    #[sea_orm(has_many = "super::user_sessions::Entity")]
    UserSessions,
}

impl Related<super::team_members::Entity> for Entity {
    fn to() -> RelationDef { Relation::TeamMembers.def() }
}

impl Related<super::tickets::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tickets.def() }
}

impl Related<super::user_sessions::Entity> for Entity {
    fn to() -> RelationDef { Relation::UserSessions.def() }
}

impl ActiveModelBehavior for ActiveModel {}
