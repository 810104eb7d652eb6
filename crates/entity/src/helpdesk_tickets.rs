//! Helpdesk Tickets View Entity
//!
//! Maps the read-only `helpdesk_tickets` database view: a denormalized
//! projection (requester name, assigned team name, status as text) used by
//! the help-desk queue listing. Never insert or update through this entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "helpdesk_tickets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub ticket_id:   i32,
    pub title:       Option<String>,
    pub user:        Option<String>,
    pub status:      Option<String>,
    pub priority:    Option<String>,
    pub assigned_to: Option<String>,
    pub created_at:  Option<chrono::DateTime<chrono::Utc>>,
    pub description: Option<String>,
    pub answer:      Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
