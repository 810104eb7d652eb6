//! Ticket Embeddings Entity
//!
//! Text chunks owned by a ticket. The table also carries an
//! `embedding vector(1536)` column that is deliberately not mapped here:
//! only the external similarity service reads or writes vectors, this
//! application stores and forwards text.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ticket_embeddings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:         i32,
    pub ticket_id:  i32,
    pub chunk_text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tickets::Entity",
        from = "Column::TicketId",
        to = "super::tickets::Column::TicketId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Ticket,
}

impl Related<super::tickets::Entity> for Entity {
    fn to() -> RelationDef { Relation::Ticket.def() }
}

impl ActiveModelBehavior for ActiveModel {}
