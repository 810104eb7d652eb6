//! Entity definitions for Deskline
//!
//! This crate contains Sea-ORM entity definitions for the database models.
//! The `helpdesk_tickets` entity maps a read-only database view; everything
//! else maps a table.

pub mod helpdesk_tickets;
pub use helpdesk_tickets::Entity as HelpdeskTickets;
pub mod team_members;
pub use team_members::Entity as TeamMembers;
pub mod teams;
pub use teams::Entity as Teams;
pub mod ticket_embeddings;
pub use ticket_embeddings::Entity as TicketEmbeddings;
pub mod tickets;
pub use tickets::{Entity as Tickets, TicketStatus};
pub mod user_sessions;
pub use user_sessions::Entity as UserSessions;
pub mod users;
pub use users::Entity as Users;
