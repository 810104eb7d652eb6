//! Enum and helper tests for the entity crate

use entity::tickets::TicketStatus;
use entity::teams::team_id_is_help_desk;

/// Canonical tokens are uppercase
#[test]
fn test_ticket_status_display() {
    assert_eq!(format!("{}", TicketStatus::Open), "OPEN");
    assert_eq!(format!("{}", TicketStatus::Assigned), "ASSIGNED");
    assert_eq!(format!("{}", TicketStatus::InProgress), "INPROGRESS");
    assert_eq!(format!("{}", TicketStatus::Resolved), "RESOLVED");
    assert_eq!(format!("{}", TicketStatus::Canceled), "CANCELED");
}

/// Every casing the legacy data contains must parse to the same variant
#[test]
fn test_ticket_status_parse_normalizes_casing() {
    for raw in ["open", "Open", "OPEN", " oPeN "] {
        assert_eq!(TicketStatus::parse(raw), Some(TicketStatus::Open), "failed for {raw:?}");
    }
    assert_eq!(TicketStatus::parse("inprogress"), Some(TicketStatus::InProgress));
    assert_eq!(TicketStatus::parse("Canceled"), Some(TicketStatus::Canceled));
}

/// Values outside the closed set never round-trip into a status
#[test]
fn test_ticket_status_parse_rejects_unknown() {
    assert_eq!(TicketStatus::parse("REOPENED"), None);
    assert_eq!(TicketStatus::parse("IN PROGRESS"), None);
    assert_eq!(TicketStatus::parse("cancelled"), None);
}

#[test]
fn test_ticket_status_terminality() {
    assert!(TicketStatus::Resolved.is_terminal());
    assert!(TicketStatus::Canceled.is_terminal());
    assert!(!TicketStatus::Open.is_terminal());
    assert!(!TicketStatus::Assigned.is_terminal());
    assert!(!TicketStatus::InProgress.is_terminal());
}

#[test]
fn test_ticket_status_serializes_to_canonical_token() {
    let json = serde_json::to_string(&TicketStatus::InProgress).unwrap();
    assert_eq!(json, "\"INPROGRESS\"");
}

#[test]
fn test_help_desk_team_convention() {
    assert!(team_id_is_help_desk("IT_HELP_DESK"));
    assert!(team_id_is_help_desk("it_help_desk"));
    assert!(!team_id_is_help_desk("NETWORK"));
    assert!(!team_id_is_help_desk("DESKTOP_SUPPORT"));
}
