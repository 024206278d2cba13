//! Sample dataset for demos and integration tests
//!
//! A small slice of the membership platform's world: two chapters (Beta
//! in the Southeast, Gamma in the Midwest), a handful of members, and a
//! few records of every kind. The `crestgate demo` subcommand runs each
//! role's session over this data.

use crate::resource::{Resource, ResourceKind};
use crate::session::{Role, Session};

/// One session per role, affiliated with the Beta chapter where the
/// role has an affiliation at all.
pub fn sessions() -> Vec<Session> {
    vec![
        Session::new("u-admin", Role::Admin),
        Session::new("u-hq", Role::NationalHq),
        Session::new("u-regional", Role::Regional).with_region("Southeast"),
        Session::new("u-chapter", Role::Chapter)
            .with_chapter("Beta")
            .with_region("Southeast"),
        Session::new("u-officer", Role::Officer)
            .with_chapter("Beta")
            .with_region("Southeast"),
        Session::new("u-member", Role::Member)
            .with_chapter("Beta")
            .with_region("Southeast"),
    ]
}

pub fn roster() -> Vec<Resource> {
    vec![
        Resource::new("m-1", ResourceKind::Member)
            .in_chapter("Beta")
            .in_region("Southeast")
            .owned_by("u-officer")
            .with_field("name", "Sarah Johnson")
            .with_field("email", "sarah.johnson@university.edu")
            .with_field("phone", "555-0101")
            .with_field("membership_id", "LEM-2021-001")
            .with_field("status", "active")
            .with_field("major", "Business Administration")
            .with_field("graduation_year", "2025")
            .with_field("service_hours", 48)
            .with_field("dues_status", "paid"),
        Resource::new("m-2", ResourceKind::Member)
            .in_chapter("Beta")
            .in_region("Southeast")
            .owned_by("u-member")
            .with_field("name", "Madison Taylor")
            .with_field("email", "madison.taylor@university.edu")
            .with_field("phone", "555-0102")
            .with_field("membership_id", "LEM-2022-014")
            .with_field("status", "active")
            .with_field("major", "Biology")
            .with_field("graduation_year", "2026")
            .with_field("service_hours", 31)
            .with_field("dues_status", "pending"),
        Resource::new("m-3", ResourceKind::Member)
            .in_chapter("Gamma")
            .in_region("Midwest")
            .owned_by("u-jessica")
            .with_field("name", "Jessica Chen")
            .with_field("email", "jessica.chen@university.edu")
            .with_field("phone", "555-0103")
            .with_field("membership_id", "LEM-2021-042")
            .with_field("status", "active")
            .with_field("major", "Computer Science")
            .with_field("graduation_year", "2025")
            .with_field("service_hours", 55)
            .with_field("dues_status", "paid"),
    ]
}

pub fn dues_ledger() -> Vec<Resource> {
    vec![
        Resource::new("d-1", ResourceKind::DuesRecord)
            .in_chapter("Beta")
            .in_region("Southeast")
            .owned_by("u-member")
            .with_field("name", "Madison Taylor")
            .with_field("amount", 450)
            .with_field("status", "pending")
            .with_field("due_date", "2024-02-01")
            .with_field("quarter", "Q1")
            .with_field("year", 2024)
            .with_field("total_collected", 5175)
            .with_field("collection_rate", 0.86),
        Resource::new("d-2", ResourceKind::DuesRecord)
            .in_chapter("Beta")
            .in_region("Southeast")
            .owned_by("u-officer")
            .with_field("name", "Sarah Johnson")
            .with_field("amount", 450)
            .with_field("status", "paid")
            .with_field("due_date", "2024-02-01")
            .with_field("paid_date", "2024-01-20")
            .with_field("quarter", "Q1")
            .with_field("year", 2024)
            .with_field("payment_method", "card")
            .with_field("total_collected", 5175)
            .with_field("collection_rate", 0.86),
        Resource::new("d-3", ResourceKind::DuesRecord)
            .in_chapter("Gamma")
            .in_region("Midwest")
            .owned_by("u-jessica")
            .with_field("name", "Jessica Chen")
            .with_field("amount", 425)
            .with_field("status", "overdue")
            .with_field("due_date", "2024-02-01")
            .with_field("quarter", "Q1")
            .with_field("year", 2024),
    ]
}

pub fn service_log() -> Vec<Resource> {
    vec![
        Resource::new("s-1", ResourceKind::ServiceEntry)
            .in_chapter("Beta")
            .in_region("Southeast")
            .owned_by("u-member")
            .from_submitter("u-member")
            .with_field("name", "Madison Taylor")
            .with_field("activity", "Food Bank Volunteering")
            .with_field("hours", 6)
            .with_field("category", "Community")
            .with_field("status", "pending"),
        Resource::new("s-2", ResourceKind::ServiceEntry)
            .in_chapter("Beta")
            .in_region("Southeast")
            .owned_by("u-officer")
            .from_submitter("u-officer")
            .with_field("name", "Sarah Johnson")
            .with_field("activity", "Charity Run Organization")
            .with_field("hours", 12)
            .with_field("category", "Philanthropy")
            .with_field("status", "pending"),
        Resource::new("s-3", ResourceKind::ServiceEntry)
            .in_chapter("Gamma")
            .in_region("Midwest")
            .owned_by("u-jessica")
            .from_submitter("u-jessica")
            .with_field("name", "Jessica Chen")
            .with_field("activity", "Campus Cleanup")
            .with_field("hours", 4)
            .with_field("category", "Campus")
            .with_field("status", "approved")
            .with_field("approved_by", "Emma Wilson"),
    ]
}

pub fn bulletin() -> Vec<Resource> {
    vec![
        // National announcement: no scope attributes, org-wide.
        Resource::new("msg-1", ResourceKind::Message)
            .with_field("name", "Convention Registration Open")
            .with_field("sender", "National HQ")
            .with_field("priority", "high")
            .with_field("category", "National"),
        Resource::new("msg-2", ResourceKind::Message)
            .in_chapter("Beta")
            .with_field("name", "Chapter Meeting Reminder")
            .with_field("sender", "Sarah Johnson")
            .with_field("priority", "medium")
            .with_field("category", "Meeting"),
    ]
}

pub fn event_calendar() -> Vec<Resource> {
    vec![
        Resource::new("e-1", ResourceKind::Event)
            .in_chapter("Beta")
            .in_region("Southeast")
            .with_field("name", "Spring Gala")
            .with_field("date", "2024-04-12")
            .with_field("location", "Grand Hall")
            .with_field("price", 35)
            .with_field("tickets_available", 120)
            .with_field("tickets_sold", 74)
            .with_field("status", "upcoming"),
        Resource::new("e-2", ResourceKind::Event)
            .in_region("Northeast")
            .with_field("name", "Winter Leadership Summit")
            .with_field("date", "2024-12-06")
            .with_field("location", "Boston Convention Center")
            .with_field("price", 60)
            .with_field("tickets_available", 300)
            .with_field("tickets_sold", 121)
            .with_field("status", "upcoming"),
    ]
}

pub fn campaigns() -> Vec<Resource> {
    vec![
        Resource::new("c-1", ResourceKind::Campaign)
            .in_chapter("Beta")
            .in_region("Southeast")
            .with_field("name", "Scholarship Fund Drive")
            .with_field("goal", 10000)
            .with_field("raised", 6650)
            .with_field("status", "active")
            .with_field("beneficiary", "Chapter Scholarship Fund"),
        Resource::new("c-2", ResourceKind::Campaign)
            .in_region("Midwest")
            .with_field("name", "Regional Service Project")
            .with_field("goal", 25000)
            .with_field("raised", 4100)
            .with_field("status", "active")
            .with_field("beneficiary", "Habitat Build"),
    ]
}

pub fn title_catalog() -> Vec<Resource> {
    vec![
        Resource::new("t-1", ResourceKind::Title)
            .with_field("name", "Chapter Historian")
            .with_field("description", "Manages chapter archives and history."),
        Resource::new("t-2", ResourceKind::Title)
            .with_field("name", "Philanthropy Chair")
            .with_field("description", "Organizes and leads philanthropy events."),
    ]
}

pub fn pending_approvals() -> Vec<Resource> {
    vec![
        Resource::new("a-1", ResourceKind::Approval)
            .in_chapter("Beta")
            .in_region("Southeast")
            .from_submitter("u-officer")
            .with_field("name", "Event Expense Reimbursement")
            .with_field("type", "expense")
            .with_field("amount", 320)
            .with_field("priority", "medium")
            .with_field("submitted_date", "2024-01-22"),
        Resource::new("a-2", ResourceKind::Approval)
            .in_chapter("Beta")
            .in_region("Southeast")
            .from_submitter("u-member")
            .with_field("name", "New Member Application")
            .with_field("type", "member")
            .with_field("priority", "high")
            .with_field("submitted_date", "2024-01-25"),
    ]
}

/// Every sample record, across all kinds.
pub fn dataset() -> Vec<Resource> {
    let mut all = roster();
    all.extend(dues_ledger());
    all.extend(service_log());
    all.extend(bulletin());
    all.extend(event_calendar());
    all.extend(campaigns());
    all.extend(title_catalog());
    all.extend(pending_approvals());
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_covers_every_kind() {
        let all = dataset();
        for kind in ResourceKind::ALL {
            assert!(
                all.iter().any(|r| r.kind == kind),
                "no sample record of kind {kind}"
            );
        }
    }

    #[test]
    fn test_scoped_samples_carry_scope_attrs() {
        for record in dataset() {
            if record.kind.is_scoped() {
                assert!(record.has_scope_attrs(), "scoped sample {} lacks attrs", record.id);
            }
        }
    }

    #[test]
    fn test_one_session_per_role() {
        let sessions = sessions();
        for role in Role::ALL {
            assert!(sessions.iter().any(|s| s.role == role));
        }
    }
}
