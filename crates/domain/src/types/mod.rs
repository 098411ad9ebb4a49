//! Entity records, payloads and relation views
//!
//! Each entity comes in four shapes:
//! - the stored record (`Lead`), as returned by the API
//! - the create payload (`LeadInput`), every field optional as received
//! - the validated insert (`NewLead`), required fields present and
//!   defaults applied
//! - the partial update (`LeadPatch`), where an absent field is kept and
//!   an explicit `null` clears it
//!
//! Entities with relations also have a `*Detail` view that flattens the
//! record and adds the expanded relations.

mod account;
mod contact;
mod deal;
mod email;
mod lead;
mod project;
mod project_task;
mod task;

pub use account::{Account, AccountDetail, AccountInput, AccountPatch, NewAccount};
pub use contact::{Contact, ContactDetail, ContactInput, ContactPatch, NewContact};
pub use deal::{Deal, DealDetail, DealInput, DealPatch, NewDeal};
pub use email::{Email, EmailDetail, EmailInput, EmailPatch, NewEmail};
pub use lead::{Lead, LeadInput, LeadPatch, NewLead};
pub use project::{NewProject, Project, ProjectDetail, ProjectInput, ProjectPatch};
pub use project_task::{
    NewProjectTask, ProjectTask, ProjectTaskDetail, ProjectTaskInput, ProjectTaskPatch,
};
pub use task::{NewTask, Task, TaskDetail, TaskInput, TaskPatch};

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let patch: LeadPatch =
            serde_json::from_value(json!({"phone": null, "company": "Acme"})).unwrap();
        assert_eq!(patch.phone, Some(None));
        assert_eq!(patch.company, Some(Some("Acme".to_string())));
        assert_eq!(patch.notes, None);
    }

    #[test]
    fn patch_serializes_only_touched_fields() {
        let patch = DealPatch {
            close_date: Some(None),
            stage: Some(Some("Negotiation".into())),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({"stage": "Negotiation", "closeDate": null}));
    }

    #[test]
    fn patch_date_accepts_calendar_date_and_empty_string() {
        let patch: TaskPatch =
            serde_json::from_value(json!({"dueDate": "2024-06-01", "completedAt": ""})).unwrap();
        assert_eq!(patch.due_date, Some(Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())));
        assert_eq!(patch.completed_at, Some(None));
    }

    #[test]
    fn input_rejects_malformed_dates() {
        let result: Result<DealInput, _> =
            serde_json::from_value(json!({"title": "Pilot", "closeDate": "soon"}));
        assert!(result.is_err());
    }

    #[test]
    fn input_ignores_unknown_fields() {
        let input: LeadInput = serde_json::from_value(json!({
            "firstName": "Ann",
            "id": "client-chosen",
            "createdAt": "2020-01-01"
        }))
        .unwrap();
        assert_eq!(input.first_name.as_deref(), Some("Ann"));
    }

    #[test]
    fn detail_flattens_record_and_relations() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let detail = EmailDetail {
            email: Email {
                id: "e1".into(),
                subject: "Hello".into(),
                body: "Hi".into(),
                from: "me@x.com".into(),
                to: vec!["you@x.com".into()],
                cc: vec![],
                bcc: vec![],
                status: "Draft".into(),
                sent_at: None,
                assigned_to: None,
                contact_id: None,
                created_at: now,
                updated_at: now,
            },
            contact: None,
        };

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["subject"], "Hello");
        assert_eq!(value["contactId"], serde_json::Value::Null);
        assert_eq!(value["contact"], serde_json::Value::Null);
        assert_eq!(value["createdAt"], "2024-01-02T03:04:05Z");

        let back: EmailDetail = serde_json::from_value(value).unwrap();
        assert_eq!(back, detail);
    }
}
