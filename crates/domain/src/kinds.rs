//! Entity kinds and their wire names

use crate::impl_wire_name_conversions;

/// The eight CRM entities exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Lead,
    Contact,
    Account,
    Deal,
    Email,
    Task,
    Project,
    ProjectTask,
}

impl_wire_name_conversions!(EntityKind {
    Lead => "leads",
    Contact => "contacts",
    Account => "accounts",
    Deal => "deals",
    Email => "emails",
    Task => "tasks",
    Project => "projects",
    ProjectTask => "project-tasks",
});

impl EntityKind {
    /// Every kind, in route registration order.
    pub const fn all() -> [Self; 8] {
        [
            Self::Lead,
            Self::Contact,
            Self::Account,
            Self::Deal,
            Self::Email,
            Self::Task,
            Self::Project,
            Self::ProjectTask,
        ]
    }

    /// URL path segment under `/api`.
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Lead => "leads",
            Self::Contact => "contacts",
            Self::Account => "accounts",
            Self::Deal => "deals",
            Self::Email => "emails",
            Self::Task => "tasks",
            Self::Project => "projects",
            Self::ProjectTask => "project-tasks",
        }
    }

    /// JSON key of the list envelope.
    pub const fn collection_key(self) -> &'static str {
        match self {
            Self::ProjectTask => "projectTasks",
            other => other.path_segment(),
        }
    }

    /// JSON key of the single-record envelope.
    pub const fn item_key(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Contact => "contact",
            Self::Account => "account",
            Self::Deal => "deal",
            Self::Email => "email",
            Self::Task => "task",
            Self::Project => "project",
            Self::ProjectTask => "projectTask",
        }
    }

    /// Human-readable singular name, lowercase.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ProjectTask => "project task",
            other => other.item_key(),
        }
    }

    /// Human-readable plural name, lowercase.
    pub const fn plural_label(self) -> &'static str {
        match self {
            Self::ProjectTask => "project tasks",
            other => other.path_segment(),
        }
    }

    /// Fields the `search` parameter matches against (API names).
    pub const fn search_fields(self) -> &'static [&'static str] {
        match self {
            Self::Lead | Self::Contact => &["firstName", "lastName", "email", "company"],
            Self::Account => &["name", "industry", "website"],
            Self::Deal | Self::Task | Self::ProjectTask => &["title", "description"],
            Self::Email => &["subject", "body", "from"],
            Self::Project => &["name", "description"],
        }
    }

    /// Query parameters that filter by exact value (API names).
    pub const fn filter_fields(self) -> &'static [&'static str] {
        match self {
            Self::Lead => &["status", "priority", "assignedTo"],
            Self::Contact => &["accountId", "assignedTo"],
            Self::Account => &["industry", "assignedTo"],
            Self::Deal => &["stage", "assignedTo", "contactId", "accountId"],
            Self::Email => &["status", "assignedTo", "contactId"],
            Self::Task => &["status", "priority", "assignedTo", "dealId"],
            Self::Project => &["status", "assignedTo"],
            Self::ProjectTask => &["status", "priority", "assignedTo", "projectId"],
        }
    }

    /// Body of the 404 envelope, e.g. "Project task not found".
    pub fn not_found_message(self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        let capitalized: String = chars
            .next()
            .map(|first| first.to_uppercase().chain(chars).collect())
            .unwrap_or_default();
        format!("{capitalized} not found")
    }
}
