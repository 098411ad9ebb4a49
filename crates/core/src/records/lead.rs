use keystone_common::validation::{ValidationResult, Validator};
use keystone_domain::constants::{LEAD_DEFAULT_PRIORITY, LEAD_DEFAULT_STATUS};
use keystone_domain::{EntityKind, Lead, LeadInput, LeadPatch, NewLead};

use super::{
    check_patch_email, check_patch_required, list, patch_list, patch_required, patch_text,
    required_text, require_email, text, text_or, Record,
};

impl Record for Lead {
    const KIND: EntityKind = EntityKind::Lead;

    type Input = LeadInput;
    type New = NewLead;
    type Patch = LeadPatch;
    type View = Lead;

    fn id(&self) -> &str {
        &self.id
    }

    fn prepare(input: LeadInput) -> ValidationResult<NewLead> {
        let mut v = Validator::new();
        v.require("firstName", input.first_name.as_deref())
            .require("lastName", input.last_name.as_deref());
        require_email(&mut v, "email", input.email.as_deref());
        v.finalize()?;

        Ok(NewLead {
            first_name: required_text(input.first_name),
            last_name: required_text(input.last_name),
            email: required_text(input.email),
            phone: text(input.phone),
            company: text(input.company),
            position: text(input.position),
            source: text(input.source),
            status: text_or(input.status, LEAD_DEFAULT_STATUS),
            notes: text(input.notes),
            assigned_to: text(input.assigned_to),
            priority: text_or(input.priority, LEAD_DEFAULT_PRIORITY),
            tags: list(input.tags),
        })
    }

    fn prepare_patch(patch: LeadPatch) -> ValidationResult<LeadPatch> {
        let mut v = Validator::new();
        check_patch_required(&mut v, "firstName", patch.first_name.as_ref());
        check_patch_required(&mut v, "lastName", patch.last_name.as_ref());
        check_patch_email(&mut v, "email", patch.email.as_ref());
        check_patch_required(&mut v, "status", patch.status.as_ref());
        check_patch_required(&mut v, "priority", patch.priority.as_ref());
        v.finalize()?;

        Ok(LeadPatch {
            first_name: patch_required(patch.first_name),
            last_name: patch_required(patch.last_name),
            email: patch_required(patch.email),
            phone: patch_text(patch.phone),
            company: patch_text(patch.company),
            position: patch_text(patch.position),
            source: patch_text(patch.source),
            status: patch_required(patch.status),
            notes: patch_text(patch.notes),
            assigned_to: patch_text(patch.assigned_to),
            priority: patch_required(patch.priority),
            tags: patch_list(patch.tags),
        })
    }
}
