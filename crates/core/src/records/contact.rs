use keystone_common::validation::{ValidationResult, Validator};
use keystone_domain::{Contact, ContactDetail, ContactInput, ContactPatch, EntityKind, NewContact};

use super::{
    check_patch_email, check_patch_required, list, patch_list, patch_required, patch_text,
    required_text, require_email, text, Record,
};

impl Record for Contact {
    const KIND: EntityKind = EntityKind::Contact;

    type Input = ContactInput;
    type New = NewContact;
    type Patch = ContactPatch;
    type View = ContactDetail;

    fn id(&self) -> &str {
        &self.id
    }

    fn prepare(input: ContactInput) -> ValidationResult<NewContact> {
        let mut v = Validator::new();
        v.require("firstName", input.first_name.as_deref())
            .require("lastName", input.last_name.as_deref());
        require_email(&mut v, "email", input.email.as_deref());
        v.finalize()?;

        Ok(NewContact {
            first_name: required_text(input.first_name),
            last_name: required_text(input.last_name),
            email: required_text(input.email),
            phone: text(input.phone),
            company: text(input.company),
            position: text(input.position),
            address: text(input.address),
            city: text(input.city),
            state: text(input.state),
            zip_code: text(input.zip_code),
            country: text(input.country),
            notes: text(input.notes),
            assigned_to: text(input.assigned_to),
            account_id: text(input.account_id),
            tags: list(input.tags),
        })
    }

    fn prepare_patch(patch: ContactPatch) -> ValidationResult<ContactPatch> {
        let mut v = Validator::new();
        check_patch_required(&mut v, "firstName", patch.first_name.as_ref());
        check_patch_required(&mut v, "lastName", patch.last_name.as_ref());
        check_patch_email(&mut v, "email", patch.email.as_ref());
        v.finalize()?;

        Ok(ContactPatch {
            first_name: patch_required(patch.first_name),
            last_name: patch_required(patch.last_name),
            email: patch_required(patch.email),
            phone: patch_text(patch.phone),
            company: patch_text(patch.company),
            position: patch_text(patch.position),
            address: patch_text(patch.address),
            city: patch_text(patch.city),
            state: patch_text(patch.state),
            zip_code: patch_text(patch.zip_code),
            country: patch_text(patch.country),
            notes: patch_text(patch.notes),
            assigned_to: patch_text(patch.assigned_to),
            account_id: patch_text(patch.account_id),
            tags: patch_list(patch.tags),
        })
    }
}
