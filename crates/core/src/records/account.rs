use keystone_common::validation::{ValidationResult, Validator};
use keystone_domain::{Account, AccountDetail, AccountInput, AccountPatch, EntityKind, NewAccount};

use super::{check_patch_required, patch_required, patch_text, required_text, text, Record};

impl Record for Account {
    const KIND: EntityKind = EntityKind::Account;

    type Input = AccountInput;
    type New = NewAccount;
    type Patch = AccountPatch;
    type View = AccountDetail;

    fn id(&self) -> &str {
        &self.id
    }

    fn prepare(input: AccountInput) -> ValidationResult<NewAccount> {
        let mut v = Validator::new();
        v.require("name", input.name.as_deref());
        v.finalize()?;

        Ok(NewAccount {
            name: required_text(input.name),
            industry: text(input.industry),
            website: text(input.website),
            phone: text(input.phone),
            address: text(input.address),
            city: text(input.city),
            state: text(input.state),
            zip_code: text(input.zip_code),
            country: text(input.country),
            notes: text(input.notes),
            assigned_to: text(input.assigned_to),
        })
    }

    fn prepare_patch(patch: AccountPatch) -> ValidationResult<AccountPatch> {
        let mut v = Validator::new();
        check_patch_required(&mut v, "name", patch.name.as_ref());
        v.finalize()?;

        Ok(AccountPatch {
            name: patch_required(patch.name),
            industry: patch_text(patch.industry),
            website: patch_text(patch.website),
            phone: patch_text(patch.phone),
            address: patch_text(patch.address),
            city: patch_text(patch.city),
            state: patch_text(patch.state),
            zip_code: patch_text(patch.zip_code),
            country: patch_text(patch.country),
            notes: patch_text(patch.notes),
            assigned_to: patch_text(patch.assigned_to),
        })
    }
}
