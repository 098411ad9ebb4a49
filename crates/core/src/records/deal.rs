use keystone_common::validation::{ValidationResult, Validator};
use keystone_domain::constants::{DEAL_DEFAULT_PROBABILITY, DEAL_DEFAULT_STAGE};
use keystone_domain::{Deal, DealDetail, DealInput, DealPatch, EntityKind, NewDeal};

use super::{
    check_amount, check_patch_present, check_patch_required, check_percent, patch_required,
    patch_text, required_text, text, text_or, Record,
};

impl Record for Deal {
    const KIND: EntityKind = EntityKind::Deal;

    type Input = DealInput;
    type New = NewDeal;
    type Patch = DealPatch;
    type View = DealDetail;

    fn id(&self) -> &str {
        &self.id
    }

    fn prepare(input: DealInput) -> ValidationResult<NewDeal> {
        let mut v = Validator::new();
        v.require("title", input.title.as_deref());
        check_amount(&mut v, "amount", input.amount);
        check_percent(&mut v, "probability", input.probability);
        v.finalize()?;

        Ok(NewDeal {
            title: required_text(input.title),
            amount: input.amount,
            stage: text_or(input.stage, DEAL_DEFAULT_STAGE),
            probability: input.probability.unwrap_or(DEAL_DEFAULT_PROBABILITY),
            close_date: input.close_date,
            description: text(input.description),
            assigned_to: text(input.assigned_to),
            contact_id: text(input.contact_id),
            account_id: text(input.account_id),
        })
    }

    fn prepare_patch(patch: DealPatch) -> ValidationResult<DealPatch> {
        let mut v = Validator::new();
        check_patch_required(&mut v, "title", patch.title.as_ref());
        check_patch_required(&mut v, "stage", patch.stage.as_ref());
        check_patch_present(&mut v, "probability", patch.probability.as_ref());
        check_amount(&mut v, "amount", patch.amount.flatten());
        check_percent(&mut v, "probability", patch.probability.flatten());
        v.finalize()?;

        Ok(DealPatch {
            title: patch_required(patch.title),
            stage: patch_required(patch.stage),
            description: patch_text(patch.description),
            assigned_to: patch_text(patch.assigned_to),
            contact_id: patch_text(patch.contact_id),
            account_id: patch_text(patch.account_id),
            ..patch
        })
    }
}
