use keystone_common::validation::{ValidationResult, Validator};
use keystone_domain::constants::EMAIL_DEFAULT_STATUS;
use keystone_domain::{Email, EmailDetail, EmailInput, EmailPatch, EntityKind, NewEmail};

use super::{
    check_addresses, check_patch_email, check_patch_required, list, patch_list, patch_required,
    patch_text, required_text, require_email, text, text_or, Record,
};

impl Record for Email {
    const KIND: EntityKind = EntityKind::Email;

    type Input = EmailInput;
    type New = NewEmail;
    type Patch = EmailPatch;
    type View = EmailDetail;

    fn id(&self) -> &str {
        &self.id
    }

    fn prepare(input: EmailInput) -> ValidationResult<NewEmail> {
        let mut v = Validator::new();
        v.require("subject", input.subject.as_deref()).require("body", input.body.as_deref());
        require_email(&mut v, "from", input.from.as_deref());
        check_addresses(&mut v, "to", input.to.as_deref());
        check_addresses(&mut v, "cc", input.cc.as_deref());
        check_addresses(&mut v, "bcc", input.bcc.as_deref());
        v.finalize()?;

        Ok(NewEmail {
            subject: required_text(input.subject),
            // Body whitespace is content; only the emptiness check trims.
            body: input.body.unwrap_or_default(),
            from: required_text(input.from),
            to: list(input.to),
            cc: list(input.cc),
            bcc: list(input.bcc),
            status: text_or(input.status, EMAIL_DEFAULT_STATUS),
            sent_at: input.sent_at,
            assigned_to: text(input.assigned_to),
            contact_id: text(input.contact_id),
        })
    }

    fn prepare_patch(patch: EmailPatch) -> ValidationResult<EmailPatch> {
        let mut v = Validator::new();
        check_patch_required(&mut v, "subject", patch.subject.as_ref());
        check_patch_required(&mut v, "body", patch.body.as_ref());
        check_patch_email(&mut v, "from", patch.from.as_ref());
        check_patch_required(&mut v, "status", patch.status.as_ref());
        for (field, value) in [("to", &patch.to), ("cc", &patch.cc), ("bcc", &patch.bcc)] {
            check_addresses(&mut v, field, value.as_ref().and_then(|inner| inner.as_deref()));
        }
        v.finalize()?;

        Ok(EmailPatch {
            subject: patch_required(patch.subject),
            from: patch_required(patch.from),
            to: patch_list(patch.to),
            cc: patch_list(patch.cc),
            bcc: patch_list(patch.bcc),
            status: patch_required(patch.status),
            assigned_to: patch_text(patch.assigned_to),
            contact_id: patch_text(patch.contact_id),
            ..patch
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EmailInput {
        EmailInput {
            subject: Some("Quarterly review".into()),
            body: Some("Hi team,\n\n".into()),
            from: Some("me@corp.com".into()),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_to_draft_with_empty_recipients() {
        let email = Email::prepare(draft()).unwrap();
        assert_eq!(email.status, "Draft");
        assert!(email.to.is_empty() && email.cc.is_empty() && email.bcc.is_empty());
        assert_eq!(email.body, "Hi team,\n\n");
    }

    #[test]
    fn rejects_invalid_recipients() {
        let err = Email::prepare(EmailInput {
            to: Some(vec!["ok@corp.com".into(), "broken".into()]),
            ..draft()
        })
        .unwrap_err();
        assert_eq!(err.field_errors("to")[0].message, "contains an invalid email address");
    }

    #[test]
    fn patch_null_recipients_become_empty() {
        let patch = Email::prepare_patch(EmailPatch { cc: Some(None), ..Default::default() })
            .unwrap();
        assert_eq!(patch.cc, Some(Some(vec![])));
    }
}
