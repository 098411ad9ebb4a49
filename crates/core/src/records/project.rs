use keystone_common::validation::{ValidationResult, Validator};
use keystone_domain::constants::{PROJECT_DEFAULT_PROGRESS, PROJECT_DEFAULT_STATUS};
use keystone_domain::{EntityKind, NewProject, Project, ProjectDetail, ProjectInput, ProjectPatch};

use super::{
    check_patch_present, check_patch_required, check_percent, patch_required, patch_text,
    required_text, text, text_or, Record,
};

impl Record for Project {
    const KIND: EntityKind = EntityKind::Project;

    type Input = ProjectInput;
    type New = NewProject;
    type Patch = ProjectPatch;
    type View = ProjectDetail;

    fn id(&self) -> &str {
        &self.id
    }

    fn prepare(input: ProjectInput) -> ValidationResult<NewProject> {
        let mut v = Validator::new();
        v.require("name", input.name.as_deref());
        check_percent(&mut v, "progress", input.progress);
        if let (Some(start), Some(end)) = (input.start_date, input.end_date) {
            if end < start {
                v.add_error("endDate", "must not be before startDate");
            }
        }
        v.finalize()?;

        Ok(NewProject {
            name: required_text(input.name),
            description: text(input.description),
            status: text_or(input.status, PROJECT_DEFAULT_STATUS),
            start_date: input.start_date,
            end_date: input.end_date,
            progress: input.progress.unwrap_or(PROJECT_DEFAULT_PROGRESS),
            assigned_to: text(input.assigned_to),
        })
    }

    fn prepare_patch(patch: ProjectPatch) -> ValidationResult<ProjectPatch> {
        let mut v = Validator::new();
        check_patch_required(&mut v, "name", patch.name.as_ref());
        check_patch_required(&mut v, "status", patch.status.as_ref());
        check_patch_present(&mut v, "progress", patch.progress.as_ref());
        check_percent(&mut v, "progress", patch.progress.flatten());
        v.finalize()?;

        Ok(ProjectPatch {
            name: patch_required(patch.name),
            description: patch_text(patch.description),
            status: patch_required(patch.status),
            assigned_to: patch_text(patch.assigned_to),
            ..patch
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn applies_planning_defaults() {
        let project =
            Project::prepare(ProjectInput { name: Some("Rollout".into()), ..Default::default() })
                .unwrap();
        assert_eq!(project.status, "Planning");
        assert_eq!(project.progress, 0);
    }

    #[test]
    fn end_date_must_follow_start_date() {
        let err = Project::prepare(ProjectInput {
            name: Some("Rollout".into()),
            start_date: Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()),
            end_date: Some(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()),
            progress: Some(-1),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.error_count(), 2);
        assert_eq!(err.field_errors("endDate")[0].message, "must not be before startDate");
    }
}
