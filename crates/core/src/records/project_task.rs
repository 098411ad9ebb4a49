use keystone_common::validation::{ValidationResult, Validator};
use keystone_domain::constants::{PROJECT_TASK_DEFAULT_PRIORITY, PROJECT_TASK_DEFAULT_STATUS};
use keystone_domain::{
    EntityKind, NewProjectTask, ProjectTask, ProjectTaskDetail, ProjectTaskInput, ProjectTaskPatch,
};

use super::{check_patch_required, patch_required, patch_text, required_text, text, text_or, Record};

impl Record for ProjectTask {
    const KIND: EntityKind = EntityKind::ProjectTask;

    type Input = ProjectTaskInput;
    type New = NewProjectTask;
    type Patch = ProjectTaskPatch;
    type View = ProjectTaskDetail;

    fn id(&self) -> &str {
        &self.id
    }

    fn prepare(input: ProjectTaskInput) -> ValidationResult<NewProjectTask> {
        let mut v = Validator::new();
        v.require("title", input.title.as_deref());
        v.finalize()?;

        Ok(NewProjectTask {
            title: required_text(input.title),
            description: text(input.description),
            status: text_or(input.status, PROJECT_TASK_DEFAULT_STATUS),
            priority: text_or(input.priority, PROJECT_TASK_DEFAULT_PRIORITY),
            due_date: input.due_date,
            completed_at: input.completed_at,
            assigned_to: text(input.assigned_to),
            project_id: text(input.project_id),
        })
    }

    fn prepare_patch(patch: ProjectTaskPatch) -> ValidationResult<ProjectTaskPatch> {
        let mut v = Validator::new();
        check_patch_required(&mut v, "title", patch.title.as_ref());
        check_patch_required(&mut v, "status", patch.status.as_ref());
        check_patch_required(&mut v, "priority", patch.priority.as_ref());
        v.finalize()?;

        Ok(ProjectTaskPatch {
            title: patch_required(patch.title),
            description: patch_text(patch.description),
            status: patch_required(patch.status),
            priority: patch_required(patch.priority),
            assigned_to: patch_text(patch.assigned_to),
            project_id: patch_text(patch.project_id),
            ..patch
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_board_defaults() {
        let task = ProjectTask::prepare(ProjectTaskInput {
            title: Some("Wireframes".into()),
            project_id: Some("p-1".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(task.status, "To Do");
        assert_eq!(task.priority, "Medium");
        assert_eq!(task.project_id.as_deref(), Some("p-1"));
    }
}
