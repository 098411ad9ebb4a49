use keystone_common::validation::{ValidationResult, Validator};
use keystone_domain::constants::{TASK_DEFAULT_PRIORITY, TASK_DEFAULT_STATUS};
use keystone_domain::{EntityKind, NewTask, Task, TaskDetail, TaskInput, TaskPatch};

use super::{check_patch_required, patch_required, patch_text, required_text, text, text_or, Record};

impl Record for Task {
    const KIND: EntityKind = EntityKind::Task;

    type Input = TaskInput;
    type New = NewTask;
    type Patch = TaskPatch;
    type View = TaskDetail;

    fn id(&self) -> &str {
        &self.id
    }

    fn prepare(input: TaskInput) -> ValidationResult<NewTask> {
        let mut v = Validator::new();
        v.require("title", input.title.as_deref());
        v.finalize()?;

        Ok(NewTask {
            title: required_text(input.title),
            description: text(input.description),
            status: text_or(input.status, TASK_DEFAULT_STATUS),
            priority: text_or(input.priority, TASK_DEFAULT_PRIORITY),
            due_date: input.due_date,
            completed_at: input.completed_at,
            assigned_to: text(input.assigned_to),
            deal_id: text(input.deal_id),
        })
    }

    fn prepare_patch(patch: TaskPatch) -> ValidationResult<TaskPatch> {
        let mut v = Validator::new();
        check_patch_required(&mut v, "title", patch.title.as_ref());
        check_patch_required(&mut v, "status", patch.status.as_ref());
        check_patch_required(&mut v, "priority", patch.priority.as_ref());
        v.finalize()?;

        Ok(TaskPatch {
            title: patch_required(patch.title),
            description: patch_text(patch.description),
            status: patch_required(patch.status),
            priority: patch_required(patch.priority),
            assigned_to: patch_text(patch.assigned_to),
            deal_id: patch_text(patch.deal_id),
            ..patch
        })
    }
}
