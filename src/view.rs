use crate::ledger::ExpBar;
use crate::models::{NewTaskForm, PredefinedTask, SuggestionForm, TaskId};
use crate::store::TaskEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionIcon {
    Open,
    Checked,
}

impl CompletionIcon {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Open => "fa-circle",
            Self::Checked => "fa-check-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub task_id: TaskId,
    pub name: String,
    pub description: String,
    pub exp_value: u32,
    pub completed: bool,
    pub daily_checked: bool,
    pub complete_enabled: bool,
    pub icon: CompletionIcon,
    pub busy: bool,
}

impl From<&TaskEntry> for TaskRow {
    fn from(entry: &TaskEntry) -> Self {
        let completed = entry.task.is_completed;
        Self {
            task_id: entry.task.task_id,
            name: entry.task.task_name.clone(),
            description: entry.task.task_description.clone(),
            exp_value: entry.task.exp_value,
            completed,
            daily_checked: entry.daily_checked(),
            complete_enabled: !completed && !entry.in_flight,
            icon: if completed {
                CompletionIcon::Checked
            } else {
                CompletionIcon::Open
            },
            busy: entry.in_flight,
        }
    }
}

/// Everything the dashboard displays, projected from controller state.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub clock: String,
    pub username: String,
    pub exp_bar: ExpBar,
    pub total_exp: u64,
    pub tasks: Vec<TaskRow>,
    pub predefined_tasks: Vec<PredefinedTask>,
    pub new_task: NewTaskForm,
    pub suggestion_modal_open: bool,
    pub suggestion: SuggestionForm,
}

impl DashboardView {
    pub fn task(&self, task_id: TaskId) -> Option<&TaskRow> {
        self.tasks.iter().find(|row| row.task_id == task_id)
    }
}
