use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type TaskId = u64;
pub type PredefinedTaskId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: TaskId,
    pub task_name: String,
    #[serde(default)]
    pub task_description: String,
    pub exp_value: u32,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_daily: bool,
    #[serde(default)]
    pub predefined_task_id: Option<PredefinedTaskId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredefinedTask {
    pub predefined_task_id: PredefinedTaskId,
    pub task_name: String,
    pub default_exp_value: u32,
    pub category: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub total_exp: u64,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            username: "adventurer".to_string(),
            total_exp: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DailyRecord {
    pub exp_gained: u64,
    pub exp_lost: u64,
}

/// Everything the task service keeps in its data file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub next_task_id: TaskId,
    #[serde(default)]
    pub user: UserProfile,
    #[serde(default)]
    pub tasks: BTreeMap<TaskId, Task>,
    #[serde(default)]
    pub daily_records: BTreeMap<String, DailyRecord>,
    #[serde(default)]
    pub predefined_tasks: Vec<PredefinedTask>,
}

/// The `{success, error, ...}` envelope every mutating endpoint answers with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_gained: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ToggleDailyRequest {
    #[serde(default)]
    pub is_daily: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub user: UserProfile,
    pub tasks: Vec<Task>,
    pub predefined_tasks: Vec<PredefinedTask>,
}

/// Fields of the new-task form, as sent to `POST /api/tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTaskForm {
    pub predefined_task_id: Option<PredefinedTaskId>,
    pub task_name: String,
    pub task_description: String,
    pub exp_value: Option<u32>,
    pub is_daily: bool,
    pub due_date: Option<NaiveDate>,
}

impl NewTaskForm {
    /// Multipart field list. `is_daily` is only present when checked, like a
    /// browser checkbox.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            (
                "predefined_task_id",
                self.predefined_task_id
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
            ),
            ("task_name", self.task_name.clone()),
            ("task_description", self.task_description.clone()),
        ];
        if let Some(exp) = self.exp_value {
            fields.push(("exp_value", exp.to_string()));
        }
        if self.is_daily {
            fields.push(("is_daily", "on".to_string()));
        }
        if let Some(date) = self.due_date {
            fields.push(("due_date", date.to_string()));
        }
        fields
    }

    pub fn from_fields<I, K, V>(fields: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut form = Self::default();
        for (name, value) in fields {
            let value = value.as_ref().trim();
            match name.as_ref() {
                "predefined_task_id" if !value.is_empty() => {
                    let id = value
                        .parse()
                        .map_err(|_| format!("invalid predefined_task_id '{value}'"))?;
                    form.predefined_task_id = Some(id);
                }
                "task_name" => form.task_name = value.to_string(),
                "task_description" => form.task_description = value.to_string(),
                "exp_value" if !value.is_empty() => {
                    let exp = value
                        .parse()
                        .map_err(|_| "exp_value must be a whole number".to_string())?;
                    form.exp_value = Some(exp);
                }
                "is_daily" => form.is_daily = true,
                "due_date" if !value.is_empty() => {
                    let date = value
                        .parse()
                        .map_err(|_| format!("invalid due_date '{value}'"))?;
                    form.due_date = Some(date);
                }
                _ => {}
            }
        }
        Ok(form)
    }
}

/// Inputs of the "suggest a task" modal. Never sent anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionForm {
    pub task_name: String,
    pub suggested_exp_value: Option<u32>,
}
