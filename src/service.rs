//! Task-service operations over [`AppData`]. Handlers lock the data, call one
//! of these with today's date, then persist.

use crate::catalogue::sorted_for_display;
use crate::errors::AppError;
use crate::models::{AppData, DashboardSnapshot, NewTaskForm, Task, TaskId};
use chrono::NaiveDate;

const TASK_NOT_FOUND: &str = "Task not found";

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Today's tasks ordered by exp, highest first.
pub fn dashboard_at(today: NaiveDate, data: &AppData) -> DashboardSnapshot {
    let mut tasks: Vec<Task> = data
        .tasks
        .values()
        .filter(|task| task.due_date == today)
        .cloned()
        .collect();
    tasks.sort_by(|a, b| b.exp_value.cmp(&a.exp_value).then(a.task_id.cmp(&b.task_id)));

    DashboardSnapshot {
        user: data.user.clone(),
        tasks,
        predefined_tasks: sorted_for_display(&data.predefined_tasks),
    }
}

pub fn create_task_at(
    today: NaiveDate,
    data: &mut AppData,
    form: NewTaskForm,
) -> Result<TaskId, AppError> {
    let mut exp_value = form.exp_value.unwrap_or(0);
    let (task_name, predefined_task_id) = match form.predefined_task_id {
        Some(id) => match data
            .predefined_tasks
            .iter()
            .find(|predefined| predefined.predefined_task_id == id)
        {
            Some(predefined) => {
                if exp_value == 0 {
                    exp_value = predefined.default_exp_value;
                }
                (predefined.task_name.clone(), Some(id))
            }
            None => return Err(AppError::bad_request("Unknown predefined task")),
        },
        None => (form.task_name.trim().to_string(), None),
    };

    if task_name.is_empty() {
        return Err(AppError::bad_request("task_name is required"));
    }

    let task_id = data.next_task_id.max(1);
    data.next_task_id = task_id + 1;
    data.tasks.insert(
        task_id,
        Task {
            task_id,
            task_name,
            task_description: form.task_description,
            exp_value,
            due_date: form.due_date.unwrap_or(today),
            is_completed: false,
            is_daily: form.is_daily,
            predefined_task_id,
        },
    );

    Ok(task_id)
}

pub fn delete_task(data: &mut AppData, task_id: TaskId) -> Result<(), AppError> {
    data.tasks
        .remove(&task_id)
        .map(|_| ())
        .ok_or_else(|| AppError::not_found(TASK_NOT_FOUND))
}

/// Marks the task completed and credits its exp. Returns the exp gained.
pub fn complete_task_at(
    today: NaiveDate,
    data: &mut AppData,
    task_id: TaskId,
) -> Result<u32, AppError> {
    let task = data
        .tasks
        .get_mut(&task_id)
        .ok_or_else(|| AppError::not_found(TASK_NOT_FOUND))?;
    if task.is_completed {
        return Err(AppError::bad_request("Task already completed"));
    }

    task.is_completed = true;
    let exp = task.exp_value;
    data.user.total_exp = data.user.total_exp.saturating_add(u64::from(exp));
    let record = data.daily_records.entry(date_key(today)).or_default();
    record.exp_gained = record.exp_gained.saturating_add(u64::from(exp));

    Ok(exp)
}

pub fn set_daily(data: &mut AppData, task_id: TaskId, is_daily: bool) -> Result<(), AppError> {
    let task = data
        .tasks
        .get_mut(&task_id)
        .ok_or_else(|| AppError::not_found(TASK_NOT_FOUND))?;
    task.is_daily = is_daily;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::default_predefined_tasks;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 12).unwrap()
    }

    fn seeded() -> AppData {
        AppData {
            predefined_tasks: default_predefined_tasks(),
            ..AppData::default()
        }
    }

    fn named(name: &str, exp: u32) -> NewTaskForm {
        NewTaskForm {
            task_name: name.to_string(),
            exp_value: Some(exp),
            ..NewTaskForm::default()
        }
    }

    #[test]
    fn completing_credits_total_and_daily_record() {
        let mut data = seeded();
        let id = create_task_at(today(), &mut data, named("Stretch", 40)).unwrap();

        assert_eq!(complete_task_at(today(), &mut data, id).unwrap(), 40);
        assert_eq!(data.user.total_exp, 40);
        assert_eq!(data.daily_records[&date_key(today())].exp_gained, 40);

        let err = complete_task_at(today(), &mut data, id).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(data.user.total_exp, 40);
    }

    #[test]
    fn predefined_task_fills_name_and_default_exp() {
        let mut data = seeded();
        let form = NewTaskForm {
            predefined_task_id: Some(6),
            task_name: "ignored".to_string(),
            ..NewTaskForm::default()
        };
        let id = create_task_at(today(), &mut data, form).unwrap();
        let task = &data.tasks[&id];
        assert_eq!(task.task_name, "Meditation");
        assert_eq!(task.exp_value, 30);
        assert_eq!(task.predefined_task_id, Some(6));
        assert_eq!(task.due_date, today());
    }

    #[test]
    fn manual_exp_overrides_predefined_default() {
        let mut data = seeded();
        let form = NewTaskForm {
            predefined_task_id: Some(1),
            exp_value: Some(75),
            ..NewTaskForm::default()
        };
        let id = create_task_at(today(), &mut data, form).unwrap();
        assert_eq!(data.tasks[&id].exp_value, 75);
    }

    #[test]
    fn custom_task_needs_a_name() {
        let mut data = seeded();
        let err = create_task_at(today(), &mut data, named("  ", 10)).unwrap_err();
        assert_eq!(err.message, "task_name is required");
        assert!(data.tasks.is_empty());
    }

    #[test]
    fn unknown_task_is_not_found() {
        let mut data = seeded();
        assert_eq!(
            delete_task(&mut data, 99).unwrap_err().status,
            axum::http::StatusCode::NOT_FOUND
        );
        assert_eq!(
            set_daily(&mut data, 99, true).unwrap_err().message,
            TASK_NOT_FOUND
        );
    }

    #[test]
    fn dashboard_lists_today_by_exp_descending() {
        let mut data = seeded();
        create_task_at(today(), &mut data, named("Low", 10)).unwrap();
        create_task_at(today(), &mut data, named("High", 90)).unwrap();
        let mut old = named("Yesterday", 50);
        old.due_date = today().pred_opt();
        create_task_at(today(), &mut data, old).unwrap();

        let snapshot = dashboard_at(today(), &data);
        let names: Vec<_> = snapshot.tasks.iter().map(|t| t.task_name.as_str()).collect();
        assert_eq!(names, ["High", "Low"]);
        assert_eq!(snapshot.predefined_tasks.len(), 15);
    }
}
