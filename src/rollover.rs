use crate::models::{AppData, Task};
use crate::service::date_key;
use chrono::NaiveDate;
use std::collections::HashSet;

/// Subtracts yesterday's unfinished exp from the user's total (never below
/// zero) and records it as today's loss. Returns the penalty applied.
pub fn apply_penalties_at(today: NaiveDate, data: &mut AppData) -> u64 {
    let Some(yesterday) = today.pred_opt() else {
        return 0;
    };

    let penalty: u64 = data
        .tasks
        .values()
        .filter(|task| task.due_date == yesterday && !task.is_completed)
        .map(|task| u64::from(task.exp_value))
        .sum();
    if penalty == 0 {
        return 0;
    }

    data.user.total_exp = data.user.total_exp.saturating_sub(penalty);
    data.daily_records.entry(date_key(today)).or_default().exp_lost = penalty;
    penalty
}

/// Re-issues every daily task that is due before `today` as a fresh task due
/// `today`, unless a task with the same name is already due. The daily flag
/// moves to the copy. Returns how many tasks were created.
pub fn refresh_daily_tasks_at(today: NaiveDate, data: &mut AppData) -> usize {
    let mut due_today: HashSet<String> = data
        .tasks
        .values()
        .filter(|task| task.due_date == today)
        .map(|task| task.task_name.clone())
        .collect();

    let templates: Vec<Task> = data
        .tasks
        .values()
        .filter(|task| task.is_daily && task.due_date < today)
        .cloned()
        .collect();

    let mut created = 0;
    for template in templates {
        if !due_today.insert(template.task_name.clone()) {
            continue;
        }
        if let Some(old) = data.tasks.get_mut(&template.task_id) {
            old.is_daily = false;
        }

        let task_id = data.next_task_id.max(1);
        data.next_task_id = task_id + 1;
        data.tasks.insert(
            task_id,
            Task {
                task_id,
                due_date: today,
                is_completed: false,
                is_daily: true,
                ..template
            },
        );
        created += 1;
    }

    created
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    fn task(id: u64, name: &str, exp: u32, due: NaiveDate) -> Task {
        Task {
            task_id: id,
            task_name: name.to_string(),
            task_description: String::new(),
            exp_value: exp,
            due_date: due,
            is_completed: false,
            is_daily: false,
            predefined_task_id: None,
        }
    }

    fn data_with(tasks: Vec<Task>) -> AppData {
        let mut data = AppData::default();
        for task in tasks {
            data.next_task_id = data.next_task_id.max(task.task_id + 1);
            data.tasks.insert(task.task_id, task);
        }
        data
    }

    #[test]
    fn penalties_only_count_yesterdays_unfinished_tasks() {
        let mut done = task(2, "done", 70, day(9));
        done.is_completed = true;
        let mut data = data_with(vec![
            task(1, "missed", 30, day(9)),
            done,
            task(3, "older", 500, day(1)),
        ]);
        data.user.total_exp = 100;

        assert_eq!(apply_penalties_at(day(10), &mut data), 30);
        assert_eq!(data.user.total_exp, 70);
        assert_eq!(data.daily_records[&date_key(day(10))].exp_lost, 30);
    }

    #[test]
    fn penalties_floor_total_at_zero() {
        let mut data = data_with(vec![task(1, "missed", 80, day(9))]);
        data.user.total_exp = 50;
        apply_penalties_at(day(10), &mut data);
        assert_eq!(data.user.total_exp, 0);
    }

    #[test]
    fn refresh_copies_daily_tasks_once() {
        let mut daily = task(1, "Meditate", 30, day(9));
        daily.is_daily = true;
        daily.is_completed = true;
        let mut data = data_with(vec![daily, task(2, "one-off", 10, day(9))]);

        assert_eq!(refresh_daily_tasks_at(day(10), &mut data), 1);
        let copy = data
            .tasks
            .values()
            .find(|t| t.due_date == day(10))
            .unwrap();
        assert_eq!(copy.task_name, "Meditate");
        assert!(copy.is_daily);
        assert!(!copy.is_completed);
        assert!(!data.tasks[&1].is_daily);

        assert_eq!(refresh_daily_tasks_at(day(10), &mut data), 0);
        assert_eq!(data.tasks.len(), 3);
    }

    #[test]
    fn refresh_skips_names_already_due_today() {
        let mut daily = task(1, "Walk", 20, day(9));
        daily.is_daily = true;
        let mut data = data_with(vec![daily, task(2, "Walk", 20, day(10))]);
        assert_eq!(refresh_daily_tasks_at(day(10), &mut data), 0);
    }
}
