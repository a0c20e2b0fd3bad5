use crate::models::PredefinedTask;

const CATALOGUE: &[(&str, u32, &str, bool)] = &[
    ("Morning Exercise", 50, "Physical", true),
    ("10,000 Steps", 60, "Physical", true),
    ("Gym Workout", 70, "Physical", true),
    ("Yoga Session", 40, "Physical", false),
    ("Sports Activity", 80, "Physical", false),
    ("Meditation", 30, "Mental", true),
    ("Reading (30 min)", 40, "Mental", true),
    ("Learning New Skill", 70, "Mental", false),
    ("Journaling", 20, "Mental", false),
    ("Complete Work Project", 100, "Productivity", false),
    ("Organize Workspace", 30, "Productivity", false),
    ("Plan Tomorrow", 20, "Productivity", true),
    ("Drink Water (2L)", 30, "Health", true),
    ("Healthy Meal", 40, "Health", true),
    ("Sleep 8 Hours", 50, "Health", true),
];

/// The built-in predefined tasks, numbered from 1 in catalogue order.
pub fn default_predefined_tasks() -> Vec<PredefinedTask> {
    CATALOGUE
        .iter()
        .zip(1..)
        .map(|(&(name, exp, category, is_default), id)| PredefinedTask {
            predefined_task_id: id,
            task_name: name.to_string(),
            default_exp_value: exp,
            category: category.to_string(),
            is_default,
        })
        .collect()
}

/// Catalogue order for the new-task dropdown: category, then name.
pub fn sorted_for_display(tasks: &[PredefinedTask]) -> Vec<PredefinedTask> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.task_name.cmp(&b.task_name))
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_ids_are_sequential() {
        let tasks = default_predefined_tasks();
        assert_eq!(tasks.len(), 15);
        assert_eq!(tasks[0].predefined_task_id, 1);
        assert_eq!(tasks[14].predefined_task_id, 15);
    }

    #[test]
    fn display_order_groups_by_category() {
        let sorted = sorted_for_display(&default_predefined_tasks());
        assert_eq!(sorted[0].category, "Health");
        assert_eq!(sorted[0].task_name, "Drink Water (2L)");
        assert_eq!(sorted.last().unwrap().category, "Productivity");
    }
}
