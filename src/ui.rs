use crate::ledger::MAX_DAILY_EXP;
use crate::view::{DashboardView, TaskRow};

const BAR_CELLS: usize = 25;

pub fn render_dashboard(view: &DashboardView) -> String {
    let tasks = if view.tasks.is_empty() {
        "  (no tasks for today)".to_string()
    } else {
        view.tasks
            .iter()
            .map(render_row)
            .collect::<Vec<_>>()
            .join("\n")
    };

    let modal = if view.suggestion_modal_open {
        format!(
            "\n[suggest a task] name: {:?}  exp: {}  (send-suggestion / close)\n",
            view.suggestion.task_name,
            view.suggestion
                .suggested_exp_value
                .map(|exp| exp.to_string())
                .unwrap_or_else(|| "-".to_string())
        )
    } else {
        String::new()
    };

    DASHBOARD_TEXT
        .replace("{{CLOCK}}", &view.clock)
        .replace("{{USER}}", &view.username)
        .replace("{{BAR}}", &render_bar(view.exp_bar.percentage))
        .replace("{{EXP}}", &view.exp_bar.label())
        .replace("{{MAX}}", &MAX_DAILY_EXP.to_string())
        .replace("{{WIDTH}}", &view.exp_bar.width())
        .replace("{{TOTAL}}", &view.total_exp.to_string())
        .replace("{{TASKS}}", &tasks)
        .replace("{{FORM}}", &render_form(view))
        .replace("{{MODAL}}", &modal)
}

fn render_row(row: &TaskRow) -> String {
    let mark = if row.completed { "[x]" } else { "[ ]" };
    let daily = if row.daily_checked { " daily" } else { "" };
    let busy = if row.busy { " ..." } else { "" };
    let mut line = format!(
        "  {mark} #{id:<4} {name}  +{exp} exp{daily}{busy}",
        id = row.task_id,
        name = row.name,
        exp = row.exp_value,
    );
    if !row.description.is_empty() {
        line.push_str(&format!("\n              {}", row.description));
    }
    line
}

fn render_bar(percentage: f64) -> String {
    let filled = ((percentage / 100.0) * BAR_CELLS as f64).round() as usize;
    let filled = filled.min(BAR_CELLS);
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_CELLS - filled))
}

fn render_form(view: &DashboardView) -> String {
    let form = &view.new_task;
    let picked = form
        .predefined_task_id
        .and_then(|id| {
            view.predefined_tasks
                .iter()
                .find(|task| task.predefined_task_id == id)
        })
        .map(|task| format!("{} ({})", task.task_name, task.category))
        .unwrap_or_else(|| "custom".to_string());
    format!(
        "new task: {picked}  name: {:?}  exp: {}  daily: {}{}",
        form.task_name,
        form.exp_value
            .map(|exp| exp.to_string())
            .unwrap_or_else(|| "-".to_string()),
        if form.is_daily { "yes" } else { "no" },
        form.due_date
            .map(|date| format!("  due: {date}"))
            .unwrap_or_default()
    )
}

const DASHBOARD_TEXT: &str = "\
== {{CLOCK}} ============================== {{USER}}
exp  [{{BAR}}] {{EXP}}/{{MAX}} ({{WIDTH}})   total: {{TOTAL}}

{{TASKS}}

{{FORM}}
{{MODAL}}";
