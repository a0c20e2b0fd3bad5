use crate::ledger::ExpBar;
use crate::models::{Task, TaskId};
use std::collections::BTreeMap;

/// A task as last confirmed by the service, plus UI-only state.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskEntry {
    pub task: Task,
    /// Daily value the user picked while the toggle request is outstanding.
    pub pending_daily: Option<bool>,
    pub in_flight: bool,
}

impl TaskEntry {
    fn new(task: Task) -> Self {
        Self {
            task,
            pending_daily: None,
            in_flight: false,
        }
    }

    /// What the daily checkbox shows: the pending intent if any, otherwise the
    /// confirmed flag.
    pub fn daily_checked(&self) -> bool {
        self.pending_daily.unwrap_or(self.task.is_daily)
    }
}

type Listener = Box<dyn FnMut(&ExpBar)>;

/// Dashboard tasks keyed by id, in display order.
///
/// Every change to the set of tasks or their completion state republishes the
/// exp bar to subscribers.
#[derive(Default)]
pub struct TaskStore {
    entries: BTreeMap<TaskId, TaskEntry>,
    order: Vec<TaskId>,
    listeners: Vec<Listener>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` and immediately hands it the current bar.
    pub fn subscribe(&mut self, mut listener: impl FnMut(&ExpBar) + 'static) {
        listener(&self.exp_bar());
        self.listeners.push(Box::new(listener));
    }

    /// Swaps in a fresh task list. Tasks that survive keep their in-flight
    /// mark and pending daily intent.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        let mut previous = std::mem::take(&mut self.entries);
        self.order.clear();
        for task in tasks {
            let task_id = task.task_id;
            let mut entry = TaskEntry::new(task);
            if let Some(old) = previous.remove(&task_id) {
                entry.in_flight = old.in_flight;
                entry.pending_daily = old.pending_daily;
            }
            if self.entries.insert(task_id, entry).is_none() {
                self.order.push(task_id);
            }
        }
        self.publish();
    }

    pub fn get(&self, task_id: TaskId) -> Option<&TaskEntry> {
        self.entries.get(&task_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskEntry> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn exp_bar(&self) -> ExpBar {
        ExpBar::from_completed(
            self.entries
                .values()
                .filter(|entry| entry.task.is_completed)
                .map(|entry| entry.task.exp_value),
        )
    }

    pub fn set_in_flight(&mut self, task_id: TaskId, in_flight: bool) -> bool {
        match self.entries.get_mut(&task_id) {
            Some(entry) => {
                entry.in_flight = in_flight;
                true
            }
            None => false,
        }
    }

    /// Returns true only when an open task became completed.
    pub fn mark_completed(&mut self, task_id: TaskId) -> bool {
        let Some(entry) = self.entries.get_mut(&task_id) else {
            return false;
        };
        if entry.task.is_completed {
            return false;
        }
        entry.task.is_completed = true;
        self.publish();
        true
    }

    pub fn remove(&mut self, task_id: TaskId) -> Option<Task> {
        let entry = self.entries.remove(&task_id)?;
        self.order.retain(|id| *id != task_id);
        self.publish();
        Some(entry.task)
    }

    pub fn set_pending_daily(&mut self, task_id: TaskId, is_daily: bool) -> bool {
        match self.entries.get_mut(&task_id) {
            Some(entry) => {
                entry.pending_daily = Some(is_daily);
                true
            }
            None => false,
        }
    }

    /// Adopts the pending daily intent as confirmed state.
    pub fn commit_daily(&mut self, task_id: TaskId) {
        if let Some(entry) = self.entries.get_mut(&task_id) {
            if let Some(is_daily) = entry.pending_daily.take() {
                entry.task.is_daily = is_daily;
            }
        }
    }

    /// Drops the pending intent; the checkbox falls back to the confirmed flag.
    pub fn discard_daily(&mut self, task_id: TaskId) {
        if let Some(entry) = self.entries.get_mut(&task_id) {
            entry.pending_daily = None;
        }
    }

    fn publish(&mut self) {
        let bar = self.exp_bar();
        for listener in &mut self.listeners {
            listener(&bar);
        }
    }
}
