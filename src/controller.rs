use crate::api::{ApiError, TaskApi};
use crate::clock::Clock;
use crate::ledger::{ExpBar, ExpLedger};
use crate::models::{
    DashboardSnapshot, NewTaskForm, PredefinedTask, PredefinedTaskId, SuggestionForm, TaskId,
};
use crate::store::{TaskEntry, TaskStore};
use crate::view::{DashboardView, TaskRow};
use chrono::NaiveDateTime;
use std::future::Future;
use tracing::{debug, error, info, warn};

pub const REMOVE_PROMPT: &str = "Are you sure you want to remove this task?";
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again.";
pub const SUGGESTION_ACK: &str =
    "Thank you! Your task suggestion has been sent to moderators for review.";

/// Blocking user notification.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Interactive yes/no question.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> impl Future<Output = bool>;
}

impl Confirm for bool {
    async fn confirm(&mut self, _prompt: &str) -> bool {
        *self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("task {0} is not on the dashboard")]
    UnknownTask(TaskId),
    #[error("task {0} already has a request in flight")]
    InFlight(TaskId),
    #[error("task {0} is already completed")]
    AlreadyCompleted(TaskId),
    #[error("removal was not confirmed")]
    Declined,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Where a click landed, for the suggestion modal's outside-click rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    ModalBackdrop,
    ModalContent,
    Elsewhere,
}

/// Owns the dashboard state and turns user commands into task-service calls.
///
/// The store only ever holds state the service has confirmed. Each
/// task command runs as `begin_*` (local checks, marks the task in flight),
/// the API call, then `finish_*` (applies or reports the outcome). The
/// `complete_task`/`remove_task`/`toggle_daily` methods run all three; an
/// adapter that interleaves requests can drive the phases itself. A resync
/// keeps in-flight marks, and a completion the snapshot already carries is
/// not credited twice.
pub struct DashboardController<A, N> {
    api: A,
    notifier: N,
    store: TaskStore,
    ledger: ExpLedger,
    clock: Clock,
    username: String,
    predefined_tasks: Vec<PredefinedTask>,
    new_task: NewTaskForm,
    suggestion: SuggestionForm,
    suggestion_modal_open: bool,
}

impl<A: TaskApi, N: Notifier> DashboardController<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            api,
            notifier,
            store: TaskStore::new(),
            ledger: ExpLedger::default(),
            clock: Clock::new(),
            username: String::new(),
            predefined_tasks: Vec::new(),
            new_task: NewTaskForm::default(),
            suggestion: SuggestionForm::default(),
            suggestion_modal_open: false,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn exp_bar(&self) -> ExpBar {
        self.store.exp_bar()
    }

    pub fn total_exp(&self) -> u64 {
        self.ledger.total_exp()
    }

    /// Calls `listener` with the exp bar now and after every change to it.
    pub fn subscribe(&mut self, listener: impl FnMut(&ExpBar) + 'static) {
        self.store.subscribe(listener);
    }

    pub fn view(&self) -> DashboardView {
        DashboardView {
            clock: self.clock.display().to_string(),
            username: self.username.clone(),
            exp_bar: self.store.exp_bar(),
            total_exp: self.ledger.total_exp(),
            tasks: self.store.iter().map(TaskRow::from).collect(),
            predefined_tasks: self.predefined_tasks.clone(),
            new_task: self.new_task.clone(),
            suggestion_modal_open: self.suggestion_modal_open,
            suggestion: self.suggestion.clone(),
        }
    }

    /// Replaces all dashboard state with a fresh snapshot from the service.
    pub async fn resync(&mut self) -> Result<(), CommandError> {
        let result = self.api.dashboard().await;
        match result {
            Ok(snapshot) => {
                self.apply_snapshot(snapshot);
                Ok(())
            }
            Err(err) => Err(self.report(err)),
        }
    }

    pub fn apply_snapshot(&mut self, snapshot: DashboardSnapshot) {
        info!(tasks = snapshot.tasks.len(), "dashboard synced");
        self.username = snapshot.user.username;
        self.ledger.reset(snapshot.user.total_exp);
        self.predefined_tasks = snapshot.predefined_tasks;
        self.store.replace_all(snapshot.tasks);
    }

    /// Clock refresh. A new day triggers a resync; returns whether one ran.
    pub async fn tick(&mut self, now: NaiveDateTime) -> Result<bool, CommandError> {
        if !self.clock.tick(now) {
            return Ok(false);
        }
        info!(date = %now.date(), "day rolled over");
        if let Err(err) = self.resync().await {
            self.clock.rearm();
            return Err(err);
        }
        Ok(true)
    }

    pub async fn complete_task(&mut self, task_id: TaskId) -> Result<u32, CommandError> {
        self.begin_complete(task_id)?;
        let result = self.api.complete_task(task_id).await;
        self.finish_complete(task_id, result)
    }

    pub fn begin_complete(&mut self, task_id: TaskId) -> Result<(), CommandError> {
        let entry = self.startable(task_id)?;
        if entry.task.is_completed {
            return Err(CommandError::AlreadyCompleted(task_id));
        }
        self.store.set_in_flight(task_id, true);
        Ok(())
    }

    pub fn finish_complete(
        &mut self,
        task_id: TaskId,
        result: Result<u32, ApiError>,
    ) -> Result<u32, CommandError> {
        self.store.set_in_flight(task_id, false);
        match result {
            Ok(exp_gained) => {
                // A resync during the request may already carry the completion.
                if self.store.mark_completed(task_id) {
                    self.ledger.credit(exp_gained);
                } else {
                    warn!(task_id, "completion already reflected on the dashboard");
                }
                Ok(exp_gained)
            }
            Err(err) => Err(self.report(err)),
        }
    }

    /// Asks `confirm` first; a declined removal sends nothing.
    pub async fn remove_task<C: Confirm>(
        &mut self,
        task_id: TaskId,
        confirm: &mut C,
    ) -> Result<(), CommandError> {
        self.startable(task_id)?;
        if !confirm.confirm(REMOVE_PROMPT).await {
            debug!(task_id, "removal declined");
            return Err(CommandError::Declined);
        }
        self.begin_remove(task_id)?;
        let result = self.api.delete_task(task_id).await;
        self.finish_remove(task_id, result)
    }

    pub fn begin_remove(&mut self, task_id: TaskId) -> Result<(), CommandError> {
        self.startable(task_id)?;
        self.store.set_in_flight(task_id, true);
        Ok(())
    }

    pub fn finish_remove(
        &mut self,
        task_id: TaskId,
        result: Result<(), ApiError>,
    ) -> Result<(), CommandError> {
        self.store.set_in_flight(task_id, false);
        match result {
            Ok(()) => {
                self.store.remove(task_id);
                Ok(())
            }
            Err(err) => Err(self.report(err)),
        }
    }

    pub async fn toggle_daily(
        &mut self,
        task_id: TaskId,
        is_daily: bool,
    ) -> Result<(), CommandError> {
        self.begin_toggle_daily(task_id, is_daily)?;
        let result = self.api.toggle_daily(task_id, is_daily).await;
        self.finish_toggle_daily(task_id, result)
    }

    /// The checkbox shows `is_daily` from here until the request resolves.
    pub fn begin_toggle_daily(
        &mut self,
        task_id: TaskId,
        is_daily: bool,
    ) -> Result<(), CommandError> {
        self.startable(task_id)?;
        self.store.set_pending_daily(task_id, is_daily);
        self.store.set_in_flight(task_id, true);
        Ok(())
    }

    pub fn finish_toggle_daily(
        &mut self,
        task_id: TaskId,
        result: Result<(), ApiError>,
    ) -> Result<(), CommandError> {
        self.store.set_in_flight(task_id, false);
        match result {
            Ok(()) => {
                self.store.commit_daily(task_id);
                Ok(())
            }
            Err(err) => {
                self.store.discard_daily(task_id);
                Err(self.report(err))
            }
        }
    }

    pub fn new_task_form_mut(&mut self) -> &mut NewTaskForm {
        &mut self.new_task
    }

    /// Picking a predefined task copies its default exp into the form. The
    /// empty option leaves the exp field alone.
    pub fn select_predefined(&mut self, predefined_task_id: Option<PredefinedTaskId>) {
        self.new_task.predefined_task_id = predefined_task_id;
        let Some(id) = predefined_task_id else {
            return;
        };
        match self
            .predefined_tasks
            .iter()
            .find(|task| task.predefined_task_id == id)
        {
            Some(task) => self.new_task.exp_value = Some(task.default_exp_value),
            None => warn!(predefined_task_id = id, "unknown predefined task"),
        }
    }

    /// Submits the new-task form. On success the form is cleared and the
    /// dashboard resynced; on failure the form keeps its contents.
    pub async fn create_task(&mut self) -> Result<Option<TaskId>, CommandError> {
        let result = self.api.create_task(&self.new_task).await;
        let task_id = match result {
            Ok(task_id) => task_id,
            Err(err) => return Err(self.report(err)),
        };
        info!(?task_id, "task created");
        self.new_task = NewTaskForm::default();
        self.resync().await?;
        Ok(task_id)
    }

    pub fn suggestion_modal_open(&self) -> bool {
        self.suggestion_modal_open
    }

    pub fn open_suggestion_modal(&mut self) {
        self.suggestion_modal_open = true;
    }

    pub fn close_suggestion_modal(&mut self) {
        self.suggestion_modal_open = false;
    }

    pub fn click(&mut self, target: ClickTarget) {
        if target == ClickTarget::ModalBackdrop {
            self.suggestion_modal_open = false;
        }
    }

    pub fn suggestion_form_mut(&mut self) -> &mut SuggestionForm {
        &mut self.suggestion
    }

    /// Suggestions are not sent anywhere; the user just gets the
    /// acknowledgment and an empty form.
    pub fn submit_suggestion(&mut self) {
        self.suggestion_modal_open = false;
        self.notifier.alert(SUGGESTION_ACK);
        self.suggestion = SuggestionForm::default();
    }

    fn startable(&self, task_id: TaskId) -> Result<&TaskEntry, CommandError> {
        let entry = self
            .store
            .get(task_id)
            .ok_or(CommandError::UnknownTask(task_id))?;
        if entry.in_flight {
            debug!(task_id, "ignoring command while a request is in flight");
            return Err(CommandError::InFlight(task_id));
        }
        Ok(entry)
    }

    fn report(&mut self, err: ApiError) -> CommandError {
        match &err {
            ApiError::Rejected(message) => self.notifier.alert(&format!("Error: {message}")),
            _ => {
                error!("task api call failed: {err}");
                self.notifier.alert(GENERIC_FAILURE);
            }
        }
        CommandError::Api(err)
    }
}
