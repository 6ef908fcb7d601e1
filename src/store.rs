use tracing::debug;

use crate::{
    domain::{Activity, ActivityDraft},
    reducer::{ActivityAction, ActivityState, activity_reducer},
    summary::CalorieSummary,
};

type Listener = Box<dyn FnMut(&[Activity])>;

/// Owns the activity state and the cached summary. Listeners hear about every
/// dispatch that changed the list.
pub struct ActivityStore {
    state: ActivityState,
    summary: CalorieSummary,
    listeners: Vec<Listener>,
}

impl ActivityStore {
    pub fn new(activities: Vec<Activity>) -> Self {
        let summary = CalorieSummary::from_activities(&activities);
        Self {
            state: ActivityState::new(activities),
            summary,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&[Activity]) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn dispatch(&mut self, action: ActivityAction) {
        let name = action.name();
        let previous = self.state.activities.clone();
        self.state = activity_reducer(std::mem::take(&mut self.state), action);

        let changed = self.state.activities != previous;
        debug!(
            action = name,
            changed,
            activities = self.state.activities.len(),
            active_id = self.state.active_id.as_deref().unwrap_or(""),
            "dispatched"
        );

        if changed {
            self.summary = CalorieSummary::from_activities(&self.state.activities);
            for listener in &mut self.listeners {
                listener(&self.state.activities);
            }
        }
    }

    pub fn activities(&self) -> &[Activity] {
        &self.state.activities
    }

    pub fn active_id(&self) -> Option<&str> {
        self.state.active_id.as_deref()
    }

    pub fn active_activity(&self) -> Option<&Activity> {
        self.state.active_activity()
    }

    pub fn summary(&self) -> CalorieSummary {
        self.summary
    }

    pub fn is_empty_activities(&self) -> bool {
        self.summary.is_empty_activities
    }

    pub fn can_restart(&self) -> bool {
        !self.is_empty_activities()
    }

    pub fn save_activity(&mut self, draft: ActivityDraft) {
        self.dispatch(ActivityAction::SaveActivity(draft));
    }

    pub fn handle_edit(&mut self, id: &str) {
        self.dispatch(ActivityAction::SetActiveId(id.to_string()));
    }

    pub fn cancel_edit(&mut self) {
        self.dispatch(ActivityAction::ClearActiveId);
    }

    pub fn handle_delete(&mut self, id: &str) {
        self.dispatch(ActivityAction::DeleteActivity(id.to_string()));
    }

    pub fn restart_app(&mut self) {
        self.dispatch(ActivityAction::RestartApp);
    }
}
