use crate::domain::{Activity, ActivityDraft, new_activity_id};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivityState {
    pub activities: Vec<Activity>,
    pub active_id: Option<String>,
}

impl ActivityState {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self {
            activities,
            active_id: None,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.activities.iter().any(|activity| activity.id == id)
    }

    pub fn active_activity(&self) -> Option<&Activity> {
        let id = self.active_id.as_deref()?;
        self.activities.iter().find(|activity| activity.id == id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ActivityAction {
    SaveActivity(ActivityDraft),
    SetActiveId(String),
    ClearActiveId,
    DeleteActivity(String),
    RestartApp,
}

impl ActivityAction {
    pub fn name(&self) -> &'static str {
        match self {
            ActivityAction::SaveActivity(_) => "save-activity",
            ActivityAction::SetActiveId(_) => "set-activeId",
            ActivityAction::ClearActiveId => "clear-activeId",
            ActivityAction::DeleteActivity(_) => "delete-activity",
            ActivityAction::RestartApp => "restart-app",
        }
    }
}

/// Applies one action. Only `SaveActivity` reaches outside the state, to mint a new id.
pub fn activity_reducer(mut state: ActivityState, action: ActivityAction) -> ActivityState {
    match action {
        ActivityAction::SaveActivity(draft) => {
            let editing = state.active_id.take().and_then(|id| {
                state
                    .activities
                    .iter()
                    .position(|activity| activity.id == id)
                    .map(|index| (index, id))
            });

            match editing {
                Some((index, id)) => {
                    state.activities[index] = Activity::from_draft(id, draft);
                }
                None => {
                    let id = unique_id(&state);
                    state.activities.push(Activity::from_draft(id, draft));
                }
            }
        }
        ActivityAction::SetActiveId(id) => {
            if state.contains(&id) {
                state.active_id = Some(id);
            }
        }
        ActivityAction::ClearActiveId => {
            state.active_id = None;
        }
        ActivityAction::DeleteActivity(id) => {
            state.activities.retain(|activity| activity.id != id);
            if state.active_id.as_deref() == Some(id.as_str()) {
                state.active_id = None;
            }
        }
        ActivityAction::RestartApp => {
            state.activities.clear();
            state.active_id = None;
        }
    }

    state
}

fn unique_id(state: &ActivityState) -> String {
    loop {
        let id = new_activity_id();
        if !state.contains(&id) {
            return id;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::domain::Category;

    fn eggs() -> ActivityDraft {
        ActivityDraft::new(Category::Consumed, "Eggs", 150.0)
    }

    fn run() -> ActivityDraft {
        ActivityDraft::new(Category::Burned, "Run", 400.0)
    }

    fn with(drafts: Vec<ActivityDraft>) -> ActivityState {
        drafts
            .into_iter()
            .fold(ActivityState::default(), |state, draft| {
                activity_reducer(state, ActivityAction::SaveActivity(draft))
            })
    }

    #[test]
    fn test_save_appends_in_order() {
        let state = with(vec![eggs(), run()]);
        assert_eq!(state.activities.len(), 2);
        assert_eq!(state.activities[0].name, "Eggs");
        assert_eq!(state.activities[1].name, "Run");
        assert_ne!(state.activities[0].id, state.activities[1].id);
        assert_eq!(state.active_id, None);
    }

    #[test]
    fn test_edit_replaces_in_place_and_clears_active_id() {
        let state = with(vec![eggs(), run(), eggs()]);
        let target = state.activities[1].id.clone();

        let state = activity_reducer(state, ActivityAction::SetActiveId(target.clone()));
        assert_eq!(state.active_id.as_deref(), Some(target.as_str()));

        let state = activity_reducer(
            state,
            ActivityAction::SaveActivity(ActivityDraft::new(Category::Burned, "Run", 520.0)),
        );

        assert_eq!(state.activities.len(), 3);
        assert_eq!(state.activities[1].id, target);
        assert_eq!(state.activities[1].calories, 520.0);
        assert_eq!(state.active_id, None);
    }

    #[test]
    fn test_set_active_id_ignores_unknown_id() {
        let state = with(vec![eggs()]);
        let next = activity_reducer(state.clone(), ActivityAction::SetActiveId("nope".into()));
        assert_eq!(next, state);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let state = with(vec![eggs(), run()]);
        let id = state.activities[0].id.clone();

        let once = activity_reducer(state, ActivityAction::DeleteActivity(id.clone()));
        let twice = activity_reducer(once.clone(), ActivityAction::DeleteActivity(id));

        assert_eq!(once.activities.len(), 1);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_delete_active_clears_active_id() {
        let state = with(vec![eggs(), run()]);
        let id = state.activities[1].id.clone();
        let state = activity_reducer(state, ActivityAction::SetActiveId(id.clone()));
        let state = activity_reducer(state, ActivityAction::DeleteActivity(id));
        assert_eq!(state.active_id, None);
        assert_eq!(state.activities.len(), 1);
    }

    #[test]
    fn test_delete_other_keeps_active_id() {
        let state = with(vec![eggs(), run()]);
        let keep = state.activities[0].id.clone();
        let drop = state.activities[1].id.clone();
        let state = activity_reducer(state, ActivityAction::SetActiveId(keep.clone()));
        let state = activity_reducer(state, ActivityAction::DeleteActivity(drop));
        assert_eq!(state.active_id, Some(keep));
    }

    #[test]
    fn test_restart_clears_everything() {
        let state = with(vec![eggs(), run(), eggs()]);
        let id = state.activities[2].id.clone();
        let state = activity_reducer(state, ActivityAction::SetActiveId(id));
        let state = activity_reducer(state, ActivityAction::RestartApp);
        assert!(state.activities.is_empty());
        assert_eq!(state.active_id, None);
    }

    #[test]
    fn test_clear_active_id_leaves_list() {
        let state = with(vec![eggs()]);
        let id = state.activities[0].id.clone();
        let selected = activity_reducer(state.clone(), ActivityAction::SetActiveId(id));
        let cleared = activity_reducer(selected, ActivityAction::ClearActiveId);
        assert_eq!(cleared, state);
    }

    pub(crate) fn draft_strategy() -> impl Strategy<Value = ActivityDraft> {
        (any::<bool>(), "[a-z]{1,8}", 1u32..5000).prop_map(|(burned, name, calories)| {
            let category = if burned {
                Category::Burned
            } else {
                Category::Consumed
            };
            ActivityDraft::new(category, name, f64::from(calories))
        })
    }

    proptest! {
        #[test]
        fn prop_saved_ids_are_unique(drafts in prop::collection::vec(draft_strategy(), 0..40)) {
            let count = drafts.len();
            let state = with(drafts);
            let ids: HashSet<_> = state.activities.iter().map(|a| a.id.as_str()).collect();
            prop_assert_eq!(ids.len(), count);
        }

        #[test]
        fn prop_edit_keeps_length_and_neighbours(
            drafts in prop::collection::vec(draft_strategy(), 1..20),
            pick in any::<prop::sample::Index>(),
            replacement in draft_strategy(),
        ) {
            let state = with(drafts);
            let index = pick.index(state.activities.len());
            let id = state.activities[index].id.clone();
            let before = state.activities.clone();

            let state = activity_reducer(state, ActivityAction::SetActiveId(id.clone()));
            let state = activity_reducer(state, ActivityAction::SaveActivity(replacement.clone()));

            prop_assert_eq!(state.activities.len(), before.len());
            prop_assert_eq!(&state.activities[index], &Activity::from_draft(id, replacement));
            for (i, activity) in state.activities.iter().enumerate() {
                if i != index {
                    prop_assert_eq!(activity, &before[i]);
                }
            }
        }
    }
}
