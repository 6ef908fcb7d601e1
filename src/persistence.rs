use std::collections::HashSet;

use tracing::{info, warn};

use crate::{
    constants::STORAGE_KEY,
    domain::Activity,
    storage::{KeyValueStore, StorageError},
    store::ActivityStore,
};

/// Reads the saved activity list. Anything unreadable or malformed counts as no data.
pub fn restore_activities(kv: &dyn KeyValueStore) -> Vec<Activity> {
    let raw = match kv.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "could not read saved activities, starting empty");
            return Vec::new();
        }
    };

    let parsed: Vec<Activity> = match serde_json::from_str(&raw) {
        Ok(activities) => activities,
        Err(e) => {
            warn!(error = %e, "saved activities are malformed, starting empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let total = parsed.len();
    let activities: Vec<Activity> = parsed
        .into_iter()
        .filter(|activity| seen.insert(activity.id.clone()))
        .collect();
    if activities.len() != total {
        warn!(
            dropped = total - activities.len(),
            "dropped saved activities with duplicate ids"
        );
    }

    info!(count = activities.len(), "restored activities");
    activities
}

pub fn persist_activities(
    kv: &mut dyn KeyValueStore,
    activities: &[Activity],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(activities)?;
    kv.set(STORAGE_KEY, &json)
}

/// Writes the full list back to `kv` after every change the store reports.
pub fn attach<K>(store: &mut ActivityStore, mut kv: K)
where
    K: KeyValueStore + 'static,
{
    store.subscribe(move |activities| {
        if let Err(e) = persist_activities(&mut kv, activities) {
            warn!(error = %e, "failed to save activities");
        }
    });
}

/// Restores the saved list into a new store already wired to write changes back.
pub fn open_store<K>(kv: K) -> ActivityStore
where
    K: KeyValueStore + 'static,
{
    let mut store = ActivityStore::new(restore_activities(&kv));
    attach(&mut store, kv);
    store
}
