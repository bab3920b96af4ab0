use crate::error::AppError;
use crate::model::Item;
use crate::reducer::{self, Filter, Intent};
use crate::storage::json_store;
use std::path::PathBuf;

/// Single-writer handle over the collection. Opening a session performs the
/// one `Hydrate` of its lifetime; afterwards every dispatched intent is
/// applied by the reducer and the resulting snapshot persisted before it is
/// handed back.
pub struct Session {
    path: PathBuf,
    items: Vec<Item>,
}

impl Session {
    pub fn open() -> Result<Self, AppError> {
        Ok(Self::open_at(json_store::store_path()?))
    }

    pub fn open_at(path: PathBuf) -> Self {
        let records = json_store::load_items(&path);
        let items = reducer::apply(&[], Intent::Hydrate(records));
        Self { path, items }
    }

    pub fn dispatch(&mut self, intent: Intent) -> &[Item] {
        self.items = reducer::apply(&self.items, intent);
        json_store::save_items(&self.path, &self.items);
        &self.items
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn filtered(&self, filter: Filter) -> Vec<Item> {
        reducer::filtered(&self.items, filter)
    }

    pub fn remaining(&self) -> usize {
        reducer::remaining(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::model::Item;
    use crate::reducer::{Filter, Intent};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("checklist-{nanos}-{file_name}"))
    }

    #[test]
    fn open_at_missing_store_starts_empty() {
        let session = Session::open_at(temp_path("fresh.json"));
        assert!(session.items().is_empty());
        assert_eq!(session.remaining(), 0);
    }

    #[test]
    fn open_at_hydrates_persisted_records() {
        let path = temp_path("hydrate.json");
        let content = serde_json::json!([
            {
                "id": "item-1",
                "text": "buy milk",
                "completed": true,
                "createdAt": 1766188800000_i64
            }
        ]);
        fs::write(&path, serde_json::to_string(&content).unwrap()).unwrap();

        let session = Session::open_at(path.clone());
        fs::remove_file(&path).ok();

        assert_eq!(session.items().len(), 1);
        assert_eq!(session.items()[0].id, "item-1");
        assert!(session.items()[0].completed);
    }

    #[test]
    fn every_dispatch_persists_the_new_snapshot() {
        let path = temp_path("dispatch.json");
        let mut session = Session::open_at(path.clone());

        session.dispatch(Intent::Add("buy milk".to_string()));
        let stored: Vec<Item> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored, session.items());

        let id = session.items()[0].id.clone();
        session.dispatch(Intent::Toggle(id));
        let stored: Vec<Item> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored, session.items());
        assert!(stored[0].completed);

        session.dispatch(Intent::ClearCompleted);
        let stored: Vec<Item> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        fs::remove_file(&path).ok();
        assert!(stored.is_empty());
        assert!(session.items().is_empty());
    }

    #[test]
    fn failed_persistence_keeps_the_snapshot_authoritative() {
        let blocker = temp_path("session-blocker");
        fs::write(&blocker, "flat file").unwrap();

        let mut session = Session::open_at(blocker.join("items.json"));
        session.dispatch(Intent::Add("buy milk".to_string()));
        fs::remove_file(&blocker).ok();

        assert_eq!(session.items().len(), 1);
        assert_eq!(session.remaining(), 1);
    }

    #[test]
    fn filtered_and_remaining_reflect_the_current_snapshot() {
        let path = temp_path("views.json");
        let mut session = Session::open_at(path.clone());
        session.dispatch(Intent::Add("buy milk".to_string()));
        session.dispatch(Intent::Add("walk dog".to_string()));
        let milk_id = session.items()[1].id.clone();
        session.dispatch(Intent::Toggle(milk_id));
        fs::remove_file(&path).ok();

        assert_eq!(session.filtered(Filter::All).len(), 2);
        assert_eq!(session.filtered(Filter::Active).len(), 1);
        assert_eq!(session.filtered(Filter::Active)[0].text, "walk dog");
        assert_eq!(session.filtered(Filter::Completed)[0].text, "buy milk");
        assert_eq!(session.remaining(), 1);
    }
}
