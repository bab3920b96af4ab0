use crate::model::Item;
use time::OffsetDateTime;

/// A discrete request to change the collection. `Hydrate` is dispatched once
/// per session, when persisted records are handed back to the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Hydrate(Vec<Item>),
    Add(String),
    Toggle(String),
    Remove(String),
    ClearCompleted,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

/// Compute the next collection from the previous one and a single intent.
///
/// Never fails: blank text on `Add` and unknown ids on `Toggle`/`Remove`
/// return the input collection unchanged. Existing records are treated as
/// immutable values; a toggle produces a new record, not an in-place edit.
pub fn apply(items: &[Item], intent: Intent) -> Vec<Item> {
    match intent {
        Intent::Hydrate(records) => records,
        Intent::Add(text) => add(items, &text),
        Intent::Toggle(id) => toggle(items, &id),
        Intent::Remove(id) => items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect(),
        Intent::ClearCompleted => items
            .iter()
            .filter(|item| !item.completed)
            .cloned()
            .collect(),
    }
}

fn add(items: &[Item], text: &str) -> Vec<Item> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return items.to_vec();
    }

    let item = Item {
        id: fresh_id(items),
        text: trimmed.to_string(),
        completed: false,
        created_at: now_millis(),
    };

    let mut next = Vec::with_capacity(items.len() + 1);
    next.push(item);
    next.extend(items.iter().cloned());
    next
}

fn toggle(items: &[Item], id: &str) -> Vec<Item> {
    items
        .iter()
        .map(|item| {
            if item.id == id {
                Item {
                    completed: !item.completed,
                    ..item.clone()
                }
            } else {
                item.clone()
            }
        })
        .collect()
}

// Nanosecond stamps collide only when two adds land in the same nanosecond;
// the probe loop keeps the uniqueness invariant regardless.
fn fresh_id(items: &[Item]) -> String {
    let mut stamp = OffsetDateTime::now_utc().unix_timestamp_nanos();
    loop {
        let id = format!("item-{stamp}");
        if !items.iter().any(|item| item.id == id) {
            return id;
        }
        stamp += 1;
    }
}

fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

pub fn filtered(items: &[Item], filter: Filter) -> Vec<Item> {
    items
        .iter()
        .filter(|item| match filter {
            Filter::All => true,
            Filter::Active => !item.completed,
            Filter::Completed => item.completed,
        })
        .cloned()
        .collect()
}

pub fn remaining(items: &[Item]) -> usize {
    items.iter().filter(|item| !item.completed).count()
}
