use crate::error::AppError;
use crate::model::Item;
use serde_json::Value;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "items.json";

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var("CHECKLIST_STORE_PATH")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("checklist")
            .join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("checklist")
            .join(STORE_FILE_NAME))
    }
}

/// Read the durable slot. An absent file, unreadable content, or a non-array
/// top level all degrade to an empty collection; malformed elements are
/// dropped one by one while the rest of the array survives.
pub fn load_items(path: &Path) -> Vec<Item> {
    if !path.exists() {
        return Vec::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!("unreadable store at {}: {err}", path.display());
            return Vec::new();
        }
    };

    let decoded: Value = match serde_json::from_str(&content) {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::warn!("corrupt store at {}: {err}", path.display());
            return Vec::new();
        }
    };

    let Value::Array(entries) = decoded else {
        tracing::warn!("store at {} does not hold an array", path.display());
        return Vec::new();
    };

    entries
        .into_iter()
        .filter_map(|entry| {
            let item = decode_item(&entry);
            if item.is_none() {
                tracing::debug!("dropping malformed record: {entry}");
            }
            item
        })
        .collect()
}

// Shape check for one stored record: id and text are strings, completed is a
// boolean, createdAt is a number. Anything else is not an item.
fn decode_item(entry: &Value) -> Option<Item> {
    let record = entry.as_object()?;
    Some(Item {
        id: record.get("id")?.as_str()?.to_string(),
        text: record.get("text")?.as_str()?.to_string(),
        completed: record.get("completed")?.as_bool()?,
        created_at: record.get("createdAt")?.as_f64()? as i64,
    })
}

/// Overwrite the durable slot with the full collection. Best effort: a failed
/// write is logged and swallowed, and the in-memory collection remains the
/// source of truth for the rest of the session.
pub fn save_items(path: &Path, items: &[Item]) {
    if let Err(err) = write_items(path, items) {
        tracing::warn!(
            "failed to persist {} item(s) to {}: {err}",
            items.len(),
            path.display()
        );
    }
}

fn write_items(path: &Path, items: &[Item]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let content =
        serde_json::to_string_pretty(items).map_err(|err| AppError::invalid_data(err.to_string()))?;
    std::fs::write(path, content).map_err(|err| AppError::io(err.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions).map_err(|err| AppError::io(err.to_string()))?;
    }

    Ok(())
}
