use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("checklist-{nanos}-{file_name}"))
}

fn write_store(path: &PathBuf, items: serde_json::Value) {
    std::fs::write(path, serde_json::to_string_pretty(&items).unwrap()).unwrap();
}

fn read_store(path: &PathBuf) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn clear_command_drops_completed_items_and_keeps_order() {
    let exe = env!("CARGO_BIN_EXE_checklist");
    let store_path = temp_path("cli-clear.json");

    write_store(
        &store_path,
        serde_json::json!([
            {
                "id": "item-3",
                "text": "File expenses",
                "completed": false,
                "createdAt": 1766188920000_i64
            },
            {
                "id": "item-2",
                "text": "Walk dog",
                "completed": true,
                "createdAt": 1766188860000_i64
            },
            {
                "id": "item-1",
                "text": "Buy milk",
                "completed": false,
                "createdAt": 1766188800000_i64
            }
        ]),
    );

    let output = Command::new(exe)
        .args(["clear"])
        .env("CHECKLIST_STORE_PATH", &store_path)
        .output()
        .expect("failed to run clear command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cleared 1 completed item(s)"));

    let stored = read_store(&store_path);
    std::fs::remove_file(&store_path).ok();

    let records = stored.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], "item-3");
    assert_eq!(records[1]["id"], "item-1");
}

#[test]
fn clear_command_without_completed_items_is_a_no_op() {
    let exe = env!("CARGO_BIN_EXE_checklist");
    let store_path = temp_path("cli-clear-none.json");

    let before = serde_json::json!([
        {
            "id": "item-1",
            "text": "Buy milk",
            "completed": false,
            "createdAt": 1766188800000_i64
        }
    ]);
    write_store(&store_path, before.clone());

    let output = Command::new(exe)
        .args(["clear"])
        .env("CHECKLIST_STORE_PATH", &store_path)
        .output()
        .expect("failed to run clear command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cleared 0 completed item(s)"));

    let stored = read_store(&store_path);
    std::fs::remove_file(&store_path).ok();

    assert_eq!(stored, before);
}
