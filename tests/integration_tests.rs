//! Integration tests for the storeman CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd,
//! each against its own temporary database file. Where an assertion needs
//! to look at persisted state directly, the library's Store is opened on
//! the same file.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use storeman::core::{Catalog, Store};

/// Helper to get a storeman command bound to a database file
fn storeman(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("storeman").unwrap();
    cmd.arg("--database").arg(db);
    cmd
}

fn temp_db(tmp: &TempDir) -> PathBuf {
    tmp.path().join("storeman.db")
}

/// Helper to create a place, returning its id
fn create_place(db: &Path, name: &str) -> String {
    let output = storeman(db)
        .args(["place", "new", "--quiet", "--name", name])
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Helper to create an item, returning its id
fn create_item(db: &Path, name: &str, place: Option<&str>) -> String {
    let mut args = vec!["item", "new", "--quiet", "--name", name];
    if let Some(place) = place {
        args.extend(["--place", place]);
    }
    let output = storeman(db).args(args).output().unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    Command::cargo_bin("storeman")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("storage places"));
}

#[test]
fn test_version_displays() {
    Command::cargo_bin("storeman")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("storeman"));
}

#[test]
fn test_unknown_command_fails() {
    Command::cargo_bin("storeman")
        .unwrap()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions_generate() {
    Command::cargo_bin("storeman")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("storeman"));
}

// ============================================================================
// Place Tests
// ============================================================================

#[test]
fn test_place_new_generates_hex_id() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    let id = create_place(&db, "Toolbox");
    assert_eq!(id.len(), 64);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

    let other = create_place(&db, "Shelf");
    assert_ne!(id, other);
}

#[test]
fn test_place_round_trip() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    storeman(&db)
        .args([
            "place", "new", "--name", "Toolbox", "--location", "Workbench", "--type", "Box",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created place"));

    // A fresh process loads the row back from storage.
    storeman(&db)
        .args(["place", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Toolbox"))
        .stdout(predicate::str::contains("Workbench"))
        .stdout(predicate::str::contains("Box"));
}

#[test]
fn test_place_new_defaults_are_placeholders() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    let id = create_place_with_no_fields(&db);
    storeman(&db)
        .args(["place", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name"))
        .stdout(predicate::str::contains("Location"))
        .stdout(predicate::str::contains("Type"));
}

fn create_place_with_no_fields(db: &Path) -> String {
    let output = storeman(db)
        .args(["place", "new", "--quiet"])
        .output()
        .unwrap();
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_place_edit_by_id_prefix() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    let id = create_place(&db, "Box");
    storeman(&db)
        .args(["place", "edit", &id[..12], "--name", "Big Box"])
        .assert()
        .success();

    storeman(&db)
        .args(["place", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Big Box"));
}

#[test]
fn test_place_rm_unknown_id_silently_ignored() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);
    create_place(&db, "Keeper");

    storeman(&db)
        .args(["place", "rm", "feedfacefeedface", "--yes"])
        .assert()
        .success();

    storeman(&db)
        .args(["place", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1"));
}

// ============================================================================
// Item Tests
// ============================================================================

#[test]
fn test_item_without_place_is_unassigned() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    let id = create_item(&db, "Loose screw", None);

    storeman(&db)
        .args(["item", "show", &id, "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"place_id\": null"));

    // The wire format keeps the legacy sentinel, so the item loads back as
    // unassigned through the library as well.
    let store = Store::open(&db).unwrap();
    let items = store.load_items().unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0].place_id.is_none());
}

#[test]
fn test_deleting_place_orphans_items() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    let place_id = create_place(&db, "Shelf");
    let item_id = create_item(&db, "Drill", Some(&place_id));

    storeman(&db)
        .args(["place", "rm", &place_id, "--yes"])
        .assert()
        .success();

    // The stored place_id is unchanged; the next full reload shows UNKNOWN.
    let store = Store::open(&db).unwrap();
    let items = store.load_items().unwrap();
    assert_eq!(items[0].place_id.as_ref().unwrap().as_str(), place_id);

    let catalog = Catalog::load(&store).unwrap();
    assert_eq!(catalog.items()[0].place_name, "UNKNOWN");
    drop(store);

    storeman(&db)
        .args(["item", "show", &item_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("UNKNOWN"));
}

#[test]
fn test_item_list_place_filter() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    let shelf = create_place(&db, "Shelf");
    let crate_id = create_place(&db, "Crate");
    create_item(&db, "Drill", Some(&shelf));
    create_item(&db, "Saw", Some(&shelf));
    create_item(&db, "Rope", Some(&crate_id));
    create_item(&db, "Loose screw", None);

    storeman(&db)
        .args(["item", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4"));

    storeman(&db)
        .args(["item", "list", "--place", &shelf, "--count"])
        .assert()
        .success()
        .stdout("2\n");

    storeman(&db)
        .args(["item", "list", "--place", &shelf])
        .assert()
        .success()
        .stdout(predicate::str::contains("Drill"))
        .stdout(predicate::str::contains("Saw"))
        .stdout(predicate::str::contains("Rope").not());
}

#[test]
fn test_search_substring_case_insensitive() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    create_item(&db, "Toolbox", None);
    create_item(&db, "Shelf bracket", None);

    storeman(&db)
        .args(["search", "box"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Toolbox"))
        .stdout(predicate::str::contains("Shelf bracket").not());

    storeman(&db)
        .args(["search", "BOX", "--count"])
        .assert()
        .success()
        .stdout("1\n");

    // Empty query matches everything.
    storeman(&db)
        .args(["search", "--count"])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn test_non_integer_amount_edit_is_dropped() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    let id = create_item(&db, "Hammer", None);
    storeman(&db)
        .args(["item", "edit", &id, "--amount", "4"])
        .assert()
        .success();

    storeman(&db)
        .args(["item", "edit", &id, "--amount", "lots"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ignoring non-integer amount"));

    let store = Store::open(&db).unwrap();
    assert_eq!(store.load_items().unwrap()[0].amount, 4);
}

#[test]
fn test_item_move_and_unassign() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    let shelf = create_place(&db, "Shelf");
    let id = create_item(&db, "Drill", None);

    storeman(&db)
        .args(["item", "edit", &id, "--place", &shelf])
        .assert()
        .success();
    storeman(&db)
        .args(["item", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shelf"));

    storeman(&db)
        .args(["item", "edit", &id, "--place", "none"])
        .assert()
        .success();
    let store = Store::open(&db).unwrap();
    assert!(store.load_items().unwrap()[0].place_id.is_none());
}

#[test]
fn test_place_rename_updates_item_display() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    let shelf = create_place(&db, "Shelf");
    create_item(&db, "Drill", Some(&shelf));

    storeman(&db)
        .args(["place", "edit", &shelf, "--name", "Tool Wall"])
        .assert()
        .success();

    storeman(&db)
        .args(["item", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tool Wall"));
}

#[test]
fn test_item_show_resolve_fails_hard_for_orphan() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    let shelf = create_place(&db, "Shelf");
    let id = create_item(&db, "Drill", Some(&shelf));
    storeman(&db)
        .args(["place", "rm", &shelf, "--yes"])
        .assert()
        .success();

    storeman(&db)
        .args(["item", "show", &id, "--resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no place found"));
}

#[test]
fn test_item_rm_unknown_id_silently_ignored() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);
    create_item(&db, "Keeper", None);

    storeman(&db)
        .args(["item", "rm", "feedfacefeedface", "--yes"])
        .assert()
        .success();

    storeman(&db)
        .args(["item", "list", "--count"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_list_handles_long_multibyte_names() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    // Longer than the name column, so the table output must truncate it
    // without splitting a multibyte character.
    let name = "é".repeat(40);
    create_item(&db, &name, None);
    create_place(&db, &name);

    storeman(&db)
        .args(["item", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ééé"));

    storeman(&db)
        .args(["place", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ééé"));

    storeman(&db)
        .args(["search", "é"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ééé"));
}

// ============================================================================
// Output Format Tests
// ============================================================================

#[test]
fn test_place_list_csv() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);
    create_place(&db, "Toolbox");

    storeman(&db)
        .args(["place", "list", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id,name,location,type"))
        .stdout(predicate::str::contains("Toolbox"));
}

#[test]
fn test_item_list_id_format_pipable() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);
    let id = create_item(&db, "Drill", None);

    storeman(&db)
        .args(["item", "list", "--format", "id"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&id));
}

#[test]
fn test_database_env_var_respected() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);
    create_place(&db, "EnvBox");

    Command::cargo_bin("storeman")
        .unwrap()
        .env("STOREMAN_DB", &db)
        .args(["place", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EnvBox"));
}
