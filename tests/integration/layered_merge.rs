use std::fs;
use std::sync::Arc;

use envscope::config::sources::scoped_environment;
use envscope::config::{MergeOptions, MergeService, SettingsLoader};
use envscope::store::SnapshotFileStore;
use envscope::{EnvironmentTarget, MemoryStore};
use tempfile::TempDir;

fn user_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.set(
        EnvironmentTarget::User,
        "NestedTest__NestedProperty2",
        Some("2024-01-01T00:00:00Z".to_string()),
    );
    store.set(
        EnvironmentTarget::User,
        "POSTGRESQLCONNSTR_reporting",
        Some("Host=db;Database=reports".to_string()),
    );
    store
}

fn isolated_options(target: EnvironmentTarget) -> MergeOptions {
    MergeOptions {
        process_environment: false,
        target,
        ..MergeOptions::default()
    }
}

#[test]
fn persisted_variables_bind_onto_settings() {
    let settings =
        MergeService::load(user_store(), &isolated_options(EnvironmentTarget::User)).unwrap();

    assert_eq!(
        settings.nested_test.nested_property2.as_deref(),
        Some("2024-01-01T00:00:00Z")
    );
    assert_eq!(
        settings.connection_string("reporting"),
        Some("Host=db;Database=reports")
    );
    assert_eq!(settings.provider_name("reporting"), Some("Npgsql"));
    assert_eq!(settings.property1, None);
}

#[test]
fn persisted_variables_override_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("appsettings.toml");
    fs::write(
        &file,
        r#"
property1 = "from-file"

[nestedtest]
nestedproperty1 = "file-1"
nestedproperty2 = "file-2"
"#,
    )
    .unwrap();

    let options = MergeOptions {
        file: Some(file),
        ..isolated_options(EnvironmentTarget::User)
    };
    let settings = MergeService::load(user_store(), &options).unwrap();

    assert_eq!(settings.property1.as_deref(), Some("from-file"));
    assert_eq!(settings.nested_test.nested_property1.as_deref(), Some("file-1"));
    assert_eq!(
        settings.nested_test.nested_property2.as_deref(),
        Some("2024-01-01T00:00:00Z")
    );
}

#[test]
fn prefix_filter_applies_before_merge() {
    let store = Arc::new(MemoryStore::new());
    store.set(
        EnvironmentTarget::Machine,
        "APP_NestedTest__NestedProperty1",
        Some("v".to_string()),
    );
    store.set(EnvironmentTarget::Machine, "OTHER_X", Some("v2".to_string()));

    let options = MergeOptions {
        prefix: Some("APP_".to_string()),
        ..isolated_options(EnvironmentTarget::Machine)
    };
    let config = MergeService::builder(store, &options).unwrap().build().unwrap();

    assert_eq!(config.get_string("nestedtest.nestedproperty1").unwrap(), "v");
    assert!(config.get_string("other_x").is_err());
}

#[test]
fn snapshot_store_feeds_settings_loader() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot = temp_dir.path().join("variables.toml");
    fs::write(
        &snapshot,
        r#"
[machine]
Property1 = "machine-wide"
SQLAZURECONNSTR_primary = "Server=tcp:x.database.windows.net"
"#,
    )
    .unwrap();

    let store = Arc::new(SnapshotFileStore::new(&snapshot));
    let settings = SettingsLoader::load(store, EnvironmentTarget::Machine).unwrap();

    assert_eq!(settings.property1.as_deref(), Some("machine-wide"));
    assert_eq!(
        settings.provider_name("primary"),
        Some("System.Data.SqlClient")
    );
}

#[test]
fn unreadable_store_fails_the_merge() {
    let store = user_store();
    store.set_unavailable(EnvironmentTarget::User, true);

    let result = MergeService::load(store, &isolated_options(EnvironmentTarget::User));
    assert!(result.is_err());
}

#[test]
fn process_target_is_rejected_when_registering() {
    let result = scoped_environment::add_to_builder(
        config::Config::builder(),
        user_store(),
        EnvironmentTarget::Process,
    );
    assert!(result.is_err());
}

#[test]
fn dotted_connection_string_names_bind() {
    let store = user_store();
    store.set(
        EnvironmentTarget::User,
        "SQLCONNSTR_orders.primary",
        Some("Server=orders".to_string()),
    );

    let settings = MergeService::load(store, &isolated_options(EnvironmentTarget::User)).unwrap();

    assert_eq!(settings.connection_string("orders.primary"), Some("Server=orders"));
    assert_eq!(
        settings.provider_name("orders.primary"),
        Some("System.Data.SqlClient")
    );
    assert_eq!(
        settings.connection_string("reporting"),
        Some("Host=db;Database=reports")
    );
}

#[test]
fn settings_file_loads_through_facade() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("appsettings.toml");
    fs::write(
        &file,
        r#"
property1 = "from-file"

[nestedtest]
nestedproperty2 = "file-2"
"#,
    )
    .unwrap();

    let settings =
        SettingsLoader::load_from_file(user_store(), &file, EnvironmentTarget::User).unwrap();

    assert_eq!(settings.property1.as_deref(), Some("from-file"));
    // Persisted variables outrank the file
    assert_eq!(
        settings.nested_test.nested_property2.as_deref(),
        Some("2024-01-01T00:00:00Z")
    );
    assert_eq!(settings.provider_name("reporting"), Some("Npgsql"));
}
