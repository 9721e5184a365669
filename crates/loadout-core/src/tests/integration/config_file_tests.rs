#![cfg(test)]

use std::sync::Arc;
use tempfile::tempdir;

use crate::kernel::error::Result;
use crate::plugin_system::SkipReason;
use crate::storage::config::{ConfigData, ConfigFormat};

use super::common::{config_manager, planner_manager, write_config};

#[test]
fn test_load_planners_from_json_file() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    write_config(
        temp_dir.path(),
        "loadout.json",
        r#"{
            "planners": ["fast", "precise"],
            "fast.type": "planners/grid",
            "precise": { "type": "planners/lattice" }
        }"#,
    );

    let manager = config_manager(temp_dir.path(), ConfigFormat::Json);
    let config = Arc::new(manager.load_config("loadout")?);
    let mut planners = planner_manager(config.clone());

    assert!(planners.load_plugins());
    assert_eq!(planners.loaded_names(), ["fast", "precise"]);
    assert_eq!(planners.plugin_type("precise")?, "planners/lattice");

    let precise = planners.get_plugin("precise").unwrap();
    assert_eq!(precise.kind(), "lattice");
    assert_eq!(precise.label().as_deref(), Some("precise"));

    assert_eq!(config.declared_keys(), ["planners", "fast.type", "precise.type"]);
    Ok(())
}

#[cfg(feature = "toml-config")]
#[test]
fn test_load_planners_from_toml_tables() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    write_config(
        temp_dir.path(),
        "loadout.toml",
        r#"
planners = ["fast", "broken-one", "typo", "precise"]

[fast]
type = "planners/grid"

[broken-one]
type = "planners/grid"

[typo]
type = "planners/gird"

[precise]
type = "planners/lattice"
"#,
    );

    let manager = config_manager(temp_dir.path(), ConfigFormat::Toml);
    let config = Arc::new(manager.load_config("loadout")?);
    let mut planners = planner_manager(config);

    let report = planners.load()?;
    assert_eq!(report.configured, 4);
    assert_eq!(report.loaded, ["fast", "precise"]);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[0].name, "broken-one");
    assert!(matches!(report.skipped[0].reason, SkipReason::InitFailure { .. }));
    assert_eq!(report.skipped[1].name, "typo");
    assert_eq!(
        report.skipped[1].reason,
        SkipReason::FactoryMiss { plugin_type: "planners/gird".to_string() }
    );
    Ok(())
}

#[cfg(feature = "yaml-config")]
#[test]
fn test_load_planners_from_yaml_maps() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    write_config(
        temp_dir.path(),
        "loadout.yaml",
        "planners:\n  - coarse\n  - fine\n  - coarse\ncoarse:\n  type: planners/grid\nfine:\n  type: planners/grid\n",
    );

    let manager = config_manager(temp_dir.path(), ConfigFormat::Yaml);
    let mut planners = planner_manager(Arc::new(manager.load_config("loadout")?));

    // The repeated name aborts the call after the first two were admitted
    assert!(!planners.load_plugins());
    assert_eq!(planners.loaded_names(), ["coarse", "fine"]);

    let coarse = planners.get_plugin("coarse").unwrap();
    let fine = planners.get_plugin("fine").unwrap();
    assert!(!Arc::ptr_eq(&coarse, &fine));
    Ok(())
}

#[test]
fn test_saved_config_round_trips_into_a_manager() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let manager = config_manager(temp_dir.path(), ConfigFormat::Json);

    let mut config = ConfigData::new();
    config.set("planners", ["only"])?;
    config.set("only.type", "planners/grid")?;
    manager.save_config("saved", &config)?;
    manager.clear_cache();

    let mut planners = planner_manager(Arc::new(manager.load_config("saved")?));
    assert!(planners.load_plugins());
    assert_eq!(planners.get_plugin("only").unwrap().kind(), "grid");
    Ok(())
}

#[test]
fn test_missing_config_file_loads_nothing() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let manager = config_manager(temp_dir.path(), ConfigFormat::Json);

    let mut planners = planner_manager(Arc::new(manager.load_config("absent")?));
    assert!(!planners.load_plugins());
    assert!(planners.is_empty());
    Ok(())
}
