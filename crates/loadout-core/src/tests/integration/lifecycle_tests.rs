#![cfg(test)]

use std::sync::{Arc, RwLock};
use tempfile::tempdir;

use crate::kernel::component::KernelComponent;
use crate::kernel::error::{Error, KernelLifecyclePhase, Result};
use crate::plugin_system::SharedPluginManager;
use crate::storage::config::ConfigFormat;

use super::common::{config_manager, planner_manager, write_config};

#[tokio::test]
async fn test_reload_after_config_file_changes() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    write_config(
        temp_dir.path(),
        "loadout.json",
        r#"{ "planners": ["a"], "a.type": "planners/grid" }"#,
    );

    let files = config_manager(temp_dir.path(), ConfigFormat::Json);
    let source = Arc::new(RwLock::new(files.load_config("loadout")?));
    let shared = SharedPluginManager::new(planner_manager(source.clone()));

    shared.initialize().await?;
    shared.start().await?;
    assert_eq!(shared.loaded_names().await, ["a"]);
    let before = shared.get_plugin("a").await.unwrap();

    write_config(
        temp_dir.path(),
        "loadout.json",
        r#"{ "planners": ["b", "a"], "a.type": "planners/lattice", "b.type": "planners/grid" }"#,
    );
    files.invalidate_cache("loadout");
    *source.write().unwrap() = files.load_config("loadout")?;

    assert!(shared.reload_plugins().await);
    assert_eq!(shared.loaded_names().await, ["b", "a"]);
    assert_eq!(shared.plugin_type("a").await?, "planners/lattice");

    let after = shared.get_plugin("a").await.unwrap();
    assert_eq!(before.kind(), "grid");
    assert_eq!(after.kind(), "lattice");

    shared.stop().await?;
    assert_eq!(shared.len().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_initialize_fails_for_empty_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    write_config(temp_dir.path(), "loadout.json", "{}");

    let files = config_manager(temp_dir.path(), ConfigFormat::Json);
    let config = Arc::new(files.load_config("loadout").unwrap());
    let shared = SharedPluginManager::new(planner_manager(config));

    match shared.initialize().await {
        Err(Error::KernelLifecycleError { phase, component_name, .. }) => {
            assert_eq!(phase, KernelLifecyclePhase::Initialize);
            assert_eq!(component_name.as_deref(), Some("SharedPluginManager"));
        }
        other => panic!("Expected KernelLifecycleError, got {:?}", other),
    }
}
