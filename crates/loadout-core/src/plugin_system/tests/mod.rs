
use std::sync::{Arc, Mutex, Once};
use std::thread::{self, ThreadId};

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::kernel::error::Result;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::manager::PluginManager;
use crate::storage::ConfigData;

// --- Mock Plugin ---
/// Remembers the type it was built from and the name it was initialized for.
#[derive(Debug)]
struct MockPlugin {
    plugin_type: String,
    bound_name: Mutex<Option<String>>,
}

impl MockPlugin {
    fn new(plugin_type: &str) -> Self {
        Self {
            plugin_type: plugin_type.to_string(),
            bound_name: Mutex::new(None),
        }
    }

    fn bound_name(&self) -> Option<String> {
        self.bound_name.lock().unwrap().clone()
    }
}

/// Config with `names` under "plugins" and flat `<name>.type` entries.
fn config_with(names: &[&str], types: &[(&str, &str)]) -> Arc<ConfigData> {
    let mut config = ConfigData::new();
    config.set("plugins", names).unwrap();
    for (name, plugin_type) in types {
        config.set(&format!("{}.type", name), plugin_type).unwrap();
    }
    Arc::new(config)
}

/// Manager whose factory knows `known` types and whose initializer rejects
/// the names in `rejected`.
fn mock_manager(
    config: Arc<ConfigData>,
    known: &'static [&'static str],
    rejected: &'static [&'static str],
) -> PluginManager<MockPlugin> {
    let factory = move |plugin_type: &str| {
        if known.iter().any(|k| *k == plugin_type) {
            Some(Arc::new(MockPlugin::new(plugin_type)))
        } else {
            None
        }
    };
    let initializer = move |name: &str, plugin: &Arc<MockPlugin>| -> Result<()> {
        if rejected.iter().any(|r| *r == name) {
            return Err(PluginSystemError::init(name, "rejected by test").into());
        }
        *plugin.bound_name.lock().unwrap() = Some(name.to_string());
        Ok(())
    };
    PluginManager::new("plugins", factory, initializer, config)
}

// --- Log capture ---
/// Records every log line together with the thread that emitted it, so tests
/// running in parallel only see their own output.
struct CaptureLogger {
    records: Mutex<Vec<(ThreadId, Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records.lock().unwrap().push((
            thread::current().id(),
            record.level(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

/// Install the capturing logger and forget this thread's earlier records.
fn capture_logs() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger is installed in unit tests");
        log::set_max_level(LevelFilter::Trace);
    });
    let current = thread::current().id();
    LOGGER.records.lock().unwrap().retain(|(id, _, _)| *id != current);
}

/// Lines logged by this thread since `capture_logs`
fn captured_logs() -> Vec<(Level, String)> {
    let current = thread::current().id();
    LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(id, _, _)| *id == current)
        .map(|(_, level, message)| (*level, message.clone()))
        .collect()
}
