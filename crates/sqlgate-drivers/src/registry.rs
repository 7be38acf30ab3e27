//! Driver registry for managing available database drivers

use parking_lot::RwLock;
use sqlgate_core::Driver;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Registry of available database drivers
pub struct DriverRegistry {
    drivers: HashMap<String, Arc<dyn Driver>>,
}

impl DriverRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            drivers: HashMap::new(),
        }
    }

    /// Create a registry with all built-in drivers registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        #[cfg(feature = "sqlite")]
        registry.register(Arc::new(crate::sqlite::SqliteDriver::new()));
        #[cfg(feature = "postgres")]
        registry.register(Arc::new(crate::postgres::PostgresDriver::new()));
        #[cfg(feature = "mysql")]
        registry.register(Arc::new(crate::mysql::MySqlDriver::new()));

        registry
    }

    /// Register a new driver, replacing any driver with the same name
    pub fn register(&mut self, driver: Arc<dyn Driver>) {
        let name = driver.name().to_string();
        tracing::info!(driver = %name, "registering database driver");
        self.drivers.insert(name, driver);
    }

    /// Register a driver only if its name is not taken yet; returns the
    /// driver registered under that name either way
    pub fn register_once(&mut self, driver: Arc<dyn Driver>) -> Arc<dyn Driver> {
        let name = driver.name().to_string();
        if let Some(existing) = self.drivers.get(&name) {
            return existing.clone();
        }
        tracing::info!(driver = %name, "registering database driver");
        self.drivers.insert(name.clone(), driver.clone());
        driver
    }

    /// Get a driver by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Driver>> {
        let driver = self.drivers.get(name).cloned();
        if driver.is_none() {
            tracing::warn!(driver = %name, "driver not found in registry");
        }
        driver
    }

    /// List all registered driver names
    pub fn list(&self) -> Vec<&str> {
        self.drivers.keys().map(|s| s.as_str()).collect()
    }

    /// Check if a driver is registered
    pub fn has(&self, name: &str) -> bool {
        self.drivers.contains_key(name)
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Process-wide driver registry, seeded with the built-in drivers.
///
/// Registrations performed here (for example the traced wrappers) live for
/// the rest of the process and are never torn down.
static GLOBAL_REGISTRY: LazyLock<RwLock<DriverRegistry>> =
    LazyLock::new(|| RwLock::new(DriverRegistry::with_defaults()));

/// Access the process-wide driver registry
pub fn global_registry() -> &'static RwLock<DriverRegistry> {
    &GLOBAL_REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlgate_core::{Handle, Result, SqlGateError};

    struct DummyDriver {
        name: &'static str,
    }

    impl Driver for DummyDriver {
        fn name(&self) -> &str {
            self.name
        }

        fn open(&self, _dsn: &str) -> Result<Arc<dyn Handle>> {
            Err(SqlGateError::Driver("dummy driver never opens".into()))
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = DriverRegistry::new();
        assert!(registry.list().is_empty());
        assert!(!registry.has("sqlite"));
        assert!(registry.get("sqlite").is_none());
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = DriverRegistry::new();
        registry.register(Arc::new(DummyDriver { name: "dummy" }));

        assert!(registry.has("dummy"));
        let driver = registry.get("dummy").expect("registered driver");
        assert_eq!(driver.name(), "dummy");
        assert_eq!(registry.list(), vec!["dummy"]);
    }

    #[test]
    fn test_register_once_is_idempotent() {
        let mut registry = DriverRegistry::new();

        let first = registry.register_once(Arc::new(DummyDriver { name: "dummy" }));
        let second = registry.register_once(Arc::new(DummyDriver { name: "dummy" }));

        // The second registration is a no-op returning the first instance
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.list().len(), 1);
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn test_defaults_include_sqlite() {
        let registry = DriverRegistry::with_defaults();
        assert!(registry.has("sqlite"));
    }

    #[test]
    fn test_global_registry_is_shared() {
        {
            let mut registry = global_registry().write();
            registry.register_once(Arc::new(DummyDriver {
                name: "dummy-global",
            }));
        }
        assert!(global_registry().read().has("dummy-global"));
    }
}
