use parking_lot::Mutex;
use starlane_ports::storage::{SettingsDto, StorageError, StoragePort};
use std::collections::HashMap;

/// Process-local storage. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStorage {
    settings: Mutex<Option<SettingsDto>>,
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl StoragePort for MemoryStorage {
    fn load_settings(&self) -> Result<SettingsDto, StorageError> {
        Ok(self.settings.lock().clone().unwrap_or_default())
    }

    fn save_settings(&self, s: &SettingsDto) -> Result<(), StorageError> {
        *self.settings.lock() = Some(s.clone());
        Ok(())
    }

    fn read_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn write_value(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
