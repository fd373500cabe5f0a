use crate::types::*;
use serde::{Deserialize, Serialize};

fn default_master_volume() -> Volume01 {
    Volume01::new(0.5)
}

fn default_frame_interval_ms() -> Millis {
    16
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serde(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDto {
    #[serde(default = "default_master_volume")]
    pub master_volume: Volume01,
    pub instrument: Instrument,
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: Millis,
}

impl Default for SettingsDto {
    fn default() -> Self {
        Self {
            master_volume: default_master_volume(),
            instrument: Instrument::Piano,
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

/// Small key-value persistence. Writes replace the whole value stored under a key.
pub trait StoragePort: Send + Sync {
    fn load_settings(&self) -> Result<SettingsDto, StorageError>;
    fn save_settings(&self, s: &SettingsDto) -> Result<(), StorageError>;

    fn read_value(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write_value(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
