//! Record storage configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where deployment and batch audit records live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Keep records in memory only
    #[serde(default)]
    pub in_memory: bool,
    /// Directory for the JSON record files
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            in_memory: false,
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// Merge storage configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.in_memory {
            self.in_memory = true;
        }
        if other.data_dir != default_data_dir() {
            self.data_dir = other.data_dir;
        }
        self
    }

    pub fn deployments_file(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("deployments.json")
    }

    pub fn batches_file(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("batches.json")
    }
}
