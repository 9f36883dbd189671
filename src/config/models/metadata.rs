//! Certificate metadata configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Settings baked into every certificate document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Base of the public verification page
    #[serde(default = "default_verify_base_url")]
    pub verify_base_url: String,
    /// Value of the "Certificate Type" attribute
    #[serde(default = "default_certificate_type")]
    pub certificate_type: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            verify_base_url: default_verify_base_url(),
            certificate_type: default_certificate_type(),
        }
    }
}

impl MetadataConfig {
    /// Merge metadata configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.verify_base_url != default_verify_base_url() {
            self.verify_base_url = other.verify_base_url;
        }
        if other.certificate_type != default_certificate_type() {
            self.certificate_type = other.certificate_type;
        }
        self
    }
}
