//! Certificate metadata document types

use crate::utils::error::{IssuerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Trait types the issuer always writes itself
pub const RESERVED_TRAIT_TYPES: [&str; 6] = [
    "Recipient",
    "Event",
    "Certificate Name",
    "Issue Date",
    "Certificate Type",
    "Contract",
];

/// Fallback certificate title
pub const DEFAULT_CERTIFICATE_NAME: &str = "Certificate";

/// One `{trait_type, value}` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataAttribute {
    pub trait_type: String,
    pub value: String,
}

impl MetadataAttribute {
    pub fn new(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }
}

/// Machine-readable certificate properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataProperties {
    pub participant: String,
    pub event: String,
    pub certificate_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_name: Option<String>,
    /// RFC-3339 issue timestamp
    pub issue_date: String,
    pub token_id: u64,
}

/// Token metadata document referenced by a certificate's token URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateMetadata {
    pub name: String,
    pub description: String,
    /// Retrieval URI of the template image, `null` without one
    pub image: Option<String>,
    pub external_url: String,
    pub attributes: Vec<MetadataAttribute>,
    pub properties: MetadataProperties,
}

impl CertificateMetadata {
    /// Value of an attribute by trait type
    pub fn attribute(&self, trait_type: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.trait_type == trait_type)
            .map(|a| a.value.as_str())
    }
}

/// Caller-supplied extra attributes, checked on insert
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct CustomAttributes(BTreeMap<String, String>);

impl CustomAttributes {
    /// Maximum number of entries
    pub const MAX_ENTRIES: usize = 10;
    /// Maximum key length in characters
    pub const MAX_KEY_LEN: usize = 64;
    /// Maximum value length in characters
    pub const MAX_VALUE_LEN: usize = 256;

    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute; keys and values are trimmed
    pub fn insert(&mut self, key: &str, value: &str) -> Result<()> {
        let key = key.trim();
        let value = value.trim();

        let key_len = key.chars().count();
        if key_len == 0 || key_len > Self::MAX_KEY_LEN {
            return Err(IssuerError::BadRequest(format!(
                "Attribute name must be 1-{} characters",
                Self::MAX_KEY_LEN
            )));
        }

        let value_len = value.chars().count();
        if value_len == 0 || value_len > Self::MAX_VALUE_LEN {
            return Err(IssuerError::BadRequest(format!(
                "Attribute {:?} value must be 1-{} characters",
                key,
                Self::MAX_VALUE_LEN
            )));
        }

        if RESERVED_TRAIT_TYPES
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(key))
        {
            return Err(IssuerError::BadRequest(format!(
                "Attribute {:?} is reserved",
                key
            )));
        }

        if self.0.contains_key(key) {
            return Err(IssuerError::BadRequest(format!(
                "Attribute {:?} given more than once",
                key
            )));
        }

        if self.0.len() >= Self::MAX_ENTRIES {
            return Err(IssuerError::BadRequest(format!(
                "At most {} custom attributes are allowed",
                Self::MAX_ENTRIES
            )));
        }

        self.0.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Add an attribute written as `key=value`
    pub fn insert_pair(&mut self, pair: &str) -> Result<()> {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            IssuerError::BadRequest(format!("Attribute {:?} must be written key=value", pair))
        })?;
        self.insert(key, value)
    }

    /// Build from `key=value` pairs
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut attributes = Self::new();
        for pair in pairs {
            attributes.insert_pair(pair.as_ref())?;
        }
        Ok(attributes)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<BTreeMap<String, String>> for CustomAttributes {
    type Error = IssuerError;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self> {
        let mut attributes = Self::new();
        for (key, value) in &map {
            attributes.insert(key, value)?;
        }
        Ok(attributes)
    }
}

impl From<CustomAttributes> for BTreeMap<String, String> {
    fn from(attributes: CustomAttributes) -> Self {
        attributes.0
    }
}

/// Template image to attach to every certificate in a batch
#[derive(Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub bytes: Vec<u8>,
    pub filename: String,
}

impl ImageAsset {
    /// Filename used when the upload carried none
    pub const DEFAULT_FILENAME: &'static str = "certificate-template.png";

    pub fn new(bytes: Vec<u8>, filename: Option<String>) -> Self {
        let filename = filename
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_FILENAME.to_string());
        Self { bytes, filename }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ImageAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAsset")
            .field("filename", &self.filename)
            .field("len", &self.bytes.len())
            .finish()
    }
}
