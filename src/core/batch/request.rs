//! Typed batch request, validated once at the boundary

use crate::core::metadata::{CustomAttributes, ImageAsset};
use crate::core::recipients::Address;
use crate::utils::error::{IssuerError, Result};

/// Parameters shared by every certificate of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub event_name: String,
    pub certificate_name: String,
    pub contract_address: Address,
    pub contract_name: Option<String>,
    pub template_image: Option<ImageAsset>,
    pub custom_attributes: CustomAttributes,
}

impl BatchRequest {
    pub fn new(
        event_name: impl Into<String>,
        certificate_name: impl Into<String>,
        contract_address: Address,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            certificate_name: certificate_name.into(),
            contract_address,
            contract_name: None,
            template_image: None,
            custom_attributes: CustomAttributes::new(),
        }
    }

    pub fn with_contract_name(mut self, name: impl Into<String>) -> Self {
        self.contract_name = Some(name.into());
        self
    }

    pub fn with_template_image(mut self, image: ImageAsset) -> Self {
        self.template_image = Some(image);
        self
    }

    pub fn with_custom_attributes(mut self, attributes: CustomAttributes) -> Self {
        self.custom_attributes = attributes;
        self
    }

    /// Reject blank event or certificate names
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.event_name.trim().is_empty() {
            missing.push("eventName");
        }
        if self.certificate_name.trim().is_empty() {
            missing.push("certificateName");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(IssuerError::BadRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Loosely collected form input, as it arrives from a caller
#[derive(Debug, Clone, Default)]
pub struct BatchForm {
    pub event_name: Option<String>,
    pub certificate_name: Option<String>,
    pub contract_address: Option<String>,
    pub contract_name: Option<String>,
    pub template_image: Option<ImageAsset>,
    /// `key=value` entries
    pub attributes: Vec<String>,
    pub csv: Option<String>,
}

impl BatchForm {
    /// Check every field and split into the typed request and the recipient file
    pub fn into_request(self) -> Result<(BatchRequest, String)> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .is_some_and(|v| !v.is_empty())
        };

        let mut missing = Vec::new();
        if !present(&self.event_name) {
            missing.push("eventName");
        }
        if !present(&self.certificate_name) {
            missing.push("certificateName");
        }
        if self.csv.as_deref().is_none_or(|csv| csv.trim().is_empty()) {
            missing.push("csvFile");
        }
        if !present(&self.contract_address) {
            missing.push("contractAddress");
        }
        if !missing.is_empty() {
            return Err(IssuerError::BadRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let raw_address = self.contract_address.unwrap_or_default();
        let contract_address = Address::parse(&raw_address).map_err(|_| {
            IssuerError::BadRequest(format!("Invalid contract address: {}", raw_address.trim()))
        })?;
        let custom_attributes = CustomAttributes::from_pairs(&self.attributes)?;

        let request = BatchRequest {
            event_name: self.event_name.unwrap_or_default().trim().to_string(),
            certificate_name: self.certificate_name.unwrap_or_default().trim().to_string(),
            contract_address,
            contract_name: self
                .contract_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            template_image: self.template_image.filter(|image| !image.is_empty()),
            custom_attributes,
        };

        Ok((request, self.csv.unwrap_or_default()))
    }
}
