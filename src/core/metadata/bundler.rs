//! Builds certificate documents and pushes them to the content store

use super::types::{
    CertificateMetadata, CustomAttributes, DEFAULT_CERTIFICATE_NAME, ImageAsset,
    MetadataAttribute, MetadataProperties,
};
use crate::config::MetadataConfig;
use crate::core::content_store::{ContentStore, StoredContent};
use crate::utils::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Everything that varies per certificate
#[derive(Debug, Clone, Copy)]
pub struct CertificateInput<'a> {
    pub recipient_name: &'a str,
    pub event_name: &'a str,
    pub certificate_name: &'a str,
    pub contract_name: Option<&'a str>,
    pub token_id: u64,
    pub custom_attributes: &'a CustomAttributes,
}

/// Stored certificate: image (if any) plus the metadata document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateBundle {
    pub metadata: CertificateMetadata,
    pub image: Option<StoredContent>,
    pub document: StoredContent,
}

impl CertificateBundle {
    /// URI recorded on the token
    pub fn token_uri(&self) -> &str {
        &self.document.retrieval_uri
    }
}

/// Produces one metadata document per recipient
pub struct MetadataBundler {
    store: Arc<dyn ContentStore>,
    config: MetadataConfig,
}

impl MetadataBundler {
    pub fn new(store: Arc<dyn ContentStore>, config: MetadataConfig) -> Self {
        Self { store, config }
    }

    /// Build the document for one certificate
    pub fn build_metadata(
        &self,
        input: &CertificateInput<'_>,
        image_uri: Option<String>,
        issued_at: DateTime<Utc>,
    ) -> CertificateMetadata {
        let certificate_name = match input.certificate_name.trim() {
            "" => DEFAULT_CERTIFICATE_NAME,
            name => name,
        };
        let contract_name = input
            .contract_name
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let mut attributes = vec![
            MetadataAttribute::new("Recipient", input.recipient_name),
            MetadataAttribute::new("Event", input.event_name),
            MetadataAttribute::new("Certificate Name", certificate_name),
            MetadataAttribute::new("Issue Date", issued_at.format("%Y-%m-%d").to_string()),
            MetadataAttribute::new("Certificate Type", self.config.certificate_type.as_str()),
        ];
        if let Some(contract_name) = contract_name {
            attributes.push(MetadataAttribute::new("Contract", contract_name));
        }
        attributes.extend(
            input
                .custom_attributes
                .iter()
                .map(|(key, value)| MetadataAttribute::new(key, value)),
        );

        CertificateMetadata {
            name: format!("{} - {}", certificate_name, input.event_name),
            description: format!(
                "{} for {} awarded to {}",
                certificate_name, input.event_name, input.recipient_name
            ),
            image: image_uri,
            external_url: format!(
                "{}/verify/{}",
                self.config.verify_base_url.trim_end_matches('/'),
                input.token_id
            ),
            attributes,
            properties: MetadataProperties {
                participant: input.recipient_name.to_string(),
                event: input.event_name.to_string(),
                certificate_name: certificate_name.to_string(),
                contract_name: contract_name.map(str::to_string),
                issue_date: issued_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                token_id: input.token_id,
            },
        }
    }

    /// Upload the image (when given) and the document; the image goes first
    /// so the document can reference it.
    pub async fn bundle(
        &self,
        input: &CertificateInput<'_>,
        image: Option<&ImageAsset>,
    ) -> Result<CertificateBundle> {
        let image = match image.filter(|asset| !asset.is_empty()) {
            Some(asset) => {
                debug!(recipient = input.recipient_name, "Uploading certificate image");
                Some(self.store.upload(&asset.bytes, &asset.filename).await?)
            }
            None => None,
        };

        let metadata = self.build_metadata(
            input,
            image.as_ref().map(|stored| stored.retrieval_uri.clone()),
            Utc::now(),
        );

        debug!(
            recipient = input.recipient_name,
            token_id = input.token_id,
            "Uploading certificate metadata"
        );
        let document = self
            .store
            .upload_json(&serde_json::to_value(&metadata)?)
            .await?;

        Ok(CertificateBundle {
            metadata,
            image,
            document,
        })
    }
}
