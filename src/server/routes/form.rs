//! Multipart form reading for certificate uploads

use crate::core::batch::BatchForm;
use crate::core::metadata::ImageAsset;
use crate::utils::error::IssuerError;
use actix_multipart::Multipart;
use futures::StreamExt;
use tracing::debug;

/// Read a certificate form, failing once the upload exceeds `limit` bytes
///
/// Recognized fields: `eventName`, `certificateName`, `contractAddress`,
/// `contractName`, `templateImage`, `csvFile` and repeated `attribute`.
pub async fn read_batch_form(mut payload: Multipart, limit: usize) -> Result<BatchForm, IssuerError> {
    let mut form = BatchForm::default();
    let mut received = 0usize;

    while let Some(item) = payload.next().await {
        let mut field = item
            .map_err(|e| IssuerError::BadRequest(format!("Invalid multipart data: {}", e)))?;

        let name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let bytes = chunk.map_err(|e| {
                IssuerError::BadRequest(format!("Error reading field {}: {}", name, e))
            })?;
            received += bytes.len();
            if received > limit {
                return Err(IssuerError::BadRequest(format!(
                    "Upload exceeds the {} byte limit",
                    limit
                )));
            }
            data.extend_from_slice(&bytes);
        }

        match name.as_str() {
            "csvFile" => form.csv = Some(into_text(&name, data)?),
            "templateImage" => form.template_image = Some(ImageAsset::new(data, filename)),
            "eventName" => form.event_name = Some(into_text(&name, data)?),
            "certificateName" => form.certificate_name = Some(into_text(&name, data)?),
            "contractAddress" => form.contract_address = Some(into_text(&name, data)?),
            "contractName" => form.contract_name = Some(into_text(&name, data)?),
            "attribute" => form.attributes.push(into_text(&name, data)?),
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}

fn into_text(field: &str, data: Vec<u8>) -> Result<String, IssuerError> {
    String::from_utf8(data)
        .map_err(|_| IssuerError::BadRequest(format!("{} must be UTF-8 text", field)))
}
