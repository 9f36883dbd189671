//! Certificate metadata documents

mod bundler;
mod types;


pub use bundler::{CertificateBundle, CertificateInput, MetadataBundler};
pub use types::{
    CertificateMetadata, CustomAttributes, DEFAULT_CERTIFICATE_NAME, ImageAsset,
    MetadataAttribute, MetadataProperties, RESERVED_TRAIT_TYPES,
};
