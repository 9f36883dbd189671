//! Configuration validation integration tests
//!
//! Loads the shipped example configuration and checks that each section
//! fails the way an operator would expect.

#[cfg(test)]
mod tests {
    use certmint::config::{
        Config, ContentStoreBackend, IssuerConfig, PacingStrategy, Validate,
    };
    use certmint::core::content_store::ContentStore;
    use certmint::storage::RecordStore;
    use certmint::{IssuerError, IssuerServices};
    use tempfile::TempDir;

    const EXAMPLE: &str = include_str!("../../config/certmint.yaml.example");

    fn example() -> IssuerConfig {
        Config::from_yaml(EXAMPLE).unwrap().issuer
    }

    // ==================== Example Config ====================

    #[test]
    fn test_example_config_is_valid() {
        let config = example();
        assert!(config.validate().is_ok(), "{:?}", config.validate());
        assert_eq!(config.content_store.backend, ContentStoreBackend::Pinata);
        assert_eq!(config.pacing.strategy, PacingStrategy::FixedInterval);
        assert_eq!(config.pacing.interval_ms, 1000);
        assert_eq!(config.ledger.gas_limit, Some(500_000));
    }

    // ==================== Section Validation ====================

    #[test]
    fn test_pinata_backend_requires_jwt() {
        let mut config = example();
        config.content_store.pinata.jwt = String::new();

        let result = config.validate();
        assert!(result.unwrap_err().contains("Pinata JWT"));
    }

    #[test]
    fn test_local_backend_ignores_pinata_settings() {
        let mut config = example();
        config.content_store.backend = ContentStoreBackend::Local;
        config.content_store.pinata.jwt = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_signer_must_be_an_address() {
        let mut config = example();
        config.ledger.signer_address = "alice".to_string();
        assert!(config.validate().unwrap_err().contains("signer"));
    }

    #[test]
    fn test_rpc_url_must_be_http() {
        let mut config = example();
        config.ledger.rpc_url = "ws://127.0.0.1:8546".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_confirmation_timeout_fails() {
        let mut config = example();
        config.ledger.confirmation_timeout = 0;
        assert!(config.validate().unwrap_err().contains("confirmation timeout"));
    }

    #[test]
    fn test_token_bucket_with_zero_burst_fails() {
        let mut config = example();
        config.pacing.strategy = PacingStrategy::TokenBucket;
        config.pacing.burst = 0;
        assert!(config.validate().unwrap_err().contains("burst"));
    }

    #[test]
    fn test_full_config_validate_maps_to_config_error() {
        let mut config = Config::from_yaml(EXAMPLE).unwrap();
        config.issuer.server.port = 0;
        assert!(matches!(config.validate(), Err(IssuerError::Config(_))));
    }

    // ==================== Service Wiring ====================

    #[tokio::test]
    async fn test_services_build_from_local_config() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::from_yaml(EXAMPLE).unwrap();
        config.issuer.content_store.backend = ContentStoreBackend::Local;
        config.issuer.content_store.local.path =
            dir.path().join("content").to_string_lossy().into_owned();
        config.issuer.storage.data_dir = dir.path().join("data").to_string_lossy().into_owned();

        let services = crate::assert_ok!(IssuerServices::from_config(&config).await);
        assert_eq!(services.content_store.backend(), "local");
        assert!(services.local_content.is_some());
        assert!(services.records.batches.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_services_need_a_signer() {
        let mut config = Config::from_yaml(EXAMPLE).unwrap();
        config.issuer.storage.in_memory = true;
        config.issuer.ledger.signer_address = String::new();

        let err = IssuerServices::from_config(&config).await.err().unwrap();
        assert!(matches!(err, IssuerError::Config(_)));
    }
}
