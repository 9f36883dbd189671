//! Pinata client against a mock pinning API

#[cfg(test)]
mod tests {
    use certmint::config::PinataConfig;
    use certmint::core::content_store::{ContentStore, PinataContentStore};
    use certmint::IssuerError;
    use serde_json::{Value, json};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(server: &MockServer) -> PinataContentStore {
        PinataContentStore::new(&PinataConfig {
            api_url: server.uri(),
            jwt: "test-jwt".to_string(),
            gateway: "gateway.test".to_string(),
            timeout: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_upload_json_wraps_document() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pinning/pinJSONToIPFS"))
            .and(header("authorization", "Bearer test-jwt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "IpfsHash": "QmDocument",
                "PinSize": 512,
                "Timestamp": "2026-01-01T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let stored = store(&server)
            .upload_json(&json!({ "name": "Certificate", "attributes": [] }))
            .await
            .unwrap();

        assert_eq!(stored.content_id, "QmDocument");
        assert_eq!(stored.size, 512);
        assert_eq!(stored.retrieval_uri, "https://gateway.test/ipfs/QmDocument");

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["pinataContent"]["name"], "Certificate");
        assert_eq!(body["pinataMetadata"]["name"], "certificate-metadata.json");
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_file() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pinning/pinFileToIPFS"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "IpfsHash": "QmImage",
                "PinSize": 4,
                "isDuplicate": true
            })))
            .mount(&server)
            .await;

        let stored = store(&server).upload(b"\x89PNG", "badge.png").await.unwrap();
        assert_eq!(stored.content_id, "QmImage");

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"file\"; filename=\"badge.png\""));
        assert!(body.contains("image/png"));
        assert!(body.contains("name=\"pinataMetadata\""));
    }

    #[tokio::test]
    async fn test_rejected_upload_is_content_store_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pinning/pinJSONToIPFS"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
            .mount(&server)
            .await;

        let err = store(&server).upload_json(&json!({})).await.unwrap_err();
        match err {
            IssuerError::ContentStore(message) => {
                assert!(message.contains("401"), "message: {}", message);
                assert!(message.contains("invalid token"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_response_without_hash_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pinning/pinJSONToIPFS"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "PinSize": 1 })))
            .mount(&server)
            .await;

        let err = store(&server).upload_json(&json!({})).await.unwrap_err();
        assert!(matches!(err, IssuerError::ContentStore(_)));
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/testAuthentication"))
            .and(header("authorization", "Bearer test-jwt"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        assert!(store(&server).health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_health_check_reports_bad_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/testAuthentication"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = store(&server).health_check().await.unwrap_err();
        assert!(matches!(err, IssuerError::Unavailable(_)));
    }

    #[test]
    fn test_missing_jwt_is_config_error() {
        let err = PinataContentStore::new(&PinataConfig::default()).unwrap_err();
        assert!(matches!(err, IssuerError::Config(_)));
    }
}
