//! JSON-RPC ledger client against a mock node

#[cfg(test)]
mod tests {
    use certmint::config::LedgerConfig;
    use certmint::core::ledger::{
        JsonRpcLedger, MINT_CERTIFICATE_SELECTOR, MintLedger, encode_token_counter_call,
    };
    use certmint::core::recipients::Address;
    use certmint::IssuerError;
    use serde_json::{Value, json};
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SIGNER: &str = "0x5555555555555555555555555555555555555555";
    const TX_HASH: &str = "0xabababababababababababababababababababababababababababababababab";

    fn contract() -> Address {
        Address::parse("0xcccccccccccccccccccccccccccccccccccccccc").unwrap()
    }

    fn recipient() -> Address {
        Address::parse("0x1111111111111111111111111111111111111111").unwrap()
    }

    fn config(server: &MockServer) -> LedgerConfig {
        LedgerConfig {
            rpc_url: server.uri(),
            signer_address: SIGNER.to_string(),
            request_timeout: 5,
            confirmation_timeout: 5,
            poll_interval_ms: 10,
            gas_limit: Some(300_000),
            explorer_url: Some("https://explorer.test/".to_string()),
        }
    }

    fn rpc_result(result: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": result
        }))
    }

    async fn mount(server: &MockServer, rpc_method: &str, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": rpc_method })))
            .respond_with(response)
            .mount(server)
            .await;
    }

    async fn requests_for(server: &MockServer, rpc_method: &str) -> Vec<Value> {
        server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter_map(|request| serde_json::from_slice::<Value>(&request.body).ok())
            .filter(|body| body["method"] == rpc_method)
            .collect()
    }

    fn receipt(status: &str) -> Value {
        json!({
            "transactionHash": TX_HASH,
            "blockNumber": "0x10",
            "gasUsed": "0x5208",
            "status": status
        })
    }

    #[tokio::test]
    async fn test_read_token_counter() {
        let server = MockServer::start().await;
        mount(&server, "eth_call", rpc_result(json!(format!("0x{:064x}", 42)))).await;

        let ledger = JsonRpcLedger::new(&config(&server)).unwrap();
        assert_eq!(ledger.read_token_counter(&contract()).await.unwrap(), 42);

        let calls = requests_for(&server, "eth_call").await;
        assert_eq!(calls[0]["params"][0]["to"], contract().as_str());
        assert_eq!(calls[0]["params"][0]["data"], encode_token_counter_call());
        assert_eq!(calls[0]["params"][1], "latest");
    }

    #[tokio::test]
    async fn test_short_counter_word_is_rejected() {
        let server = MockServer::start().await;
        mount(&server, "eth_call", rpc_result(json!("0x"))).await;

        let ledger = JsonRpcLedger::new(&config(&server)).unwrap();
        let err = crate::assert_err!(ledger.read_token_counter(&contract()).await);
        assert!(matches!(err, IssuerError::Ledger(_)));
    }

    #[tokio::test]
    async fn test_submit_mint_waits_for_receipt() {
        let server = MockServer::start().await;
        mount(&server, "eth_sendTransaction", rpc_result(json!(TX_HASH))).await;

        // First poll finds nothing, the second finds the mined receipt.
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_getTransactionReceipt" })))
            .respond_with(rpc_result(Value::Null))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;
        mount(&server, "eth_getTransactionReceipt", rpc_result(receipt("0x1"))).await;

        let ledger = JsonRpcLedger::new(&config(&server)).unwrap();
        let minted = ledger
            .submit_mint(&contract(), &recipient(), "ipfs://QmDocument")
            .await
            .unwrap();

        assert_eq!(minted.transaction_hash, TX_HASH);
        assert_eq!(minted.block_number, 16);
        assert_eq!(minted.gas_used, 21_000);
        assert_eq!(requests_for(&server, "eth_getTransactionReceipt").await.len(), 2);

        let sent = &requests_for(&server, "eth_sendTransaction").await[0]["params"][0];
        assert_eq!(sent["from"], SIGNER);
        assert_eq!(sent["to"], contract().as_str());
        assert_eq!(sent["gas"], "0x493e0");
        let data = sent["data"].as_str().unwrap();
        assert!(data.starts_with(&format!("0x{}", MINT_CERTIFICATE_SELECTOR)));
        assert!(data.contains(recipient().hex_digits()));
        assert!(data.contains(&hex::encode("ipfs://QmDocument")));
    }

    #[tokio::test]
    async fn test_reverted_mint_is_an_error() {
        let server = MockServer::start().await;
        mount(&server, "eth_sendTransaction", rpc_result(json!(TX_HASH))).await;
        mount(&server, "eth_getTransactionReceipt", rpc_result(receipt("0x0"))).await;

        let ledger = JsonRpcLedger::new(&config(&server)).unwrap();
        let err = ledger
            .submit_mint(&contract(), &recipient(), "ipfs://QmDocument")
            .await
            .unwrap_err();

        match err {
            IssuerError::Ledger(message) => assert!(message.contains("reverted")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_node_error_object_is_surfaced() {
        let server = MockServer::start().await;
        mount(
            &server,
            "eth_sendTransaction",
            ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": -32000, "message": "insufficient funds for gas" }
            })),
        )
        .await;

        let ledger = JsonRpcLedger::new(&config(&server)).unwrap();
        let err = ledger
            .submit_mint(&contract(), &recipient(), "ipfs://QmDocument")
            .await
            .unwrap_err();

        match err {
            IssuerError::Rpc { code, message } => {
                assert_eq!(code, -32000);
                assert_eq!(message, "insufficient funds for gas");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(requests_for(&server, "eth_getTransactionReceipt").await.is_empty());
    }

    #[tokio::test]
    async fn test_unconfirmed_mint_times_out() {
        let server = MockServer::start().await;
        mount(&server, "eth_sendTransaction", rpc_result(json!(TX_HASH))).await;
        mount(&server, "eth_getTransactionReceipt", rpc_result(Value::Null)).await;

        let mut config = config(&server);
        config.confirmation_timeout = 0;
        let ledger = JsonRpcLedger::new(&config).unwrap();

        let err = ledger
            .submit_mint(&contract(), &recipient(), "ipfs://QmDocument")
            .await
            .unwrap_err();

        match err {
            IssuerError::Timeout(message) => {
                assert!(message.contains(TX_HASH));
                assert!(message.contains("not confirmed within"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_failure_is_ledger_error() {
        let server = MockServer::start().await;
        mount(&server, "eth_blockNumber", ResponseTemplate::new(503)).await;

        let ledger = JsonRpcLedger::new(&config(&server)).unwrap();
        let err = ledger.health_check().await.unwrap_err();
        assert!(matches!(err, IssuerError::Ledger(_)));
    }

    #[tokio::test]
    async fn test_health_check_returns_block_height() {
        let server = MockServer::start().await;
        mount(&server, "eth_blockNumber", rpc_result(json!("0x1b4"))).await;

        let ledger = JsonRpcLedger::new(&config(&server)).unwrap();
        assert_eq!(crate::assert_ok!(ledger.health_check().await), 436);
    }

    #[test]
    fn test_explorer_url() {
        let config = LedgerConfig {
            signer_address: SIGNER.to_string(),
            explorer_url: Some("https://explorer.test/".to_string()),
            ..Default::default()
        };
        let ledger = JsonRpcLedger::new(&config).unwrap();
        assert_eq!(
            ledger.explorer_url(TX_HASH).unwrap(),
            format!("https://explorer.test/tx/{}", TX_HASH)
        );

        let bare = JsonRpcLedger::new(&LedgerConfig {
            signer_address: SIGNER.to_string(),
            ..Default::default()
        })
        .unwrap();
        assert!(bare.explorer_url(TX_HASH).is_none());
    }

    #[test]
    fn test_invalid_signer_is_config_error() {
        let err = JsonRpcLedger::new(&LedgerConfig::default()).unwrap_err();
        assert!(matches!(err, IssuerError::Config(_)));
    }
}
