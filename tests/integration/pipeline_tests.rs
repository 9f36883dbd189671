//! End-to-end batch runs over the local content store and JSON record files

#[cfg(test)]
mod tests {
    use crate::common::{LocalHarness, ScriptedLedger, address, csv_for, numbered_recipients};
    use certmint::core::batch::{AuditStatus, BatchOutcome, BatchRequest, MintResult, TokenIdStatus};
    use certmint::core::metadata::{CertificateMetadata, ImageAsset};
    use certmint::core::recipients::Address;
    use certmint::storage::{JsonFileRecordStore, NewDeployment, RecordStore};
    use certmint::storage::BatchAuditRecord;
    use certmint::IssuerError;

    fn request() -> BatchRequest {
        BatchRequest::new("RustConf 2026", "Speaker", LocalHarness::contract())
    }

    fn content_id(uri: &str) -> &str {
        uri.rsplit('/').next().unwrap_or(uri)
    }

    #[tokio::test]
    async fn test_full_batch_produces_retrievable_certificates() {
        let harness = LocalHarness::new(ScriptedLedger::new(7)).await;
        let rows = numbered_recipients(3);
        let request = request()
            .with_template_image(ImageAsset::new(b"\x89PNG template".to_vec(), Some("badge.png".into())));

        let report = harness
            .services
            .orchestrator
            .execute(&request, &csv_for(&rows))
            .await
            .unwrap();

        assert_eq!(report.outcome(), BatchOutcome::FullSuccess);
        assert_eq!(report.counter_at_start, 7);
        assert_eq!(report.successes.len(), 3);

        let minted = harness.ledger.minted();
        assert_eq!(minted.len(), 3);

        for (index, outcome) in report.successes.iter().enumerate() {
            assert_eq!(outcome.index, index);
            assert_eq!(outcome.token_id, 7 + index as u64);
            assert_eq!(outcome.token_id_status, TokenIdStatus::Minted);
            assert_eq!(minted[index].recipient.as_str(), address(index as u64 + 1));

            let receipt = match &outcome.result {
                MintResult::Success(receipt) => receipt,
                MintResult::Failed(failure) => panic!("unexpected failure: {:?}", failure),
            };
            assert_eq!(receipt.token_uri, minted[index].metadata_uri);
            assert!(receipt.explorer_url.as_deref().unwrap().starts_with("https://explorer.test/tx/0x"));

            let bytes = harness
                .local
                .get(content_id(&receipt.token_uri))
                .await
                .unwrap();
            let document: CertificateMetadata = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(document.properties.token_id, outcome.token_id);
            assert_eq!(document.attribute("Recipient"), Some(outcome.recipient.name.as_str()));
            assert_eq!(document.attribute("Event"), Some("RustConf 2026"));
            assert!(document.external_url.starts_with("https://certs.test"));

            let image = document.image.expect("image uri");
            assert_eq!(
                harness.local.get(content_id(&image)).await.unwrap(),
                b"\x89PNG template".to_vec()
            );
        }
    }

    #[tokio::test]
    async fn test_image_is_stored_once() {
        let harness = LocalHarness::new(ScriptedLedger::new(0)).await;
        let request = request()
            .with_template_image(ImageAsset::new(b"same bytes".to_vec(), None));

        let report = harness
            .services
            .orchestrator
            .execute(&request, &csv_for(&numbered_recipients(2)))
            .await
            .unwrap();

        let image_ids: Vec<_> = report
            .successes
            .iter()
            .filter_map(|outcome| match &outcome.result {
                MintResult::Success(receipt) => receipt.image_content_id.clone(),
                MintResult::Failed(_) => None,
            })
            .collect();
        assert_eq!(image_ids.len(), 2);
        assert_eq!(image_ids[0], image_ids[1]);

        let metadata = harness.local.metadata(&image_ids[0]).await.unwrap();
        assert_eq!(metadata.content_type, "image/png");
        assert_eq!(metadata.size, 10);
    }

    #[tokio::test]
    async fn test_partial_failure_is_localized_and_audited() {
        let rows = numbered_recipients(3);
        let failing = Address::parse(&rows[1].1).unwrap();
        let harness = LocalHarness::new(ScriptedLedger::new(100).timing_out_for(&failing)).await;

        let report = harness
            .services
            .orchestrator
            .execute(&request(), &csv_for(&rows))
            .await
            .unwrap();

        assert_eq!(report.outcome(), BatchOutcome::PartialSuccess);
        assert_eq!(report.total_participants, 3);

        let ids: Vec<u64> = report.successes.iter().map(|o| o.token_id).collect();
        assert_eq!(ids, vec![100, 102]);

        let failure = &report.failures[0];
        assert_eq!(failure.index, 1);
        assert_eq!(failure.token_id, 101);
        assert_eq!(failure.token_id_status, TokenIdStatus::Projected);
        assert!(failure.error_message().unwrap().contains("not confirmed"));
        assert_eq!(report.audit, AuditStatus::Recorded);

        // Reopen the audit file to make sure the record reached disk.
        let reopened: JsonFileRecordStore<BatchAuditRecord> =
            JsonFileRecordStore::open(harness.dir.path().join("data/batches.json"))
                .await
                .unwrap();
        let record = reopened
            .get(&report.batch_id.to_string())
            .await
            .unwrap()
            .expect("audit record");
        assert_eq!(record.succeeded, 2);
        assert_eq!(record.failed, 1);
        assert_eq!(record.outcome, BatchOutcome::PartialSuccess);
        assert_eq!(record.transaction_hashes.len(), 2);
        assert_eq!(record.failed_recipients.len(), 1);
        assert_eq!(record.failed_recipients[0].wallet_address, failing);
    }

    #[tokio::test]
    async fn test_rejected_file_touches_nothing() {
        let harness = LocalHarness::new(ScriptedLedger::new(0)).await;
        let csv = format!(
            "participant_name,wallet_address\nAnn,{}\n,{}\n",
            address(1),
            address(2)
        );

        let err = harness
            .services
            .orchestrator
            .execute(&request(), &csv)
            .await
            .unwrap_err();

        match err {
            IssuerError::RecipientsRejected(report) => {
                assert_eq!(report.errors, vec!["Row 2: participant_name is required".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(harness.ledger.counter_reads(), 0);
        assert!(harness.ledger.minted().is_empty());
        assert!(harness.services.records.batches.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_ledger_aborts_before_uploads() {
        let harness = LocalHarness::new(ScriptedLedger::new(0).unreachable()).await;

        let err = harness
            .services
            .orchestrator
            .execute(&request(), &csv_for(&numbered_recipients(2)))
            .await
            .unwrap_err();

        assert!(matches!(err, IssuerError::Unavailable(_)));
        assert!(!harness.dir.path().join("content").read_dir().unwrap().any(|entry| {
            entry.map(|e| e.path().is_dir()).unwrap_or(false)
        }));
    }

    #[tokio::test]
    async fn test_missing_content_directory_aborts_before_mints() {
        let harness = LocalHarness::new(ScriptedLedger::new(0)).await;
        std::fs::remove_dir_all(harness.dir.path().join("content")).unwrap();

        let err = harness
            .services
            .orchestrator
            .execute(&request(), &csv_for(&numbered_recipients(2)))
            .await
            .unwrap_err();

        assert!(matches!(err, IssuerError::Unavailable(_)));
        assert!(err.to_string().contains("Content store unavailable"));
        assert!(harness.ledger.minted().is_empty());
        assert!(harness.services.records.batches.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_registered_contract_name_flows_into_metadata() {
        let harness = LocalHarness::new(ScriptedLedger::new(0)).await;
        let deployment: NewDeployment = serde_json::from_value(serde_json::json!({
            "contractAddress": LocalHarness::contract().as_str(),
            "contractName": "Speaker Badges",
            "network": "sepolia",
        }))
        .unwrap();
        harness
            .services
            .records
            .deployments
            .append(deployment.into_record(chrono::Utc::now()).unwrap())
            .await
            .unwrap();

        let report = harness
            .services
            .orchestrator
            .execute(&request(), &csv_for(&numbered_recipients(1)))
            .await
            .unwrap();

        assert_eq!(report.contract_name.as_deref(), Some("Speaker Badges"));
        let token_uri = match &report.successes[0].result {
            MintResult::Success(receipt) => receipt.token_uri.clone(),
            MintResult::Failed(_) => unreachable!(),
        };
        let bytes = harness.local.get(content_id(&token_uri)).await.unwrap();
        let document: CertificateMetadata = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(document.properties.contract_name.as_deref(), Some("Speaker Badges"));
        assert_eq!(document.attribute("Contract"), Some("Speaker Badges"));
    }

    #[tokio::test]
    async fn test_explicit_contract_name_is_kept() {
        let harness = LocalHarness::new(ScriptedLedger::new(0)).await;
        let request = request().with_contract_name("Keynote Badges");

        let report = harness
            .services
            .orchestrator
            .execute(&request, &csv_for(&numbered_recipients(1)))
            .await
            .unwrap();

        assert_eq!(report.contract_name.as_deref(), Some("Keynote Badges"));
    }
}
