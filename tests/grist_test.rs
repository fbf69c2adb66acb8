//! Integration tests for the Grist store against a mock server

use dossier_prefill::adapters::grist::{GristClient, GristStore};
use dossier_prefill::adapters::store::{RecordStore, StoreFilter};
use dossier_prefill::config::{secret_string, GristConfig};
use dossier_prefill::core::mapping::{ColumnMap, MappingPolicy, SourceField};
use dossier_prefill::core::resolver::{RecordResolver, ResolutionOutcome};
use dossier_prefill::domain::{PrefillError, RawValue, SearchKey, StoreError};
use mockito::Matcher;
use std::sync::Arc;

const RECORDS_PATH: &str = "/api/docs/doc123/tables/Table1/records";

const RECORDS: &str = r#"{
  "records": [
    {"id": 7, "fields": {
      "nom_participant": "DUPONT",
      "prenom_participant": "Jean",
      "votre_etablissement": "EPLEFPA Toulouse",
      "dossier_number": 1001,
      "date_depart": 1740787200,
      "civilite": "M."
    }},
    {"id": 9, "fields": {
      "nom_participant": "DUPONT",
      "prenom_participant": "Marie",
      "votre_etablissement": "Lycée de Pamiers",
      "dossier_number": 1002,
      "date_depart": null
    }},
    {"id": 11, "fields": {
      "nom_participant": "DUPONT",
      "prenom_participant": "Paul",
      "votre_etablissement": "EPLEFPA Toulouse",
      "dossier_number": 1003
    }}
  ]
}"#;

fn store(server_url: &str) -> GristStore {
    let config = GristConfig {
        server: server_url.to_string(),
        api_key: secret_string("key".to_string()),
        doc_id: "doc123".to_string(),
        table_id: "Table1".to_string(),
        timeout_seconds: 5,
    };
    GristStore::new(GristClient::new(config).unwrap(), ColumnMap::spreadsheet())
}

#[tokio::test]
async fn test_query_sends_filter_and_injects_row_id() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", RECORDS_PATH)
        .match_header("authorization", "Bearer key")
        .match_query(Matcher::UrlEncoded(
            "filter".into(),
            r#"{"nom_participant":["DUPONT"]}"#.into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RECORDS)
        .create_async()
        .await;

    let store = store(&server.url());
    let filter = StoreFilter::new().with(SourceField::LastName, "DUPONT");
    let rows = store.query(&filter).await.unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].get("id"), Some(&RawValue::Int(7)));
    assert_eq!(rows[0].text("dossier_number").as_deref(), Some("1001"));
    assert_eq!(rows[1].get("date_depart"), Some(&RawValue::Null));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_case_number_filter_accepts_text_and_number() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", RECORDS_PATH)
        .match_query(Matcher::UrlEncoded(
            "filter".into(),
            r#"{"dossier_number":["1002",1002]}"#.into(),
        ))
        .with_status(200)
        .with_body(r#"{"records":[]}"#)
        .create_async()
        .await;

    let store = store(&server.url());
    let filter = StoreFilter::new().with(SourceField::CaseNumber, "1002");
    assert!(store.query(&filter).await.unwrap().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_distinct_institutions_are_sorted() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", RECORDS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(RECORDS)
        .create_async()
        .await;

    let store = store(&server.url());
    let institutions = store
        .list_distinct_institutions(&StoreFilter::new().with(SourceField::LastName, "DUPONT"))
        .await
        .unwrap();

    assert_eq!(institutions, vec!["EPLEFPA Toulouse", "Lycée de Pamiers"]);
}

#[tokio::test]
async fn test_unauthorized_is_an_authentication_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", RECORDS_PATH)
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"error":"Unauthorized"}"#)
        .create_async()
        .await;

    let err = store(&server.url()).test_connection().await.unwrap_err();
    assert!(matches!(
        err,
        PrefillError::Store(StoreError::AuthenticationFailed(_))
    ));
}

#[tokio::test]
async fn test_malformed_body_is_an_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", RECORDS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = store(&server.url())
        .query(&StoreFilter::new())
        .await
        .unwrap_err();
    assert!(matches!(err, PrefillError::Store(StoreError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_resolve_and_select_over_grist() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", RECORDS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(RECORDS)
        .expect(1)
        .create_async()
        .await;

    let resolver = RecordResolver::new(Arc::new(store(&server.url())), MappingPolicy::link());
    let key = SearchKey::new("Dupont", Some("EPLEFPA Toulouse"), None).unwrap();

    let candidates = match resolver.resolve(&key).await.unwrap() {
        ResolutionOutcome::Ambiguous(candidates) => candidates,
        other => panic!("expected candidates, got {other:?}"),
    };
    assert_eq!(candidates.len(), 3);

    let record = resolver.select(&candidates, "7").unwrap();
    assert_eq!(record.first_name, "Jean");
    assert_eq!(
        record.departure_date.map(|d| d.to_string()),
        Some("2025-03-01".to_string())
    );
    assert_eq!(record.source.case_number.map(|n| n.to_string()), Some("1001".to_string()));
    mock.assert_async().await;
}
