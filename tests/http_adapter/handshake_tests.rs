//! Registration handshake and version probing over HTTP.

use std::sync::Arc;

use crate::http_adapter::stub::{BASIC_AUTH, PASSWORD, StubAdapter, USERNAME, unreachable_address};
use dbaas_aggregator::adapter::{
    adapters::{http::HttpHandshakeClient, memory::InMemoryAdapterRegistry},
    domain::{
        AdapterAddress, ApiVersionTag, Credentials, DatabaseType, HandshakeError,
        HandshakeOutcome, HandshakeRequest, PhysicalDatabaseId,
    },
    ports::{AdapterRegistry, PhysicalDatabaseHandshake},
    services::{
        PhysicalDatabaseRegistrationError, PhysicalDatabaseRegistrationService,
        RegisterPhysicalDatabaseRequest,
    },
};
use mockable::DefaultClock;
use rstest::rstest;
use secrecy::SecretString;

const V2_PATH: &str = "/api/v2/dbaas/adapter/postgresql/physical_database";
const V1_PATH: &str = "/api/v1/dbaas/adapter/postgresql/physical_database";

fn request_for(address: &str, expected_id: &str) -> HandshakeRequest {
    HandshakeRequest::new(
        PhysicalDatabaseId::new(expected_id).expect("valid id"),
        AdapterAddress::new(address).expect("valid address"),
        DatabaseType::new("postgresql").expect("valid type"),
        Credentials::new(USERNAME, SecretString::from(PASSWORD.to_owned()))
            .expect("valid credentials"),
        ApiVersionTag::v2(),
    )
}

#[rstest]
#[case::matching_id(200, r#"{"id":"pg-1"}"#, true)]
#[case::extra_fields(200, r#"{"id":"pg-1","labels":{"zone":"a"}}"#, true)]
#[case::not_found(404, r#"{"error":"unknown"}"#, false)]
#[case::server_error(503, "{}", false)]
#[case::accepted_is_not_ok(202, r#"{"id":"pg-1"}"#, false)]
#[case::unreadable_body(200, "<html></html>", false)]
#[case::empty_id(200, r#"{"id":"  "}"#, false)]
#[tokio::test(flavor = "multi_thread")]
async fn handshake_outcome_follows_response(
    #[case] status: u16,
    #[case] body: &str,
    #[case] confirmed: bool,
) {
    let stub = StubAdapter::builder()
        .route("POST", V2_PATH, status, body)
        .start()
        .await
        .expect("stub start");

    let outcome = HttpHandshakeClient::default()
        .handshake(&request_for(stub.address(), "pg-1"))
        .await;

    if confirmed {
        assert_eq!(outcome, HandshakeOutcome::Confirmed);
    } else {
        assert!(
            matches!(outcome, HandshakeOutcome::Unavailable { .. }),
            "expected unavailable, got {outcome:?}"
        );
    }
    let requests = stub.requests();
    let sent = requests.first().expect("handshake request");
    assert_eq!(sent.method, "POST");
    assert_eq!(sent.authorization.as_deref(), Some(BASIC_AUTH));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn different_identity_is_a_conflict() {
    let stub = StubAdapter::builder()
        .route("POST", V2_PATH, 200, r#"{"id":"pg-other"}"#)
        .start()
        .await
        .expect("stub start");

    let outcome = HttpHandshakeClient::default()
        .handshake(&request_for(stub.address(), "pg-1"))
        .await;

    assert_eq!(
        outcome,
        HandshakeOutcome::Conflict {
            expected: PhysicalDatabaseId::new("pg-1").expect("valid id"),
            reported: PhysicalDatabaseId::new("pg-other").expect("valid id"),
        }
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_adapter_is_unavailable() {
    let address = unreachable_address().await.expect("free port");

    let outcome = HttpHandshakeClient::default()
        .handshake(&request_for(&address, "pg-1"))
        .await;

    assert!(matches!(outcome, HandshakeOutcome::Unavailable { .. }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registration_falls_back_to_version_one() {
    let stub = StubAdapter::builder()
        .route("POST", V1_PATH, 200, r#"{"id":"pg-1"}"#)
        .start()
        .await
        .expect("stub start");
    let registry = Arc::new(InMemoryAdapterRegistry::new());
    let service = PhysicalDatabaseRegistrationService::new(
        Arc::new(HttpHandshakeClient::default()),
        Arc::clone(&registry),
        Arc::new(DefaultClock),
    );

    let registered = service
        .register(RegisterPhysicalDatabaseRequest::new(
            "pg-1",
            stub.address(),
            "postgresql",
            USERNAME,
            SecretString::from(PASSWORD.to_owned()),
        ))
        .await
        .expect("registration over v1");

    assert_eq!(registered.api_version(), &ApiVersionTag::v1());
    let paths: Vec<String> = stub.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec![V2_PATH.to_owned(), V1_PATH.to_owned()]);
    let stored = registry
        .find_by_address(registered.address())
        .await
        .expect("registry lookup");
    assert_eq!(stored.as_ref(), Some(&registered));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn conflicting_adapter_is_not_registered() {
    let stub = StubAdapter::builder()
        .route("POST", V2_PATH, 200, r#"{"id":"pg-other"}"#)
        .route("POST", V1_PATH, 200, r#"{"id":"pg-1"}"#)
        .start()
        .await
        .expect("stub start");
    let registry = Arc::new(InMemoryAdapterRegistry::new());
    let service = PhysicalDatabaseRegistrationService::new(
        Arc::new(HttpHandshakeClient::default()),
        Arc::clone(&registry),
        Arc::new(DefaultClock),
    );

    let result = service
        .register(RegisterPhysicalDatabaseRequest::new(
            "pg-1",
            stub.address(),
            "postgresql",
            USERNAME,
            SecretString::from(PASSWORD.to_owned()),
        ))
        .await;

    assert!(matches!(
        result,
        Err(PhysicalDatabaseRegistrationError::Handshake(
            HandshakeError::RegistrationConflict { .. }
        ))
    ));
    assert_eq!(stub.requests().len(), 1, "conflict stops version probing");
    assert!(registry.list_all().await.expect("listing").is_empty());
}
