//! Startup registration sweep over HTTP clients.

use std::sync::Arc;

use crate::http_adapter::stub::{PASSWORD, StubAdapter, USERNAME, unreachable_address};
use dbaas_aggregator::adapter::{
    adapters::{http::HttpAdapterClientFactory, memory::InMemoryAdapterRegistry},
    domain::{
        AdapterAddress, ApiVersionTag, Credentials, DatabaseType, PhysicalDatabaseId,
        RegisteredAdapter,
    },
    ports::{AdapterClientError, AdapterRegistry},
    services::{StartupRegistrationSweep, SweepError},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use secrecy::SecretString;

const FORCE_REGISTRATION_PATH: &str = "/api/v2/dbaas/adapter/physical_database/force_registration";

type HttpSweep = StartupRegistrationSweep<InMemoryAdapterRegistry, HttpAdapterClientFactory>;

#[fixture]
fn registry() -> Arc<InMemoryAdapterRegistry> {
    Arc::new(InMemoryAdapterRegistry::new())
}

fn sweep(registry: &Arc<InMemoryAdapterRegistry>) -> HttpSweep {
    StartupRegistrationSweep::new(
        Arc::clone(registry),
        Arc::new(HttpAdapterClientFactory::new().expect("http factory")),
        Credentials::new(USERNAME, SecretString::from(PASSWORD.to_owned()))
            .expect("valid credentials"),
    )
}

async fn accepting_adapter() -> StubAdapter {
    StubAdapter::builder()
        .route("POST", FORCE_REGISTRATION_PATH, 200, "{}")
        .start()
        .await
        .expect("stub start")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_continues_past_failing_adapters(registry: Arc<InMemoryAdapterRegistry>) {
    let first = accepting_adapter().await;
    let broken = StubAdapter::builder()
        .route("POST", FORCE_REGISTRATION_PATH, 500, "{}")
        .start()
        .await
        .expect("stub start");
    let last = accepting_adapter().await;
    let offline = unreachable_address().await.expect("free port");
    let configured = format!(
        "{}, {}, {offline}, {}/",
        first.address(),
        broken.address(),
        last.address()
    );

    let report = sweep(&registry).run(Some(&configured)).await;

    let registered: Vec<&str> = report.registered.iter().map(AdapterAddress::as_str).collect();
    assert_eq!(registered, vec![first.address(), last.address()]);
    assert_eq!(report.failed.len(), 2);
    assert!(report.failed.iter().any(|failure| matches!(
        failure.error,
        SweepError::Client(AdapterClientError::UnexpectedStatus { status: 500, .. })
    )));
    assert!(report.failed.iter().any(|failure| failure.address == offline
        && matches!(failure.error, SweepError::Client(AdapterClientError::Transport(_)))));
    assert_eq!(first.requests().len(), 1);
    assert_eq!(last.requests().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn known_adapters_are_not_contacted(registry: Arc<InMemoryAdapterRegistry>) {
    let known = accepting_adapter().await;
    let address = AdapterAddress::new(known.address()).expect("valid address");
    registry
        .save(&RegisteredAdapter::new(
            PhysicalDatabaseId::new("pg-1").expect("valid id"),
            address.clone(),
            DatabaseType::new("postgresql").expect("valid type"),
            ApiVersionTag::v2(),
            &DefaultClock,
        ))
        .await
        .expect("seed registry");

    let report = sweep(&registry).run(Some(known.address())).await;

    assert_eq!(report.skipped, vec![address]);
    assert_eq!(report.attempted(), 0);
    assert!(known.requests().is_empty());
}

#[rstest]
#[case::absent(None)]
#[case::blank(Some("  , ,"))]
#[tokio::test(flavor = "multi_thread")]
async fn empty_configuration_does_nothing(
    registry: Arc<InMemoryAdapterRegistry>,
    #[case] configured: Option<&str>,
) {
    let report = sweep(&registry).run(configured).await;

    assert!(report.registered.is_empty());
    assert!(report.skipped.is_empty());
    assert!(report.failed.is_empty());
}
