mod common;

use common::{FakeUpstream, NAMELESS, RATE_LIMIT};
use name_api::{BlockingNameApi, ClientConfig, Mode, NameApiError};

// The blocking client owns its own runtime, so it runs on a blocking thread
// while the fake upstream is served from the test runtime.
#[tokio::test(flavor = "multi_thread")]
async fn blocking_lookup_matches_concurrent_semantics() {
    let upstream = FakeUpstream::spawn().await;
    let names: Vec<String> = (0..11).map(|i| format!("Name{i}")).collect();
    let api = BlockingNameApi::new(names, &upstream.config(Mode::All)).unwrap();

    let record = tokio::task::spawn_blocking(move || api.lookup())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(upstream.requests(), 6);
    assert_eq!(record.len(), 11);
    assert!(record.iter().all(|(_, p)| p.age().is_some()
        && p.gender().is_some()
        && !p.countries().is_empty()));
}

#[tokio::test(flavor = "multi_thread")]
async fn blocking_lenient_lookup_skips_nameless_entry() {
    let upstream = FakeUpstream::spawn().await;
    let config = ClientConfig {
        ignore_errors: true,
        ..upstream.config(Mode::Gender)
    };
    let api = BlockingNameApi::new(["Maria", NAMELESS], &config).unwrap();

    let record = tokio::task::spawn_blocking(move || api.lookup())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(record.len(), 1);
    assert_eq!(record.get("Maria").unwrap().gender(), Some("female"));
}

#[tokio::test(flavor = "multi_thread")]
async fn blocking_probe_reads_remaining_quota() {
    let upstream = FakeUpstream::spawn().await;
    let api = BlockingNameApi::new(["Alice"], &upstream.config(Mode::Age)).unwrap();

    let remaining = tokio::task::spawn_blocking(move || api.limit_remaining())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(remaining, (RATE_LIMIT - 1) as u64);
    assert_eq!(upstream.requests(), 1);
}

#[test]
fn blocking_lookup_without_names_sends_nothing() {
    let api = BlockingNameApi::new(Vec::<String>::new(), &ClientConfig::default()).unwrap();
    assert!(matches!(api.lookup(), Err(NameApiError::EmptyInput)));
}
