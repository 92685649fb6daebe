//! Secret resolution tests.
//!
//! Exercise the full scan, resolve, fallback and cache pipeline against an
//! in-memory store that records every call.

mod support;
use support::*;

use std::sync::Arc;
use std::thread;

use sst_bind::core::env::Environment;
use sst_bind::core::store::MemoryStore;
use sst_bind::error::{Error, SecretError, StoreError};

#[test]
fn test_second_call_is_served_from_cache() {
    let store = Arc::new(MemoryStore::new().with(primary("MY_SECRET"), "my secret value"));
    let secrets = cache(&store, deployed(&["MY_SECRET"]));

    let first = secrets.get_all().unwrap();
    let second = secrets.get_all().unwrap();

    assert_eq!(first, second);
    assert_eq!(store.calls(), 1);
}

#[test]
fn test_no_deferred_secrets() {
    let store = Arc::new(MemoryStore::new());
    let secrets = cache(&store, deployed(&[]));

    assert!(secrets.get_all().unwrap().is_empty());
    assert_eq!(store.calls(), 0);
}

#[test]
fn test_primary_secret() {
    let store = Arc::new(MemoryStore::new().with(primary("MY_SECRET"), "my secret value"));
    let secrets = cache(&store, deployed(&["MY_SECRET"]));

    let all = secrets.get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all["MY_SECRET"], "my secret value");
    assert_eq!(store.calls(), 1);
}

#[test]
fn test_fallback_secret() {
    let store =
        Arc::new(MemoryStore::new().with(fallback("MY_SECRET"), "my fallback secret value"));
    let secrets = cache(&store, deployed(&["MY_SECRET"]));

    assert_eq!(
        secrets.get_one("MY_SECRET").unwrap(),
        "my fallback secret value"
    );

    let requests = store.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].names, vec![primary("MY_SECRET")]);
    assert_eq!(requests[1].names, vec![fallback("MY_SECRET")]);
}

#[test]
fn test_missing_secrets_name_every_id_and_stage() {
    let store = Arc::new(MemoryStore::new());
    let secrets = cache(&store, deployed(&["MY_SECRET", "MY_OTHER_SECRET"]));

    let err = secrets.get_one("MY_SECRET").unwrap_err();
    match &err {
        Error::Secret(SecretError::Unresolved { stage, missing }) => {
            assert_eq!(stage, "prod");
            assert_eq!(missing, &vec!["MY_OTHER_SECRET".to_string(), "MY_SECRET".to_string()]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(
        err.to_string(),
        "the following secrets are not set in the prod stage: MY_OTHER_SECRET, MY_SECRET"
    );

    // get_all surfaces the same aggregate error
    assert!(matches!(
        secrets.get_all(),
        Err(Error::Secret(SecretError::Unresolved { .. }))
    ));
}

#[test]
fn test_missing_secret_can_be_provisioned_later() {
    let empty = Arc::new(MemoryStore::new());
    let secrets = cache(&empty, deployed(&["LATE"]));
    assert!(secrets.get_one("LATE").is_err());

    let provisioned = Arc::new(MemoryStore::new().with(fallback("LATE"), "here now"));
    secrets.reset(provisioned.clone());
    assert_eq!(secrets.get_one("LATE").unwrap(), "here now");
}

#[test]
fn test_get_one_not_found_after_success() {
    let store = Arc::new(MemoryStore::new().with(primary("MY_SECRET"), "v"));
    let secrets = cache(&store, deployed(&["MY_SECRET"]));

    let err = secrets.get_one("NOT_BOUND").unwrap_err();
    assert!(matches!(err, Error::Secret(SecretError::NotFound(ref name)) if name == "NOT_BOUND"));
    assert_eq!(err.to_string(), "no secret set with name NOT_BOUND");
}

#[test]
fn test_get_one_surfaces_store_errors() {
    let store = Arc::new(MemoryStore::failing(StoreError::Request(
        "AccessDeniedException".into(),
    )));
    let secrets = cache(&store, deployed(&["MY_SECRET"]));

    let err = secrets.get_one("MY_SECRET").unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::Request(_))));
    assert!(!secrets.is_cached());
}

#[test]
fn test_lookups_are_batched_by_ten() {
    let ids: Vec<String> = (0..23).map(|i| format!("SECRET_{:02}", i)).collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();

    let store = ids
        .iter()
        .fold(MemoryStore::new(), |store, id| store.with(primary(id), id.to_lowercase()));
    let store = Arc::new(store);
    let secrets = cache(&store, deployed(&refs));

    let all = secrets.get_all().unwrap();
    assert_eq!(all.len(), 23);
    assert_eq!(all["SECRET_22"], "secret_22");

    let sizes: Vec<usize> = store.requests().iter().map(|r| r.names.len()).collect();
    assert_eq!(sizes, vec![10, 10, 3]);
}

#[test]
fn test_mixed_primary_and_fallback() {
    let store = Arc::new(
        MemoryStore::new()
            .with(primary("STAGED"), "staged value")
            .with(fallback("SHARED"), "shared value"),
    );
    let secrets = cache(&store, deployed(&["STAGED", "SHARED"]));

    let all = secrets.get_all().unwrap();
    assert_eq!(all["STAGED"], "staged value");
    assert_eq!(all["SHARED"], "shared value");
    assert_eq!(store.calls(), 2);
}

#[test]
fn test_concurrent_callers_share_one_resolution() {
    let store = Arc::new(MemoryStore::new().with(primary("MY_SECRET"), "v"));
    let secrets = Arc::new(cache(&store, deployed(&["MY_SECRET"])));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let secrets = Arc::clone(&secrets);
            thread::spawn(move || secrets.get_one("MY_SECRET").unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "v");
    }
    assert_eq!(store.calls(), 1);
}

#[test]
fn test_non_secret_deferred_bindings_are_ignored() {
    let mut env = deployed(&[]);
    env.set("SST_Table_tableName_Notes", "__FETCH_FROM_SSM__");
    env.set("SST_Secret_value_PLAIN", "literal");

    let store = Arc::new(MemoryStore::new());
    let secrets = cache(&store, env);

    assert!(secrets.get_all().unwrap().is_empty());
    assert_eq!(store.calls(), 0);
}

#[test]
fn test_prefix_comes_from_environment() {
    let env = Environment::from_pairs([
        ("SST_SSM_PREFIX", "/custom/"),
        ("SST_Secret_value_TOKEN", "__FETCH_FROM_SSM__"),
    ]);
    let store = Arc::new(MemoryStore::new().with("/custom/Secret/TOKEN/value", "t0k3n"));
    let secrets = cache(&store, env);

    assert_eq!(secrets.get_one("TOKEN").unwrap(), "t0k3n");
}
