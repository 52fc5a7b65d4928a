// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use revdash_store::Store;

use revdash_app::{ClientId, SortDirection, SortKey};

#[test]
fn mock_seed_matches_launch_dataset() {
    let store = Store::with_mock_clients();
    let clients = store.snapshot();

    assert_eq!(clients.len(), 3);
    assert_eq!(clients[0].name, "Client A");
    assert_eq!(clients[0].forecast, 50_000.0);
    assert_eq!(clients[0].actual, 48_000.0);
    assert_eq!(clients[2].id, ClientId::new(3));
    assert!(clients.iter().all(|client| client.comment.is_empty()));
    assert!(clients.iter().all(|client| client.future_forecast.is_empty()));
}

#[test]
fn set_comment_touches_only_the_matching_record() {
    let mut store = Store::with_mock_clients();
    store.set_comment(ClientId::new(2), "follow up");

    let clients = store.snapshot();
    assert_eq!(clients[0].comment, "");
    assert_eq!(clients[1].comment, "follow up");
    assert_eq!(clients[2].comment, "");
}

#[test]
fn set_comment_overwrites_without_appending() {
    let mut store = Store::with_mock_clients();
    store.set_comment(ClientId::new(1), "call Monday");
    store.set_comment(ClientId::new(1), "resolved");

    assert_eq!(store.get(ClientId::new(1)).map(|c| c.comment.as_str()), Some("resolved"));
}

#[test]
fn unknown_id_mutations_are_noops() {
    let mut store = Store::with_mock_clients();
    let before = store.snapshot();

    store.set_comment(ClientId::new(99), "ghost");
    store.set_future_forecast(ClientId::new(99), "January 2027", 10_000.0);

    assert_eq!(store.snapshot(), before);
}

#[test]
fn non_finite_forecast_values_are_rejected() {
    let mut store = Store::with_mock_clients();
    store.set_future_forecast(ClientId::new(1), "January 2027", f64::NAN);
    store.set_future_forecast(ClientId::new(1), "January 2027", f64::INFINITY);

    assert!(store.get(ClientId::new(1)).is_some_and(|c| c.future_forecast.is_empty()));
}

#[test]
fn future_forecast_overrides_accumulate_per_month() {
    let mut store = Store::with_mock_clients();
    store.set_future_forecast(ClientId::new(1), "January 2027", 52_500.0);
    store.set_future_forecast(ClientId::new(1), "February 2027", 61_000.0);
    store.set_future_forecast(ClientId::new(1), "January 2027", 53_000.0);

    let client = store.get(ClientId::new(1)).expect("client 1 exists");
    assert_eq!(client.future_forecast.len(), 2);
    assert_eq!(client.future_forecast.get("January 2027"), Some(&53_000.0));
    assert_eq!(client.future_forecast.get("February 2027"), Some(&61_000.0));
}

#[test]
fn apply_sort_reorders_stored_collection() {
    let mut store = Store::with_mock_clients();
    store.apply_sort(SortKey::Actual, SortDirection::Desc);

    let ids: Vec<i64> = store.snapshot().iter().map(|c| c.id.get()).collect();
    assert_eq!(ids, vec![2, 1, 3]);
    assert_eq!(store.len(), 3);
}

#[test]
fn snapshot_is_detached_from_later_mutations() {
    let mut store = Store::with_mock_clients();
    let before = store.snapshot();

    store.set_comment(ClientId::new(1), "changed");
    assert_eq!(before[0].comment, "");
}
