// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use revdash_app::{ClientId, ClientRecord, SortDirection, SortKey, sort};

/// In-memory client record store. The collection is seeded once and
/// never grows or shrinks during a session; `comment` and the
/// forward-month override map are the only mutable fields. Every
/// mutation rebuilds the collection and swaps it in wholesale, so
/// snapshots handed out earlier are never aliased by later edits.
#[derive(Debug, Clone, Default)]
pub struct Store {
    clients: Vec<ClientRecord>,
}

impl Store {
    pub fn new(clients: Vec<ClientRecord>) -> Self {
        Self { clients }
    }

    /// The fixed demo dataset the dashboard launches with.
    pub fn with_mock_clients() -> Self {
        let seed = [
            ("Client A", 50_000.0, 48_000.0),
            ("Client B", 75_000.0, 80_000.0),
            ("Client C", 25_000.0, 22_000.0),
        ];
        let clients = seed
            .into_iter()
            .enumerate()
            .map(|(index, (name, forecast, actual))| ClientRecord {
                id: ClientId::new(index as i64 + 1),
                name: name.to_owned(),
                forecast,
                actual,
                comment: String::new(),
                future_forecast: BTreeMap::new(),
            })
            .collect();
        Self { clients }
    }

    pub fn snapshot(&self) -> Vec<ClientRecord> {
        self.clients.clone()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn get(&self, id: ClientId) -> Option<&ClientRecord> {
        self.clients.iter().find(|client| client.id == id)
    }

    /// Replaces the comment of the matching record. Unknown ids are a
    /// no-op; the caller gets no error either way.
    pub fn set_comment(&mut self, id: ClientId, text: &str) {
        self.replace(|client| {
            if client.id == id {
                let mut updated = client.clone();
                updated.comment = text.to_owned();
                updated
            } else {
                client.clone()
            }
        });
    }

    /// Inserts or overwrites a forward-month override. Unknown ids and
    /// non-finite values are a no-op.
    pub fn set_future_forecast(&mut self, id: ClientId, month: &str, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.replace(|client| {
            if client.id == id {
                let mut updated = client.clone();
                updated.future_forecast.insert(month.to_owned(), value);
                updated
            } else {
                client.clone()
            }
        });
    }

    /// Reorders the stored collection; the reference keeps display
    /// order in the collection itself.
    pub fn apply_sort(&mut self, key: SortKey, direction: SortDirection) {
        self.clients = sort::sort_by(&self.clients, key, direction);
    }

    fn replace(&mut self, map: impl Fn(&ClientRecord) -> ClientRecord) {
        self.clients = self.clients.iter().map(map).collect();
    }
}
