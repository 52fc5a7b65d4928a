// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;

use crate::model::{ClientRecord, SortDirection, SortKey};

/// Reordered copy of `records` by `key` and `direction`. The sort is
/// stable: records comparing equal keep their prior relative order, so
/// repeated sorts are deterministic.
pub fn sort_by(records: &[ClientRecord], key: SortKey, direction: SortDirection) -> Vec<ClientRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|left, right| {
        let order = compare(left, right, key);
        match direction {
            SortDirection::Asc => order,
            SortDirection::Desc => order.reverse(),
        }
    });
    sorted
}

fn compare(left: &ClientRecord, right: &ClientRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => left.name.cmp(&right.name),
        SortKey::Forecast => left.forecast.total_cmp(&right.forecast),
        SortKey::Actual => left.actual.total_cmp(&right.actual),
        SortKey::Difference => left.difference().total_cmp(&right.difference()),
    }
}
