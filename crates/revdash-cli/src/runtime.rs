// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use revdash_app::{ClientId, ClientRecord, SortDirection, SortKey};
use revdash_store::Store;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// One JSON line per save action when tracing is enabled.
#[derive(Debug, Serialize)]
struct SnapshotTrace<'a> {
    saved_at: String,
    clients: &'a [ClientRecord],
}

pub struct StoreRuntime {
    store: Store,
    trace_path: Option<PathBuf>,
}

impl StoreRuntime {
    pub fn new(store: Store, trace_path: Option<PathBuf>) -> Self {
        Self { store, trace_path }
    }
}

impl revdash_tui::AppRuntime for StoreRuntime {
    fn load_clients(&mut self) -> Result<Vec<ClientRecord>> {
        Ok(self.store.snapshot())
    }

    fn apply_sort(&mut self, key: SortKey, direction: SortDirection) -> Result<()> {
        self.store.apply_sort(key, direction);
        Ok(())
    }

    fn set_comment(&mut self, id: ClientId, text: &str) -> Result<()> {
        self.store.set_comment(id, text);
        Ok(())
    }

    fn set_future_forecast(&mut self, id: ClientId, month: &str, value: f64) -> Result<()> {
        self.store.set_future_forecast(id, month, value);
        Ok(())
    }

    fn record_saved_snapshot(&mut self, clients: &[ClientRecord]) -> Result<()> {
        let Some(path) = &self.trace_path else {
            return Ok(());
        };

        let saved_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .context("format trace timestamp")?;
        let line = serde_json::to_string(&SnapshotTrace { saved_at, clients })
            .context("encode snapshot trace")?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create trace directory {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open trace file {}", path.display()))?;
        writeln!(file, "{line}").with_context(|| format!("append trace {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::StoreRuntime;
    use anyhow::Result;
    use revdash_app::{ClientId, SortDirection, SortKey};
    use revdash_store::Store;
    use revdash_tui::AppRuntime;

    #[test]
    fn load_clients_returns_seeded_snapshot() -> Result<()> {
        let mut runtime = StoreRuntime::new(Store::with_mock_clients(), None);
        let clients = runtime.load_clients()?;
        assert_eq!(clients.len(), 3);
        assert_eq!(clients[0].name, "Client A");
        Ok(())
    }

    #[test]
    fn mutations_delegate_to_the_store() -> Result<()> {
        let mut runtime = StoreRuntime::new(Store::with_mock_clients(), None);
        runtime.set_comment(ClientId::new(2), "follow up")?;
        runtime.set_future_forecast(ClientId::new(1), "January 2027", 52_500.0)?;
        runtime.apply_sort(SortKey::Actual, SortDirection::Desc)?;

        let clients = runtime.load_clients()?;
        assert_eq!(clients[0].name, "Client B");
        assert_eq!(clients[0].comment, "follow up");
        let client_a = clients.iter().find(|c| c.id == ClientId::new(1)).expect("client 1");
        assert_eq!(client_a.future_forecast.get("January 2027"), Some(&52_500.0));
        Ok(())
    }

    #[test]
    fn snapshot_trace_appends_one_json_line_per_save() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let trace_path = temp.path().join("traces").join("snapshots.jsonl");
        let mut runtime = StoreRuntime::new(Store::with_mock_clients(), Some(trace_path.clone()));

        let clients = runtime.load_clients()?;
        runtime.record_saved_snapshot(&clients)?;
        runtime.record_saved_snapshot(&clients)?;

        let raw = std::fs::read_to_string(&trace_path)?;
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0])?;
        assert!(parsed["saved_at"].is_string());
        assert_eq!(parsed["clients"].as_array().map(Vec::len), Some(3));
        assert_eq!(parsed["clients"][0]["name"], "Client A");
        Ok(())
    }

    #[test]
    fn disabled_trace_writes_nothing() -> Result<()> {
        let mut runtime = StoreRuntime::new(Store::with_mock_clients(), None);
        let clients = runtime.load_clients()?;
        runtime.record_saved_snapshot(&clients)?;
        Ok(())
    }
}
