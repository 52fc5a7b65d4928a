// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use revdash_app::TabKind;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const DEFAULT_TRACE_FILE: &str = "saved-snapshots.jsonl";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub trace: Trace,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            trace: Trace::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub start_tab: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            start_tab: Some(TabKind::ThisMonth.as_str().to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Trace {
    pub enabled: Option<bool>,
    pub path: Option<String>,
}

impl Default for Trace {
    fn default() -> Self {
        Self {
            enabled: Some(false),
            path: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("REVDASH_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let app_dir = app_config_dir()?;
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and move values under [ui] and [trace]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(start_tab) = &self.ui.start_tab
            && TabKind::parse(start_tab).is_none()
        {
            bail!(
                "ui.start_tab in {} must be one of: {}; got {:?}",
                path.display(),
                TabKind::ALL.map(TabKind::as_str).join(", "),
                start_tab
            );
        }

        if let Some(trace_path) = &self.trace.path
            && trace_path.trim().is_empty()
        {
            bail!("trace.path in {} must not be empty", path.display());
        }

        Ok(())
    }

    pub fn start_tab(&self) -> TabKind {
        self.ui
            .start_tab
            .as_deref()
            .and_then(TabKind::parse)
            .unwrap_or(TabKind::ThisMonth)
    }

    pub fn trace_enabled(&self) -> bool {
        self.trace.enabled.unwrap_or(false)
    }

    /// Config value wins over the `REVDASH_TRACE_PATH` env override,
    /// which wins over the default file next to the config.
    pub fn trace_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.trace.path {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = env::var_os("REVDASH_TRACE_PATH") {
            return Ok(PathBuf::from(path));
        }
        Ok(app_config_dir()?.join(DEFAULT_TRACE_FILE))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# revdash config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\n# One of: this_month, next_three_months\nstart_tab = \"this_month\"\n\n[trace]\n# Append a JSON line of the full client snapshot on every save action.\nenabled = false\n# path = \"/absolute/path/to/{}\"\n",
            path.display(),
            DEFAULT_TRACE_FILE,
        )
    }
}

fn app_config_dir() -> Result<PathBuf> {
    let config_root = dirs::config_dir().ok_or_else(|| {
        anyhow!("cannot resolve config directory; set REVDASH_CONFIG_PATH to the config file")
    })?;
    Ok(config_root.join("revdash"))
}
