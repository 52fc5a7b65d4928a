// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::{SortDirection, SortKey, SortSpec, TabKind};

/// Dashboard shell state: active tab, cosmetic historical month
/// selector, sort selection, unsaved-forecasts flag, and the transient
/// acknowledgment. All transitions go through `dispatch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub active_tab: TabKind,
    pub months: Vec<String>,
    pub month_index: usize,
    pub sort: Option<SortSpec>,
    pub unsaved_forecasts: bool,
    pub acknowledgment: bool,
    pub status_line: Option<String>,
}

impl AppState {
    pub fn new(active_tab: TabKind, months: Vec<String>, month_index: usize) -> Self {
        let month_index = if months.is_empty() {
            0
        } else {
            month_index.min(months.len() - 1)
        };
        Self {
            active_tab,
            months,
            month_index,
            sort: None,
            unsaved_forecasts: false,
            acknowledgment: false,
            status_line: None,
        }
    }

    pub fn selected_month(&self) -> Option<&str> {
        self.months.get(self.month_index).map(String::as_str)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TabKind::ThisMonth, Vec::new(), 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextTab,
    PrevTab,
    SetActiveTab(TabKind),
    NextMonth,
    PrevMonth,
    CycleSort(SortKey),
    MarkUnsavedForecasts,
    CommitAllForecasts,
    ShowAcknowledgment,
    ClearAcknowledgment,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    TabChanged(TabKind),
    MonthChanged(String),
    SortChanged(SortSpec),
    UnsavedForecastsChanged(bool),
    AcknowledgmentShown,
    AcknowledgmentCleared,
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextTab => self.rotate_tab(1),
            AppCommand::PrevTab => self.rotate_tab(-1),
            AppCommand::SetActiveTab(tab) => {
                self.active_tab = tab;
                vec![AppEvent::TabChanged(tab)]
            }
            AppCommand::NextMonth => self.rotate_month(1),
            AppCommand::PrevMonth => self.rotate_month(-1),
            AppCommand::CycleSort(key) => self.cycle_sort(key),
            AppCommand::MarkUnsavedForecasts => {
                if self.unsaved_forecasts {
                    return Vec::new();
                }
                self.unsaved_forecasts = true;
                vec![AppEvent::UnsavedForecastsChanged(true)]
            }
            AppCommand::CommitAllForecasts => {
                self.unsaved_forecasts = false;
                self.acknowledgment = true;
                vec![
                    AppEvent::UnsavedForecastsChanged(false),
                    AppEvent::AcknowledgmentShown,
                ]
            }
            AppCommand::ShowAcknowledgment => {
                self.acknowledgment = true;
                vec![AppEvent::AcknowledgmentShown]
            }
            AppCommand::ClearAcknowledgment => {
                self.acknowledgment = false;
                vec![AppEvent::AcknowledgmentCleared]
            }
            AppCommand::SetStatus(message) => {
                vec![self.set_status(&message)]
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<AppEvent> {
        let tabs = TabKind::ALL;
        let current = tabs
            .iter()
            .position(|tab| *tab == self.active_tab)
            .unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_tab = tabs[next];
        vec![AppEvent::TabChanged(self.active_tab)]
    }

    fn rotate_month(&mut self, delta: isize) -> Vec<AppEvent> {
        if self.months.is_empty() {
            return Vec::new();
        }
        let len = self.months.len() as isize;
        let next = (self.month_index as isize + delta).rem_euclid(len) as usize;
        self.month_index = next;
        vec![AppEvent::MonthChanged(self.months[next].clone())]
    }

    /// Toggling the active key flips direction; a new key resets to
    /// ascending.
    fn cycle_sort(&mut self, key: SortKey) -> Vec<AppEvent> {
        let direction = match self.sort {
            Some(spec) if spec.key == key && spec.direction == SortDirection::Asc => {
                SortDirection::Desc
            }
            Some(spec) if spec.key == key => SortDirection::Asc,
            _ => SortDirection::Asc,
        };
        let spec = SortSpec { key, direction };
        self.sort = Some(spec);
        let label = match direction {
            SortDirection::Asc => format!("sort {} asc", key.label()),
            SortDirection::Desc => format!("sort {} desc", key.label()),
        };
        vec![AppEvent::SortChanged(spec), self.set_status(&label)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
